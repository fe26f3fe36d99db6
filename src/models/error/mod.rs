mod api;
pub use api::*;

mod repository;
pub use repository::*;

mod bridge;
pub use bridge::*;
