use std::sync::Arc;

use crate::{
    domain::{BridgeService, RelayProcessor},
    events::InProcessEventBus,
};

#[derive(Clone)]
pub struct AppState {
    pub bridge: Arc<BridgeService>,
    pub processor: Arc<RelayProcessor>,
    pub event_bus: Arc<InProcessEventBus>,
}

impl AppState {
    pub fn bridge(&self) -> Arc<BridgeService> {
        self.bridge.clone()
    }

    pub fn processor(&self) -> Arc<RelayProcessor> {
        self.processor.clone()
    }

    pub fn event_bus(&self) -> Arc<InProcessEventBus> {
        self.event_bus.clone()
    }
}
