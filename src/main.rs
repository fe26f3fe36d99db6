use std::sync::Arc;

use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{
    dev::Service,
    middleware::{self, Logger},
    web, App, HttpResponse, HttpServer,
};
use color_eyre::{eyre::WrapErr, Result};
use dotenvy::dotenv;
use log::info;
use utoipa::OpenApi;

use bridge_relayer::{
    api,
    config::{load_config, ApiKeyRateLimit, ServerConfig},
    constants::API_KEY_HEADER,
    init::initialize_app_state,
    logging::setup_logging,
    openapi::ApiDoc,
};

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install().wrap_err("Failed to initialize error reporting")?;

    dotenv().ok();
    setup_logging();

    let config = Arc::new(ServerConfig::from_env());
    let bridge_config =
        load_config(&config.config_file_path).wrap_err("Failed to load config file")?;

    let app_state = initialize_app_state(&bridge_config)?;

    let rate_limit_config = GovernorConfigBuilder::default()
        .requests_per_second(config.rate_limit_requests_per_second)
        .key_extractor(ApiKeyRateLimit)
        .burst_size(config.rate_limit_burst_size)
        .finish()
        .unwrap();

    let moved_cfg = Arc::clone(&config);
    info!("Starting server on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        let config = Arc::clone(&moved_cfg);
        App::new()
            .wrap_fn(move |req, srv| {
                // Check for x-api-key header
                let authorized = req
                    .headers()
                    .get(API_KEY_HEADER)
                    .and_then(|header| header.to_str().ok())
                    .map(|key| config.api_key.with_str(|expected| key == expected))
                    .unwrap_or(false);
                if authorized {
                    return srv.call(req);
                }

                Box::pin(async move {
                    Ok(req.into_response(HttpResponse::Unauthorized().body(
                        r#"{"success": false, "data": null, "error": "Unauthorized"}"#.to_string(),
                    )))
                })
            })
            .wrap(Governor::new(&rate_limit_config))
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::DefaultHeaders::new())
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .service(web::scope("/api/v1").configure(api::routes::configure_routes))
            .route(
                "/api-docs/openapi.json",
                web::get().to(|| async { HttpResponse::Ok().json(ApiDoc::openapi()) }),
            )
    })
    .bind((config.host.as_str(), config.port))
    .wrap_err_with(|| format!("Failed to bind server to {}:{}", config.host, config.port))?
    .shutdown_timeout(5)
    .run()
    .await
    .wrap_err("Server runtime error")
}
