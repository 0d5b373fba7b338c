//! Server mode
//!
//! Builds the shared link service and serves it over HTTP.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::Result;
use tracing::warn;

use crate::api::configure_routes;
use crate::api::middleware::RequestIdMiddleware;
use crate::config::StaticConfig;
use crate::runtime::lifetime;

/// 请求体上限
const MAX_PAYLOAD_BYTES: usize = 64 * 1024;

/// Run the HTTP server until it is stopped by a signal.
///
/// **Note**: Logging must be initialized before calling this function.
/// actix-web handles SIGINT/SIGTERM itself and drains workers gracefully.
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_server_startup(config).map_err(|e| {
        tracing::error!("Server startup failed: {}", e);
        e
    })?;
    let link_service = startup.link_service.clone();

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);

    let service_for_workers = link_service.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")))
            .app_data(web::Data::new(service_for_workers.clone()))
            .app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
            .configure(configure_routes)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .workers(cpu_count)
    .bind(&bind_address)?
    .run()
    .await?;

    lifetime::shutdown::on_shutdown(&link_service);
    Ok(())
}
