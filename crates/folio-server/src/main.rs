use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};

use folio_api::{build_router, contact::FileInbox, content::SiteContent, AppState};
use folio_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    // Keep the guard alive so file logs get flushed on shutdown
    let _log_guard = folio_shared::telemetry::init_telemetry(&config.log);

    info!(env = %config.app.env, "Folio server starting...");

    let content = match SiteContent::load(&config.content.path) {
        Ok(content) => content,
        Err(e) => {
            error!("Failed to load site content: {}", e);
            std::process::exit(1);
        }
    };

    let inbox = Arc::new(FileInbox::new(&config.contact.inbox_path));
    info!(path = %config.contact.inbox_path, "Contact inbox ready");

    if config.is_production() && !config.csrf.cookie_secure {
        warn!("csrf.cookie_secure is off in production");
    }

    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));

    let app = build_router(AppState::new(config, content, inbox));

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Folio server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
