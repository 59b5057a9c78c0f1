// Reverse Percentage Calculator - Web Server
// Serves the single-page calculator and its JSON API over one shared session

use anyhow::{Context, Result};
use revpct::api::{router, AppState};
use revpct::config::Config;
use revpct::logger::{self, LogTarget};
use revpct::Session;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    logger::init(&config.log, LogTarget::Stderr)?;

    let session = Session::with_inputs(config.defaults.total, config.defaults.rate);
    let app = router(AppState::new(session));

    let addr = config.server.bind.as_str();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!(%addr, "Server running");
    info!("API: http://{}/api/session", addr);
    info!("UI:  http://{}/", addr);

    axum::serve(listener, app)
        .await
        .context("Server stopped with an error")?;

    Ok(())
}
