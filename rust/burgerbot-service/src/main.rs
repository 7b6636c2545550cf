use anyhow::Context;
use tracing_subscriber::{fmt, EnvFilter};

use burgerbot_service::{build_router, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cfg = Config::from_env()?;
    let addr = cfg.addr()?;
    let app = build_router(AppState::new(cfg));
    tracing::info!(core_version=%burgerbot_core::version(), addr=%addr, "starting burgerbot-service");
    let listener = tokio::net::TcpListener::bind(addr).await.with_context(|| format!("bind {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
