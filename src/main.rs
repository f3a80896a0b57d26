use anyhow::{Context, Result};
use divscraper::{api, ServerConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,divscraper=info,tower_http=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    // ─── 2) config + shared state ────────────────────────────────────
    let cfg = ServerConfig::from_env();
    let addr = cfg.addr();
    info!(
        upstream = %cfg.upstream_url,
        spacing = ?cfg.min_spacing,
        timeout = ?cfg.fetch_timeout,
        "startup"
    );
    let state = api::AppState::new(cfg)?;

    // ─── 3) serve ────────────────────────────────────────────────────
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    let local = listener.local_addr()?;
    info!("dividend proxy listening on http://{local}");
    info!("try: http://{local}/api/dividend?stock_id=2330");

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("all done");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
