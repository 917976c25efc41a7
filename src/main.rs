use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use forklift_checklist::config::environment::EnvironmentConfig;
use forklift_checklist::create_app;
use forklift_checklist::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚜 Forklift Checklist - Apps Script relay");
    info!("==========================================");

    let config = EnvironmentConfig::from_env().context("invalid configuration")?;
    if !config.is_gateway_configured() {
        warn!("⚠️ GAS_URL is not set, every gateway route will answer 500");
    }

    let addr = config.server_addr();
    let state = AppState::new(config).context("could not build the HTTP client")?;
    let app = create_app(state);

    info!("🌐 Server starting on http://{}", addr);
    info!("🔍 Pages:");
    info!("   GET  / - Dashboard (?driver=<employeeCode> for drill-down)");
    info!("   GET  /check?id=<forkliftCode> - Checklist form");
    info!("   POST /check - Checklist form actions");
    info!("   GET  /admin/missing - Vehicles without a checklist today");
    info!("🔁 Relay API:");
    info!("   GET  /api/employees");
    info!("   GET  /api/forklift/status?forkliftCode=&employeeCode=");
    info!("   POST /api/checklist/submit");
    info!("   GET  /api/admin/missing");
    info!("   GET  /api/admin/summary?days=");
    info!("   GET  /api/admin/drivers?date=");
    info!("   GET  /api/admin/driver-reports?employeeCode=&date=");
    info!("   GET  /health");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("could not bind {addr}"))?;

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Server error: {}", e);
        return Err(e.into());
    }

    info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ Could not listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ Could not install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Ctrl+C received, shutting down...");
        },
        _ = terminate => {
            info!("🛑 Termination signal received, shutting down...");
        },
    }
}
