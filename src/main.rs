//! SLJ Solutions enquiry API
//!
//! Accepts enquiries from the website forms and relays them by email:
//! one notification to the sales inbox, one thank-you to the visitor.

use slj_enquiry_api::config::Settings;
use slj_enquiry_api::mail::SmtpMailer;
use slj_enquiry_api::routes::create_router;
use slj_enquiry_api::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("🚀 Starting SLJ Solutions enquiry API...");

    let settings = Settings::load()?;
    info!("📋 Configuration loaded ({:?})", settings.environment);

    if settings.environment.exposes_error_details() {
        warn!("⚠️  Error details are included in API responses (APP_ENV=development)");
    }

    let mailer = SmtpMailer::from_config(&settings.mail)?;
    info!("✉️  Enquiry notifications go to {}", settings.mail.admin_email);

    let state = Arc::new(AppState::new(Arc::new(mailer), &settings));
    let app = create_router(state, &settings);

    let addr = SocketAddr::from((settings.server.host, settings.server.port));

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📚 API Endpoints:");
    info!("   GET  /health       - Health check");
    info!("   POST /api/contact  - Submit an enquiry");
    info!("");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutdown complete");
    Ok(())
}

/// Initialize tracing with structured logging
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,slj_enquiry_api=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("📴 Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("📴 Received terminate signal, initiating graceful shutdown...");
        },
    }
}
