use std::sync::Arc;

use esg_interview::api::{AppState, interview_routes};
use esg_interview::config::{ServerConfig, SmtpConfig};
use esg_interview::flow::FlowCatalog;
use esg_interview::notify::{
    EmailNotifier, LeadNotifier, LogNotifier, notification_channel, spawn_notification_worker,
};
use esg_interview::scoring::LeadScorer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let server_config = ServerConfig::from_env()?;
    let smtp_config = SmtpConfig::from_env()?;

    let catalog = Arc::new(FlowCatalog::builtin()?);
    let scorer = Arc::new(LeadScorer::default());

    eprintln!("🎯 ESG Interview v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: http://{}/api/flows", server_config.bind_address());
    for flow in catalog.iter() {
        eprintln!(
            "   Flow: {} ({} steps, {})",
            flow.kind(),
            flow.len(),
            flow.kind().estimated_time()
        );
    }

    // ── Notifications ─────────────────────────────────────────────────────
    let notifier: Arc<dyn LeadNotifier> = match &smtp_config {
        Some(smtp) => {
            eprintln!(
                "   Lead email: {}:{} → {}",
                smtp.host,
                smtp.port,
                smtp.recipients.join(", ")
            );
            Arc::new(EmailNotifier::new(smtp)?)
        }
        None => {
            eprintln!("   Lead email: disabled (LEAD_SMTP_HOST not set), logging leads instead");
            Arc::new(LogNotifier)
        }
    };
    let (dispatcher, notify_rx) = notification_channel(server_config.notify_queue_capacity);
    let worker = spawn_notification_worker(notify_rx, notifier);

    // ── HTTP server ───────────────────────────────────────────────────────
    let app = interview_routes(AppState {
        catalog,
        scorer,
        dispatcher,
    });
    let listener = tokio::net::TcpListener::bind(server_config.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Interview server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutdown requested");
        })
        .await?;

    // The router (and its dispatcher) is gone; let queued leads drain.
    worker.await?;
    Ok(())
}
