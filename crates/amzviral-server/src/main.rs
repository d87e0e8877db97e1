mod api;
mod mail;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use amzviral_db::{MemoryStore, QuotaPolicy};
use amzviral_scraper::{AmazonClient, Discovery};
use amzviral_sheets::{GoogleSheetsClient, SheetsExporter};
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, AppState},
    mail::DisabledMailer,
    middleware::default_user_rate_limit,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Arc::new(amzviral_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = Arc::new(AmazonClient::from_config(&config)?);
    let discovery = Discovery::new(
        client.clone(),
        Duration::from_millis(config.discovery_category_pause_ms),
    );

    let sheets = GoogleSheetsClient::from_config(&config)?
        .map(|c| Arc::new(c) as Arc<dyn SheetsExporter>);
    if sheets.is_none() {
        tracing::warn!("AMZVIRAL_SHEETS_ACCESS_TOKEN not set; spreadsheet export disabled");
    }

    let state = AppState::new(
        Arc::new(MemoryStore::new()),
        Arc::clone(&config),
        Arc::new(discovery),
        client,
        sheets,
        Arc::new(DisabledMailer),
        QuotaPolicy::from_config(&config),
    );
    let app = build_app(state, default_user_rate_limit());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %config.bind_addr,
        env = %config.env,
        quota_limit = config.quota_limit,
        quota_window = %config.quota_window,
        "amzviral server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
