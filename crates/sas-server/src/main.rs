mod api;
mod middleware;
mod mining;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use sas_campaign::CampaignAssembler;
use sas_core::Environment;

use crate::{
    api::{build_app, AppState},
    middleware::{AuthState, RateLimitState},
    mining::RunLedger,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Arc::new(sas_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let policy = sas_core::load_policy_or_default(&config.policy_path)?;
    let ledger = RunLedger::new(&config.mining_ledger_path, config.mining_interval_hours);
    let auth = AuthState::from_keys(
        config.api_keys.as_deref(),
        matches!(config.env, Environment::Development),
    )?;
    let rate_limit = RateLimitState::per_minute(config.rate_limit_per_minute);

    let state = AppState {
        config: Arc::clone(&config),
        assembler: Arc::new(CampaignAssembler::new(policy)),
        ledger: Arc::new(ledger),
    };
    let app = build_app(state, auth, rate_limit);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "sas-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
