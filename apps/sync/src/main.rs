//! CloudAMQP connector sync runtime.

#![forbid(unsafe_code)]

mod sync_config;

use std::path::Path;
use std::sync::Arc;

use cloudamqp_application::{CloudAmqpConnector, ConnectorOptions, SyncService, SyncSnapshot};
use cloudamqp_core::{AppError, AppResult};
use cloudamqp_infrastructure::HttpTeamDirectory;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sync_config::SyncConfig;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(error) = run().await {
        error!(error = %error, "cloudamqp-sync failed");
        return Err(error);
    }

    Ok(())
}

async fn run() -> AppResult<()> {
    let config = SyncConfig::load()?;
    let http_client = build_http_client(&config)?;
    let directory = HttpTeamDirectory::new(
        http_client,
        config.api_base_url.as_str(),
        config.api_key.as_str(),
    )?;
    let connector = CloudAmqpConnector::new(
        Arc::new(directory),
        ConnectorOptions {
            provisioning: config.provisioning,
        },
    );

    info!(
        api_base_url = %config.api_base_url,
        provisioning = config.provisioning,
        output_path = %config.output_path.display(),
        "cloudamqp-sync started"
    );

    let snapshot = SyncService::new(connector).run().await?;
    write_snapshot(config.output_path.as_path(), &snapshot).await?;

    info!(
        run_id = %snapshot.run_id,
        output_path = %config.output_path.display(),
        "sync snapshot written"
    );

    Ok(())
}

fn build_http_client(config: &SyncConfig) -> AppResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(format!(
        "cloudamqp-sync/{}",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(timeout) = config.http_timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build HTTP client: {error}")))
}

async fn write_snapshot(path: &Path, snapshot: &SyncSnapshot) -> AppResult<()> {
    let payload = serde_json::to_vec_pretty(snapshot).map_err(|error| {
        AppError::Internal(format!("failed to serialize sync snapshot: {error}"))
    })?;

    tokio::fs::write(path, payload).await.map_err(|error| {
        AppError::Internal(format!(
            "failed to write sync snapshot to '{}': {error}",
            path.display()
        ))
    })
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
