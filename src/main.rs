// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::Client;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use syncsecret::config::Config;
use syncsecret::constants::OPERATOR_NAME;
use syncsecret::kubernetes::wait_for_sync_secret_crd;
use syncsecret::reconcilers::SyncSecretReconciler;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting {} operator", OPERATOR_NAME);

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: sync_interval={:?}, error_requeue={:?}, excluded_namespaces={:?}",
        config.sync_interval, config.error_requeue, config.excluded_namespaces
    );

    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    info!("Waiting for SyncSecret CRD to become available...");
    wait_for_sync_secret_crd(&client).await?;

    let reconciler = SyncSecretReconciler::new(client, config);

    info!("Starting reconciler...");
    reconciler.run().await?;

    warn!("Reconciler stopped");
    Ok(())
}
