// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! SyncSecret reconciler - runs a reconcile pass for every SyncSecret watch event or requeue.

use crate::config::Config;
use crate::error::{Result, SyncSecretError};
use crate::kubernetes::{KubeStore, ObjectStore};
use crate::sync::reconcile_pass;
use crate::types::SyncSecret;
use futures::StreamExt;
use kube::{
    runtime::{controller::Action, Controller},
    Api, Client, ResourceExt,
};
use kube_runtime::watcher::Config as WatcherConfig;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct SyncSecretReconciler {
    client: Client,
    store: Arc<dyn ObjectStore>,
    config: Config,
}

impl SyncSecretReconciler {
    pub fn new(client: Client, config: Config) -> Self {
        let store = Arc::new(KubeStore::new(client.clone()));
        Self::with_store(client, store, config)
    }

    pub fn with_store(client: Client, store: Arc<dyn ObjectStore>, config: Config) -> Self {
        Self {
            client,
            store,
            config,
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let sync_secrets: Api<SyncSecret> = match &self.config.watch_namespace {
            Some(ns) => {
                info!("Watching SyncSecrets in namespace {}", ns);
                Api::namespaced(self.client.clone(), ns)
            }
            None => {
                info!("Watching SyncSecrets in all namespaces");
                Api::all(self.client.clone())
            }
        };
        let context = Arc::new(self);

        Controller::new(sync_secrets, WatcherConfig::default())
            .shutdown_on_signal()
            .run(reconcile, error_policy, context)
            .for_each(|res| async move {
                match res {
                    Ok(o) => debug!("Reconciled SyncSecret: {:?}", o),
                    Err(e) => warn!("Reconciliation error: {:?}", e),
                }
            })
            .await;

        Ok(())
    }
}

async fn reconcile(sync_secret: Arc<SyncSecret>, ctx: Arc<SyncSecretReconciler>) -> Result<Action> {
    let name = sync_secret.name_any();
    let namespace = sync_secret.namespace().unwrap_or_default();

    debug!("Reconciling SyncSecret: {}/{}", namespace, name);

    let disposition = reconcile_pass(ctx.store.as_ref(), &namespace, &name, &ctx.config).await?;
    Ok(disposition.into_action())
}

fn error_policy(
    sync_secret: Arc<SyncSecret>,
    error: &SyncSecretError,
    ctx: Arc<SyncSecretReconciler>,
) -> Action {
    error!(
        "Reconciliation of SyncSecret {} failed: {}",
        sync_secret.identity(),
        error
    );
    Action::requeue(ctx.config.error_requeue)
}
