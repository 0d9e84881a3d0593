// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! One full reconcile pass for a SyncSecret.

use crate::config::Config;
use crate::error::{Result, SyncSecretError};
use crate::kubernetes::ObjectStore;
use crate::sync::flag::AnnotationFlag;
use crate::sync::namespaces::eligible_targets;
use crate::sync::secrets::{sync_into, SyncOutcome};
use crate::sync::selector::select_source;
use kube::runtime::controller::Action;
use kube::ResourceExt;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// What the scheduler should do after a successful pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Nothing left to reconcile
    Done,
    /// Run another pass after the given delay
    RequeueAfter(Duration),
}

impl Disposition {
    pub fn into_action(self) -> Action {
        match self {
            Disposition::Done => Action::await_change(),
            Disposition::RequeueAfter(after) => Action::requeue(after),
        }
    }
}

/// Replicate the source secret selected by a SyncSecret into every eligible namespace.
///
/// The first failing namespace aborts the pass; replicas already written in
/// this pass are kept. Failures are returned to the caller, which owns retry
/// and backoff.
#[instrument(skip(store, config))]
pub async fn reconcile_pass(
    store: &dyn ObjectStore,
    namespace: &str,
    name: &str,
    config: &Config,
) -> Result<Disposition> {
    let Some(sync_secret) = store.get_sync_secret(namespace, name).await? else {
        debug!("SyncSecret {}/{} is gone, nothing to do", namespace, name);
        return Ok(Disposition::Done);
    };

    let Some(key) = sync_secret.annotation_key() else {
        return Err(SyncSecretError::InvalidSpec(format!(
            "SyncSecret {} has an empty annotationKey",
            sync_secret.identity()
        )));
    };
    let flag = AnnotationFlag::new(key);

    let Some(source) = select_source(store, flag).await? else {
        info!(
            "No secret annotated with {}=true, checking again in {:?}",
            key, config.sync_interval
        );
        return Ok(Disposition::RequeueAfter(config.sync_interval));
    };

    let source_namespace = source.namespace().unwrap_or_default();
    let targets = eligible_targets(store, &source_namespace, &config.excluded_namespaces).await?;

    let (mut created, mut updated) = (0usize, 0usize);
    for target in &targets {
        match sync_into(store, target, &source, flag).await? {
            SyncOutcome::Created => created += 1,
            SyncOutcome::Updated => updated += 1,
        }
    }

    info!(
        "Synced secret {}/{} to {} namespaces ({} created, {} updated)",
        source_namespace,
        source.name_any(),
        targets.len(),
        created,
        updated
    );

    Ok(Disposition::RequeueAfter(config.sync_interval))
}
