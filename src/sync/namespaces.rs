// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Target namespace enumeration

use crate::error::Result;
use crate::kubernetes::ObjectStore;
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// List the namespaces a source secret should be replicated into.
///
/// Drops excluded namespaces and the source namespace, keeping the store's
/// listing order.
#[instrument(skip(store, excluded))]
pub async fn eligible_targets(
    store: &dyn ObjectStore,
    source_namespace: &str,
    excluded: &BTreeSet<String>,
) -> Result<Vec<String>> {
    let namespaces = store.list_namespaces().await?;
    let targets = filter_targets(namespaces, source_namespace, excluded);
    debug!("{} eligible target namespaces", targets.len());
    Ok(targets)
}

fn filter_targets(
    namespaces: Vec<String>,
    source_namespace: &str,
    excluded: &BTreeSet<String>,
) -> Vec<String> {
    namespaces
        .into_iter()
        .filter(|ns| ns != source_namespace && !excluded.contains(ns))
        .collect()
}
