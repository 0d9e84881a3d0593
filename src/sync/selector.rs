// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Source secret selection

use crate::error::Result;
use crate::kubernetes::ObjectStore;
use crate::sync::flag::AnnotationFlag;
use k8s_openapi::api::core::v1::Secret;
use kube::ResourceExt;
use tracing::{debug, instrument};

/// Pick the source secret for a flag from all secrets in the cluster.
///
/// Returns the first secret, in store listing order, that has the flag set.
/// When several secrets qualify the choice depends on that order and is not
/// stable across calls.
#[instrument(skip(store), fields(annotation_key = flag.key()))]
pub async fn select_source(
    store: &dyn ObjectStore,
    flag: AnnotationFlag<'_>,
) -> Result<Option<Secret>> {
    let secrets = store.list_secrets().await?;
    let source = first_flagged(secrets, flag);

    match &source {
        Some(s) => debug!(
            "Selected source secret {}/{}",
            s.namespace().unwrap_or_default(),
            s.name_any()
        ),
        None => debug!("No secret has annotation {}=true", flag.key()),
    }

    Ok(source)
}

fn first_flagged(secrets: Vec<Secret>, flag: AnnotationFlag<'_>) -> Option<Secret> {
    secrets.into_iter().find(|s| flag.is_set(s))
}
