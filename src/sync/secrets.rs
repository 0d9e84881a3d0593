// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Replica construction and create-or-update of secrets in target namespaces

use crate::error::{Result, SyncSecretError};
use crate::kubernetes::ObjectStore;
use crate::sync::flag::AnnotationFlag;
use k8s_openapi::api::core::v1::Secret;
use kube::{api::ObjectMeta, ResourceExt};
use tracing::{info, instrument, warn};

/// What a sync into one namespace did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Created,
    Updated,
}

/// Copy the source secret into a target namespace.
///
/// Creates the replica if it does not exist, otherwise replaces it using the
/// existing resourceVersion so a concurrent change fails the write instead of
/// being overwritten.
#[instrument(
    skip(store, source, flag),
    fields(
        secret = %format!("{}/{}", source.namespace().unwrap_or_default(), source.name_any()),
        annotation_key = flag.key()
    )
)]
pub async fn sync_into(
    store: &dyn ObjectStore,
    target_namespace: &str,
    source: &Secret,
    flag: AnnotationFlag<'_>,
) -> Result<SyncOutcome> {
    let mut desired = build_replica(source, target_namespace, flag)?;
    let name = desired.name_any();

    match store.get_secret(target_namespace, &name).await? {
        None => {
            store.create_secret(target_namespace, &desired).await?;
            info!("Created secret {}/{}", target_namespace, name);
            Ok(SyncOutcome::Created)
        }
        Some(existing) => {
            info!("Starting to sync secret {}/{}", target_namespace, name);
            desired.metadata.resource_version = existing.metadata.resource_version;
            if let Err(e) = store.replace_secret(target_namespace, &desired).await {
                if e.is_conflict() {
                    warn!(
                        "Secret {}/{} changed since it was read, leaving it for the next pass",
                        target_namespace, name
                    );
                }
                return Err(e);
            }
            Ok(SyncOutcome::Updated)
        }
    }
}

/// Build the replica of a source secret for a target namespace.
///
/// Payload and type are copied verbatim; the annotations are replaced by the
/// flag alone.
pub fn build_replica(
    source: &Secret,
    target_namespace: &str,
    flag: AnnotationFlag<'_>,
) -> Result<Secret> {
    let Some(name) = source.metadata.name.clone() else {
        return Err(SyncSecretError::MissingName(format!(
            "source secret in namespace {}",
            source.namespace().unwrap_or_default()
        )));
    };

    Ok(Secret {
        metadata: ObjectMeta {
            name: Some(name),
            namespace: Some(target_namespace.to_string()),
            annotations: Some(flag.marker()),
            ..Default::default()
        },
        data: source.data.clone(),
        string_data: source.string_data.clone(),
        type_: source.type_.clone(),
        ..Default::default()
    })
}
