// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use kube::{CustomResource, ResourceExt};
use serde::{Deserialize, Serialize};

/// Declares which annotation marks the source secret to replicate.
#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[kube(group = "sync.abroadme.me", version = "v1", kind = "SyncSecret")]
#[kube(namespaced)]
#[kube(status = "SyncSecretStatus")]
#[serde(rename_all = "camelCase")]
pub struct SyncSecretSpec {
    /// Annotation key whose value "true" marks the source secret
    #[serde(default)]
    pub annotation_key: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncSecretStatus {}

impl SyncSecret {
    /// The configured annotation key, or None when it is blank
    pub fn annotation_key(&self) -> Option<&str> {
        let key = self.spec.annotation_key.as_str();
        (!key.trim().is_empty()).then_some(key)
    }

    /// "namespace/name" identity used in logs
    pub fn identity(&self) -> String {
        format!("{}/{}", self.namespace().unwrap_or_default(), self.name_any())
    }
}
