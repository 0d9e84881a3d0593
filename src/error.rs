// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncSecretError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Write conflict on secret {namespace}/{name}: object changed since it was read")]
    WriteConflict { namespace: String, name: String },

    #[error("Invalid SyncSecret spec: {0}")]
    InvalidSpec(String),

    #[error("Secret has no name: {0}")]
    MissingName(String),
}

impl SyncSecretError {
    /// True for errors caused by a stale resourceVersion on update
    pub fn is_conflict(&self) -> bool {
        matches!(self, SyncSecretError::WriteConflict { .. })
    }
}

pub type Result<T> = std::result::Result<T, SyncSecretError>;
