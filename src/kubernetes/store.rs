// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Object store abstraction over the Kubernetes API

use crate::error::{Result, SyncSecretError};
use crate::types::SyncSecret;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Namespace, Secret};
use kube::{
    api::{ListParams, PostParams},
    Api, Client, ResourceExt,
};
use tracing::{debug, instrument};

#[cfg(test)]
use mockall::automock;

/// Cluster operations the reconcile pass depends on.
///
/// The production implementation is [`KubeStore`]; tests substitute a mock or
/// an in-memory store.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Get a SyncSecret by namespace and name, None if it does not exist
    async fn get_sync_secret(&self, namespace: &str, name: &str) -> Result<Option<SyncSecret>>;

    /// List secrets across all namespaces, in the order the API server returns them
    async fn list_secrets(&self) -> Result<Vec<Secret>>;

    /// List the names of all namespaces
    async fn list_namespaces(&self) -> Result<Vec<String>>;

    /// Get a secret by namespace and name, None if it does not exist
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<Secret>>;

    /// Create a secret in the given namespace
    async fn create_secret(&self, namespace: &str, secret: &Secret) -> Result<Secret>;

    /// Replace an existing secret.
    ///
    /// The secret must carry the resourceVersion it was read with; a stale
    /// version fails with [`SyncSecretError::WriteConflict`].
    async fn replace_secret(&self, namespace: &str, secret: &Secret) -> Result<Secret>;
}

/// [`ObjectStore`] backed by a live kube [`Client`]
#[derive(Clone)]
pub struct KubeStore {
    client: Client,
}

impl KubeStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for KubeStore {
    #[instrument(skip(self))]
    async fn get_sync_secret(&self, namespace: &str, name: &str) -> Result<Option<SyncSecret>> {
        let api: Api<SyncSecret> = Api::namespaced(self.client.clone(), namespace);
        match api.get(name).await {
            Ok(s) => Ok(Some(s)),
            Err(kube::Error::Api(err)) if err.code == 404 => {
                debug!("SyncSecret {}/{} not found", namespace, name);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    async fn list_secrets(&self) -> Result<Vec<Secret>> {
        let api: Api<Secret> = Api::all(self.client.clone());
        let list = api.list(&ListParams::default()).await?;
        Ok(list.items)
    }

    #[instrument(skip(self))]
    async fn list_namespaces(&self) -> Result<Vec<String>> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        let list = api.list(&ListParams::default()).await?;
        Ok(list.items.iter().map(|ns| ns.name_any()).collect())
    }

    #[instrument(skip(self))]
    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<Secret>> {
        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        match api.get(name).await {
            Ok(s) => Ok(Some(s)),
            Err(kube::Error::Api(err)) if err.code == 404 => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, secret), fields(name = %secret.name_any()))]
    async fn create_secret(&self, namespace: &str, secret: &Secret) -> Result<Secret> {
        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        Ok(api.create(&PostParams::default(), secret).await?)
    }

    #[instrument(skip(self, secret), fields(name = %secret.name_any()))]
    async fn replace_secret(&self, namespace: &str, secret: &Secret) -> Result<Secret> {
        let name = secret.name_any();
        let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        match api.replace(&name, &PostParams::default(), secret).await {
            Ok(s) => Ok(s),
            Err(kube::Error::Api(err)) if err.code == 409 => Err(SyncSecretError::WriteConflict {
                namespace: namespace.to_string(),
                name,
            }),
            Err(e) => Err(e.into()),
        }
    }
}
