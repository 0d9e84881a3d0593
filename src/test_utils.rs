// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses and the object store.

use crate::error::{Result, SyncSecretError};
use crate::kubernetes::ObjectStore;
use crate::types::{SyncSecret, SyncSecretSpec};
use async_trait::async_trait;
use http::{Request, Response};
use k8s_openapi::api::core::v1::Secret;
use k8s_openapi::ByteString;
use kube::api::ObjectMeta;
use kube::client::Body;
use kube::{Client, ResourceExt};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    /// Add a response for PUT requests matching the exact path
    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PUT", path, status, body)
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let responses = self.responses.lock().unwrap();
        responses
            .get(&(method.to_string(), path.to_string()))
            .cloned()
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let (status, body) = self
            .find_response(&method, &path)
            .unwrap_or_else(|| (404, not_found_json("resource", &path)));

        Box::pin(async move {
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a mock secret JSON response
pub fn secret_json(name: &str, namespace: &str, resource_version: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Secret",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "resourceVersion": resource_version,
            "uid": "test-uid"
        },
        "type": "Opaque",
        "data": { "u": "dg==" }
    })
    .to_string()
}

/// Create a mock namespace list JSON response
pub fn namespace_list_json(names: &[&str]) -> String {
    let items: Vec<_> = names
        .iter()
        .map(|name| {
            serde_json::json!({
                "apiVersion": "v1",
                "kind": "Namespace",
                "metadata": { "name": name, "uid": "test-uid" }
            })
        })
        .collect();

    serde_json::json!({
        "apiVersion": "v1",
        "kind": "NamespaceList",
        "metadata": { "resourceVersion": "1" },
        "items": items
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    status_json(404, "NotFound", &format!("{} \"{}\" not found", resource, name))
}

/// Create a 409 conflict response as returned for a stale resourceVersion
pub fn conflict_json(resource: &str, name: &str) -> String {
    status_json(
        409,
        "Conflict",
        &format!(
            "Operation cannot be fulfilled on {} \"{}\": the object has been modified; please apply your changes to the latest version and try again",
            resource, name
        ),
    )
}

fn status_json(code: u16, reason: &str, message: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": message,
        "reason": reason,
        "code": code
    })
    .to_string()
}

/// A kube API error with the given status code
pub fn api_error(code: u16) -> SyncSecretError {
    SyncSecretError::KubeError(kube::Error::Api(kube::error::ErrorResponse {
        status: "Failure".to_string(),
        message: format!("injected error {}", code),
        reason: "Injected".to_string(),
        code,
    }))
}

/// Build a secret with the given annotations and string payload
pub fn make_secret(
    name: &str,
    namespace: &str,
    annotations: &[(&str, &str)],
    data: &[(&str, &str)],
) -> Secret {
    let annotations: BTreeMap<String, String> = annotations
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let data: BTreeMap<String, ByteString> = data
        .iter()
        .map(|(k, v)| (k.to_string(), ByteString(v.as_bytes().to_vec())))
        .collect();

    Secret {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            annotations: (!annotations.is_empty()).then_some(annotations),
            ..Default::default()
        },
        data: (!data.is_empty()).then_some(data),
        type_: Some("Opaque".to_string()),
        ..Default::default()
    }
}

/// Build a SyncSecret with the given annotation key
pub fn sync_secret(namespace: &str, name: &str, annotation_key: &str) -> SyncSecret {
    let mut s = SyncSecret::new(
        name,
        SyncSecretSpec {
            annotation_key: annotation_key.to_string(),
        },
    );
    s.metadata.namespace = Some(namespace.to_string());
    s
}

/// A write issued against the [`FakeStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    Create(String, String),
    Replace(String, String),
}

#[derive(Default)]
struct FakeState {
    sync_secrets: Vec<SyncSecret>,
    namespaces: Vec<String>,
    secrets: Vec<Secret>,
    next_version: u64,
    writes: Vec<Write>,
    modify_after_read: BTreeSet<(String, String)>,
}

impl FakeState {
    fn bump_version(&mut self) -> String {
        self.next_version += 1;
        self.next_version.to_string()
    }

    fn position(&self, namespace: &str, name: &str) -> Option<usize> {
        self.secrets.iter().position(|s| {
            s.namespace().as_deref() == Some(namespace) && s.name_any() == name
        })
    }
}

/// In-memory [`ObjectStore`] with API server-like resourceVersion checks.
#[derive(Default)]
pub struct FakeStore {
    state: Mutex<FakeState>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespaces(self, namespaces: &[&str]) -> Self {
        self.state.lock().unwrap().namespaces = namespaces.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_sync_secret(self, sync_secret: SyncSecret) -> Self {
        self.state.lock().unwrap().sync_secrets.push(sync_secret);
        self
    }

    /// Add a secret, assigning it a fresh resourceVersion
    pub fn with_secret(self, mut secret: Secret) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            secret.metadata.resource_version = Some(state.bump_version());
            state.secrets.push(secret);
        }
        self
    }

    /// Simulate another writer changing the secret right after every read of it
    pub fn modify_after_read(&self, namespace: &str, name: &str) {
        self.state
            .lock()
            .unwrap()
            .modify_after_read
            .insert((namespace.to_string(), name.to_string()));
    }

    pub fn secret(&self, namespace: &str, name: &str) -> Option<Secret> {
        let state = self.state.lock().unwrap();
        state.position(namespace, name).map(|i| state.secrets[i].clone())
    }

    pub fn writes(&self) -> Vec<Write> {
        self.state.lock().unwrap().writes.clone()
    }

    pub fn clear_writes(&self) {
        self.state.lock().unwrap().writes.clear();
    }
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn get_sync_secret(&self, namespace: &str, name: &str) -> Result<Option<SyncSecret>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .sync_secrets
            .iter()
            .find(|s| s.namespace().as_deref() == Some(namespace) && s.name_any() == name)
            .cloned())
    }

    async fn list_secrets(&self) -> Result<Vec<Secret>> {
        Ok(self.state.lock().unwrap().secrets.clone())
    }

    async fn list_namespaces(&self) -> Result<Vec<String>> {
        Ok(self.state.lock().unwrap().namespaces.clone())
    }

    async fn get_secret(&self, namespace: &str, name: &str) -> Result<Option<Secret>> {
        let mut state = self.state.lock().unwrap();
        let Some(i) = state.position(namespace, name) else {
            return Ok(None);
        };
        let found = state.secrets[i].clone();

        if state
            .modify_after_read
            .contains(&(namespace.to_string(), name.to_string()))
        {
            let version = state.bump_version();
            state.secrets[i].metadata.resource_version = Some(version);
        }

        Ok(Some(found))
    }

    async fn create_secret(&self, namespace: &str, secret: &Secret) -> Result<Secret> {
        let mut state = self.state.lock().unwrap();
        let name = secret.name_any();
        if state.position(namespace, &name).is_some() {
            return Err(api_error(409));
        }

        let mut stored = secret.clone();
        stored.metadata.namespace = Some(namespace.to_string());
        stored.metadata.resource_version = Some(state.bump_version());
        state.secrets.push(stored.clone());
        state.writes.push(Write::Create(namespace.to_string(), name));
        Ok(stored)
    }

    async fn replace_secret(&self, namespace: &str, secret: &Secret) -> Result<Secret> {
        let mut state = self.state.lock().unwrap();
        let name = secret.name_any();
        let Some(i) = state.position(namespace, &name) else {
            return Err(api_error(404));
        };

        if state.secrets[i].metadata.resource_version != secret.metadata.resource_version {
            return Err(SyncSecretError::WriteConflict {
                namespace: namespace.to_string(),
                name,
            });
        }

        let mut stored = secret.clone();
        stored.metadata.namespace = Some(namespace.to_string());
        stored.metadata.resource_version = Some(state.bump_version());
        state.secrets[i] = stored.clone();
        state.writes.push(Write::Replace(namespace.to_string(), name));
        Ok(stored)
    }
}
