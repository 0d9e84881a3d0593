// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Prints the SyncSecret CustomResourceDefinition as YAML.
//!
//! ```bash
//! cargo run --bin crdgen | kubectl apply -f -
//! ```

use kube::CustomResourceExt;
use syncsecret::types::SyncSecret;

fn main() -> anyhow::Result<()> {
    print!("{}", serde_yaml::to_string(&SyncSecret::crd())?);
    Ok(())
}
