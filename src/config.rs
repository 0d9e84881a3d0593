// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::defaults;
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::env;
use std::time::Duration;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Requeue cadence after every reconcile pass
    pub sync_interval: Duration,
    /// Requeue delay applied by the error policy after a failed pass
    pub error_requeue: Duration,
    /// Namespaces that never receive replicas, always including the reserved system ones
    pub excluded_namespaces: BTreeSet<String>,
    /// Only watch SyncSecrets in this namespace when set
    pub watch_namespace: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            sync_interval: Duration::from_secs(defaults::SYNC_INTERVAL_SECS),
            error_requeue: Duration::from_secs(defaults::ERROR_REQUEUE_SECS),
            excluded_namespaces: defaults::EXCLUDED_NAMESPACES
                .iter()
                .map(|ns| ns.to_string())
                .collect(),
            watch_namespace: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(v) = lookup("SYNC_INTERVAL_SECS") {
            let secs: u64 = v
                .trim()
                .parse()
                .with_context(|| format!("SYNC_INTERVAL_SECS is not a number: {}", v))?;
            config.sync_interval = Duration::from_secs(secs);
        }

        if let Some(v) = lookup("ERROR_REQUEUE_SECS") {
            let secs: u64 = v
                .trim()
                .parse()
                .with_context(|| format!("ERROR_REQUEUE_SECS is not a number: {}", v))?;
            config.error_requeue = Duration::from_secs(secs);
        }

        // Extra exclusions only; the reserved namespaces stay excluded
        if let Some(v) = lookup("EXCLUDED_NAMESPACES") {
            config.excluded_namespaces.extend(
                v.split(',')
                    .map(str::trim)
                    .filter(|ns| !ns.is_empty())
                    .map(str::to_string),
            );
        }

        config.watch_namespace = lookup("WATCH_NAMESPACE").filter(|ns| !ns.trim().is_empty());

        Ok(config)
    }
}
