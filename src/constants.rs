// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Annotation conventions shared by source secrets and replicas
pub mod annotations {
    /// Value that marks an annotation flag as set
    pub const TRUE: &str = "true";
}

/// The operator name, used as the controller identity in logs
pub const OPERATOR_NAME: &str = "syncsecret";

/// SyncSecret custom resource coordinates
pub mod crd {
    pub const GROUP: &str = "sync.abroadme.me";
    pub const VERSION: &str = "v1";
    pub const KIND: &str = "SyncSecret";

    /// Initial polling interval in seconds when waiting for CRD
    pub const POLL_INTERVAL_SECS: u64 = 10;
    /// Maximum polling interval in seconds (exponential backoff cap)
    pub const POLL_MAX_INTERVAL_SECS: u64 = 60;
}

/// Reconcile cadence defaults
pub mod defaults {
    /// Re-poll interval after every pass (5 minutes)
    pub const SYNC_INTERVAL_SECS: u64 = 300;
    /// Requeue delay after a failed pass
    pub const ERROR_REQUEUE_SECS: u64 = 60;
    /// Reserved system namespaces that never receive replicas
    pub const EXCLUDED_NAMESPACES: [&str; 3] = ["kube-node-lease", "kube-public", "kube-system"];
}
