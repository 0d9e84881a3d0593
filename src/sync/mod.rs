// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Source selection, target enumeration and secret replication.

pub mod flag;
pub mod namespaces;
pub mod pass;
pub mod secrets;
pub mod selector;

pub use flag::AnnotationFlag;
pub use namespaces::eligible_targets;
pub use pass::{reconcile_pass, Disposition};
pub use secrets::{build_replica, sync_into, SyncOutcome};
pub use selector::select_source;
