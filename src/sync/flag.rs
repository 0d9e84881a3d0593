// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Boolean annotation flags

use crate::constants::annotations;
use k8s_openapi::api::core::v1::Secret;
use std::collections::BTreeMap;

/// An annotation key that counts as set when its value is exactly "true".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationFlag<'a> {
    key: &'a str,
}

impl<'a> AnnotationFlag<'a> {
    pub fn new(key: &'a str) -> Self {
        Self { key }
    }

    pub fn key(&self) -> &'a str {
        self.key
    }

    /// Check if the secret carries this flag set to "true"
    pub fn is_set(&self, secret: &Secret) -> bool {
        secret
            .metadata
            .annotations
            .as_ref()
            .and_then(|a| a.get(self.key))
            .is_some_and(|v| v == annotations::TRUE)
    }

    /// Annotation map holding only this flag, set
    pub fn marker(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(self.key.to_string(), annotations::TRUE.to_string())])
    }
}
