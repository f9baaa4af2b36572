// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Process-wide configuration snapshot with atomic reload.
//!
//! Readers take an `Arc` to the current [`Resolver`] and keep using it for
//! the whole request, so a concurrent [`ProfileCache::reload`] can never hand
//! them a half-updated view: the old snapshot lives until its last reader
//! drops it.

use super::resolve::{Resolved, Resolver};
use super::Settings;
use parking_lot::RwLock;
use std::sync::{Arc, LazyLock};

/// An immutable snapshot: settings plus their memoized profiles.
pub type Snapshot = Resolver;

#[derive(Debug)]
pub struct ProfileCache {
    current: RwLock<Arc<Snapshot>>,
}

static GLOBAL: LazyLock<ProfileCache> = LazyLock::new(|| ProfileCache::new(Settings::default()));

impl ProfileCache {
    pub fn new(settings: Settings) -> Self {
        Self {
            current: RwLock::new(Arc::new(Resolver::new(settings))),
        }
    }

    /// The process-wide cache, initialized with default settings on first use.
    pub fn global() -> &'static ProfileCache {
        &GLOBAL
    }

    /// The snapshot in effect right now.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.current.read())
    }

    /// Replace the snapshot. Memo tables start empty.
    pub fn reload(&self, settings: Settings) {
        let next = Arc::new(Resolver::new(settings));
        *self.current.write() = next;
        tracing::debug!("settings reloaded");
    }

    /// Resolve against the current snapshot.
    pub fn resolve(&self, language_code: &str, page_size: Option<usize>) -> Resolved {
        self.snapshot().resolve(language_code, page_size)
    }
}

impl Default for ProfileCache {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
