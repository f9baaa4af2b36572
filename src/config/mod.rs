// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Deployment settings and the machinery that turns them into profiles.
//!
//! [`Settings`] is the raw, serde-loaded configuration surface. [`resolve`]
//! turns it plus a language code into ready-to-use objects, and [`cache`]
//! memoizes that per language with an atomic reload.
//!
//! Settings are read once from JSON (an explicit path, or the file named by
//! `FOLDRANK_SETTINGS`). Unknown keys are ignored. Folding profile entries are
//! kept as raw JSON and parsed during resolution, so one malformed language
//! entry degrades to the fallback chain instead of rejecting the whole file.

pub mod cache;
pub mod resolve;

use crate::error::{Error, Result};
use crate::scoring::RerankWeights;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub use cache::ProfileCache;
pub use resolve::{resolve, pool_size, Resolved, Resolver};

/// Environment variable naming a settings file.
pub const SETTINGS_ENV: &str = "FOLDRANK_SETTINGS";

/// Language used when neither the request nor the settings name one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Page size used when the caller asks for zero.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Pool floor: at least this many backend hits get rescored.
pub const DEFAULT_POOL_HINT: usize = 200;

/// Pool ceiling: hard cap on rescored hits.
pub const DEFAULT_POOL_CEILING: usize = 1000;

/// Smallest accepted pool ceiling. Lower values are clamped up to this.
pub const MIN_POOL_CEILING: usize = 10;

/// Pool size grows with page size by this factor.
pub const POOL_PAGE_MULTIPLIER: usize = 10;

/// Stopword tuning: words to add to, and remove from, the built-in list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopwordOverrides {
    pub add: Vec<String>,
    pub remove: Vec<String>,
}

/// One folding profile entry as written in settings.
///
/// Each field is optional: a missing field is inherited from the `"default"`
/// layer during resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEntry {
    #[serde(default)]
    pub preserve: Option<Vec<String>>,
    #[serde(default)]
    pub replace: Option<BTreeMap<String, String>>,
}

impl ProfileEntry {
    pub fn is_empty(&self) -> bool {
        self.preserve.is_none() && self.replace.is_none()
    }
}

/// The configuration surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Project default language.
    pub language: String,
    /// `true` forces `ñ`/`Ñ` to be preserved, `false` forces them to fold,
    /// unset leaves the profiles alone.
    pub keep_enye: Option<bool>,
    /// Folding profiles keyed by language code, plus an optional `"default"`.
    pub folding_profiles: BTreeMap<String, serde_json::Value>,
    /// Literal code to rerank in, or `"auto"` to follow the request language.
    pub rerank_language: String,
    /// Page size when the caller does not give one.
    pub page_size: usize,
    /// Minimum pool size. Unset means [`DEFAULT_POOL_HINT`].
    pub pool_hint: Option<usize>,
    /// Hard cap on pool size.
    pub pool_ceiling: usize,
    /// Stopword tuning applied to every language.
    pub stopwords: StopwordOverrides,
    /// Stopword tuning per language code.
    pub stopwords_by_language: BTreeMap<String, StopwordOverrides>,
    /// Boost magnitudes.
    pub weights: RerankWeights,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            keep_enye: None,
            folding_profiles: BTreeMap::new(),
            rerank_language: crate::util::lang::AUTO.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            pool_hint: None,
            pool_ceiling: DEFAULT_POOL_CEILING,
            stopwords: StopwordOverrides::default(),
            stopwords_by_language: BTreeMap::new(),
            weights: RerankWeights::default(),
        }
    }
}

impl Settings {
    /// Load settings from `explicit_path`, else from `$FOLDRANK_SETTINGS`,
    /// else defaults. The result is already clamped.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var(SETTINGS_ENV).ok().map(PathBuf::from));

        match path {
            Some(path) => Self::load_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load and clamp settings from a JSON file.
    pub fn load_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| Error::Settings(format!("read settings {}: {err}", path.display())))?;
        let settings: Self = serde_json::from_str(&raw)
            .map_err(|err| Error::Settings(format!("parse settings {}: {err}", path.display())))?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings.clamped())
    }

    /// Parse and clamp settings from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(raw)?;
        Ok(settings.clamped())
    }

    /// Replace out-of-range values with safe ones. Never fails.
    pub fn clamped(mut self) -> Self {
        if self.page_size == 0 {
            tracing::warn!(fallback = DEFAULT_PAGE_SIZE, "page_size 0 is invalid, using default");
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        if self.pool_ceiling < MIN_POOL_CEILING {
            tracing::warn!(
                pool_ceiling = self.pool_ceiling,
                min = MIN_POOL_CEILING,
                "pool_ceiling below minimum, clamping"
            );
            self.pool_ceiling = MIN_POOL_CEILING;
        }
        if self.pool_hint == Some(0) {
            self.pool_hint = None;
        }
        if self.language.trim().is_empty() {
            self.language = DEFAULT_LANGUAGE.to_string();
        }
        self.weights = self.weights.sanitized();
        self
    }
}
