// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Configuration resolution: settings + language code → profiles.
//!
//! # Fallback chain
//!
//! ```text
//! exact code (es-mx) → base (es) → project default (en) → "default" entry → built-in
//! ```
//!
//! The first *valid* language entry wins and is merged field-wise over the
//! default layer: an entry that only names `replace` inherits `preserve` from
//! the default layer, and the other way around. The default layer is the
//! built-in profile overridden field-wise by the configured `"default"` entry.
//!
//! Malformed entries are logged and skipped. Nothing here returns an error:
//! a broken configuration degrades to plainer folding, never to a failed search.

use super::{ProfileEntry, Settings, StopwordOverrides, DEFAULT_POOL_HINT, POOL_PAGE_MULTIPLIER};
use crate::fold::stopwords::{builtin_stopwords, StopwordSet};
use crate::fold::{FoldingProfile, DEFAULT_REPLACEMENTS};
use crate::rerank::RerankConfig;
use crate::util::lang::{fallback_keys, LangCode, DEFAULT_KEY};
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

/// The letters `keep_enye` controls.
pub const ENYE: [&str; 2] = ["ñ", "Ñ"];

/// Everything a request needs, resolved for one language.
#[derive(Debug, Clone)]
pub struct Resolved {
    /// Language used for folding (query and index).
    pub language: LangCode,
    pub folding: Arc<FoldingProfile>,
    pub stopwords: Arc<StopwordSet>,
    pub rerank: RerankConfig,
}

/// `min(max(multiplier * page_size, hint), ceiling)`.
///
/// With the default hint of 200 this is `min(max(10 * page_size, 200), ceiling)`.
/// The ceiling always wins.
pub fn pool_size(page_size: usize, pool_hint: Option<usize>, pool_ceiling: usize) -> usize {
    let floor = pool_hint.filter(|&h| h > 0).unwrap_or(DEFAULT_POOL_HINT);
    page_size
        .saturating_mul(POOL_PAGE_MULTIPLIER)
        .max(floor)
        .min(pool_ceiling)
}

#[derive(Debug, Clone, Default)]
struct Layer {
    preserve: BTreeSet<String>,
    replace: BTreeMap<String, String>,
}

impl Layer {
    fn builtin() -> Self {
        Self {
            preserve: BTreeSet::new(),
            replace: DEFAULT_REPLACEMENTS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Field-wise override: fields present in `entry` replace ours.
    fn overlay(&self, entry: &ProfileEntry) -> Self {
        Self {
            preserve: entry
                .preserve
                .as_ref()
                .map(|p| p.iter().cloned().collect())
                .unwrap_or_else(|| self.preserve.clone()),
            replace: entry.replace.clone().unwrap_or_else(|| self.replace.clone()),
        }
    }
}

fn parse_entry(key: &str, raw: &serde_json::Value) -> Option<ProfileEntry> {
    match serde_json::from_value::<ProfileEntry>(raw.clone()) {
        Ok(entry) if entry.is_empty() => {
            tracing::debug!(language = key, "folding profile entry names no fields, skipping");
            None
        }
        Ok(entry) => Some(entry),
        Err(err) => {
            tracing::warn!(language = key, error = %err, "malformed folding profile entry, falling through");
            None
        }
    }
}

/// Resolves profiles for one immutable [`Settings`] value.
///
/// Resolved profiles and stopword sets are memoized by language code for the
/// lifetime of the resolver; [`ProfileCache`](super::ProfileCache) swaps in a
/// whole new resolver on reload.
#[derive(Debug)]
pub struct Resolver {
    settings: Settings,
    project_default: LangCode,
    rerank_override: Option<LangCode>,
    entries: HashMap<String, ProfileEntry>,
    default_layer: Layer,
    stopword_overrides: HashMap<String, StopwordOverrides>,
    profiles: RwLock<HashMap<String, Arc<FoldingProfile>>>,
    stopwords: RwLock<HashMap<String, Arc<StopwordSet>>>,
}

impl Resolver {
    pub fn new(settings: Settings) -> Self {
        let settings = settings.clamped();

        let project_default = LangCode::parse(&settings.language).unwrap_or_else(|| {
            tracing::warn!(language = %settings.language, "invalid project language, using default");
            LangCode::fallback()
        });
        let rerank_override = LangCode::parse(&settings.rerank_language);

        let mut entries = HashMap::new();
        let mut default_layer = Layer::builtin();
        for (key, raw) in &settings.folding_profiles {
            let Some(code) = LangCode::parse(key) else {
                tracing::warn!(language = %key, "folding profile keyed by an empty or `auto` code, skipping");
                continue;
            };
            let Some(entry) = parse_entry(code.as_str(), raw) else {
                continue;
            };
            if code.as_str() == DEFAULT_KEY {
                default_layer = default_layer.overlay(&entry);
            } else {
                entries.insert(code.as_str().to_string(), entry);
            }
        }

        let stopword_overrides = settings
            .stopwords_by_language
            .iter()
            .filter_map(|(key, o)| LangCode::parse(key).map(|c| (c.as_str().to_string(), o.clone())))
            .collect();

        Self {
            settings,
            project_default,
            rerank_override,
            entries,
            default_layer,
            stopword_overrides,
            profiles: RwLock::new(HashMap::new()),
            stopwords: RwLock::new(HashMap::new()),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn project_default(&self) -> &LangCode {
        &self.project_default
    }

    /// The language a raw request code resolves to. Empty and `auto` mean
    /// the project default.
    pub fn language_for(&self, raw: &str) -> LangCode {
        LangCode::parse(raw).unwrap_or_else(|| self.project_default.clone())
    }

    /// The language reranking runs in for a given folding language.
    pub fn rerank_language_for(&self, folding: &LangCode) -> LangCode {
        self.rerank_override
            .clone()
            .unwrap_or_else(|| folding.clone())
    }

    /// The profile entry key that wins the fallback chain, if any.
    pub fn matched_entry(&self, language: &LangCode) -> Option<String> {
        fallback_keys(Some(language), &self.project_default)
            .into_iter()
            .find(|k| self.entries.contains_key(k))
    }

    fn build_profile(&self, language: &LangCode) -> FoldingProfile {
        let layer = match self.matched_entry(language) {
            Some(key) => self.default_layer.overlay(&self.entries[&key]),
            None => self.default_layer.clone(),
        };
        let Layer {
            mut preserve,
            replace,
        } = layer;

        match self.settings.keep_enye {
            Some(true) => {
                for ch in ENYE {
                    if replace.contains_key(ch) {
                        tracing::debug!(language = %language, letter = ch, "keep_enye overridden by explicit replace rule");
                    } else {
                        preserve.insert(ch.to_string());
                    }
                }
            }
            Some(false) => {
                for ch in ENYE {
                    preserve.remove(ch);
                }
            }
            None => {}
        }

        FoldingProfile::new(preserve, replace)
    }

    fn build_stopwords(&self, language: &LangCode, profile: &FoldingProfile) -> StopwordSet {
        let base = fallback_keys(Some(language), &self.project_default)
            .iter()
            .find_map(|k| builtin_stopwords(k))
            .unwrap_or(&[]);

        let global = &self.settings.stopwords;
        let local = [language.as_str(), language.base()]
            .iter()
            .find_map(|k| self.stopword_overrides.get(*k));

        let additions = global
            .add
            .iter()
            .chain(local.into_iter().flat_map(|o| o.add.iter()));
        let removals = global
            .remove
            .iter()
            .chain(local.into_iter().flat_map(|o| o.remove.iter()));

        StopwordSet::new(base.iter().copied(), additions, removals, profile)
    }

    /// Folding profile for a language, memoized.
    pub fn profile(&self, language: &LangCode) -> Arc<FoldingProfile> {
        if let Some(hit) = self.profiles.read().get(language.as_str()) {
            return Arc::clone(hit);
        }
        let built = Arc::new(self.build_profile(language));
        Arc::clone(
            self.profiles
                .write()
                .entry(language.as_str().to_string())
                .or_insert(built),
        )
    }

    /// Stopword set for a language, memoized.
    pub fn stopwords(&self, language: &LangCode) -> Arc<StopwordSet> {
        if let Some(hit) = self.stopwords.read().get(language.as_str()) {
            return Arc::clone(hit);
        }
        let profile = self.profile(language);
        let built = Arc::new(self.build_stopwords(language, &profile));
        Arc::clone(
            self.stopwords
                .write()
                .entry(language.as_str().to_string())
                .or_insert(built),
        )
    }

    /// Pool size for a page size under these settings.
    pub fn pool_size(&self, page_size: usize) -> usize {
        pool_size(page_size, self.settings.pool_hint, self.settings.pool_ceiling)
    }

    /// Resolve everything for a request language. `page_size` defaults to
    /// the configured one; zero is clamped.
    pub fn resolve(&self, language_code: &str, page_size: Option<usize>) -> Resolved {
        let language = self.language_for(language_code);
        let page_size = page_size
            .filter(|&p| p > 0)
            .unwrap_or(self.settings.page_size);

        let folding = self.profile(&language);
        let stopwords = self.stopwords(&language);

        let rerank_language = self.rerank_language_for(&language);
        let (rerank_profile, rerank_stopwords) = if rerank_language == language {
            (Arc::clone(&folding), Arc::clone(&stopwords))
        } else {
            (self.profile(&rerank_language), self.stopwords(&rerank_language))
        };

        let rerank = RerankConfig {
            pool_size: self.pool_size(page_size),
            pool_ceiling: self.settings.pool_ceiling,
            page_size,
            language: rerank_language,
            profile: rerank_profile,
            stopwords: rerank_stopwords,
            weights: self.settings.weights,
        };

        Resolved {
            language,
            folding,
            stopwords,
            rerank,
        }
    }
}

/// Resolve without a shared cache. Handy for one-off calls and tests;
/// request paths should go through [`ProfileCache`](super::ProfileCache).
pub fn resolve(language_code: &str, settings: &Settings) -> Resolved {
    Resolver::new(settings.clone()).resolve(language_code, None)
}
