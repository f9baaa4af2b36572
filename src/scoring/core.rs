// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind reranking.
//!
//! A derived score is the backend score plus three additive boosts:
//!
//! | Boost         | Fires when                                        | Default |
//! |---------------|---------------------------------------------------|---------|
//! | `exact_title` | folded title == folded query                      | 50.0    |
//! | `title_phrase`| folded query is a phrase inside the folded title  | 10.0    |
//! | `short_match` | scaled by the matched field's query-token density | 2.0     |
//!
//! `exact_title` and `title_phrase` are exclusive: an exact title already
//! contains the phrase, so it gets the larger boost only.
//!
//! # Key Invariant: No Resurrection
//!
//! Boosts are added, never multiplied, and only to candidates the backend
//! found relevant (`score > 0`). A zero-score hit stays at zero no matter how
//! well its title lines up with the query.

use crate::types::Boosts;
use serde::{Deserialize, Serialize};

/// Default boost for an exact title match.
pub const EXACT_TITLE_BOOST: f64 = 50.0;

/// Default boost for a title containing the query phrase.
pub const TITLE_PHRASE_BOOST: f64 = 10.0;

/// Default boost for a field made entirely of query tokens (density 1.0).
pub const SHORT_MATCH_BOOST: f64 = 2.0;

/// Boost magnitudes. Tuning knobs, not invariants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RerankWeights {
    pub exact_title: f64,
    pub title_phrase: f64,
    pub short_match: f64,
}

impl Default for RerankWeights {
    fn default() -> Self {
        Self {
            exact_title: EXACT_TITLE_BOOST,
            title_phrase: TITLE_PHRASE_BOOST,
            short_match: SHORT_MATCH_BOOST,
        }
    }
}

impl RerankWeights {
    /// Replace negative or non-finite weights with their defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let pick = |name: &str, value: f64, fallback: f64| {
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                tracing::warn!(weight = name, value, fallback, "invalid rerank weight, using default");
                fallback
            }
        };
        Self {
            exact_title: pick("exact_title", self.exact_title, defaults.exact_title),
            title_phrase: pick("title_phrase", self.title_phrase, defaults.title_phrase),
            short_match: pick("short_match", self.short_match, defaults.short_match),
        }
    }
}

/// Does `needle` occur in `haystack` on token boundaries?
///
/// Both sides are space-joined token sequences. `"django cms"` is inside
/// `"the django cms guide"` but `"jango"` is not inside `"django"`.
pub fn contains_phrase(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() || haystack.len() < needle.len() {
        return false;
    }
    if haystack == needle {
        return true;
    }
    format!(" {} ", haystack).contains(&format!(" {} ", needle))
}

/// Fraction of `field_tokens` that appear in the query.
///
/// Counts with multiplicity, so a title of `["django", "django"]` against the
/// query `django` has density 1.0. Empty fields have density 0.
pub fn match_density(field_tokens: &[String], mut is_query_token: impl FnMut(&str) -> bool) -> f64 {
    if field_tokens.is_empty() {
        return 0.0;
    }
    let matched = field_tokens
        .iter()
        .filter(|t| is_query_token(t.as_str()))
        .count();
    matched as f64 / field_tokens.len() as f64
}

/// Sum of the boosts that fired.
pub fn boost_total(boosts: &Boosts, weights: &RerankWeights) -> f64 {
    let mut total = 0.0;
    if boosts.exact_title {
        total += weights.exact_title;
    } else if boosts.title_phrase {
        total += weights.title_phrase;
    }
    total + weights.short_match * boosts.density.clamp(0.0, 1.0)
}

/// Backend score plus boosts. Irrelevant hits (`score <= 0`) get nothing.
pub fn derived_score(base: f64, boosts: &Boosts, weights: &RerankWeights) -> f64 {
    let base = if base.is_nan() { 0.0 } else { base };
    if base <= 0.0 {
        return base;
    }
    base + boost_total(boosts, weights)
}
