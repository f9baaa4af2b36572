// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Stopwords: the words too common to count as evidence of a title match.
//!
//! The reranker drops these from the query before comparing it against
//! titles, so "the guide to django" and "django guide" land in the same place.
//! Each deployment tunes the built-in lists with additions and removals.

use super::{fold, FoldingProfile};
use serde::Serialize;
use std::collections::BTreeSet;

const EN: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "how", "if", "in",
    "into", "is", "it", "no", "not", "of", "on", "or", "such", "that", "the", "their", "then",
    "there", "these", "they", "this", "to", "was", "what", "will", "with",
];

const ES: &[&str] = &[
    "a", "al", "como", "con", "de", "del", "el", "en", "es", "esta", "este", "la", "las", "lo",
    "los", "más", "o", "para", "pero", "por", "que", "se", "sin", "sobre", "su", "sus", "un",
    "una", "unas", "unos", "y",
];

const DE: &[&str] = &[
    "aber", "als", "am", "an", "auf", "aus", "bei", "das", "dem", "den", "der", "des", "die",
    "ein", "eine", "einem", "einen", "einer", "es", "für", "im", "in", "ist", "mit", "nicht",
    "oder", "sie", "und", "von", "vom", "zu", "zum", "zur",
];

const FR: &[&str] = &[
    "au", "aux", "avec", "ce", "ces", "dans", "de", "des", "du", "elle", "en", "et", "il", "la",
    "le", "les", "leur", "mais", "ou", "par", "pas", "pour", "qui", "que", "sur", "un", "une",
];

const IT: &[&str] = &[
    "il", "lo", "la", "le", "li", "gli", "un", "uno", "una", "di", "da", "del", "dello", "della",
    "dei", "degli", "delle", "che", "per", "non", "si", "con", "su", "ha", "sono", "come", "ma",
    "anche", "se", "e",
];

const PT: &[&str] = &[
    "a", "ao", "as", "com", "da", "das", "de", "do", "dos", "e", "em", "na", "nas", "no", "nos",
    "o", "os", "para", "por", "que", "se", "sem", "um", "uma", "uns", "umas",
];

/// Built-in stopword list for a language key (`"es"`, `"en"`, ...).
pub fn builtin_stopwords(lang: &str) -> Option<&'static [&'static str]> {
    match lang {
        "en" => Some(EN),
        "es" => Some(ES),
        "de" => Some(DE),
        "fr" => Some(FR),
        "it" => Some(IT),
        "pt" => Some(PT),
        _ => None,
    }
}

/// A resolved, de-duplicated stopword set.
///
/// Words are stored folded with the language's profile and lowercased, the
/// same shape query tokens have by the time the reranker compares them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StopwordSet {
    words: BTreeSet<String>,
}

impl StopwordSet {
    /// `base ∪ additions − removals`. Removals are applied last, so a word
    /// listed in both is not a stopword.
    pub fn new<B, A, R>(base: B, additions: A, removals: R, profile: &FoldingProfile) -> Self
    where
        B: IntoIterator,
        B::Item: AsRef<str>,
        A: IntoIterator,
        A::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        let key = |w: &str| fold(w.trim(), profile).to_lowercase();

        let mut words: BTreeSet<String> = base
            .into_iter()
            .map(|w| key(w.as_ref()))
            .chain(additions.into_iter().map(|w| key(w.as_ref())))
            .filter(|w| !w.is_empty())
            .collect();

        for word in removals {
            words.remove(&key(word.as_ref()));
        }

        Self { words }
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}
