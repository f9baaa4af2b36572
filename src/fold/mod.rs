// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Accent folding: make "Straße", "Strasse" and "STRASSE" meet in the middle.
//!
//! Plain accent stripping is easy (decompose, drop combining marks). The
//! interesting part is the exceptions. Spanish readers consider "ñ" a letter,
//! not an "n" wearing a hat, so folding it to "n" conflates "año" and "ano".
//! German wants "ß" spelled out as "ss", which no Unicode decomposition does.
//! A [`FoldingProfile`] captures those exceptions per language.
//!
//! # Algorithm (one pass)
//!
//! 1. NFC-compose the input, so `n + U+0303` and `ñ` look the same
//! 2. At each position, longest match first:
//!    - a `preserve` entry is copied verbatim
//!    - a `replace` key is swapped for its value
//!    - anything else is NFKD-decomposed with combining marks dropped
//! 3. NFC-compose the output
//!
//! [`fold`] repeats the pass until nothing changes. Profile construction
//! rejects rules that could feed each other, so after the first pass each
//! further pass only removes replace-key characters and the loop terminates.
//!
//! # Invariants
//!
//! - **Idempotence**: `fold(fold(s, p), p) == fold(s, p)`
//! - **Preservation**: a preserved entry present in the input survives unchanged
//! - **Precedence**: preserve beats replace beats default stripping
//! - **Case**: folding never changes case; matching is case-sensitive

pub mod stopwords;

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use unicode_normalization::char::{decompose_compatible, is_combining_mark};
use unicode_normalization::UnicodeNormalization;

/// Letters that compatibility decomposition leaves alone but that readers
/// expect to match their ASCII spelling.
pub const DEFAULT_REPLACEMENTS: &[(&str, &str)] = &[
    ("ß", "ss"),
    ("ẞ", "SS"),
    ("æ", "ae"),
    ("Æ", "AE"),
    ("œ", "oe"),
    ("Œ", "OE"),
    ("ø", "o"),
    ("Ø", "O"),
    ("ł", "l"),
    ("Ł", "L"),
    ("đ", "d"),
    ("Đ", "D"),
    ("þ", "th"),
    ("Þ", "TH"),
    ("ð", "d"),
    ("Ð", "D"),
    ("ı", "i"),
];

/// Per-language folding exceptions.
///
/// Build with [`FoldingProfile::new`]; the constructor normalizes entries and
/// discards rules that would break the invariants listed in the module docs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FoldingProfile {
    preserve: BTreeSet<String>,
    replace: BTreeMap<String, String>,
    #[serde(skip)]
    preserve_order: Vec<String>,
    #[serde(skip)]
    replace_order: Vec<(String, String)>,
    #[serde(skip)]
    ascii_rules: bool,
}

fn longest_first(a: &str, b: &str) -> std::cmp::Ordering {
    b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b))
}

impl FoldingProfile {
    /// Build a profile from raw preserve entries and replacement rules.
    ///
    /// Entries are NFC-normalized. Dropped (with a warning):
    /// - empty preserve entries, or ones starting with a combining mark
    /// - empty replace keys
    /// - replace keys containing a preserved entry (preserve wins)
    /// - replace values that still contain a replace-key character after
    ///   stripping, since those rules would chain into each other
    pub fn new<P, R, K, V>(preserve: P, replace: R) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        R: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut kept_preserve = BTreeSet::new();
        for entry in preserve {
            let entry: String = entry.as_ref().nfc().collect();
            match entry.chars().next() {
                None => continue,
                Some(first) if is_combining_mark(first) => {
                    tracing::warn!(entry = %entry.escape_unicode(), "ignoring preserve entry that starts with a combining mark");
                    continue;
                }
                Some(_) => {
                    kept_preserve.insert(entry);
                }
            }
        }

        let mut preserve_order: Vec<String> = kept_preserve.iter().cloned().collect();
        preserve_order.sort_by(|a, b| longest_first(a, b));

        let mut candidates: BTreeMap<String, String> = BTreeMap::new();
        for (key, value) in replace {
            let key: String = key.as_ref().nfc().collect();
            if key.is_empty() {
                tracing::warn!("ignoring replace rule with an empty key");
                continue;
            }
            if let Some(hit) = kept_preserve.iter().find(|p| key.contains(p.as_str())) {
                tracing::debug!(key = %key, preserved = %hit, "replace rule shadowed by preserve entry");
                continue;
            }
            let value = fold_pass(value.as_ref(), &preserve_order, &[]);
            candidates.insert(key, value);
        }

        let key_chars: BTreeSet<char> = candidates.keys().flat_map(|k| k.chars()).collect();
        let mut kept_replace = BTreeMap::new();
        for (key, value) in candidates {
            if let Some(c) = value.chars().find(|c| key_chars.contains(c)) {
                tracing::warn!(key = %key, value = %value, conflict = %c, "ignoring replace rule whose output feeds another rule");
                continue;
            }
            kept_replace.insert(key, value);
        }

        let mut replace_order: Vec<(String, String)> = kept_replace
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        replace_order.sort_by(|a, b| longest_first(&a.0, &b.0));

        let ascii_rules = replace_order
            .iter()
            .any(|(k, _)| k.chars().next().is_some_and(|c| c.is_ascii()));

        Self {
            preserve: kept_preserve,
            replace: kept_replace,
            preserve_order,
            replace_order,
            ascii_rules,
        }
    }

    /// The profile used when configuration has nothing to say.
    pub fn builtin_default() -> Self {
        Self::new(std::iter::empty::<&str>(), DEFAULT_REPLACEMENTS.iter().copied())
    }

    pub fn preserve(&self) -> &BTreeSet<String> {
        &self.preserve
    }

    pub fn replace(&self) -> &BTreeMap<String, String> {
        &self.replace
    }

    pub fn is_preserved(&self, entry: &str) -> bool {
        self.preserve.contains(entry)
    }

    /// No preserve entries and no replace rules: plain accent stripping.
    pub fn is_plain(&self) -> bool {
        self.preserve.is_empty() && self.replace.is_empty()
    }

    fn pass(&self, text: &str) -> String {
        fold_pass(text, &self.preserve_order, &self.replace_order)
    }
}

/// One left-to-right folding pass.
fn fold_pass(text: &str, preserve: &[String], replace: &[(String, String)]) -> String {
    let composed: String = text.nfc().collect();
    let mut out = String::with_capacity(composed.len());
    let mut rest = composed.as_str();

    while let Some(c) = rest.chars().next() {
        if let Some(kept) = preserve.iter().find(|p| rest.starts_with(p.as_str())) {
            out.push_str(kept);
            rest = &rest[kept.len()..];
            continue;
        }
        if let Some((key, value)) = replace.iter().find(|(k, _)| rest.starts_with(k.as_str())) {
            out.push_str(value);
            rest = &rest[key.len()..];
            continue;
        }
        decompose_compatible(c, |d| {
            if !is_combining_mark(d) {
                out.push(d);
            }
        });
        rest = &rest[c.len_utf8()..];
    }

    out.nfc().collect()
}

/// Fold `text` under `profile`.
///
/// Pure and total: every input has an output, empty stays empty, and text
/// with nothing to fold comes back unchanged.
///
/// # Example
///
/// ```ignore
/// let es = FoldingProfile::new(["ñ", "Ñ"], Vec::<(&str, &str)>::new());
/// assert_eq!(fold("El Niño está aquí", &es), "El Niño esta aqui");
/// ```
pub fn fold(text: &str, profile: &FoldingProfile) -> String {
    if text.is_empty() {
        return String::new();
    }
    if text.is_ascii() && !profile.ascii_rules {
        return text.to_string();
    }

    let mut current = profile.pass(text);
    // Bounded by the character count: each changing pass removes at least one
    // replace-key character and introduces none.
    for _ in 0..=current.chars().count() {
        let next = profile.pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}
