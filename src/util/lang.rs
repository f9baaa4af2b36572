// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Language codes as the resolver sees them.
//!
//! Callers hand us whatever their locale layer produced: `es-MX`, `pt_BR`,
//! `EN`, or the literal `auto`. Everything downstream keys caches and profile
//! tables by the canonical form, so normalization happens exactly once here.

use serde::Serialize;

/// Sentinel meaning "no explicit language, follow the configured chain".
pub const AUTO: &str = "auto";

/// Settings key for the profile layer every language inherits from.
pub const DEFAULT_KEY: &str = "default";

/// Language assumed when nothing usable is configured.
pub const FALLBACK_LANGUAGE: &str = "en";

/// A canonical language code: lowercase, `-` separated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LangCode {
    code: String,
}

impl LangCode {
    /// Parse a raw code. Returns `None` for empty input and for `auto`.
    ///
    /// ```ignore
    /// let code = LangCode::parse("pt_BR").unwrap();
    /// assert_eq!(code.as_str(), "pt-br");
    /// assert_eq!(code.base(), "pt");
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let code = raw.trim().to_lowercase().replace('_', "-");
        let code = code.trim_matches('-').to_string();
        if code.is_empty() || code == AUTO {
            return None;
        }
        Some(Self { code })
    }

    /// The built-in fallback language.
    pub fn fallback() -> Self {
        Self {
            code: FALLBACK_LANGUAGE.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.code
    }

    /// The primary subtag (`es` for `es-mx`).
    pub fn base(&self) -> &str {
        self.code.split('-').next().unwrap_or(&self.code)
    }

    /// True when the code has a region or script subtag.
    pub fn is_regional(&self) -> bool {
        self.base() != self.code
    }
}

impl std::fmt::Display for LangCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code)
    }
}

/// Lookup keys for a requested language followed by the project default,
/// most specific first, without duplicates.
///
/// `("es-MX", "en")` gives `["es-mx", "es", "en"]`.
pub fn fallback_keys(requested: Option<&LangCode>, project_default: &LangCode) -> Vec<String> {
    let mut keys: Vec<String> = Vec::with_capacity(4);
    let mut push = |key: &str| {
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    };

    if let Some(code) = requested {
        push(code.as_str());
        push(code.base());
    }
    push(project_default.as_str());
    push(project_default.base());

    keys
}
