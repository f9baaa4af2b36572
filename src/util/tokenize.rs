// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Word splitting and query cleanup.
//!
//! Tokens are maximal runs of word characters (letters, digits, underscore,
//! and any combining marks riding on them), lowercased. Everything else is a
//! separator. This mirrors what the backend's regex tokenizer does, so the
//! reranker counts the same words the backend matched on.

use unicode_normalization::char::is_combining_mark;

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || is_combining_mark(c)
}

/// Split text into lowercased word tokens.
///
/// # Example
///
/// ```ignore
/// assert_eq!(tokenize("Hello, World!"), vec!["hello", "world"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !is_word_char(c))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip search operators and punctuation from a user query.
///
/// Keeps word characters, whitespace and hyphens; anything else (quotes,
/// `^`, `*`, parentheses, colons) becomes a space so the backend never sees
/// query syntax typed by accident. Whitespace is collapsed afterwards.
pub fn sanitize_query(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| {
            if is_word_char(c) || c.is_whitespace() || c == '-' {
                c
            } else {
                ' '
            }
        })
        .collect();
    collapse_whitespace(&cleaned)
}
