// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query and title analysis for the reranker.
//!
//! Both sides are reduced to the same shape: folded with the rerank profile,
//! lowercased, whitespace-collapsed, and split into word tokens. Comparisons
//! in [`super`] only ever look at these shapes, never at raw text.

use crate::fold::stopwords::StopwordSet;
use crate::fold::{fold, FoldingProfile};
use crate::util::tokenize::{collapse_whitespace, tokenize};
use std::collections::HashSet;

/// A query, analyzed once per request.
#[derive(Debug, Clone, Default)]
pub struct QueryAnalysis {
    /// Folded, lowercased, whitespace-collapsed query.
    pub folded: String,
    /// All query tokens joined by single spaces.
    pub phrase: String,
    /// Tokens used for matching: stopword-filtered unless filtering was skipped.
    pub tokens: Vec<String>,
    /// False when every token was a stopword and filtering was skipped.
    pub filtered: bool,
    token_set: HashSet<String>,
}

impl QueryAnalysis {
    pub fn new(query: &str, profile: &FoldingProfile, stopwords: &StopwordSet) -> Self {
        let folded = collapse_whitespace(&fold(query, profile).to_lowercase());
        let all = tokenize(&folded);
        let phrase = all.join(" ");

        let kept: Vec<String> = all
            .iter()
            .filter(|t| !stopwords.contains(t))
            .cloned()
            .collect();

        let (tokens, filtered) = if kept.is_empty() && !all.is_empty() {
            tracing::debug!(query = %folded, "query is all stopwords, matching without filtering");
            (all, false)
        } else {
            (kept, true)
        };

        let token_set = tokens.iter().cloned().collect();
        Self {
            folded,
            phrase,
            tokens,
            filtered,
            token_set,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn has_token(&self, token: &str) -> bool {
        self.token_set.contains(token)
    }
}

/// A candidate title, folded and tokenized once per request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleAnalysis {
    pub collapsed: String,
    pub phrase: String,
    pub tokens: Vec<String>,
}

impl TitleAnalysis {
    /// Analyze an already-folded title.
    pub fn from_folded(folded: &str) -> Self {
        let collapsed = collapse_whitespace(&folded.to_lowercase());
        let tokens = tokenize(&collapsed);
        Self {
            phrase: tokens.join(" "),
            collapsed,
            tokens,
        }
    }

    /// Analyze a title. `stored_norm` is the index-time folded title, and
    /// must only be passed when it was folded with `profile`.
    pub fn new(title: &str, stored_norm: Option<&str>, profile: &FoldingProfile) -> Self {
        match stored_norm {
            Some(norm) => Self::from_folded(norm),
            None => Self::from_folded(&fold(title, profile)),
        }
    }

    /// Same text as the query, or exactly the query's filtered tokens.
    ///
    /// Stopwords are removed from the query only: "The Django" is not an
    /// exact title for "django", while "Django" is one for "the django".
    pub fn is_exact(&self, query: &QueryAnalysis) -> bool {
        if query.folded.is_empty() {
            return false;
        }
        self.collapsed == query.folded || (!query.is_empty() && self.tokens == query.tokens)
    }

    pub fn shares_token(&self, query: &QueryAnalysis) -> bool {
        self.tokens.iter().any(|t| query.has_token(t))
    }
}
