// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The records that flow through a search request.
//!
//! A [`Candidate`] is what the backend hands us. A [`ScoredCandidate`] is the
//! same hit with the reranker's opinion attached. A [`ResultPage`] is the
//! slice the caller actually renders.
//!
//! # Invariants
//!
//! - **Candidate** is never mutated after retrieval. The reranker wraps it.
//! - **ScoredCandidate.rank** is the candidate's position in the backend's
//!   ordering. It is the tie-breaker, so equal scores keep backend order.
//! - **ResultPage.items.len() <= page_size**, and only the last page is short.

use serde::{Deserialize, Serialize};

/// One backend search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub title: String,
    /// Body text or snippet.
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub url: String,
    /// Language tag of the stored document, if the backend kept one.
    #[serde(default)]
    pub language: Option<String>,
    /// Backend-assigned relevance.
    #[serde(default)]
    pub score: f64,
    /// Folded title stored at index time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_norm: Option<String>,
    /// Folded body stored at index time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_norm: Option<String>,
}

impl Candidate {
    /// A bare candidate with just an id, title and backend score.
    pub fn new(id: impl Into<String>, title: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: String::new(),
            url: String::new(),
            language: None,
            score,
            title_norm: None,
            body_norm: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
}

/// Which boosts fired for a candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Boosts {
    /// Folded title equals the folded query.
    pub exact_title: bool,
    /// Folded query occurs in the folded title as a phrase.
    pub title_phrase: bool,
    /// Fraction of the matched field's tokens that are query tokens, in `[0, 1]`.
    pub density: f64,
}

impl Boosts {
    pub fn is_empty(&self) -> bool {
        !self.exact_title && !self.title_phrase && self.density == 0.0
    }
}

/// A candidate with its derived rerank score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    /// Backend score plus boosts (equal to the backend score outside the pool).
    pub score: f64,
    /// Position in the backend's ordering.
    pub rank: usize,
    pub boosts: Boosts,
    /// False for candidates past the rerank pool.
    pub rescored: bool,
}

impl ScoredCandidate {
    /// Wrap a candidate without rescoring it.
    pub fn passthrough(candidate: Candidate, rank: usize) -> Self {
        let score = candidate.score;
        Self {
            candidate,
            score,
            rank,
            boosts: Boosts::default(),
            rescored: false,
        }
    }
}

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page_index: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size,
        }
    }

    /// First item index of this page, saturating on overflow.
    pub fn start(&self) -> usize {
        self.page_index.saturating_mul(self.page_size)
    }
}

/// One page of reranked results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPage {
    pub items: Vec<ScoredCandidate>,
    pub page_index: usize,
    pub page_size: usize,
    /// Number of results across all pages.
    pub total: usize,
}

impl ResultPage {
    pub fn empty(page: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            page_index: page.page_index,
            page_size: page.page_size,
            total: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn num_pages(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.page_index.saturating_add(1) < self.num_pages()
    }

    pub fn has_other_pages(&self) -> bool {
        self.num_pages() > 1
    }
}
