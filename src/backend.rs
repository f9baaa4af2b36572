// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search backend seam.
//!
//! A backend takes a normalized query and returns candidates in its own
//! relevance order. The reranker never sees the backend's query language,
//! index format or scoring model, only this ordered list.

use crate::config::Resolver;
use crate::index::{prepare_documents, Document};
use crate::types::Candidate;
use crate::util::tokenize::tokenize;
use std::collections::HashSet;

/// Title matches count this many times more than body matches.
pub const TITLE_WEIGHT: f64 = 6.0;

/// Anything that can answer a normalized query with ordered candidates.
pub trait SearchBackend: Send + Sync {
    /// Run `normalized_query` (sanitized and folded, stopwords intact) and
    /// return candidates, most relevant first.
    fn execute(&self, normalized_query: &str) -> Vec<Candidate>;
}

impl<F> SearchBackend for F
where
    F: Fn(&str) -> Vec<Candidate> + Send + Sync,
{
    fn execute(&self, normalized_query: &str) -> Vec<Candidate> {
        self(normalized_query)
    }
}

/// A small in-memory backend over prepared documents.
///
/// Scores each document by term frequency of the query tokens in its folded
/// title (weighted [`TITLE_WEIGHT`]) and body. Documents with no match are
/// left out; ties keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    docs: Vec<Candidate>,
    title_tokens: Vec<Vec<String>>,
    body_tokens: Vec<Vec<String>>,
}

impl InMemoryBackend {
    /// Wrap already-prepared candidates.
    pub fn new(docs: Vec<Candidate>) -> Self {
        let title_tokens = docs
            .iter()
            .map(|d| tokenize(d.title_norm.as_deref().unwrap_or(&d.title)))
            .collect();
        let body_tokens = docs
            .iter()
            .map(|d| tokenize(d.body_norm.as_deref().unwrap_or(&d.body)))
            .collect();
        Self {
            docs,
            title_tokens,
            body_tokens,
        }
    }

    /// Prepare raw documents with their languages' profiles and index them.
    pub fn from_documents(docs: &[Document], resolver: &Resolver) -> Self {
        Self::new(prepare_documents(docs, resolver))
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    fn score(&self, i: usize, query: &HashSet<String>) -> f64 {
        let tf = |tokens: &[String]| tokens.iter().filter(|t| query.contains(*t)).count() as f64;
        TITLE_WEIGHT * tf(&self.title_tokens[i]) + tf(&self.body_tokens[i])
    }
}

impl SearchBackend for InMemoryBackend {
    fn execute(&self, normalized_query: &str) -> Vec<Candidate> {
        let query: HashSet<String> = tokenize(normalized_query).into_iter().collect();
        if query.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<(usize, f64)> = (0..self.docs.len())
            .map(|i| (i, self.score(i, &query)))
            .filter(|&(_, score)| score > 0.0)
            .collect();
        hits.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        tracing::trace!(query = normalized_query, hits = hits.len(), "in-memory backend");

        hits.into_iter()
            .map(|(i, score)| Candidate {
                score,
                ..self.docs[i].clone()
            })
            .collect()
    }
}
