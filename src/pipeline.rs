// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The full request path.
//!
//! ```text
//! raw query ─→ sanitize ─→ fold (request language) ─→ backend ─→ rerank ─→ page
//! ```
//!
//! The outbound query is folded but not stopword-filtered: the backend has its
//! own notion of common words, and stopwords only matter for the reranker's
//! title comparisons.

use crate::backend::SearchBackend;
use crate::config::{ProfileCache, Resolved, Resolver};
use crate::fold::fold;
use crate::rerank::rerank;
use crate::types::{PageRequest, ResultPage};
use crate::util::tokenize::sanitize_query;

/// The query as the backend will see it.
pub fn normalize_query(raw: &str, resolved: &Resolved) -> String {
    fold(&sanitize_query(raw), &resolved.folding)
}

/// Run one search against a resolver snapshot.
pub fn search_with(
    resolver: &Resolver,
    backend: &dyn SearchBackend,
    query: &str,
    language: &str,
    page: PageRequest,
) -> ResultPage {
    let page_size = Some(page.page_size).filter(|&p| p > 0);
    let resolved = resolver.resolve(language, page_size);
    let page = PageRequest::new(page.page_index, resolved.rerank.page_size);

    let sanitized = sanitize_query(query);
    let normalized = fold(&sanitized, &resolved.folding);
    if normalized.is_empty() {
        tracing::debug!(raw = query, "query empty after sanitizing");
        return ResultPage::empty(page);
    }

    let candidates = backend.execute(&normalized);
    tracing::debug!(
        query = %normalized,
        language = %resolved.language,
        candidates = candidates.len(),
        pool = resolved.rerank.pool_size,
        "search"
    );
    rerank(&sanitized, candidates, &resolved.rerank, page)
}

/// Run one search against the cache's current snapshot.
pub fn search(
    cache: &ProfileCache,
    backend: &dyn SearchBackend,
    query: &str,
    language: &str,
    page: PageRequest,
) -> ResultPage {
    search_with(&cache.snapshot(), backend, query, language, page)
}
