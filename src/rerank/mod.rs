// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bounded reranking of backend results.
//!
//! The backend's ranking is good at "which documents mention these words" and
//! bad at "which document *is* this". The reranker rescues the second case by
//! rescoring a bounded prefix of the backend's results with title-aware boosts.
//!
//! # Pipeline
//!
//! ```text
//! candidates ─┬─ [0, pool)  → rescore → sort(score desc, rank asc) ─┐
//!             └─ [pool, n)  → backend order ─────────────────────────┴→ concat → page slice
//! ```
//!
//! Work is bounded by `pool_size`, never by the total hit count: a query that
//! matches half the site rescores the same number of candidates as one that
//! matches a page of them.
//!
//! # Invariants
//!
//! - **Pool bound**: at most `pool_size` candidates are rescored
//! - **Stability**: equal derived scores keep backend order
//! - **No resurrection**: backend score `<= 0` gets no boost
//! - **Remainder order**: candidates past the pool keep backend order

pub mod query;

use crate::fold::stopwords::StopwordSet;
use crate::fold::{fold, FoldingProfile};
use crate::scoring::ranking::compare_scored;
use crate::scoring::{contains_phrase, derived_score, match_density, RerankWeights};
use crate::types::{Boosts, Candidate, PageRequest, ResultPage, ScoredCandidate};
use crate::util::lang::LangCode;
use crate::util::tokenize::tokenize;
use query::{QueryAnalysis, TitleAnalysis};
use std::collections::HashMap;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Everything the reranker needs for one request.
#[derive(Debug, Clone)]
pub struct RerankConfig {
    /// Number of leading candidates to rescore.
    pub pool_size: usize,
    /// The ceiling `pool_size` was clamped to.
    pub pool_ceiling: usize,
    pub page_size: usize,
    /// Language whose profile and stopwords are used.
    pub language: LangCode,
    pub profile: Arc<FoldingProfile>,
    pub stopwords: Arc<StopwordSet>,
    pub weights: RerankWeights,
}

impl RerankConfig {
    /// A config with the built-in profile, no stopwords and default weights.
    pub fn new(pool_size: usize, page_size: usize) -> Self {
        Self {
            pool_size,
            pool_ceiling: pool_size,
            page_size,
            language: LangCode::fallback(),
            profile: Arc::new(FoldingProfile::builtin_default()),
            stopwords: Arc::new(StopwordSet::default()),
            weights: RerankWeights::default(),
        }
    }

    pub fn with_profile(mut self, profile: Arc<FoldingProfile>) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_stopwords(mut self, stopwords: Arc<StopwordSet>) -> Self {
        self.stopwords = stopwords;
        self
    }

    pub fn with_weights(mut self, weights: RerankWeights) -> Self {
        self.weights = weights;
        self
    }
}

/// True when the candidate's stored `title_norm`/`body_norm` were folded for
/// the rerank language. Anything else is refolded with the rerank profile.
pub fn has_rerank_norms(candidate: &Candidate, config: &RerankConfig) -> bool {
    candidate
        .language
        .as_deref()
        .and_then(LangCode::parse)
        .is_some_and(|lang| lang == config.language)
}

/// Boosts for one candidate against an analyzed query.
pub fn candidate_boosts(
    candidate: &Candidate,
    title: &TitleAnalysis,
    query: &QueryAnalysis,
    config: &RerankConfig,
) -> Boosts {
    if query.folded.is_empty() {
        return Boosts::default();
    }

    let exact_title = title.is_exact(query);
    let title_phrase = !exact_title && contains_phrase(&title.phrase, &query.phrase);

    let density = if title.shares_token(query) {
        match_density(&title.tokens, |t| query.has_token(t))
    } else {
        let body = match &candidate.body_norm {
            Some(norm) if has_rerank_norms(candidate, config) => norm.to_lowercase(),
            _ => fold(&candidate.body, &config.profile).to_lowercase(),
        };
        match_density(&tokenize(&body), |t| query.has_token(t))
    };

    Boosts {
        exact_title,
        title_phrase,
        density,
    }
}

/// Analyze each distinct (title, usable stored norm) pair once.
///
/// Returns the analyses and, for each pool position, the index of its
/// analysis.
fn analyze_titles(pool: &[Candidate], config: &RerankConfig) -> (Vec<TitleAnalysis>, Vec<usize>) {
    let mut seen: HashMap<(&str, Option<&str>), usize> = HashMap::new();
    let mut distinct: Vec<(&str, Option<&str>)> = Vec::new();

    let slots = pool
        .iter()
        .map(|c| {
            let norm = c
                .title_norm
                .as_deref()
                .filter(|_| has_rerank_norms(c, config));
            *seen.entry((c.title.as_str(), norm)).or_insert_with(|| {
                distinct.push((c.title.as_str(), norm));
                distinct.len() - 1
            })
        })
        .collect::<Vec<usize>>();

    #[cfg(feature = "parallel")]
    let analyses: Vec<TitleAnalysis> = distinct
        .into_par_iter()
        .map(|(title, norm)| TitleAnalysis::new(title, norm, &config.profile))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let analyses: Vec<TitleAnalysis> = distinct
        .into_iter()
        .map(|(title, norm)| TitleAnalysis::new(title, norm, &config.profile))
        .collect();

    (analyses, slots)
}

fn rescore(
    rank: usize,
    candidate: Candidate,
    title: &TitleAnalysis,
    query: &QueryAnalysis,
    config: &RerankConfig,
) -> ScoredCandidate {
    let boosts = candidate_boosts(&candidate, title, query, config);
    let score = derived_score(candidate.score, &boosts, &config.weights);
    ScoredCandidate {
        candidate,
        score,
        rank,
        boosts,
        rescored: true,
    }
}

/// Rerank every candidate, returning the full ordering (pool first).
pub fn rerank_all(query: &str, candidates: Vec<Candidate>, config: &RerankConfig) -> Vec<ScoredCandidate> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let pool_len = candidates.len().min(config.pool_size);
    let mut candidates = candidates;
    let remainder = candidates.split_off(pool_len);
    let pool = candidates;

    let analysis = QueryAnalysis::new(query, &config.profile, &config.stopwords);
    let (titles, slots) = analyze_titles(&pool, config);

    #[cfg(feature = "parallel")]
    let mut scored: Vec<ScoredCandidate> = pool
        .into_par_iter()
        .zip(slots)
        .enumerate()
        .map(|(rank, (c, slot))| rescore(rank, c, &titles[slot], &analysis, config))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let mut scored: Vec<ScoredCandidate> = pool
        .into_iter()
        .zip(slots)
        .enumerate()
        .map(|(rank, (c, slot))| rescore(rank, c, &titles[slot], &analysis, config))
        .collect();

    // INVARIANT: ranks are unique, so this order is total and stable.
    scored.sort_by(compare_scored);

    tracing::trace!(
        pool = pool_len,
        remainder = remainder.len(),
        query = %analysis.folded,
        "reranked pool"
    );

    scored.extend(
        remainder
            .into_iter()
            .enumerate()
            .map(|(i, c)| ScoredCandidate::passthrough(c, pool_len + i)),
    );
    scored
}

/// Slice one page out of a full ordering. Pages past the end are empty.
pub fn paginate(ordered: Vec<ScoredCandidate>, page: PageRequest) -> ResultPage {
    let total = ordered.len();
    let start = page.start().min(total);
    let end = start.saturating_add(page.page_size).min(total);
    let items = ordered.into_iter().skip(start).take(end - start).collect();
    ResultPage {
        items,
        page_index: page.page_index,
        page_size: page.page_size,
        total,
    }
}

/// Rerank and return one page.
///
/// A zero `page.page_size` falls back to `config.page_size`.
pub fn rerank(
    query: &str,
    candidates: Vec<Candidate>,
    config: &RerankConfig,
    page: PageRequest,
) -> ResultPage {
    let page = if page.page_size == 0 {
        PageRequest::new(page.page_index, config.page_size)
    } else {
        page
    };
    if candidates.is_empty() {
        return ResultPage::empty(page);
    }
    paginate(rerank_all(query, candidates, config), page)
}
