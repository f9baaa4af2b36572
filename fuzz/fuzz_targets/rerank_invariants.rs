// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for reranking invariants.
//!
//! Whatever titles, scores and pool size the fuzzer invents, the reranker must
//! rescore at most the pool, keep every candidate exactly once, keep the
//! remainder in backend order, and never boost a non-positive score.

#![no_main]

use arbitrary::Arbitrary;
use foldrank::{rerank, rerank_all, Candidate, PageRequest, RerankConfig};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    query: String,
    hits: Vec<(String, String, f64)>,
    pool: u8,
    page: u8,
    page_size: u8,
}

fuzz_target!(|input: Input| {
    if input.hits.len() > 300 || input.query.len() > 200 {
        return;
    }

    let candidates: Vec<Candidate> = input
        .hits
        .iter()
        .enumerate()
        .map(|(i, (title, body, score))| Candidate::new(i.to_string(), title.as_str(), *score).with_body(body.as_str()))
        .collect();
    let n = candidates.len();
    let pool = input.pool as usize;
    let cfg = RerankConfig::new(pool, 10);

    let out = rerank_all(&input.query, candidates.clone(), &cfg);

    // INVARIANT 1: nothing dropped or duplicated
    assert_eq!(out.len(), n);
    let mut seen = vec![false; n];
    for c in &out {
        assert!(!seen[c.rank], "rank {} appears twice", c.rank);
        seen[c.rank] = true;
    }

    // INVARIANT 2: pool bound, remainder in backend order
    assert_eq!(out.iter().filter(|c| c.rescored).count(), n.min(pool));
    for (i, c) in out.iter().enumerate().skip(pool) {
        assert_eq!(c.rank, i);
    }

    // INVARIANT 3: pool sorted by score, ties by rank
    for pair in out[..n.min(pool)].windows(2) {
        assert!(
            match pair[0].score.total_cmp(&pair[1].score) {
                std::cmp::Ordering::Greater => true,
                std::cmp::Ordering::Equal => pair[0].rank < pair[1].rank,
                std::cmp::Ordering::Less => false,
            },
            "pool out of order: {:?} then {:?}",
            (pair[0].score, pair[0].rank),
            (pair[1].score, pair[1].rank)
        );
    }

    // INVARIANT 4: no resurrection
    for c in &out {
        if !(c.candidate.score > 0.0) {
            assert!(c.score.total_cmp(&c.candidate.score).is_eq() || c.candidate.score.is_nan());
        }
    }

    // INVARIANT 5: a page is a slice of the full ordering
    let page_size = input.page_size as usize;
    let page = rerank(&input.query, candidates, &cfg, PageRequest::new(input.page as usize, page_size));
    let size = if page_size == 0 { cfg.page_size } else { page_size };
    let start = (input.page as usize * size).min(n);
    let end = (start + size).min(n);
    let ranks = |items: &[foldrank::ScoredCandidate]| items.iter().map(|c| c.rank).collect::<Vec<_>>();
    assert_eq!(ranks(&page.items), ranks(&out[start..end]));
});
