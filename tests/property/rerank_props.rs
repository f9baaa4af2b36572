//! Reranking invariants.
//!
//! - Pool bound: at most `pool_size` candidates are rescored
//! - Permutation: nothing is dropped or duplicated
//! - Remainder keeps backend order
//! - Stability: equal scores keep backend order
//! - No resurrection: non-positive scores are never boosted
//! - Pages tile the full ordering

use foldrank::{rerank, rerank_all, Candidate, PageRequest, RerankConfig};
use proptest::prelude::*;
use std::collections::BTreeSet;

// ============================================================================
// STRATEGIES
// ============================================================================

fn title() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!["django", "cms", "guide", "using", "the", "café", "niño", "über"]),
        0..5,
    )
    .prop_map(|w| w.join(" "))
}

fn score() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), Just(-1.0), Just(1.0), 0.0f64..20.0]
}

fn candidates() -> impl Strategy<Value = Vec<Candidate>> {
    prop::collection::vec((title(), score()), 0..60).prop_map(|v| {
        v.into_iter()
            .enumerate()
            .map(|(i, (t, s))| Candidate::new(i.to_string(), t, s))
            .collect()
    })
}

fn query() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["django", "Django CMS", "the guide", "cafe", "niño", "the", "", "zzz"])
        .prop_map(str::to_string)
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_pool_bound(cands in candidates(), q in query(), pool in 0usize..80) {
        let n = cands.len();
        let out = rerank_all(&q, cands, &RerankConfig::new(pool, 10));
        prop_assert_eq!(out.iter().filter(|c| c.rescored).count(), n.min(pool));
        prop_assert!(out.iter().take(n.min(pool)).all(|c| c.rescored));
    }

    #[test]
    fn prop_output_is_permutation(cands in candidates(), q in query(), pool in 0usize..80) {
        let expected: BTreeSet<String> = cands.iter().map(|c| c.id.clone()).collect();
        let n = cands.len();
        let out = rerank_all(&q, cands, &RerankConfig::new(pool, 10));
        let got: BTreeSet<String> = out.iter().map(|c| c.candidate.id.clone()).collect();
        prop_assert_eq!(out.len(), n);
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_remainder_keeps_backend_order(cands in candidates(), q in query(), pool in 0usize..80) {
        let out = rerank_all(&q, cands, &RerankConfig::new(pool, 10));
        for (i, c) in out.iter().enumerate().skip(pool) {
            prop_assert_eq!(c.rank, i);
            prop_assert_eq!(c.score, c.candidate.score);
        }
    }

    #[test]
    fn prop_pool_sorted_and_stable(cands in candidates(), q in query()) {
        let out = rerank_all(&q, cands, &RerankConfig::new(1000, 10));
        for pair in out.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].rank < pair[1].rank);
            }
        }
    }

    #[test]
    fn prop_no_resurrection(cands in candidates(), q in query()) {
        let out = rerank_all(&q, cands, &RerankConfig::new(1000, 10));
        for c in &out {
            if c.candidate.score <= 0.0 {
                prop_assert_eq!(c.score, c.candidate.score);
            } else {
                prop_assert!(c.score >= c.candidate.score);
            }
        }
    }

    #[test]
    fn prop_pages_tile_ordering(
        cands in candidates(),
        q in query(),
        pool in 0usize..80,
        page_size in 1usize..15,
    ) {
        let cfg = RerankConfig::new(pool, page_size);
        let full: Vec<String> = rerank_all(&q, cands.clone(), &cfg)
            .into_iter()
            .map(|c| c.candidate.id)
            .collect();

        let mut paged = Vec::new();
        let mut index = 0;
        loop {
            let page = rerank(&q, cands.clone(), &cfg, PageRequest::new(index, page_size));
            prop_assert!(page.len() <= page_size);
            if page.is_empty() {
                break;
            }
            paged.extend(page.items.into_iter().map(|c| c.candidate.id));
            index += 1;
        }
        prop_assert_eq!(paged, full);
    }

    #[test]
    fn prop_rerank_is_deterministic(cands in candidates(), q in query()) {
        let cfg = RerankConfig::new(25, 10);
        let a = rerank_all(&q, cands.clone(), &cfg);
        let b = rerank_all(&q, cands, &cfg);
        prop_assert_eq!(a, b);
    }
}
