// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how rescored candidates get sorted.
//!
//! Sort order:
//! 1. **Derived score** - descending
//! 2. **Backend rank** - ascending, so equal scores keep backend order
//!
//! The rank is unique per request, which makes the order total and the sort
//! deterministic whatever algorithm `sort_by` uses.

use crate::types::ScoredCandidate;
use std::cmp::Ordering;

/// Compare two scored candidates for ranking.
///
/// Uses `f64::total_cmp`, so the order is total even for infinities. NaN
/// never reaches here: [`derived_score`](super::derived_score) maps it to 0.
pub fn compare_scored(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    match b.score.total_cmp(&a.score) {
        Ordering::Equal => a.rank.cmp(&b.rank),
        ord => ord,
    }
}
