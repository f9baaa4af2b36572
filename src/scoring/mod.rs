// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how reranked results get their numbers and their order.
//!
//! Scores come from the backend plus title-aware boosts; order is score
//! descending with the backend's own rank breaking ties, so the reranker can
//! only ever promote, never shuffle equals.

mod core;
pub mod ranking;

pub use core::*;
