// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Utility modules for language codes and tokenization.
//!
//! The small helpers every other module leans on: turning `pt_BR` into a
//! lookup key, and turning text into the words the reranker compares.

pub mod lang;
pub mod tokenize;
