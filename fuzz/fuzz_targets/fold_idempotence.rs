// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for folding invariants.
//!
//! Arbitrary profiles, arbitrary text. Folding must never panic and must be
//! idempotent. Preserve entries are single characters, the shape real
//! deployments use.

#![no_main]

use arbitrary::Arbitrary;
use foldrank::{fold, FoldingProfile};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    preserve: Vec<char>,
    replace: Vec<(String, String)>,
    text: String,
}

fuzz_target!(|input: Input| {
    // Keep runs short: profile construction is quadratic in rule count.
    if input.preserve.len() > 8 || input.replace.len() > 8 || input.text.len() > 512 {
        return;
    }

    let preserve: Vec<String> = input.preserve.iter().map(char::to_string).collect();
    let profile = FoldingProfile::new(&preserve, input.replace.iter().map(|(k, v)| (k, v)));

    let once = fold(&input.text, &profile);

    // INVARIANT 1: idempotence
    let twice = fold(&once, &profile);
    assert_eq!(once, twice, "fold not idempotent for {:?}", input.text);

    // INVARIANT 2: deterministic
    assert_eq!(once, fold(&input.text, &profile));

    // INVARIANT 3: empty in, empty out
    assert!(!input.text.is_empty() || once.is_empty());
});
