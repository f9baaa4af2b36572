//! Worked examples: folding per language, exact-title ranking, pagination.

use crate::common::{candidates, ids, numbered, rerank_config, settings};
use foldrank::{fold, rerank, rerank_all, resolve, PageRequest, RerankConfig, Settings};

// ============================================================================
// FOLDING
// ============================================================================

#[test]
fn spanish_profile_keeps_enye() {
    let s = settings(r#"{"folding_profiles": {"es": {"preserve": ["ñ", "Ñ"]}}}"#);
    assert_eq!(fold("El Niño", &resolve("es", &s).folding), "El Niño");
    assert_eq!(fold("El Niño", &resolve("es-MX", &s).folding), "El Niño");
}

#[test]
fn keep_enye_false_without_spanish_profile_strips() {
    let s = settings(r#"{"keep_enye": false}"#);
    assert_eq!(fold("El Niño", &resolve("es", &s).folding), "El Nino");
}

#[test]
fn german_profile_replaces_eszett() {
    let s = settings(r#"{"folding_profiles": {"de": {"replace": {"ß": "ss"}}}}"#);
    assert_eq!(fold("Straße", &resolve("de", &s).folding), "Strasse");
    assert_eq!(fold("Straße", &resolve("de-AT", &s).folding), "Strasse");
}

#[test]
fn unconfigured_language_uses_plain_stripping() {
    let r = resolve("fi", &Settings::default());
    assert_eq!(fold("Hyvää päivää", &r.folding), "Hyvaa paivaa");
}

// ============================================================================
// RANKING
// ============================================================================

#[test]
fn exact_title_match_ranks_first() {
    let cfg = rerank_config(&Settings::default(), "en", 10);
    let out = rerank_all(
        "django",
        candidates(&["Django CMS Guide", "Using Django Effectively", "Django"]),
        &cfg,
    );
    assert_eq!(out[0].candidate.title, "Django");
    assert!(out[0].boosts.exact_title);

    // The other two match as phrases with equal density; backend order decides.
    assert_eq!(out[1].candidate.title, "Django CMS Guide");
    assert_eq!(out[2].candidate.title, "Using Django Effectively");
    assert_eq!(out[1].score, out[2].score);
}

#[test]
fn shorter_title_wins_on_density() {
    let cfg = rerank_config(&Settings::default(), "en", 10);
    let out = rerank_all(
        "django",
        candidates(&["Django with a very long trailing title", "Django Tips"]),
        &cfg,
    );
    assert_eq!(out[0].candidate.title, "Django Tips");
    assert!(out[0].boosts.density > out[1].boosts.density);
}

#[test]
fn stopwords_do_not_block_exact_match() {
    let cfg = rerank_config(&Settings::default(), "en", 10);
    let out = rerank_all("the guide", candidates(&["Reference", "Guide"]), &cfg);
    assert_eq!(out[0].candidate.title, "Guide");
    assert!(out[0].boosts.exact_title);
}

#[test]
fn accented_query_matches_plain_title() {
    let cfg = rerank_config(&Settings::default(), "fr", 10);
    let out = rerank_all("Crème brûlée", candidates(&["Desserts", "Creme Brulee"]), &cfg);
    assert_eq!(out[0].candidate.title, "Creme Brulee");
    assert!(out[0].boosts.exact_title);
}

#[test]
fn custom_weights_change_magnitudes() {
    let s = settings(r#"{"weights": {"exact_title": 100, "title_phrase": 0, "short_match": 0}}"#);
    let cfg = rerank_config(&s, "en", 10);
    let out = rerank_all("django", candidates(&["Django CMS", "Django"]), &cfg);
    assert_eq!(out[0].score, 101.0);
    assert_eq!(out[1].score, 1.0);
}

// ============================================================================
// PAGINATION
// ============================================================================

#[test]
fn partial_last_page_returns_remaining_items() {
    let s = settings(r#"{"pool_ceiling": 100}"#);
    let cfg = rerank_config(&s, "en", 20);
    assert_eq!(cfg.pool_size, 100);

    let all = rerank_all("nothing", numbered(250), &cfg);
    assert_eq!(all.iter().filter(|c| c.rescored).count(), 100);

    let page = rerank("nothing", numbered(250), &cfg, PageRequest::new(12, 20));
    assert_eq!(page.len(), 10);
    assert_eq!(page.num_pages(), 13);
    let expected: Vec<String> = (240..250).map(|i| i.to_string()).collect();
    assert_eq!(ids(&page.items), expected);
}

#[test]
fn page_beyond_results_is_empty() {
    let cfg = RerankConfig::new(200, 20);
    let page = rerank("x", numbered(250), &cfg, PageRequest::new(13, 20));
    assert!(page.is_empty());
    assert_eq!(page.total, 250);
}

#[test]
fn pages_partition_the_ordering() {
    let cfg = RerankConfig::new(30, 7);
    let full = ids(&rerank_all("doc 3", numbered(50), &cfg));
    let mut paged = Vec::new();
    for p in 0..8 {
        paged.extend(ids(&rerank("doc 3", numbered(50), &cfg, PageRequest::new(p, 7)).items));
    }
    assert_eq!(paged, full);
}
