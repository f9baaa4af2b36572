//! Shared test utilities and fixtures.

#![allow(dead_code)]

use foldrank::{Candidate, Document, InMemoryBackend, ProfileCache, RerankConfig, Resolver, Settings};

// ============================================================================
// SETTINGS
// ============================================================================

/// Settings from inline JSON. Panics on malformed fixtures.
pub fn settings(json: &str) -> Settings {
    Settings::from_json(json).expect("fixture settings should parse")
}

/// A multilingual deployment: Spanish keeps ñ, German spells out ß.
pub const MULTILINGUAL: &str = r#"{
    "language": "en",
    "folding_profiles": {
        "es": {"preserve": ["ñ", "Ñ"]},
        "de": {"replace": {"ß": "ss", "ẞ": "SS"}}
    },
    "stopwords": {"add": ["cms"]}
}"#;

pub fn multilingual_cache() -> ProfileCache {
    ProfileCache::new(settings(MULTILINGUAL))
}

/// Rerank config for `lang` under `settings`.
pub fn rerank_config(settings: &Settings, lang: &str, page_size: usize) -> RerankConfig {
    Resolver::new(settings.clone()).resolve(lang, Some(page_size)).rerank
}

// ============================================================================
// CANDIDATES
// ============================================================================

/// Candidates with the given titles, ids "0".."n", all with score 1.0.
pub fn candidates(titles: &[&str]) -> Vec<Candidate> {
    titles
        .iter()
        .enumerate()
        .map(|(i, t)| Candidate::new(i.to_string(), *t, 1.0))
        .collect()
}

/// `n` candidates titled "doc {i}" in backend order.
pub fn numbered(n: usize) -> Vec<Candidate> {
    (0..n)
        .map(|i| Candidate::new(i.to_string(), format!("doc {i}"), 1.0))
        .collect()
}

pub fn ids(items: &[foldrank::ScoredCandidate]) -> Vec<String> {
    items.iter().map(|s| s.candidate.id.clone()).collect()
}

// ============================================================================
// DOCUMENTS
// ============================================================================

pub fn corpus() -> Vec<Document> {
    vec![
        Document::new("es-1", "El Niño y el clima").with_language("es").with_body("el fenómeno de el niño"),
        Document::new("es-2", "Año nuevo").with_language("es").with_body("celebración del año"),
        Document::new("es-3", "El ano").with_language("es").with_body("anatomía"),
        Document::new("de-1", "Straße").with_language("de").with_body("eine lange Straße"),
        Document::new("de-2", "Strassenbahn").with_language("de").with_body("die Bahn auf der Strasse"),
        Document::new("en-1", "Django CMS Guide").with_body("a guide to the django cms"),
        Document::new("en-2", "Using Django Effectively").with_body("tips for django projects"),
        Document::new("en-3", "Django").with_body("the framework"),
        Document::new("en-4", "Café culture").with_body("coffee and résumé writing"),
    ]
}

pub fn corpus_backend(cache: &ProfileCache) -> InMemoryBackend {
    InMemoryBackend::from_documents(&corpus(), &cache.snapshot())
}
