//! Search through the in-memory backend, end to end.

use crate::common::{corpus_backend, ids, multilingual_cache, settings, MULTILINGUAL};
use foldrank::pipeline::{search, search_with};
use foldrank::{Candidate, Document, InMemoryBackend, PageRequest, ProfileCache, Resolver};

#[test]
fn spanish_search_distinguishes_ano_and_ano() {
    let cache = multilingual_cache();
    let backend = corpus_backend(&cache);

    let page = search(&cache, &backend, "año", "es", PageRequest::new(0, 10));
    assert_eq!(ids(&page.items), vec!["es-2"]);

    let page = search(&cache, &backend, "ano", "es", PageRequest::new(0, 10));
    assert_eq!(ids(&page.items), vec!["es-3"]);
}

#[test]
fn english_search_folds_enye_away() {
    let cache = multilingual_cache();
    let backend = corpus_backend(&cache);
    let page = search(&cache, &backend, "Niño", "en", PageRequest::new(0, 10));
    // Spanish documents store "niño"; an English query folds to "nino".
    assert!(page.is_empty());
}

#[test]
fn german_search_matches_both_spellings() {
    let cache = multilingual_cache();
    let backend = corpus_backend(&cache);
    let page = search(&cache, &backend, "Straße", "de", PageRequest::new(0, 10));
    assert_eq!(page.items[0].candidate.id, "de-1");
    assert!(page.items[0].boosts.exact_title);
    assert!(ids(&page.items).contains(&"de-2".to_string()));
}

#[test]
fn exact_title_promoted_over_backend_order() {
    let cache = multilingual_cache();
    let backend = corpus_backend(&cache);
    let page = search(&cache, &backend, "django", "auto", PageRequest::new(0, 10));
    assert_eq!(page.items[0].candidate.id, "en-3");
    assert_eq!(page.total, 3);
}

#[test]
fn accented_query_finds_plain_and_accented_text() {
    let cache = multilingual_cache();
    let backend = corpus_backend(&cache);
    let page = search(&cache, &backend, "resume", "en", PageRequest::new(0, 10));
    assert_eq!(ids(&page.items), vec!["en-4"]);
}

#[test]
fn operators_are_stripped_before_backend() {
    let cache = multilingual_cache();
    let backend = corpus_backend(&cache);
    let page = search(&cache, &backend, "\"django\"^2 (cms)", "en", PageRequest::new(0, 10));
    assert_eq!(page.items[0].candidate.id, "en-1");
}

#[test]
fn reload_changes_folding_for_new_requests() {
    let cache = ProfileCache::new(settings(r#"{"language": "es"}"#));
    let seen = parking_lot::Mutex::new(Vec::new());
    let backend = |q: &str| -> Vec<Candidate> {
        seen.lock().push(q.to_string());
        Vec::new()
    };

    search(&cache, &backend, "niño", "auto", PageRequest::new(0, 10));
    cache.reload(settings(MULTILINGUAL));
    search(&cache, &backend, "niño", "es", PageRequest::new(0, 10));

    assert_eq!(*seen.lock(), vec!["nino", "niño"]);
}

#[test]
fn rerank_language_override_uses_other_stopwords() {
    let s = settings(r#"{"rerank_language": "es"}"#);
    let resolver = Resolver::new(s);
    let backend = |_: &str| -> Vec<Candidate> {
        vec![
            Candidate::new("1", "Guía completa", 1.0),
            Candidate::new("2", "Guía", 1.0),
        ]
    };
    // "la" is a Spanish stopword but not an English one.
    let page = search_with(&resolver, &backend, "la guia", "en", PageRequest::new(0, 10));
    assert_eq!(page.items[0].candidate.id, "2");
    assert!(page.items[0].boosts.exact_title);
    assert!(!page.items[1].boosts.exact_title);
}

#[test]
fn rerank_language_override_refolds_titles() {
    let resolver = Resolver::new(settings(
        r#"{"rerank_language": "es", "folding_profiles": {"es": {"preserve": ["ñ", "Ñ"]}}}"#,
    ));
    let docs = vec![Document::new("1", "El Niño y el clima"), Document::new("2", "El Niño")];
    let backend = InMemoryBackend::from_documents(&docs, &resolver);

    // Stored norms were folded in English ("el nino"); the reranker keeps ñ.
    let page = search_with(&resolver, &backend, "El Niño", "en", PageRequest::new(0, 10));
    assert_eq!(ids(&page.items), vec!["2", "1"]);
    assert!(page.items[0].boosts.exact_title);
    assert!(!page.items[1].boosts.exact_title);
    assert!(page.items[1].boosts.title_phrase);
}

#[test]
fn pool_ceiling_bounds_rescoring() {
    let resolver = Resolver::new(settings(r#"{"pool_ceiling": 10}"#));
    let backend = |_: &str| -> Vec<Candidate> {
        (0..40).map(|i| Candidate::new(i.to_string(), "match", 1.0)).collect()
    };
    let page = search_with(&resolver, &backend, "match", "en", PageRequest::new(0, 40));
    assert_eq!(page.items.iter().filter(|c| c.rescored).count(), 10);
    assert_eq!(page.len(), 40);
}
