//! Folding properties over resolved, realistic profiles.
//!
//! - Idempotence for every configured language
//! - Preserved letters survive, replaced ones never do
//! - Case is carried through folding

use crate::common::{settings, MULTILINGUAL};
use foldrank::{fold, resolve};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

fn word() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "niño", "Niño", "año", "Straße", "café", "naïve", "Œuvre", "Łódź", "Øre", "ﬁnal",
        "résumé", "über", "ÜBER", "tōkyō", "crème", "brûlée", "mañana", "plain", "ASCII", "x",
    ])
    .prop_map(str::to_string)
}

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 0..8).prop_map(|w| w.join(" "))
}

fn language() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["es", "es-MX", "de", "de-AT", "en", "fr", "auto", "zz"])
}

fn case_safe_text() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zéñüøæ ]{0,30}").unwrap()
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Folding twice is folding once, whatever the language.
    #[test]
    fn prop_idempotent_per_language(s in sentence(), lang in language()) {
        let r = resolve(lang, &settings(MULTILINGUAL));
        let once = fold(&s, &r.folding);
        prop_assert_eq!(fold(&once, &r.folding), once);
    }

    /// Spanish keeps every ñ/Ñ; English drops them all.
    #[test]
    fn prop_enye_preserved_only_in_spanish(s in sentence()) {
        let cfg = settings(MULTILINGUAL);
        let es = fold(&s, &resolve("es", &cfg).folding);
        let en = fold(&s, &resolve("en", &cfg).folding);
        let count = |t: &str| t.chars().filter(|c| matches!(c, 'ñ' | 'Ñ')).count();
        prop_assert_eq!(count(&es), count(&s));
        prop_assert_eq!(count(&en), 0);
    }

    /// Replaced keys never appear in output.
    #[test]
    fn prop_replaced_keys_gone(s in sentence()) {
        let r = resolve("de", &settings(MULTILINGUAL));
        let folded = fold(&s, &r.folding);
        prop_assert!(!folded.contains('ß'));
        prop_assert_eq!(folded.matches("Strasse").count(), s.matches("Straße").count());
    }

    /// Folding commutes with uppercasing for letters whose case maps 1:1.
    #[test]
    fn prop_case_carried_through(s in case_safe_text()) {
        let r = resolve("es", &settings(MULTILINGUAL));
        prop_assert_eq!(
            fold(&s.to_uppercase(), &r.folding),
            fold(&s, &r.folding).to_uppercase()
        );
    }

    /// Output never grows combining marks the input did not have.
    #[test]
    fn prop_no_stray_marks(s in sentence(), lang in language()) {
        let r = resolve(lang, &settings(MULTILINGUAL));
        let folded = fold(&s, &r.folding);
        prop_assert!(!folded.chars().any(unicode_normalization::char::is_combining_mark));
    }
}
