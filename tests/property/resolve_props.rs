//! Resolution properties: pool sizing and the fallback chain.

use crate::common::{settings, MULTILINGUAL};
use foldrank::{fold, pool_size, Resolver, Settings};
use proptest::prelude::*;

fn region() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z]{2}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// The ceiling always bounds the pool; otherwise the pool covers ten
    /// pages and the floor.
    #[test]
    fn prop_pool_size_bounds(
        page_size in 1usize..500,
        hint in prop::option::of(1usize..2000),
        ceiling in 10usize..5000,
    ) {
        let pool = pool_size(page_size, hint, ceiling);
        prop_assert!(pool <= ceiling);
        prop_assert_eq!(pool, (page_size * 10).max(hint.unwrap_or(200)).min(ceiling));
        prop_assert!(pool >= page_size.min(ceiling));
    }

    /// A regional variant with no entry of its own resolves like its base.
    #[test]
    fn prop_region_falls_back_to_base(region in region(), sep in prop::sample::select(vec!["-", "_"])) {
        let resolver = Resolver::new(settings(MULTILINGUAL));
        let base = resolver.resolve("es", None);
        let regional = resolver.resolve(&format!("es{sep}{region}"), None);
        prop_assert_eq!(fold("Niño y Año", &regional.folding), fold("Niño y Año", &base.folding));
        prop_assert_eq!(regional.folding.preserve(), base.folding.preserve());
    }

    /// Resolution never fails, whatever the code.
    #[test]
    fn prop_any_code_resolves(code in "\\PC{0,12}") {
        let r = Resolver::new(Settings::default()).resolve(&code, None);
        prop_assert!(!r.language.as_str().is_empty());
        prop_assert!(r.rerank.pool_size <= r.rerank.pool_ceiling);
    }
}
