//! Loading settings from disk.

use foldrank::config::SETTINGS_ENV;
use foldrank::{fold, Error, ProfileCache, Settings};
use std::io::Write;

fn write_settings(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn explicit_path_is_loaded_and_clamped() {
    let file = write_settings(r#"{"language": "es", "page_size": 0, "pool_ceiling": 3}"#);
    let s = Settings::load(Some(file.path())).unwrap();
    assert_eq!(s.language, "es");
    assert_eq!(s.page_size, 10);
    assert_eq!(s.pool_ceiling, 10);
}

#[test]
fn env_var_names_the_settings_file() {
    let file = write_settings(r#"{"keep_enye": true}"#);
    std::env::set_var(SETTINGS_ENV, file.path());
    let loaded = Settings::load(None);
    std::env::remove_var(SETTINGS_ENV);

    let cache = ProfileCache::new(loaded.unwrap());
    assert_eq!(fold("mañana", &cache.resolve("es", None).folding), "mañana");
}

#[test]
fn malformed_profile_entry_does_not_reject_file() {
    let file = write_settings(
        r#"{"folding_profiles": {"es": ["ñ"], "de": {"replace": {"ß": "ss"}}}}"#,
    );
    let cache = ProfileCache::new(Settings::load(Some(file.path())).unwrap());
    assert_eq!(fold("niño", &cache.resolve("es", None).folding), "nino");
    assert_eq!(fold("Straße", &cache.resolve("de", None).folding), "Strasse");
}

#[test]
fn broken_json_is_a_settings_error() {
    let file = write_settings(r#"{"language": "#);
    let err = Settings::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, Error::Settings(_)));
    assert!(err.to_string().contains("parse settings"));
}

#[test]
fn unknown_keys_are_ignored() {
    let file = write_settings(r#"{"language": "de", "haystack_backend": "whoosh"}"#);
    let s = Settings::load(Some(file.path())).unwrap();
    assert_eq!(s.language, "de");
}
