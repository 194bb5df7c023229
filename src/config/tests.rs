//! Configuration tests
//!
//! Round-trip the serialized format through the file parser and check the
//! env > file > default precedence without touching the real environment.

use super::*;
use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn no_env(_: &str) -> Option<String> {
    None
}

/// Serialized default config must parse back
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
}

#[test]
fn test_config_roundtrip_preserves_values() {
    let mut config = Config::default();
    config.source = "https://example.com/checklists".to_string();
    config.layout = SourceLayout::PerPlatform;
    config.platforms = vec!["web".to_string(), "k8s \"cluster\"".to_string()];
    config.export_dir = PathBuf::from("/tmp/exports");
    config.fetch_timeout_secs = 5;
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let file: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    let resolved = Config::resolve(file, no_env);

    assert_eq!(resolved.source, config.source);
    assert_eq!(resolved.layout, SourceLayout::PerPlatform);
    assert_eq!(resolved.platforms, config.platforms);
    assert_eq!(resolved.export_dir, config.export_dir);
    assert_eq!(resolved.fetch_timeout_secs, 5);
    assert!(resolved.logging.file_enabled);
    assert_eq!(resolved.logging.file_rotation, LogRotation::Hourly);
}

#[test]
fn test_defaults_when_nothing_set() {
    let config = Config::resolve(FileConfig::default(), no_env);

    assert_eq!(config.source, "checklist.json");
    assert_eq!(config.layout, SourceLayout::Combined);
    assert_eq!(config.platforms, DEFAULT_PLATFORMS.to_vec());
    assert_eq!(config.fetch_timeout_secs, 30);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
        source = "from-file.json"
        layout = "per_platform"
        platforms = ["web"]
        "#,
    )
    .unwrap();

    let config = Config::resolve(
        file,
        env_from(&[
            ("SECCHECK_SOURCE", "from-env.json"),
            ("SECCHECK_PLATFORMS", "cloud, mobile ,"),
        ]),
    );

    assert_eq!(config.source, "from-env.json");
    assert_eq!(config.layout, SourceLayout::PerPlatform);
    assert_eq!(config.platforms, vec!["cloud", "mobile"]);
}

#[test]
fn test_empty_platform_list_falls_back_to_defaults() {
    let file: FileConfig = toml::from_str("platforms = []").unwrap();
    let config = Config::resolve(file, no_env);
    assert_eq!(config.platforms.len(), DEFAULT_PLATFORMS.len());
}

#[test]
fn test_zero_timeout_ignored() {
    let config = Config::resolve(
        FileConfig::default(),
        env_from(&[("SECCHECK_FETCH_TIMEOUT", "0")]),
    );
    assert_eq!(config.fetch_timeout_secs, 30);
}

#[test]
fn test_unknown_field_type_is_rejected() {
    let parsed: Result<FileConfig, _> = toml::from_str("platforms = \"web\"");
    assert!(parsed.is_err());
}
