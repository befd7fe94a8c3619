use gleaner::{CollectError, Collector, CollectorConfig};

#[test]
fn save_then_load_preserves_every_field() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("nested").join("config.toml");

    let mut config = CollectorConfig {
        sources: vec!["wikipedia".into(), "homepage".into(), "news".into()],
        timeout_secs: 4,
        max_chars: 1_000,
        cache_cap: 64,
        news_items: 3,
        ..Default::default()
    };
    config.endpoints.sparql = "https://mirror.example/sparql".into();
    config.web.keep_count = 2;
    config.web.user_agent = Some("gleaner-test/1.0".into());
    config.web.tld_allowlist = vec!["edu".into(), "ac.uk".into()];

    config.save_to_file(&path).expect("save");
    let loaded = CollectorConfig::from_file(&path).expect("load");

    assert_eq!(loaded, config);
}

#[test]
fn default_config_round_trips() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");

    CollectorConfig::default().save_to_file(&path).expect("save");
    let loaded = CollectorConfig::from_file(&path).expect("load");

    assert_eq!(loaded, CollectorConfig::default());
}

#[test]
fn partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
sources = ["search"]

[web]
recency_days = 30
"#,
    )
    .expect("write");

    let config = CollectorConfig::from_file(&path).expect("load");

    assert_eq!(config.sources, vec!["search"]);
    assert_eq!(config.web.recency_days, 30);
    assert_eq!(config.max_chars, 4_096);
    assert_eq!(config.web.keep_count, 8);
}

#[test]
fn invalid_toml_is_a_config_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "this is not valid toml {{{").expect("write");

    let result = CollectorConfig::from_file(&path);

    assert!(matches!(result, Err(CollectError::Config(_))));
}

#[test]
fn collector_rejects_invalid_config() {
    let config = CollectorConfig {
        cache_cap: 0,
        ..Default::default()
    };

    let result = Collector::new(config);

    assert!(matches!(result, Err(CollectError::Config(_))));
}

#[test]
fn fallback_file_is_loaded_when_no_path_given() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let fallback = dir.path().join("gleaner").join("config.toml");
    let config = CollectorConfig {
        sources: vec!["news".into()],
        ..Default::default()
    };
    config.save_to_file(&fallback).expect("save");

    let loaded = CollectorConfig::load_with_fallback(None, &fallback).expect("load");

    assert_eq!(loaded, Some(config));
}

#[test]
fn missing_fallback_file_means_no_config() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let fallback = dir.path().join("absent.toml");

    let loaded = CollectorConfig::load_with_fallback(None, &fallback).expect("load");

    assert_eq!(loaded, None);
}

#[test]
fn explicit_path_wins_over_fallback_and_must_exist() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let explicit = dir.path().join("explicit.toml");
    let fallback = dir.path().join("fallback.toml");
    CollectorConfig {
        sources: vec!["wikidata".into()],
        ..Default::default()
    }
    .save_to_file(&explicit)
    .expect("save explicit");
    CollectorConfig::default()
        .save_to_file(&fallback)
        .expect("save fallback");

    let loaded = CollectorConfig::load_with_fallback(Some(&explicit), &fallback)
        .expect("load")
        .expect("config present");
    assert_eq!(loaded.sources, vec!["wikidata"]);

    let missing = dir.path().join("missing.toml");
    let result = CollectorConfig::load_with_fallback(Some(&missing), &fallback);
    assert!(matches!(result, Err(CollectError::Io(_))));
}
