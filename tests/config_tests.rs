//! Building registries from configuration files.

use tyk_log::config::{load_config, ConfigError, Output};
use tyk_log::config::validation::ValidationError;
use tyk_log::LoggerRegistry;

mod common;
use common::{quiet_config, write_temp, Harness};

#[test]
fn test_full_config_file() {
    let (_dir, path) = write_temp(
        "log.toml",
        r#"
        level_env = "GATEWAY_LOGLEVEL"

        [text]
        timestamps = false
        colors = false
        prefix_field = "component"

        [output]
        main = "stdout"
        raw = "stderr"

        [translations]
        path = "/etc/gateway/translations.json"
        watch = true
        "#,
    );

    let config = load_config(&path).unwrap();
    assert_eq!(config.level_env, "GATEWAY_LOGLEVEL");
    assert_eq!(config.text.prefix_field, "component");
    assert_eq!(config.output.main, Output::Stdout);
    assert_eq!(config.output.raw, Output::Stderr);
    assert!(config.translations.watch);
}

#[test]
fn test_validation_reports_every_problem() {
    let (_dir, path) = write_temp(
        "log.toml",
        r#"
        level_env = ""

        [text]
        prefix_field = ""

        [translations]
        watch = true
        "#,
    );

    match load_config(&path).unwrap_err() {
        ConfigError::Validation(errors) => assert_eq!(
            errors,
            vec![
                ValidationError::EmptyLevelEnv,
                ValidationError::EmptyPrefixField,
                ValidationError::WatchWithoutPath,
            ]
        ),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_from_config_loads_translation_file() {
    let (_dir, path) = write_temp(
        "translations.toml",
        r#"
        [user]
        notfound = "User was not found"

        [quota]
        exceeded = "Quota exceeded"
        limit = 1000
        "#,
    );

    let mut config = quiet_config();
    config.translations.path = Some(path);

    let registry = LoggerRegistry::from_config(&config).unwrap();
    let table = registry.translations();
    assert_eq!(table.len(), 3);
    assert_eq!(table.get("user.notfound"), Some("User was not found"));
    assert_eq!(table.get("quota.limit"), Some("1000"));
}

#[test]
fn test_from_config_surfaces_malformed_file() {
    let (_dir, path) = write_temp("translations.json", r#"{"user": {"notfound": null}}"#);

    let mut config = quiet_config();
    config.translations.path = Some(path);

    let err = LoggerRegistry::from_config(&config).unwrap_err();
    assert!(matches!(err, ConfigError::Translation(_)));
    assert!(err.to_string().contains("user.notfound"));
}

#[test]
fn test_prefix_field_from_config() {
    let mut config = quiet_config();
    config.text.prefix_field = "component".to_string();

    let harness = Harness::with_config(None, config);
    harness
        .registry
        .main_logger()
        .with_field("component", "proxy")
        .with_field("api_id", "a1")
        .info("Request forwarded");

    assert_eq!(harness.main.contents(), " INFO proxy: Request forwarded api_id=\"a1\"\n");
}

#[test]
fn test_translation_file_on_disk() {
    let (_dir, path) = write_temp(
        "translations.json",
        r#"{"auth": {"key": {"expired": "Key has expired"}}}"#,
    );

    let harness = Harness::new(None);
    harness.registry.load_translations_from_path(&path).unwrap();
    harness
        .registry
        .main_logger()
        .with_field("code", "auth.key.expired")
        .warn("auth.key.expired");

    assert_eq!(harness.main.contents(), " WARN Key has expired code=\"auth.key.expired\"\n");
}
