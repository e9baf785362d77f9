use super::{apply_env_overrides, apply_file_overrides, Settings, DEFAULT_APP_TITLE};

use std::{collections::HashMap, path::PathBuf};

#[test]
fn defaults_bind_locally() {
    let settings = Settings::default();
    assert_eq!(settings.server_bind, "127.0.0.1:8080");
    assert_eq!(settings.session_ttl_seconds, 1800);
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn file_overrides_replace_known_keys() {
    let mut settings = Settings::default();
    apply_file_overrides(
        &mut settings,
        r#"
        bind_addr = "0.0.0.0:9000"
        logo_path = "assets/logo.png"
        session_ttl_seconds = 60
        unrelated = "ignored"
        "#,
    )
    .expect("parse");

    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.logo_path, PathBuf::from("assets/logo.png"));
    assert_eq!(settings.session_ttl_seconds, 60);
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn malformed_file_is_an_error() {
    let mut settings = Settings::default();
    assert!(apply_file_overrides(&mut settings, "bind_addr = ").is_err());
}

#[test]
fn app_prefixed_env_wins_over_plain_bind() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("SERVER_BIND", "127.0.0.1:1"),
        ("APP__BIND_ADDR", "127.0.0.1:2"),
        ("APP__SESSION_TTL_SECONDS", "90"),
        ("APP__LOG_FILTER", "debug"),
    ]);
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, |key| env.get(key).map(|v| v.to_string()));

    assert_eq!(settings.server_bind, "127.0.0.1:2");
    assert_eq!(settings.session_ttl_seconds, 90);
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn unparsable_ttl_keeps_default() {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, |key| {
        (key == "APP__SESSION_TTL_SECONDS").then(|| "soon".to_string())
    });
    assert_eq!(settings.session_ttl_seconds, 1800);
}

#[test]
fn title_defaults_and_overrides() {
    let mut settings = Settings::default();
    assert_eq!(settings.app_title, DEFAULT_APP_TITLE);

    apply_file_overrides(&mut settings, r#"app_title = "Fusion Roster""#).expect("file");
    assert_eq!(settings.app_title, "Fusion Roster");

    apply_env_overrides(&mut settings, |key| {
        (key == "APP__APP_TITLE").then(|| "Attendees".to_string())
    });
    assert_eq!(settings.app_title, "Attendees");
}

#[test]
fn non_positive_ttl_is_rejected() {
    assert!(Settings::default().validate().is_ok());

    for ttl in ["0", "-5"] {
        let mut settings = Settings::default();
        apply_env_overrides(&mut settings, |key| {
            (key == "APP__SESSION_TTL_SECONDS").then(|| ttl.to_string())
        });
        let err = settings.validate().expect_err("ttl must be positive");
        assert!(err.to_string().contains("session_ttl_seconds"));
    }
}
