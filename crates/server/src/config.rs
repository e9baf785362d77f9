use std::{collections::HashMap, fs, path::PathBuf};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_APP_TITLE: &str = "UiPath Fusion App";
pub const DEFAULT_LOGO_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/thumb/3/38/UiPath_Logo.svg/512px-UiPath_Logo.svg.png";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub app_title: String,
    pub logo_path: PathBuf,
    pub logo_fallback_url: String,
    pub session_ttl_seconds: i64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:8080".into(),
            app_title: DEFAULT_APP_TITLE.into(),
            logo_path: PathBuf::from("roster_logo.png"),
            logo_fallback_url: DEFAULT_LOGO_URL.into(),
            session_ttl_seconds: 1800,
            log_filter: "info".into(),
        }
    }
}

pub fn load_settings() -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        apply_file_overrides(&mut settings, &raw).context("failed to parse server.toml")?;
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings.validate()?;

    Ok(settings)
}

impl Settings {
    /// Idle expiry is the only bound on live sessions, so it cannot be switched off.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.session_ttl_seconds <= 0 {
            anyhow::bail!(
                "session_ttl_seconds must be positive, got {}",
                self.session_ttl_seconds
            );
        }
        Ok(())
    }
}

pub(crate) fn apply_file_overrides(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg = toml::from_str::<HashMap<String, toml::Value>>(raw)?;

    if let Some(v) = file_cfg.get("bind_addr").and_then(toml::Value::as_str) {
        settings.server_bind = v.to_string();
    }
    if let Some(v) = file_cfg.get("app_title").and_then(toml::Value::as_str) {
        settings.app_title = v.to_string();
    }
    if let Some(v) = file_cfg.get("logo_path").and_then(toml::Value::as_str) {
        settings.logo_path = PathBuf::from(v);
    }
    if let Some(v) = file_cfg.get("logo_fallback_url").and_then(toml::Value::as_str) {
        settings.logo_fallback_url = v.to_string();
    }
    if let Some(v) = file_cfg
        .get("session_ttl_seconds")
        .and_then(toml::Value::as_integer)
    {
        settings.session_ttl_seconds = v;
    }
    if let Some(v) = file_cfg.get("log_filter").and_then(toml::Value::as_str) {
        settings.log_filter = v.to_string();
    }
    Ok(())
}

pub(crate) fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = lookup("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = lookup("APP__APP_TITLE") {
        settings.app_title = v;
    }
    if let Some(v) = lookup("APP__LOGO_PATH") {
        settings.logo_path = PathBuf::from(v);
    }
    if let Some(v) = lookup("APP__LOGO_FALLBACK_URL") {
        settings.logo_fallback_url = v;
    }

    if let Some(v) = lookup("APP__SESSION_TTL_SECONDS") {
        if let Ok(parsed) = v.parse::<i64>() {
            settings.session_ttl_seconds = parsed;
        }
    }

    if let Some(v) = lookup("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
