use std::fs;

use serde::Deserialize;
use tracing::warn;

pub const SETTINGS_FILE: &str = "evaluations.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub snackbar_timeout_ms: u64,
    pub admin_denied_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".into(),
            snackbar_timeout_ms: 8000,
            admin_denied_path: "/404".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base_url: Option<String>,
    snackbar_timeout_ms: Option<u64>,
    admin_denied_path: Option<String>,
}

impl Settings {
    /// Defaults, then the optional TOML file, then environment overrides.
    pub fn from_sources(file: Option<&str>, env: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(raw) = file {
            match toml::from_str::<FileSettings>(raw) {
                Ok(file_cfg) => {
                    if let Some(v) = file_cfg.api_base_url {
                        settings.api_base_url = v;
                    }
                    if let Some(v) = file_cfg.snackbar_timeout_ms {
                        settings.snackbar_timeout_ms = v;
                    }
                    if let Some(v) = file_cfg.admin_denied_path {
                        settings.admin_denied_path = v;
                    }
                }
                Err(err) => warn!(error = %err, "ignoring malformed {SETTINGS_FILE}"),
            }
        }

        if let Some(v) = env("API_BASE_URL") {
            settings.api_base_url = v;
        }
        if let Some(v) = env("APP__API_BASE_URL") {
            settings.api_base_url = v;
        }

        if let Some(v) = env("APP__SNACKBAR_TIMEOUT_MS") {
            if let Ok(parsed) = v.parse::<u64>() {
                settings.snackbar_timeout_ms = parsed;
            }
        }

        if let Some(v) = env("APP__ADMIN_DENIED_PATH") {
            settings.admin_denied_path = v;
        }

        settings
    }
}

pub fn load_settings() -> Settings {
    let raw = fs::read_to_string(SETTINGS_FILE).ok();
    Settings::from_sources(raw.as_deref(), |key| std::env::var(key).ok())
}
