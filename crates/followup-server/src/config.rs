//! Server configuration.

use anyhow::Result;
use followup_core::DriveConfig;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Drive endpoints; overridable so tests can point at a local fake.
    #[serde(default = "default_drive_api_base")]
    pub drive_api_base: String,
    #[serde(default = "default_drive_upload_base")]
    pub drive_upload_base: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_db_file_name")]
    pub db_file_name: String,
    #[serde(default = "default_rate_window_secs")]
    pub rate_window_secs: i64,
    #[serde(default = "default_rate_max_writes")]
    pub rate_max_writes: u32,
    /// Identity used as the rate-gate key.
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_drive_api_base() -> String {
    DriveConfig::default().api_base
}

fn default_drive_upload_base() -> String {
    DriveConfig::default().upload_base
}

fn default_token_url() -> String {
    followup_core::OauthTokenProvider::GOOGLE_TOKEN_URL.to_string()
}

fn default_db_file_name() -> String {
    DriveConfig::default().file_name
}

fn default_rate_window_secs() -> i64 {
    followup_core::RateGate::DEFAULT_WINDOW_SECS
}

fn default_rate_max_writes() -> u32 {
    followup_core::RateGate::DEFAULT_MAX_ADMITS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            drive_api_base: default_drive_api_base(),
            drive_upload_base: default_drive_upload_base(),
            token_url: default_token_url(),
            db_file_name: default_db_file_name(),
            rate_window_secs: default_rate_window_secs(),
            rate_max_writes: default_rate_max_writes(),
            user_email: None,
            client_id: None,
            client_secret: None,
            refresh_token: None,
        }
    }
}

impl Config {
    /// Load config from a specific file path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config from the default location (config/default.toml) or
    /// fall back to defaults.
    pub fn load() -> Result<Self> {
        let config_path = PathBuf::from("config/default.toml");
        if config_path.exists() {
            return Self::load_from(&config_path);
        }
        Ok(Config::default())
    }

    /// The rate-gate identity: the configured user email, or the
    /// "anonymous" sentinel when none is set.
    pub fn identity(&self) -> String {
        self.user_email
            .clone()
            .unwrap_or_else(|| "anonymous".to_string())
    }

    /// OAuth credentials from config, with environment fallback.
    ///
    /// Missing values come back empty; the token provider reports
    /// those as unauthenticated at request time rather than blocking
    /// startup.
    pub fn oauth_credentials(&self) -> (String, String, String) {
        let from_env = |value: &Option<String>, var: &str| {
            value
                .clone()
                .or_else(|| std::env::var(var).ok())
                .unwrap_or_default()
        };
        (
            from_env(&self.client_id, "FOLLOWUP_CLIENT_ID"),
            from_env(&self.client_secret, "FOLLOWUP_CLIENT_SECRET"),
            from_env(&self.refresh_token, "FOLLOWUP_REFRESH_TOKEN"),
        )
    }

    /// Drive endpoints as the core store expects them.
    pub fn drive(&self) -> DriveConfig {
        DriveConfig {
            api_base: self.drive_api_base.clone(),
            upload_base: self.drive_upload_base.clone(),
            file_name: self.db_file_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_google() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert!(config.drive_api_base.contains("googleapis.com"));
        assert!(config.token_url.contains("oauth2.googleapis.com"));
        assert_eq!(config.rate_max_writes, 30);
        assert_eq!(config.identity(), "anonymous");
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config =
            toml::from_str("port = 9000\nuser_email = \"me@example.com\"").unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.identity(), "me@example.com");
        assert_eq!(config.db_file_name, "followup-db.json");
    }
}
