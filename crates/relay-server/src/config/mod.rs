//! Configuration for the relay server
//!
//! Settings come from an optional TOML file layered under `SIPRELAY_*`
//! environment variables (`__` separates nested keys, e.g.
//! `SIPRELAY_HOST__ACCESS_TOKEN`).

use std::net::SocketAddr;
use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use siprelay_status_core::{AliasTable, SuppressionPolicy};
use url::Url;

use crate::error::{RelayError, Result};

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "siprelay";

/// Plugin id used in dashboard links
pub const DEFAULT_PLUGIN_ID: &str = "net.bytemine.sip";

/// Main configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Public chat site URL used to build dashboard links; defaults to `host.base_url`
    #[serde(default)]
    pub site_url: Option<String>,
    #[serde(default = "default_plugin_id")]
    pub plugin_id: String,
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub channel_name: String,
    /// Email of the account the notifications are posted as
    #[serde(default)]
    pub user_email: String,
    /// Shared secret for the dashboard
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub hide_connection_messages: bool,
    /// `number:name` pairs separated by commas
    #[serde(default)]
    pub numbers_users: String,
    /// Token slash command requests must carry, when set
    #[serde(default)]
    pub command_token: Option<String>,
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub logging: LogSettings,
}

/// Chat host REST API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostConfig {
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
    /// Include source file and line in every event
    #[serde(default)]
    pub file_info: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            file_info: false,
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0:8065".to_string()
}

fn default_plugin_id() -> String {
    DEFAULT_PLUGIN_ID.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl RelayConfig {
    /// Load from `path` (or `siprelay.*` in the working directory when
    /// absent) and the environment, then validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config: RelayConfig = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("SIPRELAY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(source: &str) -> Result<Self> {
        let config: RelayConfig = Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check that everything needed to start serving is present
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("team_name", &self.team_name),
            ("channel_name", &self.channel_name),
            ("user_email", &self.user_email),
            ("secret", &self.secret),
            ("host.base_url", &self.host.base_url),
            ("host.access_token", &self.host.access_token),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(RelayError::config(format!("{} must be set", name)));
            }
        }

        self.socket_addr()?;
        Url::parse(&self.host.base_url)?;
        Url::parse(self.site_url())?;
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address
            .parse()
            .map_err(|e| RelayError::config(format!("invalid bind_address {}: {}", self.bind_address, e)))
    }

    pub fn site_url(&self) -> &str {
        self.site_url.as_deref().unwrap_or(&self.host.base_url)
    }

    pub fn aliases(&self) -> AliasTable {
        AliasTable::parse(&self.numbers_users)
    }

    pub fn suppression_policy(&self) -> SuppressionPolicy {
        SuppressionPolicy::new(self.hide_connection_messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r#"
        team_name = "ops"
        channel_name = "phones"
        user_email = "pbx@example.com"
        secret = "s3cret"

        [host]
        base_url = "https://chat.example.com"
        access_token = "token"
    "#;

    #[test]
    fn test_defaults() {
        let config = RelayConfig::from_toml(MINIMAL).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:8065");
        assert_eq!(config.plugin_id, DEFAULT_PLUGIN_ID);
        assert_eq!(config.site_url(), "https://chat.example.com");
        assert!(!config.hide_connection_messages);
        assert!(config.aliases().is_empty());
        assert!(config.command_token.is_none());
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert!(!config.logging.file_info);
    }

    #[test]
    fn test_full_config() {
        let source = format!(
            r#"
            bind_address = "127.0.0.1:9000"
            site_url = "http://chat.internal/mm"
            hide_connection_messages = true
            numbers_users = "100:alice,200:bob,broken"
            command_token = "cmd"
            {}
            [logging]
            level = "debug"
            json = true
            file_info = true
            "#,
            MINIMAL
        );
        // MINIMAL opens with top-level keys, so it has to follow ours
        let config = RelayConfig::from_toml(&source).unwrap();

        assert_eq!(config.socket_addr().unwrap().port(), 9000);
        assert_eq!(config.site_url(), "http://chat.internal/mm");
        assert!(config.suppression_policy().hide_connection_messages);
        assert_eq!(config.aliases().len(), 2);
        assert_eq!(config.aliases().resolve("200"), "bob");
        assert_eq!(config.command_token.as_deref(), Some("cmd"));
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.file_info);
    }

    #[test]
    fn test_missing_required_field() {
        let source = MINIMAL.replace("secret = \"s3cret\"", "");
        let err = RelayConfig::from_toml(&source).unwrap_err();
        assert!(err.to_string().contains("secret must be set"), "{}", err);
    }

    #[test]
    fn test_invalid_bind_address() {
        let source = format!("bind_address = \"not-an-address\"\n{}", MINIMAL);
        assert!(RelayConfig::from_toml(&source).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let config = RelayConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.team_name, "ops");
        assert_eq!(config.channel_name, "phones");
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(RelayConfig::load(Some(Path::new("/nonexistent/siprelay.toml"))).is_err());
    }
}
