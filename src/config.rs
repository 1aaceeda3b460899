//! Widget configuration.
//!
//! The dashboard needs three values: the hub URL, an API token and the name
//! of the server to show. They can arrive as a host-style JSON parameter
//! (`{"beszelURL": ..., "apiToken": ..., "serverName": ...}`) or be layered
//! from a config file, `BESZEL_GLANCE_*` environment variables and CLI flags.
//!
//! ```toml
//! beszelURL = "http://hub.lan:8090"
//! apiToken = "eyJhbGciOi..."
//! serverName = "nas"
//! ```
//!
//! A missing or broken configuration is not fatal: the caller shows the
//! "please configure" view instead of fetching.

use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable prefix for layered configuration.
pub const ENV_PREFIX: &str = "BESZEL_GLANCE";

/// Which server to monitor and how to authenticate. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    #[serde(rename = "beszelURL")]
    pub base_url: String,
    #[serde(rename = "apiToken")]
    pub api_token: String,
    #[serde(rename = "serverName")]
    pub server_name: String,
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Nothing was supplied at all.
    #[error("no configuration supplied")]
    Missing,

    /// The JSON parameter could not be parsed.
    #[error("invalid widget parameter: {0}")]
    Parameter(#[from] serde_json::Error),

    /// The layered file/env/flag sources could not be merged or decoded.
    #[error("invalid configuration: {0}")]
    Source(#[from] config::ConfigError),

    /// A required value is absent from every layered source.
    #[error("configuration field '{0}' is missing")]
    MissingField(&'static str),

    /// A required value is present but empty.
    #[error("configuration field '{0}' is empty")]
    EmptyField(&'static str),
}

/// Values given directly on the command line. They override file and
/// environment sources.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub api_token: Option<String>,
    pub server_name: Option<String>,
}

impl ConfigOverrides {
    fn is_empty(&self) -> bool {
        self.base_url.is_none() && self.api_token.is_none() && self.server_name.is_none()
    }
}

impl WidgetConfig {
    /// Parse a host-style JSON parameter. An empty string counts as absent.
    pub fn from_parameter(parameter: &str) -> Result<Self, ConfigError> {
        if parameter.trim().is_empty() {
            return Err(ConfigError::Missing);
        }
        let config: WidgetConfig = serde_json::from_str(parameter)?;
        config.validate()
    }

    /// Merge an optional config file, `BESZEL_GLANCE_*` environment variables
    /// and CLI overrides, in increasing order of precedence.
    pub fn from_sources(
        file: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }
        builder = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .set_override_option("beszelURL", overrides.base_url.clone())?
            .set_override_option("apiToken", overrides.api_token.clone())?
            .set_override_option("serverName", overrides.server_name.clone())?;

        let merged = builder.build()?;
        let config = WidgetConfig {
            base_url: lookup(&merged, "beszelURL", &["beszelurl", "base_url"])?,
            api_token: lookup(&merged, "apiToken", &["apitoken", "api_token"])?,
            server_name: lookup(&merged, "serverName", &["servername", "server_name"])?,
        };
        config.validate()
    }

    /// Resolve the configuration the way the binary does: a JSON parameter
    /// wins outright; otherwise the layered sources are used.
    pub fn resolve(
        parameter: Option<&str>,
        file: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        match parameter {
            Some(parameter) if !parameter.trim().is_empty() => Self::from_parameter(parameter),
            _ if file.is_none() && overrides.is_empty() && !env_present() => {
                Err(ConfigError::Missing)
            }
            _ => Self::from_sources(file, overrides),
        }
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyField("beszelURL"));
        }
        if self.api_token.is_empty() {
            return Err(ConfigError::EmptyField("apiToken"));
        }
        if self.server_name.is_empty() {
            return Err(ConfigError::EmptyField("serverName"));
        }
        Ok(self)
    }
}

/// Read a string under its canonical key or one of its spellings. Environment
/// variables always arrive lowercased, files keep whatever case they were
/// written in.
fn lookup(config: &Config, key: &'static str, aliases: &[&str]) -> Result<String, ConfigError> {
    std::iter::once(key)
        .chain(aliases.iter().copied())
        .find_map(|candidate| config.get_string(candidate).ok())
        .ok_or(ConfigError::MissingField(key))
}

fn env_present() -> bool {
    let prefix = format!("{}_", ENV_PREFIX);
    std::env::vars().any(|(key, _)| key.starts_with(&prefix) && key != "BESZEL_GLANCE_PARAM")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard};

    // Environment variables are process-wide; tests that build layered
    // sources hold this so they never see each other's variables.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    const PARAM: &str =
        r#"{"beszelURL":"http://hub:8090","apiToken":"secret","serverName":"nas"}"#;

    #[test]
    fn test_from_parameter() {
        let config = WidgetConfig::from_parameter(PARAM).unwrap();
        assert_eq!(config.base_url, "http://hub:8090");
        assert_eq!(config.api_token, "secret");
        assert_eq!(config.server_name, "nas");
    }

    #[test]
    fn test_empty_parameter_is_missing() {
        assert!(matches!(
            WidgetConfig::from_parameter("  "),
            Err(ConfigError::Missing)
        ));
    }

    #[test]
    fn test_invalid_parameter() {
        assert!(matches!(
            WidgetConfig::from_parameter("{not json"),
            Err(ConfigError::Parameter(_))
        ));
        assert!(matches!(
            WidgetConfig::from_parameter(r#"{"beszelURL":"http://hub"}"#),
            Err(ConfigError::Parameter(_))
        ));
    }

    #[test]
    fn test_empty_field_rejected() {
        let param = r#"{"beszelURL":"http://hub","apiToken":"t","serverName":""}"#;
        assert!(matches!(
            WidgetConfig::from_parameter(param),
            Err(ConfigError::EmptyField("serverName"))
        ));
    }

    #[test]
    fn test_from_toml_file() {
        let _env = env_lock();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, r#"beszelURL = "http://hub.lan:8090""#).unwrap();
        writeln!(file, r#"apiToken = "from-file""#).unwrap();
        writeln!(file, r#"serverName = "nas""#).unwrap();

        let config =
            WidgetConfig::from_sources(Some(file.path()), &ConfigOverrides::default()).unwrap();
        assert_eq!(config.base_url, "http://hub.lan:8090");
        assert_eq!(config.api_token, "from-file");
        assert_eq!(config.server_name, "nas");
    }

    #[test]
    fn test_overrides_win_over_file() {
        let _env = env_lock();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, r#"beszelURL = "http://hub.lan:8090""#).unwrap();
        writeln!(file, r#"apiToken = "from-file""#).unwrap();
        writeln!(file, r#"serverName = "nas""#).unwrap();

        let overrides = ConfigOverrides {
            server_name: Some("router".to_string()),
            ..Default::default()
        };
        let config = WidgetConfig::from_sources(Some(file.path()), &overrides).unwrap();
        assert_eq!(config.server_name, "router");
        assert_eq!(config.api_token, "from-file");
    }

    #[test]
    fn test_overrides_alone() {
        let _env = env_lock();
        let overrides = ConfigOverrides {
            base_url: Some("http://hub".to_string()),
            api_token: Some("t".to_string()),
            server_name: Some("nas".to_string()),
        };
        let config = WidgetConfig::from_sources(None, &overrides).unwrap();
        assert_eq!(config.base_url, "http://hub");
    }

    #[test]
    fn test_incomplete_sources_fail() {
        let _env = env_lock();
        let overrides = ConfigOverrides {
            base_url: Some("http://hub".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            WidgetConfig::from_sources(None, &overrides),
            Err(ConfigError::MissingField(_))
        ));
    }

    #[test]
    fn test_resolve_prefers_parameter() {
        let overrides = ConfigOverrides {
            server_name: Some("ignored".to_string()),
            ..Default::default()
        };
        let config = WidgetConfig::resolve(Some(PARAM), None, &overrides).unwrap();
        assert_eq!(config.server_name, "nas");
    }

    #[test]
    fn test_environment_layer() {
        let _env = env_lock();
        std::env::set_var("BESZEL_GLANCE_BASE_URL", "http://env-hub");
        std::env::set_var("BESZEL_GLANCE_API_TOKEN", "from-env");

        let overrides = ConfigOverrides {
            server_name: Some("nas".to_string()),
            ..Default::default()
        };
        let with_flag = WidgetConfig::resolve(None, None, &overrides);
        let env_only = WidgetConfig::resolve(None, None, &ConfigOverrides::default());

        std::env::remove_var("BESZEL_GLANCE_BASE_URL");
        std::env::remove_var("BESZEL_GLANCE_API_TOKEN");

        let config = with_flag.unwrap();
        assert_eq!(config.base_url, "http://env-hub");
        assert_eq!(config.api_token, "from-env");
        assert_eq!(config.server_name, "nas");
        assert!(matches!(
            env_only,
            Err(ConfigError::MissingField("serverName"))
        ));
    }
}
