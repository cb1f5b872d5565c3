//! Runtime configuration and credential lookup.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;
use url::Url;

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_VAR: &str = "SITESMITH_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub api_base: String,
    pub model: String,
    /// Name of the environment variable holding the upstream bearer key.
    pub credential_var: String,
    pub max_body_bytes: usize,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8787)),
            api_base: "https://api.moonshot.ai/v1".to_string(),
            model: "kimi-k2.5".to_string(),
            credential_var: "KIMI_API_KEY".to_string(),
            max_body_bytes: 16 * 1024 * 1024,
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Defaults, then the file named by `SITESMITH_CONFIG`, then env overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// `lookup` is injected so tests don't have to mutate the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("SITESMITH_BIND_ADDR") {
            self.bind_addr = addr.parse().map_err(|e| ConfigError::InvalidValue {
                key: "SITESMITH_BIND_ADDR",
                reason: format!("{}", e),
            })?;
        }
        if let Some(base) = lookup("SITESMITH_API_BASE") {
            self.api_base = base;
        }
        if let Some(model) = lookup("SITESMITH_MODEL") {
            self.model = model;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api_base).map_err(|e| ConfigError::InvalidValue {
            key: "api_base",
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                key: "api_base",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "model",
                reason: "model identifier cannot be empty".to_string(),
            });
        }
        if self.credential_var.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "credential_var",
                reason: "credential variable name cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Full URL of the chat-completion endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

/// Resolves the upstream credential at request time.
pub trait CredentialSource: Send + Sync {
    fn api_key(&self) -> Option<String>;
}

/// Reads the key from the process environment on every call.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialSource for EnvCredentials {
    fn api_key(&self) -> Option<String> {
        std::env::var(&self.var).ok().filter(|key| !key.is_empty())
    }
}

/// Fixed credential, mostly useful for embedding and tests.
#[derive(Clone, Default)]
pub struct StaticCredentials(pub Option<String>);

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown = self.0.as_ref().map(|_| "[REDACTED]");
        f.debug_tuple("StaticCredentials").field(&shown).finish()
    }
}

impl CredentialSource for StaticCredentials {
    fn api_key(&self) -> Option<String> {
        self.0.clone().filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        tokio_test::assert_ok!(config.validate());
        assert_eq!(config.model, "kimi-k2.5");
        assert_eq!(
            config.completions_url(),
            "https://api.moonshot.ai/v1/chat/completions"
        );
    }

    #[test]
    fn toml_overrides_only_named_fields() {
        let config = Config::from_toml(
            r#"
            model = "other-model"
            request_timeout_secs = 90
            "#,
        )
        .unwrap();
        assert_eq!(config.model, "other-model");
        assert_eq!(config.request_timeout_secs, Some(90));
        assert_eq!(config.credential_var, "KIMI_API_KEY");
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_addr = \"0.0.0.0:9000\"").unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Config::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = [
            ("SITESMITH_BIND_ADDR", "127.0.0.1:3000"),
            ("SITESMITH_API_BASE", "http://localhost:1234/v1/"),
        ]
        .into_iter()
        .collect();
        let mut config = Config::default();
        config
            .apply_env_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(
            config.completions_url(),
            "http://localhost:1234/v1/chat/completions"
        );
    }

    #[test]
    fn bad_bind_addr_is_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_env_overrides(|key| (key == "SITESMITH_BIND_ADDR").then(|| "nope".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "SITESMITH_BIND_ADDR", .. }));
    }

    #[test]
    fn invalid_api_base_fails_validation() {
        let config = Config {
            api_base: "not a url".to_string(),
            ..Default::default()
        };
        tokio_test::assert_err!(config.validate());

        let config = Config {
            api_base: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_static_credential_counts_as_missing() {
        assert_eq!(StaticCredentials(Some(String::new())).api_key(), None);
        assert_eq!(
            StaticCredentials(Some("k".to_string())).api_key().as_deref(),
            Some("k")
        );
    }
}
