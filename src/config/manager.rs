use anyhow::{Context, Result, bail};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::backend::DEFAULT_CHAT_PATH;
use crate::fs::atomic_write;
use crate::paths;
use crate::session::DEFAULT_GREETING;

/// Environment variable that supplies the backend endpoint.
pub const ENDPOINT_ENV: &str = "QUERYCHAT_ENDPOINT";

/// Settings in the `[client]` section of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the question-answering backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Sub-path chat messages are posted to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_path: Option<String>,
    /// Request timeout in seconds; absent or 0 waits forever.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// First assistant message of every session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeting: Option<String>,
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/querychat/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub client: ClientConfig,
}

/// Configuration after merging CLI arguments, environment and config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Normalized endpoint URL, without a trailing slash.
    pub endpoint: String,
    /// Chat sub-path, always starting with `/`.
    pub chat_path: String,
    pub timeout: Option<Duration>,
    pub greeting: String,
}

/// CLI overrides that take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub endpoint: Option<String>,
}

/// Resolves configuration, reading the endpoint override from [`ENDPOINT_ENV`].
///
/// Priority (highest first): CLI option, environment variable, config file.
/// Blank values are skipped.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let env_endpoint = std::env::var(ENDPOINT_ENV).ok();
    resolve_config_from(options, env_endpoint.as_deref(), config_file)
}

/// Same as [`resolve_config`] with the environment value passed in.
pub fn resolve_config_from(
    options: &ResolveOptions,
    env_endpoint: Option<&str>,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let client = &config_file.client;

    let nonblank = |value: &&str| !value.trim().is_empty();
    let endpoint = options
        .endpoint
        .as_deref()
        .filter(nonblank)
        .or(env_endpoint.filter(nonblank))
        .or(client.endpoint.as_deref().filter(nonblank))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'endpoint'\n\n\
                 Please provide it via:\n  \
                 - CLI option: querychat --endpoint <url>\n  \
                 - Environment: {ENDPOINT_ENV}=<url>\n  \
                 - Config file: run 'querychat configure'"
            )
        })?;

    let greeting = client
        .greeting
        .clone()
        .filter(|g| !g.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_GREETING.to_string());

    Ok(ResolvedConfig {
        endpoint: validate_endpoint(endpoint)?,
        chat_path: normalize_chat_path(client.chat_path.as_deref()),
        timeout: client
            .timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs),
        greeting,
    })
}

/// Checks that `endpoint` is an http(s) URL and strips trailing slashes.
pub fn validate_endpoint(endpoint: &str) -> Result<String> {
    let trimmed = endpoint.trim();
    let url = Url::parse(trimmed).with_context(|| format!("Invalid endpoint URL: {trimmed}"))?;

    if !matches!(url.scheme(), "http" | "https") {
        bail!(
            "Invalid endpoint URL: {trimmed}\n\n\
             Only http:// and https:// endpoints are supported"
        );
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Returns the chat sub-path with a leading slash, defaulting when unset.
pub fn normalize_chat_path(chat_path: Option<&str>) -> String {
    match chat_path.map(str::trim) {
        None | Some("") => DEFAULT_CHAT_PATH.to_string(),
        Some(path) if path.starts_with('/') => path.to_string(),
        Some(path) => format!("/{path}"),
    }
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a config manager for `$XDG_CONFIG_HOME/querychat/config.toml`
    /// (or `~/.config/querychat/config.toml`).
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    /// Creates a config manager for an explicit file.
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the config file. A missing file yields the defaults; a file that
    /// exists but does not parse is an error.
    pub fn load(&self) -> Result<ConfigFile> {
        if !self.config_path.exists() {
            return Ok(ConfigFile::default());
        }

        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
        atomic_write(&self.config_path, &contents)
    }
}
