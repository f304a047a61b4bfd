use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{SiteError, SiteResult};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedConfig {
    #[serde(default = "default_feed_url")]
    pub url: String,
    /// Canonical archive linked from the error state
    #[serde(default = "default_archive_url")]
    pub archive_url: String,
    /// Per-attempt deadline in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Tried in order, once each
    #[serde(default = "default_access_paths")]
    pub access_paths: Vec<AccessPath>,
}

/// One way of reaching the feed URL.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccessPath {
    Direct,
    /// Relay prefix; the percent-encoded feed URL is appended to it.
    Relay(String),
}

impl AccessPath {
    pub fn url_for(&self, feed_url: &str) -> String {
        match self {
            AccessPath::Direct => feed_url.to_string(),
            AccessPath::Relay(prefix) => {
                let encoded: String = url::form_urlencoded::byte_serialize(feed_url.as_bytes()).collect();
                format!("{}{}", prefix, encoded)
            }
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeConfig {
    /// File backing the persisted preference
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

fn default_feed_url() -> String {
    "https://www.ersatzben.com/feed".to_string()
}

fn default_archive_url() -> String {
    "https://ersatzben.com/archive".to_string()
}

fn default_timeout_ms() -> u64 {
    8000
}

fn default_access_paths() -> Vec<AccessPath> {
    vec![
        AccessPath::Relay("https://api.allorigins.win/raw?url=".to_string()),
        AccessPath::Relay("https://corsproxy.io/?".to_string()),
    ]
}

fn default_store_path() -> PathBuf {
    PathBuf::from(".site-prefs.toml")
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            archive_url: default_archive_url(),
            timeout_ms: default_timeout_ms(),
            access_paths: default_access_paths(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
        }
    }
}

impl FeedConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self) -> SiteResult<()> {
        if self.timeout_ms == 0 {
            return Err(SiteError::Config("feed.timeout_ms must be positive".to_string()));
        }
        if self.access_paths.is_empty() {
            return Err(SiteError::Config(
                "feed.access_paths must list at least one path".to_string(),
            ));
        }
        Ok(())
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> SiteResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse config from a TOML string (useful for testing)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> SiteResult<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> SiteResult<()> {
        self.feed.validate()
    }
}
