//! Configuration management for headliner.
//!
//! Configuration is read from `~/.config/headliner/config.toml` (or the path
//! given with `--config`). If the default file doesn't exist, a commented
//! default configuration is created.

pub mod interval;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::fetcher::{RetryPolicy, UpstreamConfig};
use crate::pipeline::PipelineConfig;
use crate::refresher::RefreshConfig;
use crate::server::ServerConfig;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub upstream: UpstreamConfig,
    pub pipeline: PipelineConfig,
    pub retry: RetryPolicy,
    pub refresh: RefreshConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the default path is used and
    /// created with commented defaults when missing. Missing fields use default
    /// values; the result is validated before it is returned.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = Self::default_config_path()?;
                if !p.exists() {
                    Self::create_default_config(&p)?;
                    return Ok(Self::default());
                }
                p
            }
        };

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config = Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Get the default config file path: `~/.config/headliner/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("headliner").join("config.toml"))
    }

    /// Reject settings the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid =
            |msg: &str| -> Result<(), ConfigError> { Err(ConfigError::Invalid(msg.to_string())) };

        if self.pipeline.top_n == 0 {
            return invalid("pipeline.top_n must be at least 1");
        }
        if self.pipeline.max_concurrency == 0 {
            return invalid("pipeline.max_concurrency must be at least 1");
        }
        if self.retry.max_attempts == 0 {
            return invalid("retry.max_attempts must be at least 1");
        }
        if self.retry.backoff_min > self.retry.backoff_max {
            return invalid("retry.backoff_min must not exceed retry.backoff_max");
        }
        if self.refresh.interval.is_zero() {
            return invalid("refresh.interval must be greater than zero");
        }
        if self.upstream.request_timeout.is_zero() {
            return invalid("upstream.request_timeout must be greater than zero");
        }
        for (key, value) in [
            ("upstream.api_base", &self.upstream.api_base),
            ("upstream.site_base", &self.upstream.site_base),
        ] {
            if let Err(e) = url::Url::parse(value) {
                return Err(ConfigError::Invalid(format!("{} is not a URL: {}", key, e)));
            }
        }
        Ok(())
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        tracing::info!("Wrote default configuration to {}", path.display());
        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# headliner configuration
#
# Durations are written as "500ms", "20s", "5m", "24h", "1d" or a bare
# number of seconds.

[upstream]
# JSON API and the site used for discussion links
api_base = "https://hacker-news.firebaseio.com/v0"
site_base = "https://news.ycombinator.com"

# Candidate list: top, new, best, ask, show, job
list = "top"

user_agent = "headliner/0.1.0"
request_timeout = "5s"

[pipeline]
# Items kept per snapshot
top_n = 50

# Only keep items created within the recency window
filter_recent = true
recency_window = "24h"

# Item requests in flight at once
max_concurrency = 32

[retry]
# Attempts per item, including the first
max_attempts = 5

# Random pause between attempts, uniformly drawn from this range
backoff_min = "0s"
backoff_max = "5s"

[refresh]
interval = "20s"

[server]
bind = "0.0.0.0:9060"
page_title = "Top Stories"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::fetcher::ListKind;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config = Config::parse(&content).expect("Default config should be valid TOML");

        assert_eq!(config.upstream.list, ListKind::Top);
        assert_eq!(config.upstream.request_timeout, Duration::from_secs(5));
        assert_eq!(config.pipeline.top_n, 50);
        assert_eq!(config.pipeline.recency(), Some(Duration::from_secs(86400)));
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.backoff_max, Duration::from_secs(5));
        assert_eq!(config.refresh.interval, Duration::from_secs(20));
        assert_eq!(config.server.bind, "0.0.0.0:9060");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[pipeline]
top_n = 10
filter_recent = false

[refresh]
interval = "1m"
"##;
        let config = Config::parse(content).expect("Partial config should work");

        // Custom values
        assert_eq!(config.pipeline.top_n, 10);
        assert_eq!(config.pipeline.recency(), None);
        assert_eq!(config.refresh.interval, Duration::from_secs(60));
        // Default values
        assert_eq!(config.pipeline.max_concurrency, 32);
        assert_eq!(config.retry.max_attempts, 5);
    }

    #[test]
    fn test_empty_config() {
        let config = Config::parse("").expect("Empty config should work");
        assert_eq!(config.pipeline.top_n, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases = [
            "[pipeline]\ntop_n = 0",
            "[pipeline]\nmax_concurrency = 0",
            "[retry]\nmax_attempts = 0",
            "[retry]\nbackoff_min = \"10s\"\nbackoff_max = \"1s\"",
            "[refresh]\ninterval = 0",
            "[upstream]\napi_base = \"not a url\"",
        ];
        for case in cases {
            let config = Config::parse(case).unwrap();
            assert!(
                matches!(config.validate(), Err(ConfigError::Invalid(_))),
                "accepted: {}",
                case
            );
        }
    }

    #[test]
    fn test_oversized_interval_is_parse_error() {
        assert!(Config::parse("[refresh]\ninterval = \"9999999999999999d\"").is_err());
        assert!(Config::parse("[pipeline]\nrecency_window = \"99999999999999999h\"").is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[upstream]\nlist = \"best\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.upstream.list, ListKind::Best);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[refresh]\ninterval = \"often\"\n").unwrap();

        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_create_default_config_writes_loadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        Config::create_default_config(&path).unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.pipeline.top_n, 50);
    }
}
