//! Application configuration: TOML file, then environment overrides.
//!
//! Every key is optional; an absent file means all defaults, which reproduce
//! the classic sign: poll `http://localhost:8000/` every 300 s and show the
//! top 10 names cut to 10 characters.
//!
//! ```toml
//! source_url = "http://backend:8000/"
//! poll_interval_secs = 300
//!
//! [display]
//! backend = "terminal"   # or "log"
//! width = 128
//! height = 128
//!
//! [log]
//! level = "info"
//! path = "led-leaderboard-{DATE}.log"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use serde::Deserialize;
use thiserror::Error;

use crate::core::{FontMetrics, PlanOptions, Planner};
use crate::feed::PollConfig;
use crate::types::{
    DEFAULT_MAX_ENTRIES, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_SLEEP_INCREMENT_MS,
    DEFAULT_SOURCE_URL, DEFAULT_TITLE, DEFAULT_USERNAME_MAX_CHARS, LEFT_MARGIN, LINE_PADDING,
};

pub const DEFAULT_CONFIG_FILE: &str = "led-leaderboard.toml";

pub const ENV_CONFIG: &str = "LEADERBOARD_CONFIG";
pub const ENV_URL: &str = "LEADERBOARD_URL";
pub const ENV_POLL_SECS: &str = "LEADERBOARD_POLL_SECS";
pub const ENV_LOG_LEVEL: &str = "LEADERBOARD_LOG_LEVEL";
pub const ENV_DISPLAY: &str = "LEADERBOARD_DISPLAY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("environment variable {key} has invalid value {value:?}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayBackend {
    /// Emulated LED panel in the terminal.
    Terminal,
    /// No panel; committed frames are written to the log.
    Log,
}

impl DisplayBackend {
    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "terminal" => Some(Self::Terminal),
            "log" => Some(Self::Log),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub backend: DisplayBackend,
    pub width: u16,
    pub height: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            backend: DisplayBackend::Terminal,
            width: 128,
            height: 128,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub level: String,
    /// `{DATE}` is replaced with the local date, `~/` with `$HOME`.
    pub path: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            path: "led-leaderboard-{DATE}.log".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    #[serde(alias = "sourceUrl")]
    pub source_url: String,
    #[serde(alias = "pollIntervalSeconds")]
    pub poll_interval_secs: u64,
    pub sleep_increment_ms: u64,
    pub request_timeout_secs: u64,
    #[serde(alias = "maxEntries")]
    pub max_entries: usize,
    #[serde(alias = "usernameMaxChars")]
    pub username_max_chars: usize,
    pub title: String,
    pub display: DisplayConfig,
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            sleep_increment_ms: DEFAULT_SLEEP_INCREMENT_MS,
            request_timeout_secs: 10,
            max_entries: DEFAULT_MAX_ENTRIES,
            username_max_chars: DEFAULT_USERNAME_MAX_CHARS,
            title: DEFAULT_TITLE.to_string(),
            display: DisplayConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, apply process environment overrides, validate.
    ///
    /// A missing file is only an error when it was asked for explicitly.
    pub fn load(path: &Path, explicit: bool) -> Result<Self, ConfigError> {
        let mut cfg = if path.is_file() {
            let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml_str(&s)?
        } else if explicit {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            });
        } else {
            Self::default()
        };

        cfg.apply_env(|key| env::var(key).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Apply `LEADERBOARD_*` overrides looked up through `lookup`.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        if let Some(url) = non_empty(ENV_URL) {
            self.source_url = url;
        }
        if let Some(secs) = non_empty(ENV_POLL_SECS) {
            self.poll_interval_secs = secs.parse().map_err(|_| ConfigError::InvalidEnv {
                key: ENV_POLL_SECS,
                value: secs.clone(),
            })?;
        }
        if let Some(level) = non_empty(ENV_LOG_LEVEL) {
            self.log.level = level;
        }
        if let Some(name) = non_empty(ENV_DISPLAY) {
            self.display.backend =
                DisplayBackend::from_name(&name).ok_or(ConfigError::InvalidEnv {
                    key: ENV_DISPLAY,
                    value: name.clone(),
                })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| -> Result<(), ConfigError> {
            Err(ConfigError::Invalid(msg.to_string()))
        };
        if self.source_url.trim().is_empty() {
            return invalid("source_url must not be empty");
        }
        if self.poll_interval_secs == 0 {
            return invalid("poll_interval_secs must be greater than 0");
        }
        if self.sleep_increment_ms == 0 {
            return invalid("sleep_increment_ms must be greater than 0");
        }
        if self.request_timeout_secs == 0 {
            return invalid("request_timeout_secs must be greater than 0");
        }
        if self.max_entries == 0 {
            return invalid("max_entries must be greater than 0");
        }
        if self.username_max_chars == 0 {
            return invalid("username_max_chars must be greater than 0");
        }
        if self.display.width == 0 || self.display.height == 0 {
            return invalid("display width and height must be greater than 0");
        }

        // Both backends draw with the built-in 5x7 font.
        let (need_w, need_h) =
            Planner::new(self.plan_options(), FontMetrics::FIVE_BY_SEVEN).extent();
        if i32::from(self.display.width) < need_w || i32::from(self.display.height) < need_h {
            return Err(ConfigError::Invalid(format!(
                "display is {}x{} but the board needs at least {need_w}x{need_h}; \
                 raise [display] width/height or lower max_entries/username_max_chars",
                self.display.width, self.display.height
            )));
        }
        Ok(())
    }

    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            source_url: self.source_url.clone(),
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            sleep_increment: Duration::from_millis(self.sleep_increment_ms),
        }
    }

    pub fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            max_entries: self.max_entries,
            username_max_chars: self.username_max_chars,
            title: self.title.clone(),
            left_margin: LEFT_MARGIN,
            line_padding: LINE_PADDING,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Log file path with `{DATE}` and `~/` expanded.
    pub fn log_path(&self) -> PathBuf {
        let replaced = self.log.path.replace("{DATE}", &local_date_yyyy_mm_dd());
        expand_tilde(&replaced)
    }
}

/// Config path: first CLI argument, else `LEADERBOARD_CONFIG`, else the
/// default file name. The flag says whether the path was given explicitly.
pub fn config_path(mut args: impl Iterator<Item = String>) -> (PathBuf, bool) {
    if let Some(arg) = args.nth(1) {
        return (PathBuf::from(arg), true);
    }
    match env::var(ENV_CONFIG) {
        Ok(p) if !p.trim().is_empty() => (PathBuf::from(p.trim()), true),
        _ => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    }
}

fn local_date_yyyy_mm_dd() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), env::var("HOME")) {
        (Some(rest), Ok(home)) => Path::new(&home).join(rest),
        _ => PathBuf::from(path),
    }
}
