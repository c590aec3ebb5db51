use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;

use crate::common::types::{ConfigError, InsensitiveLogLevel, LogDestination};
use crate::resolution::exclusion::{ExclusionFilter, DEFAULT_EXCLUDED_PREFIXES};

pub const ENV_ENABLE: &str = "INSENSITIVE_ENABLE";
pub const ENV_LOG_LEVEL: &str = "INSENSITIVE_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "INSENSITIVE_LOG_FILE";
pub const ENV_EXCLUDE: &str = "INSENSITIVE_EXCLUDE";

/// Settings read once when the process resolver is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub enabled: bool,
    pub log_level: InsensitiveLogLevel,
    pub log_destination: LogDestination,
    /// Defaults first, then any extra prefixes from `INSENSITIVE_EXCLUDE`.
    pub exclusions: Vec<OsString>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enabled: true,
            log_level: InsensitiveLogLevel::default(),
            log_destination: LogDestination::default(),
            exclusions: DEFAULT_EXCLUDED_PREFIXES
                .iter()
                .map(OsString::from)
                .collect(),
        }
    }
}

impl Config {
    pub fn from_env() -> (Self, Vec<ConfigError>) {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Builds a config from `lookup`. Values that fail to parse keep their
    /// default and are returned alongside the config.
    pub fn from_lookup<L>(lookup: L) -> (Self, Vec<ConfigError>)
    where
        L: Fn(&str) -> Option<OsString>,
    {
        let mut config = Self::default();
        let mut problems = Vec::new();

        if let Some(value) = lookup(ENV_ENABLE) {
            match parse_flag(ENV_ENABLE, &value) {
                Ok(enabled) => config.enabled = enabled,
                Err(err) => problems.push(err),
            }
        }

        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            match parse_level(&value) {
                Ok(level) => config.log_level = level,
                Err(err) => problems.push(err),
            }
        }

        if let Some(path) = lookup(ENV_LOG_FILE).filter(|path| !path.is_empty()) {
            config.log_destination = LogDestination::File(path);
        }

        if let Some(value) = lookup(ENV_EXCLUDE) {
            config.exclusions.extend(
                value
                    .as_bytes()
                    .split(|byte| *byte == b':')
                    .filter(|prefix| !prefix.is_empty())
                    .map(|prefix| OsStr::from_bytes(prefix).to_os_string()),
            );
        }

        (config, problems)
    }

    pub fn exclusion_filter(&self) -> ExclusionFilter {
        ExclusionFilter::new(self.exclusions.iter().cloned())
    }
}

fn parse_flag(key: &'static str, value: &OsStr) -> Result<bool, ConfigError> {
    let text = value.to_str().ok_or(ConfigError::NotUnicode { key })?;
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: text.to_string(),
        }),
    }
}

fn parse_level(value: &OsStr) -> Result<InsensitiveLogLevel, ConfigError> {
    let text = value
        .to_str()
        .ok_or(ConfigError::NotUnicode { key: ENV_LOG_LEVEL })?;
    InsensitiveLogLevel::parse(text).ok_or_else(|| ConfigError::InvalidLogLevel {
        key: ENV_LOG_LEVEL,
        value: text.to_string(),
    })
}
