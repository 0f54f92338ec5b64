//! # Sink Configuration
//!
//! How a sink renders records: timestamp, level column, caller location,
//! color markup and tracebacks. Loaded from defaults, environment variables
//! or a JSON file.

use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::LogError;

pub const ENV_SHOW_TIME: &str = "SEMLOG_SHOW_TIME";
pub const ENV_SHOW_LEVEL: &str = "SEMLOG_SHOW_LEVEL";
pub const ENV_SHOW_PATH: &str = "SEMLOG_SHOW_PATH";
pub const ENV_TRACEBACKS: &str = "SEMLOG_TRACEBACKS";
pub const ENV_TIME_FORMAT: &str = "SEMLOG_TIME_FORMAT";
pub const ENV_TARGET: &str = "SEMLOG_TARGET";
pub const ENV_NO_COLOR: &str = "NO_COLOR";

pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkTarget {
    #[default]
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    pub show_time: bool,
    /// Off by default: the category label takes the place of the level.
    pub show_level: bool,
    pub show_path: bool,
    /// Render `[color]..[/]` markup as ANSI styling. When off, tags are stripped.
    pub markup: bool,
    pub tracebacks: bool,
    pub time_format: String,
    pub target: SinkTarget,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            show_time: true,
            show_level: false,
            show_path: true,
            markup: true,
            tracebacks: true,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            target: SinkTarget::Stdout,
        }
    }
}

impl SinkConfig {
    /// Defaults overridden by `SEMLOG_*` variables; `NO_COLOR` turns markup off.
    pub fn from_env() -> Result<Self, LogError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LogError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        let config: SinkConfig =
            serde_json::from_str(&content).map_err(LogError::InvalidConfig)?;
        config.validate()?;
        Ok(config)
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, LogError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_SHOW_TIME) {
            config.show_time = parse_flag(ENV_SHOW_TIME, &value)?;
        }
        if let Some(value) = lookup(ENV_SHOW_LEVEL) {
            config.show_level = parse_flag(ENV_SHOW_LEVEL, &value)?;
        }
        if let Some(value) = lookup(ENV_SHOW_PATH) {
            config.show_path = parse_flag(ENV_SHOW_PATH, &value)?;
        }
        if let Some(value) = lookup(ENV_TRACEBACKS) {
            config.tracebacks = parse_flag(ENV_TRACEBACKS, &value)?;
        }
        if let Some(value) = lookup(ENV_TIME_FORMAT) {
            config.time_format = value;
        }
        if let Some(value) = lookup(ENV_TARGET) {
            config.target = match value.trim().to_ascii_lowercase().as_str() {
                "stdout" => SinkTarget::Stdout,
                "stderr" => SinkTarget::Stderr,
                _ => {
                    return Err(LogError::InvalidEnv {
                        key: ENV_TARGET.to_string(),
                        value,
                    })
                }
            };
        }
        // https://no-color.org: any non-empty value disables color
        if lookup(ENV_NO_COLOR).is_some_and(|value| !value.is_empty()) {
            config.markup = false;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LogError> {
        if StrftimeItems::new(&self.time_format).any(|item| matches!(item, Item::Error)) {
            return Err(LogError::InvalidTimeFormat {
                format: self.time_format.clone(),
            });
        }
        Ok(())
    }

    pub fn without_markup(mut self) -> Self {
        self.markup = false;
        self
    }

    pub fn with_time(mut self, show_time: bool) -> Self {
        self.show_time = show_time;
        self
    }

    pub fn with_level(mut self, show_level: bool) -> Self {
        self.show_level = show_level;
        self
    }

    pub fn with_path(mut self, show_path: bool) -> Self {
        self.show_path = show_path;
        self
    }

    pub fn with_tracebacks(mut self, tracebacks: bool) -> Self {
        self.tracebacks = tracebacks;
        self
    }

    pub fn with_target(mut self, target: SinkTarget) -> Self {
        self.target = target;
        self
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, LogError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(LogError::InvalidEnv {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SinkConfig::default();
        assert!(config.show_time);
        assert!(!config.show_level);
        assert!(config.show_path);
        assert!(config.markup);
        assert!(config.tracebacks);
        assert_eq!(config.target, SinkTarget::Stdout);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = SinkConfig::from_lookup(lookup_from(&[
            (ENV_SHOW_TIME, "false"),
            (ENV_SHOW_LEVEL, "1"),
            (ENV_TARGET, "STDERR"),
            (ENV_TIME_FORMAT, "%H:%M:%S"),
        ]))
        .unwrap();

        assert!(!config.show_time);
        assert!(config.show_level);
        assert_eq!(config.target, SinkTarget::Stderr);
        assert_eq!(config.time_format, "%H:%M:%S");
    }

    #[test]
    fn test_no_color_disables_markup() {
        let config = SinkConfig::from_lookup(lookup_from(&[(ENV_NO_COLOR, "1")])).unwrap();
        assert!(!config.markup);

        let config = SinkConfig::from_lookup(lookup_from(&[(ENV_NO_COLOR, "")])).unwrap();
        assert!(config.markup);
    }

    #[test]
    fn test_invalid_env_flag() {
        let result = SinkConfig::from_lookup(lookup_from(&[(ENV_SHOW_PATH, "sometimes")]));
        match result {
            Err(LogError::InvalidEnv { key, value }) => {
                assert_eq!(key, ENV_SHOW_PATH);
                assert_eq!(value, "sometimes");
            }
            other => panic!("Expected InvalidEnv, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_time_format() {
        let result = SinkConfig::from_lookup(lookup_from(&[(ENV_TIME_FORMAT, "%Q")]));
        assert!(matches!(result, Err(LogError::InvalidTimeFormat { .. })));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SinkConfig = serde_json::from_str(r#"{"show_path": false}"#).unwrap();
        assert!(!config.show_path);
        assert!(config.show_time);
        assert_eq!(config.time_format, DEFAULT_TIME_FORMAT);
    }
}
