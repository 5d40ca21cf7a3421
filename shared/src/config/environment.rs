//! Deployment environment and log output settings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::env_flag;

/// Deployment environment, read from `ENVIRONMENT` (or `ENV`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Unset or unrecognised values fall back to development
    pub fn from_env() -> Self {
        std::env::var("ENVIRONMENT")
            .or_else(|_| std::env::var("ENV"))
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" | "local" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment: {}", other)),
        }
    }
}

/// Output layout for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

/// Settings consumed by the infra logging bootstrap.
///
/// `level` is an `EnvFilter` directive, so values such as
/// `info,og_core=debug` are accepted as well as plain levels.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    /// ANSI colours; ignored by the JSON layout
    pub colored: bool,
    /// Attach file and line to every record
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl LoggingConfig {
    /// Baseline per environment: verbose and human-readable locally,
    /// JSON lines everywhere else.
    pub fn for_environment(env: Environment) -> Self {
        let (level, format) = match env {
            Environment::Development => ("debug", LogFormat::Pretty),
            Environment::Staging => ("info", LogFormat::Json),
            Environment::Production => ("warn", LogFormat::Json),
        };
        let local = env == Environment::Development;

        Self {
            level: level.to_string(),
            format,
            colored: local,
            source_location: local,
        }
    }

    /// Environment baseline with `LOG_LEVEL`, `LOG_FORMAT` and `LOG_COLOR` applied on top
    pub fn from_env(env: Environment) -> Self {
        let mut config = Self::for_environment(env);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            if !level.trim().is_empty() {
                config.level = level.trim().to_string();
            }
        }
        if let Some(format) = std::env::var("LOG_FORMAT").ok().and_then(|v| v.parse().ok()) {
            config.format = format;
        }
        config.colored = env_flag("LOG_COLOR", config.colored);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!("DEV".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!(" stage ".parse::<Environment>().unwrap(), Environment::Staging);
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert!("qa".parse::<Environment>().is_err());
        assert_eq!(Environment::Staging.to_string(), "staging");
    }

    #[test]
    fn test_environment_from_env_falls_back() {
        temp_env::with_vars(
            [("ENVIRONMENT", Some("bogus")), ("ENV", None::<&str>)],
            || assert_eq!(Environment::from_env(), Environment::Development),
        );
        temp_env::with_vars(
            [("ENVIRONMENT", None), ("ENV", Some("production"))],
            || assert!(Environment::from_env().is_production()),
        );
    }

    #[test]
    fn test_logging_baseline_per_environment() {
        let dev = LoggingConfig::for_environment(Environment::Development);
        assert_eq!(dev.level, "debug");
        assert_eq!(dev.format, LogFormat::Pretty);
        assert!(dev.colored && dev.source_location);

        let prod = LoggingConfig::for_environment(Environment::Production);
        assert_eq!(prod.level, "warn");
        assert_eq!(prod.format, LogFormat::Json);
        assert!(!prod.colored && !prod.source_location);
    }

    #[test]
    fn test_logging_overrides() {
        temp_env::with_vars(
            [
                ("LOG_LEVEL", Some("info,og_core=trace")),
                ("LOG_FORMAT", Some("compact")),
                ("LOG_COLOR", Some("off")),
            ],
            || {
                let config = LoggingConfig::from_env(Environment::Development);
                assert_eq!(config.level, "info,og_core=trace");
                assert_eq!(config.format, LogFormat::Compact);
                assert!(!config.colored);
                assert!(config.source_location);
            },
        );
    }

    #[test]
    fn test_unknown_log_format_keeps_baseline() {
        temp_env::with_vars(
            [("LOG_LEVEL", None), ("LOG_FORMAT", Some("xml")), ("LOG_COLOR", None)],
            || {
                let config = LoggingConfig::from_env(Environment::Staging);
                assert_eq!(config.level, "info");
                assert_eq!(config.format, LogFormat::Json);
            },
        );
    }
}
