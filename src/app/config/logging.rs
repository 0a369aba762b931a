//! Logging configuration and initialization.

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "warn".into()
}

fn default_format() -> String {
    "pretty".into()
}

impl LoggingConfig {
    /// Raise the level for `-v` (info) and `-vv` (debug); zero keeps it.
    #[must_use]
    pub fn with_verbosity(mut self, verbose: u8) -> Self {
        match verbose {
            0 => {}
            1 => self.level = "info".into(),
            _ => self.level = "debug".into(),
        }
        self
    }

    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// Logs go to stderr so stdout stays clean for reports and JSON output.
    /// `RUST_LOG` overrides the configured level. Calling this twice is a
    /// no-op.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        let _ = match self.format.as_str() {
            "json" => fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
            _ => fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init(),
        };
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(LoggingConfig::default().with_verbosity(0).level, "warn");
        assert_eq!(LoggingConfig::default().with_verbosity(1).level, "info");
        assert_eq!(LoggingConfig::default().with_verbosity(3).level, "debug");
    }
}
