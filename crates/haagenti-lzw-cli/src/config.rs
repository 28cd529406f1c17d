//! CLI configuration.

use std::fs;
use std::path::Path;

use haagenti_core::{Error, Result};
use haagenti_lzw::LzwConfig;
use serde::{Deserialize, Serialize};
use tracing::Level;

/// Command-line tool configuration, loadable from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Report timings, code metrics and ratios
    #[serde(default)]
    pub verbose: bool,

    /// Codec limits
    #[serde(default)]
    pub codec: LzwConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            verbose: false,
            codec: LzwConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| Error::CorruptedData {
            message: format!("invalid config file {}", path.display()),
            source: Some(Box::new(e)),
        })
    }

    /// Effective log level; verbose mode shows at least debug events.
    ///
    /// Fails on a level name other than trace, debug, info, warn or error.
    pub fn level(&self) -> Result<Level> {
        let level = self.log_level.parse::<Level>().map_err(|e| Error::CorruptedData {
            message: format!("invalid log level '{}'", self.log_level),
            source: Some(Box::new(e)),
        })?;

        if self.verbose && level != Level::TRACE {
            Ok(Level::DEBUG)
        } else {
            Ok(level)
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_level() {
        let mut config = CliConfig::default();
        assert_eq!(config.level().unwrap(), Level::INFO);

        config.verbose = true;
        assert_eq!(config.level().unwrap(), Level::DEBUG);

        config.log_level = "TRACE".to_string();
        assert_eq!(config.level().unwrap(), Level::TRACE);

        config.verbose = false;
        config.log_level = "Warn".to_string();
        assert_eq!(config.level().unwrap(), Level::WARN);
    }

    #[test]
    fn test_unknown_level_rejected() {
        let config = CliConfig {
            log_level: "bogus".to_string(),
            ..Default::default()
        };
        let err = config.level().unwrap_err();
        assert_eq!(err.category(), "corrupted_data");
        assert!(err.to_string().contains("invalid log level 'bogus'"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"verbose": true, "codec": {{"max_decompressed_size": 1024}}}}"#
        )
        .unwrap();

        let config = CliConfig::from_file(file.path()).unwrap();
        assert!(config.verbose);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.codec.max_decompressed_size, 1024);
    }

    #[test]
    fn test_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = CliConfig::from_file(file.path()).unwrap_err();
        assert_eq!(err.category(), "corrupted_data");
    }
}
