//! Assistant configuration, read from TOML.
//!
//! Every key is optional; anything missing takes its default.
//!
//! ```toml
//! lender = "Tata Capital"
//! grouping = "indian"            # or "international"
//! output_dir = "."               # where sanction letters are saved
//! log_file = "loan-assistant.log"
//!
//! [pacing]
//! enabled = true
//! short_ms = 500
//! long_ms = 1000
//! typing_ms = 1000
//! analysis_ms = 2000
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use loan_core::flow::{FlowSettings, Pause};
use loan_core::format::DigitGrouping;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "loan-assistant.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Delays between chat messages. Purely cosmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    pub enabled: bool,
    pub short_ms: u64,
    pub long_ms: u64,
    /// How long the typing indicator shows before each assistant message.
    pub typing_ms: u64,
    pub analysis_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            short_ms: 500,
            long_ms: 1000,
            typing_ms: 1000,
            analysis_ms: 2000,
        }
    }
}

impl PacingConfig {
    /// No delays at all; used by `--no-pacing` and tests.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn delay(
        &self,
        pause: Pause,
    ) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        let ms = match pause {
            Pause::Short => self.short_ms,
            Pause::Long => self.long_ms,
            Pause::Analysis => self.analysis_ms,
        };
        Duration::from_millis(ms)
    }

    pub fn typing(&self) -> Duration {
        if self.enabled {
            Duration::from_millis(self.typing_ms)
        } else {
            Duration::ZERO
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Lender named in the greeting and on the sanction letter.
    pub lender: String,
    pub grouping: DigitGrouping,
    /// Directory sanction letters are written to.
    pub output_dir: PathBuf,
    pub log_file: Option<PathBuf>,
    /// Any `EnvFilter` directive, e.g. `debug` or `loan_core=trace`.
    pub log_level: Option<String>,
    pub pacing: PacingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            lender: "Tata Capital".to_string(),
            grouping: DigitGrouping::default(),
            output_dir: PathBuf::from("."),
            log_file: None,
            log_level: None,
            pacing: PacingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Reads and parses `path`. The file must exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Loads `explicit` if given (it must exist). Otherwise loads
    /// [`DEFAULT_CONFIG_FILE`] when present, and falls back to defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn flow_settings(&self) -> FlowSettings {
        FlowSettings {
            lender: self.lender.clone(),
            grouping: self.grouping,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_pacing_keeps_other_defaults() {
        let config = AppConfig::from_toml_str("[pacing]\nshort_ms = 10\n").unwrap();

        assert_eq!(config.pacing.short_ms, 10);
        assert_eq!(config.pacing.long_ms, 1000);
        assert!(config.pacing.enabled);
    }

    #[test]
    fn full_file_parses() {
        let config = AppConfig::from_toml_str(
            r#"
lender = "Acme Finance"
grouping = "international"
output_dir = "letters"
log_file = "assistant.log"
log_level = "debug"

[pacing]
enabled = false
"#,
        )
        .unwrap();

        assert_eq!(config.lender, "Acme Finance");
        assert_eq!(config.grouping, DigitGrouping::International);
        assert_eq!(config.output_dir, PathBuf::from("letters"));
        assert_eq!(config.log_file, Some(PathBuf::from("assistant.log")));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert!(!config.pacing.enabled);
    }

    #[test]
    fn unknown_grouping_is_rejected() {
        assert!(AppConfig::from_toml_str("grouping = \"metric\"").is_err());
    }

    #[test]
    fn disabled_pacing_has_no_delays() {
        let pacing = PacingConfig::disabled();

        assert_eq!(pacing.delay(Pause::Analysis), Duration::ZERO);
        assert_eq!(pacing.typing(), Duration::ZERO);
    }

    #[test]
    fn enabled_pacing_maps_each_pause() {
        let pacing = PacingConfig::default();

        assert_eq!(pacing.delay(Pause::Short), Duration::from_millis(500));
        assert_eq!(pacing.delay(Pause::Long), Duration::from_millis(1000));
        assert_eq!(pacing.delay(Pause::Analysis), Duration::from_millis(2000));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = AppConfig::load(Path::new("definitely/not/here.toml"));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn flow_settings_carry_lender_and_grouping() {
        let config = AppConfig {
            lender: "Acme".to_string(),
            grouping: DigitGrouping::International,
            ..AppConfig::default()
        };

        assert_eq!(
            config.flow_settings(),
            FlowSettings {
                lender: "Acme".to_string(),
                grouping: DigitGrouping::International,
            }
        );
    }
}
