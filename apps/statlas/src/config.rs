//! # Application Configuration
//!
//! Optional TOML configuration for the binary: where the analysis tool
//! lives, how fast the simulated runs tick, and where artifacts land.
//!
//! Every key has a default taken from the core timing constants, so a
//! missing file or an empty one yields the stock behavior. A config file
//! is only an override layer.

use serde::{Deserialize, Serialize};
use statlas_core::primitives::{
    ANALYSIS_TOOL_URL, HANDOFF_DELAY_MS, REPORT_STAGE_MS, SETTLE_DELAY_MS, UPLOAD_TICK_MS,
};
use statlas_core::types::StatlasError;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Runtime configuration for the Statlas binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where completed uploads hand off to.
    pub analysis_tool_url: String,
    /// Milliseconds between upload progress ticks.
    pub upload_tick_ms: u64,
    /// Milliseconds each report stage takes.
    pub report_stage_ms: u64,
    /// Milliseconds between the last report stage and artifact output.
    pub settle_delay_ms: u64,
    /// Milliseconds between upload completion and the handoff
    /// announcement.
    pub handoff_delay_ms: u64,
    /// Directory exported artifacts are written into.
    pub artifact_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            analysis_tool_url: ANALYSIS_TOOL_URL.to_string(),
            upload_tick_ms: UPLOAD_TICK_MS,
            report_stage_ms: REPORT_STAGE_MS,
            settle_delay_ms: SETTLE_DELAY_MS,
            handoff_delay_ms: HANDOFF_DELAY_MS,
            artifact_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// File name probed in the working directory when no `--config` flag
    /// is given.
    pub const DEFAULT_PATH: &'static str = "statlas.toml";

    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist and parse. Without one, the default
    /// file is used if present, otherwise the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns `StatlasError::ConfigError` if the file cannot be read or
    /// parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self, StatlasError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(Self::DEFAULT_PATH);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `StatlasError::ConfigError` if the file cannot be read or
    /// parsed.
    pub fn from_file(path: &Path) -> Result<Self, StatlasError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            StatlasError::ConfigError(format!("Read '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `StatlasError::ConfigError` if the text is not valid TOML
    /// for this schema.
    pub fn from_toml(text: &str) -> Result<Self, StatlasError> {
        toml::from_str(text).map_err(|e| StatlasError::ConfigError(format!("Parse: {}", e)))
    }

    /// Interval between upload progress ticks.
    #[must_use]
    pub fn upload_tick(&self) -> Duration {
        Duration::from_millis(self.upload_tick_ms)
    }

    /// Duration of one report stage.
    #[must_use]
    pub fn report_stage(&self) -> Duration {
        Duration::from_millis(self.report_stage_ms)
    }

    /// Pause between the last report stage and artifact output.
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Pause between upload completion and the handoff announcement.
    #[must_use]
    pub fn handoff_delay(&self) -> Duration {
        Duration::from_millis(self.handoff_delay_ms)
    }
}

// =============================================================================
// TESTS
// =============================================================================
