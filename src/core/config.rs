//! Assistant configuration with documented defaults
//!
//! Every tunable number used by dispatch, loading and rendering lives here.
//! Values can be overridden from a TOML file (see `data/assistant.toml`).

use crate::core::error::{AssistantError, Result};
use crate::table::loader::Encoding;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for loading, dispatch and rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    // === DISPATCH ===
    /// Rows returned by `show_top` / `show_bottom`
    pub preview_rows: usize,

    /// Number of equal-width bins in a histogram
    pub histogram_bins: usize,

    /// Decimal places used when annotating the correlation heatmap
    pub correlation_decimals: usize,

    // === LOADING ===
    /// Encoding tried when the file is not valid UTF-8
    ///
    /// Only single-byte Latin-1 labels are accepted ("ISO-8859-1", "latin1").
    pub fallback_encoding: String,

    /// Cell contents treated as missing values (compared verbatim, without trimming)
    pub na_values: Vec<String>,

    // === RENDERING ===
    /// Maximum rows printed for a tabular result; the footer still reports the full size
    pub max_display_rows: usize,

    /// Maximum characters per table cell before truncation
    pub max_cell_width: usize,

    /// Terminal chart size in character cells
    pub chart_width: u16,
    pub chart_height: u16,

    /// PNG chart size in pixels
    pub png_width: u32,
    pub png_height: u32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            preview_rows: 10,
            histogram_bins: 20,
            correlation_decimals: 2,

            fallback_encoding: "ISO-8859-1".into(),
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),

            max_display_rows: 50,
            max_cell_width: 24,
            chart_width: 80,
            chart_height: 20,
            png_width: 640,
            png_height: 480,
        }
    }
}

/// Markers read as missing, matching what common CSV tooling treats as NA
const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

impl AssistantConfig {
    /// Load configuration from a TOML file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AssistantConfig = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.preview_rows == 0 {
            return Err(AssistantError::InvalidConfig(
                "preview_rows must be at least 1".into(),
            ));
        }
        if self.histogram_bins == 0 {
            return Err(AssistantError::InvalidConfig(
                "histogram_bins must be at least 1".into(),
            ));
        }
        if Encoding::from_label(&self.fallback_encoding).is_none() {
            return Err(AssistantError::InvalidConfig(format!(
                "unsupported fallback_encoding '{}'",
                self.fallback_encoding
            )));
        }
        if self.chart_width < 20 || self.chart_height < 5 {
            return Err(AssistantError::InvalidConfig(format!(
                "chart size {}x{} is too small (minimum 20x5)",
                self.chart_width, self.chart_height
            )));
        }
        if self.png_width < 64 || self.png_height < 64 {
            return Err(AssistantError::InvalidConfig(format!(
                "png size {}x{} is too small (minimum 64x64)",
                self.png_width, self.png_height
            )));
        }
        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<AssistantConfig> = OnceLock::new();

/// Get the global config (initializes with defaults if not set)
pub fn config() -> &'static AssistantConfig {
    CONFIG.get_or_init(AssistantConfig::default)
}

/// Set the global config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: AssistantConfig) -> std::result::Result<(), AssistantConfig> {
    CONFIG.set(config)
}
