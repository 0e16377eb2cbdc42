//! Engine configuration parsed from `clause.toml`
//!
//! ```toml
//! [palette]
//! unmanaged = "Red"
//! verified = "BrightGreen"
//! drifted = "Yellow"
//!
//! [palette.equivalents]
//! BrightGreen = ["Green"]
//!
//! [reconciliation]
//! change_tracking = true
//! ```
//!
//! Every section and key is optional.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::palette::Palette;
use crate::{Error, Result};

/// Conventional configuration file name
pub const CONFIG_FILE: &str = "clause.toml";

fn default_true() -> bool {
    true
}

/// Reconciliation behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationSection {
    /// Read edit tracking when the host supports it. `false` forces the
    /// two-state classifier.
    #[serde(default = "default_true")]
    pub change_tracking: bool,
}

impl Default for ReconciliationSection {
    fn default() -> Self {
        Self {
            change_tracking: default_true(),
        }
    }
}

/// Engine configuration
///
/// Passed to the driver explicitly; nothing reads configuration globally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub palette: Palette,

    #[serde(default)]
    pub reconciliation: ReconciliationSection,
}

impl EngineConfig {
    /// Parse configuration from TOML content
    ///
    /// # Example
    ///
    /// ```
    /// use clause_core::EngineConfig;
    ///
    /// let config = EngineConfig::parse(r#"
    /// [palette]
    /// verified = "Green"
    /// "#).unwrap();
    ///
    /// assert_eq!(config.palette.verified, "Green");
    /// assert_eq!(config.palette.drifted, "Yellow");
    /// assert!(config.reconciliation.change_tracking);
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// [`Error::ConfigNotFound`] if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Serialize back to TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<()> {
        let colors = [
            ("unmanaged", &self.palette.unmanaged),
            ("verified", &self.palette.verified),
            ("drifted", &self.palette.drifted),
        ];
        for (name, color) in colors {
            if color.trim().is_empty() {
                return Err(Error::InvalidConfig {
                    message: format!("palette.{} must name a colour", name),
                });
            }
        }
        if self.palette.verified.eq_ignore_ascii_case(&self.palette.drifted) {
            return Err(Error::InvalidConfig {
                message: "palette.verified and palette.drifted must differ".to_string(),
            });
        }
        Ok(())
    }
}
