//! Synthesis configuration.
//!
//! Loaded from YAML (all fields optional), then overridden by
//! environment variables:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `AMPLIFY_SYNTHESIS_TOLERANCE` | `tolerance` |
//! | `AMPLIFY_NATIVE_GATES` | `native_gates` |

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{OracleError, OracleResult};

/// Settings for [`RecursiveControlled`](crate::controlled::RecursiveControlled).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Absolute tolerance for unitarity checks and gate matching.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Emit `cx`/`cz` and fixed single-qubit gates where an operation
    /// matches one, instead of a named custom gate.
    #[serde(default = "default_true")]
    pub native_gates: bool,
}

fn default_tolerance() -> f64 {
    1e-10
}

fn default_true() -> bool {
    true
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            native_gates: default_true(),
        }
    }
}

impl SynthesisConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Enable or disable native gate emission.
    #[must_use]
    pub fn with_native_gates(mut self, native_gates: bool) -> Self {
        self.native_gates = native_gates;
        self
    }

    /// Parse a YAML document.
    pub fn from_yaml_str(contents: &str) -> OracleResult<Self> {
        let config: Self = serde_yaml_ng::from_str(contents)
            .map_err(|e| OracleError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> OracleResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            OracleError::InvalidConfig(format!("{}: {e}", path.as_ref().display()))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Load from an optional file, apply environment overrides and validate.
    pub fn load(config_file: Option<&str>) -> OracleResult<Self> {
        Self::load_with_vars(config_file, |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with overrides read from `var` instead of the
    /// process environment.
    pub fn load_with_vars(
        config_file: Option<&str>,
        var: impl Fn(&str) -> Option<String>,
    ) -> OracleResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.merge_vars(var)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `AMPLIFY_*` environment overrides.
    pub fn merge_env(self) -> OracleResult<Self> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    ///
    /// Set-but-unparsable values are errors rather than silently ignored.
    pub fn merge_vars(mut self, var: impl Fn(&str) -> Option<String>) -> OracleResult<Self> {
        if let Some(v) = var("AMPLIFY_SYNTHESIS_TOLERANCE") {
            self.tolerance = v.trim().parse().map_err(|_| {
                OracleError::InvalidConfig(format!("AMPLIFY_SYNTHESIS_TOLERANCE: '{v}'"))
            })?;
        }
        if let Some(v) = var("AMPLIFY_NATIVE_GATES") {
            self.native_gates = match v.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(OracleError::InvalidConfig(format!(
                        "AMPLIFY_NATIVE_GATES: '{v}'"
                    )));
                }
            };
        }
        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> OracleResult<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 || self.tolerance >= 1.0 {
            return Err(OracleError::InvalidConfig(format!(
                "tolerance must be in (0, 1), got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}
