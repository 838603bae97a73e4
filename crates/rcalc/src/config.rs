//! Engine configuration.
//!
//! Loaded from a TOML file:
//!
//! ```toml
//! integer_promotion = "on_overflow"   # or "explicit"
//! max_stack_depth = 1024
//! history_limit = 100
//! real_precision = 12
//! max_integer_bits = 65536
//! ```
//!
//! Every field is optional.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::value::format::DEFAULT_PRECISION;

/// Largest useful significant-digit count for an `f64`.
pub const MAX_REAL_PRECISION: u8 = 17;

/// Default ceiling on the size of an exact integer result.
pub const DEFAULT_MAX_INTEGER_BITS: u64 = 65_536;

/// Errors that can occur when loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value for '{field}' in {path}: {reason}")]
    Invalid {
        path: PathBuf,
        field: &'static str,
        reason: String,
    },
}

/// When `Int` arithmetic moves to `BigInt`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegerPromotion {
    /// Redo an overflowing `Int` operation exactly in `BigInt`.
    #[default]
    OnOverflow,
    /// Overflow is an error; `BigInt` only comes from literals or `bigint`.
    Explicit,
}

/// Engine settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub integer_promotion: IntegerPromotion,
    /// Maximum number of stack items (`None` = unbounded).
    pub max_stack_depth: Option<usize>,
    /// Number of undo steps kept.
    pub history_limit: usize,
    /// Significant digits for reals (`None` = 15).
    pub real_precision: Option<u8>,
    /// Exact integer results estimated above this many bits are rejected.
    pub max_integer_bits: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            integer_promotion: IntegerPromotion::default(),
            max_stack_depth: Some(1024),
            history_limit: 100,
            real_precision: None,
            max_integer_bits: DEFAULT_MAX_INTEGER_BITS,
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Parse a configuration from TOML text. `path` is only used in errors.
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(p) = self.real_precision
            && !(1..=MAX_REAL_PRECISION).contains(&p)
        {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                field: "real_precision",
                reason: format!("{p} is outside 1..={MAX_REAL_PRECISION}"),
            });
        }
        if self.max_stack_depth == Some(0) {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                field: "max_stack_depth",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_integer_bits < 64 {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                field: "max_integer_bits",
                reason: format!("{} is below 64", self.max_integer_bits),
            });
        }
        Ok(())
    }

    /// Significant digits used for reals.
    pub fn precision(&self) -> u8 {
        self.real_precision.unwrap_or(DEFAULT_PRECISION)
    }
}
