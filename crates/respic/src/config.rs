//! Engine configuration.
//!
//! The engine owns none of the persisted settings of the surrounding
//! pipeline (content-type allow-lists and the like); it consumes the two
//! values that change its output and nothing else.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default breakpoint padding in pixels for the derived strategy.
pub const DEFAULT_BREAKPOINT_MARGIN: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Added to each variant's width when deriving a `max-width` breakpoint,
    /// so the breakpoint triggers slightly before the viewport reaches the
    /// variant's native width (non-1.0 device pixel ratios, no too-small
    /// flash right at the boundary).
    pub breakpoint_margin: u32,
    /// Fallback sizes list for the explicit strategy, applied when the
    /// caller's token string is empty. Same comma-separated
    /// `"<condition> <name>"` format as caller-supplied lists.
    pub default_sizes: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            breakpoint_margin: DEFAULT_BREAKPOINT_MARGIN,
            default_sizes: None,
        }
    }
}

impl EngineConfig {
    /// Builds a config from a JSON object, e.g. a settings blob persisted by
    /// the surrounding pipeline. Missing fields take their defaults; unknown
    /// fields are rejected.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::InvalidConfig {
                message: "engine config must be a JSON object".to_string(),
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(raw)?)
    }
}
