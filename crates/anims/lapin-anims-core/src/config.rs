//! Core configuration for lapin-anims-core.

use serde::{Deserialize, Serialize};

use crate::error::{AnimError, Result};

/// Startup values for clocks and schedulers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial clock time in seconds.
    pub start_time: f32,
    /// Initial capacity hint for scheduler queues.
    pub scheduler_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            scheduler_capacity: 64,
        }
    }
}

impl Config {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| AnimError::invalid(format!("config json: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = Config::from_json_str(r#"{ "start_time": 12.5 }"#).unwrap();
        assert_eq!(cfg.start_time, 12.5);
        assert_eq!(cfg.scheduler_capacity, 64);
    }

    #[test]
    fn malformed_json_is_an_argument_error() {
        let err = Config::from_json_str("{ start_time: }").unwrap_err();
        assert_eq!(err.category(), "argument");
    }
}
