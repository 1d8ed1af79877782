use serde::{Deserialize, Serialize};

use crate::args::{StorageMode, DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_RESPONSE_DEPTH};

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Container strategy: "static" or "dynamic" (default: "static").
    #[serde(default)]
    pub storage: StorageMode,
    /// Starting capacity of each container in dynamic mode (default: 256).
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,
    /// Expand `@path` arguments (default: true).
    #[serde(default = "default_response_files")]
    pub response_files: bool,
    /// How deep `@path` references may nest (default: 32).
    #[serde(default = "default_max_response_depth")]
    pub max_response_depth: usize,
}

fn default_initial_capacity() -> usize {
    DEFAULT_INITIAL_CAPACITY
}

fn default_response_files() -> bool {
    true
}

fn default_max_response_depth() -> usize {
    DEFAULT_MAX_RESPONSE_DEPTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageMode::default(),
            initial_capacity: default_initial_capacity(),
            response_files: default_response_files(),
            max_response_depth: default_max_response_depth(),
        }
    }
}
