//! Codec configuration.

use serde::{Deserialize, Serialize};

/// LZW codec configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LzwConfig {
    /// Largest output `decompress` will produce (bytes).
    #[serde(default = "default_max_decompressed_size")]
    pub max_decompressed_size: usize,
}

impl Default for LzwConfig {
    fn default() -> Self {
        Self {
            max_decompressed_size: default_max_decompressed_size(),
        }
    }
}

impl LzwConfig {
    /// Set the decompressed size ceiling.
    pub fn with_max_decompressed_size(mut self, bytes: usize) -> Self {
        self.max_decompressed_size = bytes;
        self
    }
}

fn default_max_decompressed_size() -> usize {
    256 * 1024 * 1024 // 256MB
}
