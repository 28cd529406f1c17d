//! LZW codec (combined compressor + decompressor).

use haagenti_core::{Algorithm, Codec, CompressionStats, Compressor, Decompressor, Result};

use crate::compress::LzwCompressor;
use crate::config::LzwConfig;
use crate::decompress::LzwDecompressor;

/// LZW codec combining compression and decompression.
#[derive(Debug, Clone, Default)]
pub struct LzwCodec {
    compressor: LzwCompressor,
    decompressor: LzwDecompressor,
}

impl LzwCodec {
    /// Create a new LZW codec with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new LZW codec with explicit configuration.
    pub fn with_config(config: LzwConfig) -> Self {
        Self {
            compressor: LzwCompressor::new(),
            decompressor: LzwDecompressor::with_config(config),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &LzwConfig {
        self.decompressor.config()
    }

    /// Compress and return operation statistics.
    pub fn compress_with_stats(&self, input: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
        self.compressor.compress_with_stats(input)
    }

    /// Decompress and return operation statistics.
    pub fn decompress_with_stats(&self, input: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
        self.decompressor.decompress_with_stats(input)
    }
}

impl Compressor for LzwCodec {
    fn algorithm(&self) -> Algorithm {
        self.compressor.algorithm()
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.compressor.compress(input)
    }

    fn max_compressed_size(&self, input_len: usize) -> usize {
        self.compressor.max_compressed_size(input_len)
    }
}

impl Decompressor for LzwCodec {
    fn algorithm(&self) -> Algorithm {
        self.decompressor.algorithm()
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.decompressor.decompress(input)
    }
}

impl Codec for LzwCodec {
    fn new() -> Self {
        LzwCodec::new()
    }
}
