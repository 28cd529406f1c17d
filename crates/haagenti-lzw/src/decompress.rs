//! LZW decompressor: packed stream back to bytes.

use std::time::Instant;

use haagenti_core::{Algorithm, CompressionStats, Decompressor, Result};
use tracing::debug;

use crate::config::LzwConfig;
use crate::lzw;
use crate::pack::unpack;
use crate::symbol::denormalize;

/// LZW decompressor.
#[derive(Debug, Clone, Default)]
pub struct LzwDecompressor {
    config: LzwConfig,
}

impl LzwDecompressor {
    /// Create a new LZW decompressor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decompressor with explicit limits.
    pub fn with_config(config: LzwConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }

    /// Decompress and report code stream metrics.
    pub fn decompress_with_stats(&self, input: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
        let start = Instant::now();

        let (bit_width, codes) = unpack(input)?;
        let symbols = denormalize(&codes)?;
        let output = lzw::decompress_with_limit(&symbols, self.config.max_decompressed_size)?;

        let max_code = symbols.iter().map(|s| s.value()).max();
        let stats =
            CompressionStats::from_operation(Algorithm::Lzw, output.len(), input.len(), start.elapsed())
                .with_codes(symbols.len(), max_code, bit_width);

        debug!(
            "LZW decompressed {} codes ({} bits each) into {} bytes in {:?}",
            symbols.len(),
            bit_width,
            output.len(),
            stats.elapsed()
        );

        Ok((output, stats))
    }
}

impl Decompressor for LzwDecompressor {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Lzw
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.decompress_with_stats(input).map(|(output, _)| output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::pack;
    use haagenti_core::Error;

    #[test]
    fn test_hand_packed_stream() {
        let packed = pack(9, &[65, 66, 256, 258]).unwrap();
        let output = LzwDecompressor::new().decompress(&packed).unwrap();
        assert_eq!(output, b"ABABABA");
    }

    #[test]
    fn test_header_only() {
        assert!(LzwDecompressor::new().decompress(&[1]).unwrap().is_empty());
        assert!(LzwDecompressor::new().decompress(&[12]).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_stream() {
        let packed = pack(9, &[65, 300]).unwrap();
        assert!(matches!(
            LzwDecompressor::new().decompress(&packed),
            Err(Error::MalformedCode { code: 300, .. })
        ));
    }

    #[test]
    fn test_empty_input_is_truncated() {
        assert!(matches!(
            LzwDecompressor::new().decompress(&[]),
            Err(Error::TruncatedStream { .. })
        ));
    }

    #[test]
    fn test_size_limit() {
        // 97, 256, 257, ... expands quadratically.
        let codes: Vec<u64> = std::iter::once(97).chain(256..300).collect();
        let packed = pack(9, &codes).unwrap();

        let unlimited = LzwDecompressor::new().decompress(&packed).unwrap();
        assert!(unlimited.len() > 64);

        let limited = LzwDecompressor::with_config(LzwConfig::default().with_max_decompressed_size(64));
        assert!(matches!(
            limited.decompress(&packed),
            Err(Error::LimitExceeded { limit: 64, .. })
        ));
    }
}
