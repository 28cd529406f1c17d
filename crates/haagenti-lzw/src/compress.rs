//! LZW compressor: engine output packed into the fixed-width stream.

use std::time::Instant;

use haagenti_core::{Algorithm, CompressionStats, Compressor, Result};
use tracing::debug;

use crate::lzw;
use crate::pack::{min_bit_width, pack, packed_len};
use crate::symbol::{normalize, FIRST_CODE};

/// LZW compressor.
#[derive(Debug, Clone, Default)]
pub struct LzwCompressor;

impl LzwCompressor {
    /// Create a new LZW compressor.
    pub fn new() -> Self {
        Self
    }

    /// Compress and report code stream metrics.
    pub fn compress_with_stats(&self, input: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
        let start = Instant::now();

        let sequence = lzw::compress(input)?;
        let packed = pack(sequence.bit_width, &normalize(&sequence.symbols))?;

        let stats =
            CompressionStats::from_operation(Algorithm::Lzw, input.len(), packed.len(), start.elapsed())
                .with_codes(sequence.len(), sequence.max_code(), sequence.bit_width);

        debug!(
            "LZW compressed {} bytes into {} codes (highest {:?}, {} bits each) in {:?}",
            input.len(),
            sequence.len(),
            sequence.max_code(),
            sequence.bit_width,
            stats.elapsed()
        );

        Ok((packed, stats))
    }
}

impl Compressor for LzwCompressor {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Lzw
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        self.compress_with_stats(input).map(|(packed, _)| packed)
    }

    fn max_compressed_size(&self, input_len: usize) -> usize {
        if input_len == 0 {
            return packed_len(0, 1);
        }
        // At most one code per byte, none above 255 + input_len.
        let width = min_bit_width(u64::from(FIRST_CODE - 1) + input_len as u64);
        packed_len(input_len, width)
    }
}
