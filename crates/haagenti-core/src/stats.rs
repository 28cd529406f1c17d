//! Statistics for compression operations.

use std::time::Duration;

use crate::types::{Algorithm, CompressionRatio};

/// Statistics from a compression/decompression operation.
#[derive(Debug, Clone, Default)]
pub struct CompressionStats {
    /// Algorithm used.
    pub algorithm: Option<Algorithm>,

    /// Original (uncompressed) size in bytes.
    pub original_size: usize,

    /// Compressed size in bytes.
    pub compressed_size: usize,

    /// Time taken in microseconds.
    pub time_us: u64,

    /// Number of codes in the packed stream.
    pub code_count: usize,

    /// Highest code emitted or consumed.
    pub max_code: Option<u32>,

    /// Bit width recorded in the stream header.
    pub bit_width: Option<u32>,
}

impl CompressionStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create stats from a completed operation.
    pub fn from_operation(
        algorithm: Algorithm,
        original_size: usize,
        compressed_size: usize,
        elapsed: Duration,
    ) -> Self {
        CompressionStats {
            algorithm: Some(algorithm),
            original_size,
            compressed_size,
            time_us: elapsed.as_micros() as u64,
            ..Default::default()
        }
    }

    /// Attach code stream metrics.
    pub fn with_codes(mut self, code_count: usize, max_code: Option<u32>, bit_width: u32) -> Self {
        self.code_count = code_count;
        self.max_code = max_code;
        self.bit_width = Some(bit_width);
        self
    }

    /// Get compression ratio.
    pub fn ratio(&self) -> CompressionRatio {
        CompressionRatio::new(self.original_size, self.compressed_size)
    }

    /// Get elapsed time.
    pub fn elapsed(&self) -> Duration {
        Duration::from_micros(self.time_us)
    }

    /// Get throughput in bytes per second.
    pub fn throughput_bps(&self) -> f64 {
        if self.time_us == 0 {
            return 0.0;
        }
        self.original_size as f64 * 1_000_000.0 / self.time_us as f64
    }

    /// Get throughput in MB/s.
    pub fn throughput_mbs(&self) -> f64 {
        self.throughput_bps() / 1_000_000.0
    }

    /// Get space savings as percentage.
    pub fn savings_percent(&self) -> f64 {
        self.ratio().savings_percent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_operation() {
        let stats = CompressionStats::from_operation(
            Algorithm::Lzw,
            2_000_000,
            500_000,
            Duration::from_secs(1),
        )
        .with_codes(400_000, Some(300_000), 19);

        assert_eq!(stats.algorithm, Some(Algorithm::Lzw));
        assert_eq!(stats.time_us, 1_000_000);
        assert!((stats.throughput_mbs() - 2.0).abs() < 1e-9);
        assert!((stats.savings_percent() - 75.0).abs() < 1e-9);
        assert_eq!(stats.bit_width, Some(19));
    }

    #[test]
    fn test_zero_time_throughput() {
        let stats = CompressionStats::new();
        assert_eq!(stats.throughput_bps(), 0.0);
        assert_eq!(stats.elapsed(), Duration::ZERO);
    }
}
