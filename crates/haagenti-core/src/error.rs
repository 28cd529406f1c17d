//! Error types for compression operations.

use thiserror::Error;

/// Largest bit width a one-byte stream header can record.
pub const MAX_HEADER_BIT_WIDTH: u32 = 255;

/// Result type alias for compression operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Compression error types.
#[derive(Debug, Error)]
pub enum Error {
    /// Input data is corrupted or invalid.
    #[error("corrupted data: {message}")]
    CorruptedData {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A code is neither a known dictionary entry nor the next one to be assigned.
    #[error("malformed code {code} at position {position}: next assignable code is {next_code}")]
    MalformedCode {
        code: u32,
        position: usize,
        next_code: u32,
    },

    /// Bit width does not fit in the one-byte stream header.
    #[error("bit width {width} exceeds header capacity of 255 bits")]
    BitWidthOverflow { width: u32 },

    /// Bit width of zero cannot carry any code.
    #[error("invalid bit width {width}: must be in range [1, 255]")]
    InvalidBitWidth { width: u32 },

    /// Code value cannot be represented in the stream's bit width.
    #[error("code {code} does not fit in {width} bits")]
    CodeTooWide { code: u64, width: u32 },

    /// Stream ended before a required field was complete.
    #[error("truncated stream: {bits_available} bits available, {bits_required} required")]
    TruncatedStream {
        bits_available: usize,
        bits_required: usize,
    },

    /// Buffer too small for output.
    #[error("buffer too small: need {required} bytes, got {provided}")]
    BufferTooSmall { required: usize, provided: usize },

    /// A size or count grew past its ceiling.
    #[error("{what} exceeds limit of {limit}")]
    LimitExceeded { what: &'static str, limit: usize },

    /// I/O error from underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a corrupted data error.
    pub fn corrupted(message: impl Into<String>) -> Self {
        Error::CorruptedData {
            message: message.into(),
            source: None,
        }
    }

    /// Create a corrupted data error with offset context.
    pub fn corrupted_at(message: impl Into<String>, offset: usize) -> Self {
        Error::CorruptedData {
            message: format!("{} at offset {}", message.into(), offset),
            source: None,
        }
    }

    /// Create a malformed code error.
    pub fn malformed_code(code: u32, position: usize, next_code: u32) -> Self {
        Error::MalformedCode {
            code,
            position,
            next_code,
        }
    }

    /// Create a buffer too small error.
    pub fn buffer_too_small(required: usize, provided: usize) -> Self {
        Error::BufferTooSmall { required, provided }
    }

    /// Create a truncated stream error.
    pub fn truncated(bits_available: usize, bits_required: usize) -> Self {
        Error::TruncatedStream {
            bits_available,
            bits_required,
        }
    }

    /// Create a limit exceeded error.
    pub fn limit_exceeded(what: &'static str, limit: usize) -> Self {
        Error::LimitExceeded { what, limit }
    }

    /// Check if error is recoverable (can retry with different parameters).
    ///
    /// Compression is deterministic, so only a larger output buffer helps.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::BufferTooSmall { .. })
    }

    /// Get error category for reporting.
    pub fn category(&self) -> &'static str {
        match self {
            Error::CorruptedData { .. } => "corrupted_data",
            Error::MalformedCode { .. } => "malformed_code",
            Error::BitWidthOverflow { .. } => "bit_width_overflow",
            Error::InvalidBitWidth { .. } => "invalid_bit_width",
            Error::CodeTooWide { .. } => "code_too_wide",
            Error::TruncatedStream { .. } => "truncated_stream",
            Error::BufferTooSmall { .. } => "buffer_too_small",
            Error::LimitExceeded { .. } => "limit_exceeded",
            Error::Io(_) => "io_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_code_message() {
        let err = Error::malformed_code(300, 4, 259);
        assert_eq!(
            err.to_string(),
            "malformed code 300 at position 4: next assignable code is 259"
        );
        assert_eq!(err.category(), "malformed_code");
    }

    #[test]
    fn test_width_overflow_message() {
        let err = Error::BitWidthOverflow { width: 256 };
        assert_eq!(
            err.to_string(),
            "bit width 256 exceeds header capacity of 255 bits"
        );
    }

    #[test]
    fn test_limit_message() {
        let err = Error::limit_exceeded("decompressed size", 1024);
        assert_eq!(err.to_string(), "decompressed size exceeds limit of 1024");
    }

    #[test]
    fn test_recoverable() {
        assert!(Error::buffer_too_small(10, 5).is_recoverable());
        assert!(!Error::truncated(0, 8).is_recoverable());
        assert!(!Error::corrupted_at("bad value", 3).is_recoverable());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert_eq!(err.category(), "io_error");
    }
}
