//! Symbols emitted by the LZW engine and their integer form.
//!
//! The engine speaks in literals (seeded single-byte entries) and dictionary
//! codes, while the packed format only knows integers. Values up to 255 are
//! literals, anything larger is a dictionary code.

use haagenti_core::{Error, Result};

/// Highest value that denotes a literal byte.
pub const LITERAL_MAX: u32 = 0xFF;

/// First code assigned to a multi-byte dictionary entry.
pub const FIRST_CODE: u32 = LITERAL_MAX + 1;

/// One element of an LZW code sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A single byte, seeded in every dictionary under its own value.
    Literal(u8),
    /// Index of a dictionary entry built during coding.
    Code(u32),
}

impl Symbol {
    /// Classify a raw code by magnitude.
    #[inline]
    pub fn from_code(code: u32) -> Self {
        if code <= LITERAL_MAX {
            Symbol::Literal(code as u8)
        } else {
            Symbol::Code(code)
        }
    }

    /// Numeric value as stored in the packed stream.
    #[inline]
    pub fn value(self) -> u32 {
        match self {
            Symbol::Literal(byte) => u32::from(byte),
            Symbol::Code(code) => code,
        }
    }

    /// Check if this symbol is a literal byte.
    #[inline]
    pub fn is_literal(self) -> bool {
        matches!(self, Symbol::Literal(_))
    }
}

impl From<u8> for Symbol {
    fn from(byte: u8) -> Self {
        Symbol::Literal(byte)
    }
}

/// Map symbols to the integers the bit packer stores.
pub fn normalize(symbols: &[Symbol]) -> Vec<u64> {
    symbols.iter().map(|s| u64::from(s.value())).collect()
}

/// Map unpacked integers back to symbols.
///
/// Values that do not fit the 32-bit code space cannot have come from the
/// encoder and are reported with their position.
pub fn denormalize(values: &[u64]) -> Result<Vec<Symbol>> {
    values
        .iter()
        .enumerate()
        .map(|(position, &value)| {
            u32::try_from(value)
                .map(Symbol::from_code)
                .map_err(|_| Error::corrupted_at(format!("code {} out of range", value), position))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_boundary() {
        assert_eq!(Symbol::from_code(0), Symbol::Literal(0));
        assert_eq!(Symbol::from_code(255), Symbol::Literal(255));
        assert_eq!(Symbol::from_code(256), Symbol::Code(256));
    }

    #[test]
    fn test_normalize_mixed() {
        let symbols = [
            Symbol::Literal(b'A'),
            Symbol::Code(300),
            Symbol::from(b'z'),
        ];
        assert_eq!(normalize(&symbols), vec![65, 300, 122]);
    }

    #[test]
    fn test_denormalize() {
        let symbols = denormalize(&[16, 255, 256, 4096]).unwrap();
        assert_eq!(
            symbols,
            vec![
                Symbol::Literal(16),
                Symbol::Literal(255),
                Symbol::Code(256),
                Symbol::Code(4096),
            ]
        );
        assert!(symbols[1].is_literal());
        assert!(!symbols[2].is_literal());
    }

    #[test]
    fn test_denormalize_out_of_range() {
        let err = denormalize(&[1, u64::from(u32::MAX) + 1]).unwrap_err();
        assert!(err.to_string().contains("at offset 1"));
    }
}
