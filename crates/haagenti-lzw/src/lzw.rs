//! LZW coding over an adaptive dictionary.
//!
//! Both sides seed codes 0-255 with the single-byte strings and number new
//! entries from 256 upward in the order they are first seen. Encoder and
//! decoder build their dictionaries independently; the numbering discipline
//! is what keeps them in lock-step.

use std::collections::HashMap;

use haagenti_core::{Error, Result};
use tracing::trace;

use crate::pack::packed_bit_width;
use crate::symbol::{normalize, Symbol, FIRST_CODE};

/// Sentinel prefix for the seeded single-byte entries.
const NO_PREFIX: u32 = u32::MAX;

/// LZW output: the symbols plus the bit width they will be packed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSequence {
    /// Bit width derived from the highest code after encoding.
    pub bit_width: u32,
    /// Emitted symbols in order.
    pub symbols: Vec<Symbol>,
}

impl CodeSequence {
    /// Wrap symbols, deriving the bit width from their highest value.
    pub fn new(symbols: Vec<Symbol>) -> Self {
        let max_code = symbols.iter().map(|s| s.value()).max().unwrap_or(0);
        let bit_width = packed_bit_width(u64::from(max_code), symbols.len());
        Self { bit_width, symbols }
    }

    /// Highest code in the sequence.
    pub fn max_code(&self) -> Option<u32> {
        self.symbols.iter().map(|s| s.value()).max()
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if the sequence holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Integer form with the bit width as the first element.
    pub fn to_prefixed_codes(&self) -> Vec<u64> {
        let mut codes = Vec::with_capacity(self.symbols.len() + 1);
        codes.push(u64::from(self.bit_width));
        codes.extend(normalize(&self.symbols));
        codes
    }
}

/// Encode `input` into LZW symbols.
///
/// The recorded bit width is the smallest one whose final padding is shorter
/// than a code (see [`packed_bit_width`]). That is the strict minimum except
/// for short runs of small literals, where the minimum would let a reader
/// take the padding for extra zero codes: `b"\x01"` records 5 bits, not 1.
///
/// Fails only if the dictionary outgrows the 32-bit code space.
pub fn compress(input: &[u8]) -> Result<CodeSequence> {
    let mut bytes = input.iter().copied();
    let Some(first) = bytes.next() else {
        return Ok(CodeSequence::new(Vec::new()));
    };

    // (code of w, next byte) -> code of w + byte
    let mut dictionary: HashMap<(u32, u8), u32> = HashMap::new();
    let mut next_code = FIRST_CODE;
    let mut symbols = Vec::new();
    let mut w = u32::from(first);

    for c in bytes {
        match dictionary.get(&(w, c)) {
            Some(&code) => w = code,
            None => {
                symbols.push(Symbol::from_code(w));
                dictionary.insert((w, c), next_code);
                next_code = next_code
                    .checked_add(1)
                    .filter(|&code| code != NO_PREFIX)
                    .ok_or_else(|| Error::limit_exceeded("dictionary codes", NO_PREFIX as usize))?;
                w = u32::from(c);
            }
        }
    }
    symbols.push(Symbol::from_code(w));

    trace!(
        "LZW encoder built {} entries for {} bytes",
        dictionary.len(),
        input.len()
    );

    Ok(CodeSequence::new(symbols))
}

/// Classification of a code against the decoder dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    /// Entry already present.
    Known(u32),
    /// The code the encoder defined while emitting it: `w + w[0]`.
    PendingSelfReference,
    /// Neither known nor next in line.
    Invalid,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    /// Code of the entry minus its last byte.
    prefix: u32,
    first: u8,
    last: u8,
    len: usize,
}

/// Decoder dictionary; strings are rebuilt by following prefix links.
struct DecodeDictionary {
    entries: Vec<Entry>,
}

impl DecodeDictionary {
    fn seeded() -> Self {
        let entries = (0..=u8::MAX)
            .map(|byte| Entry {
                prefix: NO_PREFIX,
                first: byte,
                last: byte,
                len: 1,
            })
            .collect();
        Self { entries }
    }

    #[inline]
    fn next_code(&self) -> u32 {
        self.entries.len() as u32
    }

    #[inline]
    fn lookup(&self, code: u32) -> Lookup {
        let next = self.next_code();
        if code < next {
            Lookup::Known(code)
        } else if code == next {
            Lookup::PendingSelfReference
        } else {
            Lookup::Invalid
        }
    }

    #[inline]
    fn entry(&self, code: u32) -> Entry {
        self.entries[code as usize]
    }

    /// Add `string(prefix) + last`.
    fn insert(&mut self, prefix: u32, last: u8) {
        let parent = self.entry(prefix);
        self.entries.push(Entry {
            prefix,
            first: parent.first,
            last,
            len: parent.len + 1,
        });
    }

    /// Append the string for `code` to `output`.
    fn write_string(&self, code: u32, output: &mut Vec<u8>) {
        let start = output.len();
        output.resize(start + self.entry(code).len, 0);

        let mut cursor = code;
        for slot in output[start..].iter_mut().rev() {
            let entry = self.entry(cursor);
            *slot = entry.last;
            cursor = entry.prefix;
        }
    }
}

/// Decode LZW symbols back into bytes.
pub fn decompress(symbols: &[Symbol]) -> Result<Vec<u8>> {
    decompress_with_limit(symbols, usize::MAX)
}

/// Decode LZW symbols, failing once the output would exceed `limit` bytes.
pub fn decompress_with_limit(symbols: &[Symbol], limit: usize) -> Result<Vec<u8>> {
    let Some((first, rest)) = symbols.split_first() else {
        return Ok(Vec::new());
    };

    let mut dictionary = DecodeDictionary::seeded();

    // The first symbol has no predecessor to complete a pending entry.
    let mut w = match dictionary.lookup(first.value()) {
        Lookup::Known(code) => code,
        _ => {
            return Err(Error::malformed_code(
                first.value(),
                0,
                dictionary.next_code(),
            ));
        }
    };

    if limit == 0 {
        return Err(Error::limit_exceeded("decompressed size", limit));
    }
    let mut output = Vec::with_capacity(symbols.len().saturating_mul(2).min(limit));
    dictionary.write_string(w, &mut output);

    for (offset, symbol) in rest.iter().enumerate() {
        let k = symbol.value();
        let entry_first = match dictionary.lookup(k) {
            Lookup::Known(code) => dictionary.entry(code).first,
            Lookup::PendingSelfReference => dictionary.entry(w).first,
            Lookup::Invalid => {
                return Err(Error::malformed_code(
                    k,
                    offset + 1,
                    dictionary.next_code(),
                ));
            }
        };

        dictionary.insert(w, entry_first);

        if output.len() + dictionary.entry(k).len > limit {
            return Err(Error::limit_exceeded("decompressed size", limit));
        }
        dictionary.write_string(k, &mut output);

        w = k;
    }

    trace!(
        "LZW decoder rebuilt {} entries for {} bytes",
        dictionary.entries.len() - FIRST_CODE as usize,
        output.len()
    );

    Ok(output)
}
