//! Fixed-width bit packing of code sequences.
//!
//! A packed stream is a one-byte header followed by the codes, each written
//! with exactly the header's bit width:
//!
//! ```text
//! +--------+---------+---------+-----+-----------------+
//! | W (u8) | code 0  | code 1  | ... | zero padding    |
//! |        | W bits  | W bits  |     | to byte border  |
//! +--------+---------+---------+-----+-----------------+
//! ```
//!
//! Bits are written most-significant first, both within a code and within
//! each byte. The body of `n` codes is exactly `ceil(n * W / 8)` bytes.

use std::io::{Read, Write};

use haagenti_core::error::MAX_HEADER_BIT_WIDTH;
use haagenti_core::{Error, Result};

/// Size of the bit width header in bytes.
pub const HEADER_LEN: usize = 1;

/// Smallest width `W >= 1` such that `max_code < 2^W`.
#[inline]
pub fn min_bit_width(max_code: u64) -> u32 {
    (u64::BITS - max_code.leading_zeros()).max(1)
}

/// Number of zero bits appended to the final byte of a body.
#[inline]
pub fn padding_bits(count: usize, width: u32) -> u32 {
    let bits = count as u64 * u64::from(width);
    ((8 - bits % 8) % 8) as u32
}

/// Width recorded for a stream of `count` codes whose highest value is `max_code`.
///
/// Starts at [`min_bit_width`] and widens only while the final padding could
/// hold a whole code. A reader has no other way to tell padding from trailing
/// zero codes, so such a width would not round-trip. From 8 bits upward the
/// padding is always shorter than a code and the minimal width is kept.
pub fn packed_bit_width(max_code: u64, count: usize) -> u32 {
    let mut width = min_bit_width(max_code);
    while padding_bits(count, width) >= width {
        width += 1;
    }
    width
}

/// Total packed size (header included) of `count` codes at `width` bits.
#[inline]
pub fn packed_len(count: usize, width: u32) -> usize {
    let body_bits = count as u64 * u64::from(width);
    HEADER_LEN + body_bits.div_ceil(8) as usize
}

/// Check that `width` fits the one-byte header.
pub fn header_byte(width: u32) -> Result<u8> {
    if width == 0 {
        return Err(Error::InvalidBitWidth { width });
    }
    if width > MAX_HEADER_BIT_WIDTH {
        return Err(Error::BitWidthOverflow { width });
    }
    Ok(width as u8)
}

#[inline]
fn low_mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// MSB-first bit writer.
#[derive(Debug)]
pub struct BitWriter {
    /// Output buffer.
    buffer: Vec<u8>,
    /// Pending bits, right-aligned.
    accum: u64,
    /// Bits currently in accumulator (0-7 between writes).
    bits_in_accum: u32,
}

impl BitWriter {
    /// Create a new bit writer.
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a new bit writer with specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_vec(Vec::with_capacity(capacity))
    }

    /// Continue writing after the bytes already in `buffer`.
    pub fn from_vec(buffer: Vec<u8>) -> Self {
        Self {
            buffer,
            accum: 0,
            bits_in_accum: 0,
        }
    }

    /// Write the low `num_bits` bits of `value`, most significant first.
    ///
    /// Widths beyond 64 bits are written as leading zero bits.
    pub fn write_bits(&mut self, value: u64, num_bits: u32) {
        let mut remaining = num_bits;
        while remaining > 0 {
            let take = remaining.min(32);
            remaining -= take;

            let chunk = if remaining >= u64::BITS {
                0
            } else {
                (value >> remaining) & low_mask(take)
            };

            self.accum = (self.accum << take) | chunk;
            self.bits_in_accum += take;
            self.flush_bytes();
        }
    }

    #[inline]
    fn flush_bytes(&mut self) {
        while self.bits_in_accum >= 8 {
            self.bits_in_accum -= 8;
            self.buffer.push((self.accum >> self.bits_in_accum) as u8);
        }
        self.accum &= low_mask(self.bits_in_accum);
    }

    /// Number of bits written so far, including any bytes the writer started with.
    pub fn bit_len(&self) -> usize {
        self.buffer.len() * 8 + self.bits_in_accum as usize
    }

    /// Flush the final partial byte, zero-padded on the right.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bits_in_accum > 0 {
            let pad = 8 - self.bits_in_accum;
            self.buffer.push((self.accum << pad) as u8);
        }
        self.buffer
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// MSB-first bit reader over a byte slice.
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Bits consumed from the start of `data`.
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    /// Create a reader positioned at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    /// Bits left to read.
    pub fn bits_remaining(&self) -> usize {
        self.data.len() * 8 - self.bit_pos
    }

    /// Read `num_bits` bits as an unsigned integer.
    ///
    /// Fails if fewer bits remain, or if the value has set bits above bit 63.
    pub fn read_bits(&mut self, num_bits: u32) -> Result<u64> {
        let wanted = num_bits as usize;
        if wanted > self.bits_remaining() {
            return Err(Error::truncated(self.bits_remaining(), wanted));
        }

        let start = self.bit_pos;
        let mut value = 0u64;
        let mut remaining = wanted;

        while remaining > 0 {
            let byte = self.data[self.bit_pos / 8];
            let available = 8 - self.bit_pos % 8;
            let take = available.min(remaining);
            let bits = (byte >> (available - take)) & (((1u16 << take) - 1) as u8);

            if value.leading_zeros() < take as u32 {
                return Err(Error::corrupted_at(
                    format!("{}-bit code does not fit in 64 bits", num_bits),
                    start / 8,
                ));
            }

            value = (value << take) | u64::from(bits);
            self.bit_pos += take;
            remaining -= take;
        }

        Ok(value)
    }
}

/// Pack `codes` at `width` bits each behind a one-byte width header.
///
/// Fails before producing any output if the width does not fit the header or
/// a code needs more than `width` bits.
pub fn pack(width: u32, codes: &[u64]) -> Result<Vec<u8>> {
    let header = header_byte(width)?;

    if width < u64::BITS {
        if let Some(&code) = codes.iter().find(|&&code| code >> width != 0) {
            return Err(Error::CodeTooWide { code, width });
        }
    }

    let mut buffer = Vec::with_capacity(packed_len(codes.len(), width));
    buffer.push(header);

    let mut writer = BitWriter::from_vec(buffer);
    for &code in codes {
        writer.write_bits(code, width);
    }
    Ok(writer.finish())
}

/// Pack a sequence whose first element is the bit width.
pub fn pack_sequence(sequence: &[u64]) -> Result<Vec<u8>> {
    let (&width, codes) = sequence
        .split_first()
        .ok_or_else(|| Error::corrupted("code sequence has no bit width element"))?;
    let width = u32::try_from(width).unwrap_or(u32::MAX);
    pack(width, codes)
}

/// Pack `codes` and write the whole stream to `sink`.
///
/// Returns the number of bytes written.
pub fn write_packed<W: Write>(width: u32, codes: &[u64], mut sink: W) -> Result<usize> {
    let packed = pack(width, codes)?;
    sink.write_all(&packed)?;
    Ok(packed.len())
}

/// Unpack a stream into its bit width and codes.
///
/// Every complete `W`-bit group of the body is a code. A trailing group
/// shorter than `W` bits is treated as padding and dropped. Such a remainder
/// is indistinguishable from a stream that lost the tail of its final code;
/// both decode to the same codes.
pub fn unpack(data: &[u8]) -> Result<(u32, Vec<u64>)> {
    let (&header, body) = data.split_first().ok_or_else(|| Error::truncated(0, 8))?;
    if header == 0 {
        return Err(Error::InvalidBitWidth { width: 0 });
    }

    let width = u32::from(header);
    let count = body.len() * 8 / width as usize;

    let mut reader = BitReader::new(body);
    let codes = (0..count)
        .map(|_| reader.read_bits(width))
        .collect::<Result<Vec<_>>>()?;

    Ok((width, codes))
}

/// Read a whole packed stream from `source` and unpack it.
pub fn read_packed<R: Read>(mut source: R) -> Result<(u32, Vec<u64>)> {
    let mut data = Vec::new();
    source.read_to_end(&mut data)?;
    unpack(&data)
}
