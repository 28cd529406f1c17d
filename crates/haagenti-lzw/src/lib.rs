//! # Haagenti LZW
//!
//! LZW compression with a fixed-width bit-packed container.
//!
//! The engine turns bytes into a sequence of literal bytes and dictionary
//! codes. The packer stores that sequence behind a one-byte header holding
//! the bit width, every code using exactly that many bits.
//!
//! ## Pipeline
//!
//! ```text
//! compress:   bytes -> lzw::compress -> symbol::normalize -> pack::pack -> stream
//! decompress: stream -> pack::unpack -> symbol::denormalize -> lzw::decompress -> bytes
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use haagenti_lzw::LzwCodec;
//! use haagenti_core::{Compressor, Decompressor};
//!
//! let codec = LzwCodec::new();
//! let compressed = codec.compress(b"TOBEORNOTTOBEORTOBEORNOT")?;
//! let original = codec.decompress(&compressed)?;
//! ```

pub mod codec;
pub mod compress;
pub mod config;
pub mod decompress;
pub mod lzw;
pub mod pack;
pub mod symbol;

// Re-export main types
pub use codec::LzwCodec;
pub use compress::LzwCompressor;
pub use config::LzwConfig;
pub use decompress::LzwDecompressor;
pub use lzw::CodeSequence;
pub use symbol::Symbol;
