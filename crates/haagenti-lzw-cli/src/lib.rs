//! File orchestration for the `haagenti-lzw` command-line tool.
//!
//! Reads whole files, runs them through [`haagenti_lzw::LzwCodec`], writes
//! the result atomically and reports sizes and ratios through `tracing`.

pub mod config;
pub mod files;

pub use config::CliConfig;
pub use files::{file_compress, file_decompress, write_atomic};
