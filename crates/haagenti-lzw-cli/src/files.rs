//! Whole-file compression and decompression.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use haagenti_core::{CompressionStats, Error, Result};
use haagenti_lzw::LzwCodec;
use tracing::debug;

/// Fail unless `path` names an existing regular file.
fn ensure_file(path: &Path) -> Result<()> {
    if path.is_file() {
        return Ok(());
    }
    Err(Error::Io(io::Error::new(
        io::ErrorKind::NotFound,
        format!("{} is not a valid file", path.display()),
    )))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write `data` next to `path` and rename it into place.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let tmp = tmp_path(path);
    if let Err(e) = fs::write(&tmp, data) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

/// Compress `input` into `output`.
pub fn file_compress(codec: &LzwCodec, input: &Path, output: &Path) -> Result<CompressionStats> {
    ensure_file(input)?;
    let data = fs::read(input)?;

    let (packed, stats) = codec.compress_with_stats(&data)?;
    write_atomic(output, &packed)?;

    debug!("<<< Compression data >>>");
    debug!("  {} bytes to compress", stats.original_size);
    debug!("  {} compressed codes", stats.code_count);
    if let Some(max_code) = stats.max_code {
        debug!("  Highest code: {}", max_code);
    }
    if let Some(width) = stats.bit_width {
        debug!("  Encoding size: {} bits", width);
    }
    debug!(
        "Compression completed in {:?} ({:.2} MB/s)",
        stats.elapsed(),
        stats.throughput_mbs()
    );
    report_ratio(input, output, &stats);

    Ok(stats)
}

/// Decompress `input` into `output`.
pub fn file_decompress(codec: &LzwCodec, input: &Path, output: &Path) -> Result<CompressionStats> {
    ensure_file(input)?;
    let data = fs::read(input)?;

    let (restored, stats) = codec.decompress_with_stats(&data)?;
    write_atomic(output, &restored)?;

    debug!(
        "Decompression completed in {:?} ({} bytes restored, {:.2} MB/s)",
        stats.elapsed(),
        restored.len(),
        stats.throughput_mbs()
    );

    Ok(stats)
}

fn report_ratio(plain: &Path, compressed: &Path, stats: &CompressionStats) {
    let ratio = stats.ratio();

    debug!("<<< Compression results >>>");
    debug!("  {}: {} B", plain.display(), ratio.original_size);
    debug!("  {}: {} B", compressed.display(), ratio.compressed_size);
    debug!("  Compression ratio: {:.2}:1", ratio.ratio());
    debug!("  Space savings: {}%", whole_percent(ratio.savings_percent()));
}

/// Percentage without its fractional part, truncated toward zero.
fn whole_percent(percent: f64) -> i64 {
    percent.trunc() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const LOREM: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
        eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, \
        quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. \
        Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat \
        nulla pariatur. Excepteur sint occaecat cupidatat non proident, sunt in culpa qui \
        officia deserunt mollit anim id est laborum.\n";

    #[test]
    fn test_file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let plain = dir.path().join("lorem.txt");
        let packed = dir.path().join("lorem.lzw");
        let restored = dir.path().join("t_lorem.txt");
        fs::write(&plain, LOREM.repeat(8)).unwrap();

        let codec = LzwCodec::new();
        let stats = file_compress(&codec, &plain, &packed).unwrap();

        let plain_size = fs::metadata(&plain).unwrap().len() as usize;
        let packed_size = fs::metadata(&packed).unwrap().len() as usize;
        assert!(packed_size < plain_size);
        assert_eq!(stats.original_size, plain_size);
        assert_eq!(stats.compressed_size, packed_size);

        file_decompress(&codec, &packed, &restored).unwrap();
        assert_eq!(fs::read(&restored).unwrap(), fs::read(&plain).unwrap());
    }

    #[test]
    fn test_missing_input() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.txt");
        let out = dir.path().join("out.lzw");

        let err = file_compress(&LzwCodec::new(), &missing, &out).unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == io::ErrorKind::NotFound));
        assert!(!out.exists());
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out.txt");
        assert!(file_decompress(&LzwCodec::new(), dir.path(), &out).is_err());
    }

    #[test]
    fn test_corrupt_input_leaves_no_output() {
        let dir = TempDir::new().unwrap();
        let bad = dir.path().join("bad.lzw");
        let out = dir.path().join("out.txt");
        // Width 9, codes 65 then 400 (beyond the next assignable 256).
        let packed = haagenti_lzw::pack::pack(9, &[65, 400]).unwrap();
        fs::write(&bad, packed).unwrap();

        let err = file_decompress(&LzwCodec::new(), &bad, &out).unwrap_err();
        assert_eq!(err.category(), "malformed_code");
        assert!(!out.exists());
        assert!(!tmp_path(&out).exists());
    }

    #[test]
    fn test_whole_percent_truncates() {
        // 3 -> 1 bytes saves 66.67%.
        let ratio = CompressionStats {
            original_size: 3,
            compressed_size: 1,
            ..Default::default()
        }
        .ratio();
        assert_eq!(whole_percent(ratio.savings_percent()), 66);
        assert_eq!(whole_percent(99.99), 99);
        assert_eq!(whole_percent(-12.7), -12);
    }

    #[test]
    fn test_write_atomic_failed_rename_cleans_up() {
        let dir = TempDir::new().unwrap();
        // A file cannot be renamed over a non-empty directory.
        let path = dir.path().join("occupied");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("inner"), b"x").unwrap();

        assert!(write_atomic(&path, b"data").is_err());
        assert!(!tmp_path(&path).exists());
        assert!(path.join("inner").exists());
    }

    #[test]
    fn test_write_atomic_replaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.bin");
        fs::write(&path, b"old").unwrap();

        write_atomic(&path, b"new contents").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new contents");
        assert!(!tmp_path(&path).exists());
    }
}
