//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the normalizer and
//! materializer traits plus fixtures that write real torrent files, so the
//! whole pipeline can be exercised against a temporary directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use torfind_core::testing::{fixtures, RecordingMaterializer};
//!
//! let temp = tempfile::TempDir::new()?;
//! fixtures::write_torrent(temp.path(), "sub/a.torrent", "Some Name");
//!
//! let materializer = RecordingMaterializer::new();
//! // Use in a Finder...
//! ```

mod mock_materializer;
mod mock_normalizer;

pub use mock_materializer::{RecordedMaterialize, RecordingMaterializer};
pub use mock_normalizer::MockNormalizer;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::{Path, PathBuf};

    use crate::decoder::bencode::{encode, Value};

    /// Bencoded single-file torrent with a UTF-8 `info.name`.
    pub fn torrent_bytes(name: &str) -> Vec<u8> {
        torrent_bytes_raw_name(name.as_bytes())
    }

    /// Like [`torrent_bytes`] but with arbitrary name bytes.
    pub fn torrent_bytes_raw_name(name: &[u8]) -> Vec<u8> {
        build(name, 1024)
    }

    /// Like [`torrent_bytes`] with a custom `info.length`, for files that
    /// share a name but differ in content.
    pub fn torrent_bytes_with_length(name: &str, length: i64) -> Vec<u8> {
        build(name.as_bytes(), length)
    }

    fn build(name: &[u8], length: i64) -> Vec<u8> {
        let pieces = [0u8; 20];
        let info = Value::Dict(vec![
            (&b"length"[..], Value::Int(length)),
            (&b"name"[..], Value::Bytes(name)),
            (&b"piece length"[..], Value::Int(16384)),
            (&b"pieces"[..], Value::Bytes(&pieces)),
        ]);
        let root = Value::Dict(vec![
            (
                &b"announce"[..],
                Value::Bytes(b"http://tracker.example.org/announce"),
            ),
            (&b"info"[..], info),
        ]);
        encode(&root)
    }

    /// Writes `bytes` to `dir/relative`, creating parent directories.
    pub fn write_file(dir: &Path, relative: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create fixture directory");
        }
        std::fs::write(&path, bytes).expect("write fixture file");
        path
    }

    /// Writes a torrent named `name` to `dir/relative`.
    pub fn write_torrent(dir: &Path, relative: &str, name: &str) -> PathBuf {
        write_file(dir, relative, &torrent_bytes(name))
    }
}
