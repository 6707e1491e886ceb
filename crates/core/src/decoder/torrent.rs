//! Extracts `info.name` from torrent metainfo.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::bencode;
use super::error::DecodeError;

/// Reads a `.torrent` file and returns its `info.name` as UTF-8.
///
/// The file handle is closed before decoding starts, so every exit path
/// (including decode failures) releases it.
pub fn decode_name(path: &Path) -> Result<String, DecodeError> {
    let io_err = |source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut buf = Vec::new();
    File::open(path)
        .and_then(|mut file| file.read_to_end(&mut buf))
        .map_err(io_err)?;

    decode_name_from_bytes(&buf)
}

/// Decodes `info.name` from raw metainfo bytes.
pub fn decode_name_from_bytes(bytes: &[u8]) -> Result<String, DecodeError> {
    let root = bencode::parse(bytes)?;

    let info = root
        .get(b"info")
        .filter(|v| v.is_dict())
        .ok_or(DecodeError::missing("info"))?;

    let name = info
        .get(b"name")
        .and_then(|v| v.as_bytes())
        .ok_or(DecodeError::missing("info.name"))?;

    String::from_utf8(name.to_vec()).map_err(DecodeError::EncodingError)
}
