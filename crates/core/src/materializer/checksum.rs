//! Streaming content hashes.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::types::ChecksumType;

/// Incremental hasher over either supported algorithm.
pub enum StreamingHasher {
    Md5(md5::Context),
    Sha256(Sha256),
}

impl StreamingHasher {
    pub fn new(checksum: ChecksumType) -> Self {
        match checksum {
            ChecksumType::Md5 => Self::Md5(md5::Context::new()),
            ChecksumType::Sha256 => Self::Sha256(Sha256::new()),
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        match self {
            Self::Md5(context) => context.consume(data),
            Self::Sha256(hasher) => hasher.update(data),
        }
    }

    /// Lower-case hex digest.
    pub fn finish(self) -> String {
        match self {
            Self::Md5(context) => format!("{:x}", context.compute()),
            Self::Sha256(hasher) => format!("{:x}", hasher.finalize()),
        }
    }
}

/// Hashes the file at `path` in `buffer_size` chunks.
pub fn file_checksum(
    path: &Path,
    checksum: ChecksumType,
    buffer_size: usize,
) -> std::io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(buffer_size, file);
    let mut hasher = StreamingHasher::new(checksum);
    let mut buffer = vec![0u8; buffer_size.max(1)];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finish())
}
