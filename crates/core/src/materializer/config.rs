//! Configuration for the materializer module.

use serde::{Deserialize, Serialize};

use super::types::ChecksumType;

/// Configuration for the filesystem materializer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterializerConfig {
    /// Buffer size for copies and hashing in bytes.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,

    /// Hash used to detect content-identical files.
    #[serde(default)]
    pub checksum: ChecksumType,

    /// Whether to create a missing destination directory.
    #[serde(default = "default_true")]
    pub create_target: bool,
}

fn default_buffer_size() -> usize {
    64 * 1024 // 64 KiB
}

fn default_true() -> bool {
    true
}

impl Default for MaterializerConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
            checksum: ChecksumType::default(),
            create_target: true,
        }
    }
}

impl MaterializerConfig {
    /// Sets the hash used for duplicate detection.
    pub fn with_checksum(mut self, checksum: ChecksumType) -> Self {
        self.checksum = checksum;
        self
    }

    /// Sets the buffer size for copies.
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Enables or disables creating a missing destination.
    pub fn with_create_target(mut self, enabled: bool) -> Self {
        self.create_target = enabled;
        self
    }
}
