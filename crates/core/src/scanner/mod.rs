//! Scanner module for discovering `.torrent` files under a directory.
//!
//! The scanner walks the tree in a stable order (sorted by file name within
//! each directory), decodes every file ending in `.torrent`, and collects a
//! [`MatchSet`] of relative path → decoded name. Files that fail to decode
//! are reported as [`ScanFailure`]s and the walk continues; only an invalid
//! root aborts the scan.

mod error;
mod types;
mod walker;

pub use error::ScanError;
pub use types::{MatchSet, ScanFailure, ScanOptions, ScanResult, TorrentRecord};
pub use walker::{is_torrent_file, relative_display, scan, scan_with, TORRENT_EXTENSION};
