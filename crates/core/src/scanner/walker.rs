//! Directory traversal and per-file decoding.

use std::ffi::OsStr;
use std::path::{Component, Path};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::error::ScanError;
use super::types::{MatchSet, ScanFailure, ScanOptions, ScanResult, TorrentRecord};
use crate::decoder::decode_name;

/// File name suffix that marks torrent metainfo.
pub const TORRENT_EXTENSION: &str = ".torrent";

/// Scans `root` with default options.
pub fn scan(root: &Path) -> Result<ScanResult, ScanError> {
    scan_with(root, &ScanOptions::default())
}

/// Scans `root`, decoding every `.torrent` file below it.
pub fn scan_with(root: &Path, options: &ScanOptions) -> Result<ScanResult, ScanError> {
    check_root(root)?;
    info!("Scanning {} for torrent files", root.display());

    let mut records = MatchSet::new();
    let mut failures = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(options.follow_links)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let relative_path = e
                    .path()
                    .map(|p| relative_display(root, p))
                    .unwrap_or_else(|| ".".to_string());
                warn!("Skipping unreadable entry {}: {}", relative_path, e);
                failures.push(ScanFailure {
                    relative_path,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        // Symlinked files are read even when directory links are not followed.
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file || !is_torrent_file(entry.file_name()) {
            continue;
        }

        let relative_path = relative_display(root, entry.path());
        match decode_name(entry.path()) {
            Ok(decoded_name) => {
                debug!("Decoded {} as {:?}", relative_path, decoded_name);
                records.insert(
                    TorrentRecord::new(relative_path, decoded_name).with_source(entry.path()),
                );
            }
            Err(e) => {
                warn!(
                    "Could not decode torrent file {} ({}): {}",
                    relative_path,
                    e.kind(),
                    e
                );
                failures.push(ScanFailure {
                    relative_path,
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        "Scan finished: {} torrents decoded, {} skipped",
        records.len(),
        failures.len()
    );

    Ok(ScanResult {
        root: root.to_path_buf(),
        records,
        failures,
    })
}

fn check_root(root: &Path) -> Result<(), ScanError> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ScanError::NotADirectory {
            path: root.to_path_buf(),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ScanError::RootNotFound {
            path: root.to_path_buf(),
        }),
        Err(e) => Err(ScanError::Io {
            path: root.to_path_buf(),
            source: e,
        }),
    }
}

/// Whether a file name carries the torrent suffix.
pub fn is_torrent_file(file_name: &OsStr) -> bool {
    file_name.to_string_lossy().ends_with(TORRENT_EXTENSION)
}

/// Renders `path` relative to `root` as `./a/b.torrent`, using `/` on every
/// platform. The root itself renders as `.`.
///
/// Bytes that are not valid UTF-8 are written as `\xNN`, so distinct file
/// names always render distinctly.
pub fn relative_display(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let parts: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(display_component(part)),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        format!("./{}", parts.join("/"))
    }
}

#[cfg(unix)]
fn display_component(part: &OsStr) -> String {
    use std::os::unix::ffi::OsStrExt;

    let mut out = String::new();
    for chunk in part.as_bytes().utf8_chunks() {
        out.push_str(chunk.valid());
        for byte in chunk.invalid() {
            out.push_str(&format!("\\x{:02x}", byte));
        }
    }
    out
}

#[cfg(not(unix))]
fn display_component(part: &OsStr) -> String {
    part.to_string_lossy().into_owned()
}
