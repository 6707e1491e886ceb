//! File system materializer implementation.

use std::ffi::{OsStr, OsString};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::checksum::{file_checksum, StreamingHasher};
use super::config::MaterializerConfig;
use super::error::MaterializeError;
use super::traits::Materializer;
use super::types::{MaterializeAction, MaterializeJob, MaterializeOutcome, MaterializeReport};
use crate::scanner::{MatchSet, TorrentRecord, TORRENT_EXTENSION};

/// Upper bound on `_N` suffixes tried for one file.
const MAX_SUFFIX: u32 = 10_000;

/// File system based materializer implementation.
///
/// Files are only ever copied. Existing files in the destination are never
/// truncated or replaced: new copies are opened with `create_new`.
pub struct FsMaterializer {
    config: MaterializerConfig,
}

/// Candidate file name split around the point where `_N` is inserted.
///
/// Kept as an `OsString` so file names that are not valid UTF-8 are copied
/// under their exact bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TargetName {
    stem: OsString,
    extension: &'static str,
}

impl TargetName {
    fn for_record(record: &TorrentRecord, source: &Path, rename: bool) -> Self {
        if rename {
            let stem = sanitize_file_stem(&record.decoded_name);
            if !(stem.is_empty() || stem == "." || stem == "..") {
                return Self {
                    stem: stem.into(),
                    extension: TORRENT_EXTENSION,
                };
            }
            debug!(
                "Decoded name {:?} is not usable as a file name, keeping original",
                record.decoded_name
            );
        }

        let file_name = source.file_name().unwrap_or_default();
        match strip_torrent_extension(file_name) {
            Some(stem) => Self {
                stem,
                extension: TORRENT_EXTENSION,
            },
            None => Self {
                stem: file_name.to_os_string(),
                extension: "",
            },
        }
    }

    /// `stem.torrent` for attempt 0, `stem_N.torrent` after that.
    fn with_suffix(&self, attempt: u32) -> OsString {
        let mut name = self.stem.clone();
        if attempt > 0 {
            name.push(format!("_{}", attempt));
        }
        name.push(self.extension);
        name
    }
}

#[cfg(unix)]
fn strip_torrent_extension(file_name: &OsStr) -> Option<OsString> {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    file_name
        .as_bytes()
        .strip_suffix(TORRENT_EXTENSION.as_bytes())
        .map(|stem| OsString::from_vec(stem.to_vec()))
}

#[cfg(not(unix))]
fn strip_torrent_extension(file_name: &OsStr) -> Option<OsString> {
    file_name
        .to_str()?
        .strip_suffix(TORRENT_EXTENSION)
        .map(OsString::from)
}

/// Replaces characters that cannot appear in a single path component.
fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            ':' | '*' | '?' | '"' | '<' | '>' | '|' if cfg!(windows) => '_',
            c => c,
        })
        .collect()
}

/// Where to read a record from: the path the scan found it at, or else its
/// `./a/b.torrent` key resolved against the search root.
fn record_source(record: &TorrentRecord, root: &Path) -> PathBuf {
    if record.source.as_os_str().is_empty() {
        source_path(root, &record.relative_path)
    } else {
        record.source.clone()
    }
}

fn source_path(root: &Path, relative_path: &str) -> PathBuf {
    let relative = relative_path.strip_prefix("./").unwrap_or(relative_path);
    relative
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(root.to_path_buf(), |path, part| path.join(part))
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

impl FsMaterializer {
    /// Creates a new file system materializer with the given configuration.
    pub fn new(config: MaterializerConfig) -> Self {
        Self { config }
    }

    /// Creates a materializer with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(MaterializerConfig::default())
    }

    pub fn config(&self) -> &MaterializerConfig {
        &self.config
    }

    /// Checks that `destination` can receive files, creating it if allowed.
    fn prepare_target(&self, destination: &Path) -> Result<(), MaterializeError> {
        match fs::metadata(destination) {
            Ok(meta) if !meta.is_dir() => Err(MaterializeError::target_invalid(
                destination,
                "not a directory",
            )),
            Ok(meta) if meta.permissions().readonly() => Err(MaterializeError::target_invalid(
                destination,
                "directory is read-only",
            )),
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                if !self.config.create_target {
                    return Err(MaterializeError::target_invalid(
                        destination,
                        "directory does not exist",
                    ));
                }
                fs::create_dir_all(destination).map_err(|e| {
                    MaterializeError::target_invalid(
                        destination,
                        format!("could not be created: {}", e),
                    )
                })?;
                info!("Created target directory {}", destination.display());
                Ok(())
            }
            Err(e) => Err(MaterializeError::target_invalid(destination, e.to_string())),
        }
    }

    /// Copies `source` to a new file at `destination`, hashing on the way.
    ///
    /// Fails with `AlreadyExists` if `destination` appeared in the meantime.
    /// A partially written copy is removed before returning an error.
    fn copy_new(&self, source: &Path, destination: &Path) -> std::io::Result<(u64, String)> {
        let source_file = File::open(source)?;
        let dest_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(destination)?;

        let result = self.copy_contents(source_file, dest_file);
        if result.is_err() {
            if let Err(e) = fs::remove_file(destination) {
                warn!(
                    "Failed to remove partial copy {}: {}",
                    destination.display(),
                    e
                );
            }
        }
        result
    }

    fn copy_contents(&self, source: File, destination: File) -> std::io::Result<(u64, String)> {
        let buffer_size = self.config.buffer_size.max(1);
        let mut reader = BufReader::with_capacity(buffer_size, source);
        let mut writer = BufWriter::with_capacity(buffer_size, destination);
        let mut hasher = StreamingHasher::new(self.config.checksum);

        let mut total_bytes = 0u64;
        let mut buffer = vec![0u8; buffer_size];

        loop {
            let bytes_read = reader.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
            writer.write_all(&buffer[..bytes_read])?;
            total_bytes += bytes_read as u64;
        }

        writer.flush()?;
        Ok((total_bytes, hasher.finish()))
    }

    fn checksum(&self, path: &Path) -> Result<String, String> {
        file_checksum(path, self.config.checksum, self.config.buffer_size)
            .map_err(|e| format!("Failed to hash {}: {}", path.display(), e))
    }

    /// Materializes a single record into `destination`.
    fn place_record(
        &self,
        record: &TorrentRecord,
        source_root: &Path,
        destination: &Path,
        rename: bool,
    ) -> Result<MaterializeAction, String> {
        let source = record_source(record, source_root);
        if !source.is_file() {
            return Err(format!("Source file not found: {}", source.display()));
        }

        let name = TargetName::for_record(record, &source, rename);
        let mut source_hash: Option<String> = None;
        let mut attempt = 0;

        while attempt <= MAX_SUFFIX {
            let target_name = name.with_suffix(attempt);
            let candidate = destination.join(&target_name);
            let file_name = target_name.to_string_lossy().into_owned();

            if is_same_file(&source, &candidate) {
                return Ok(MaterializeAction::SkippedSameFile);
            }

            // Dangling links and directories count as occupied too.
            if candidate.symlink_metadata().is_ok() {
                if source_hash.is_none() {
                    source_hash = Some(self.checksum(&source)?);
                }
                match self.checksum(&candidate) {
                    Ok(hash) if source_hash.as_deref() == Some(hash.as_str()) => {
                        return Ok(MaterializeAction::SkippedDuplicate { file_name });
                    }
                    Ok(_) => debug!("{} exists with different content", candidate.display()),
                    Err(e) => debug!("{} is occupied: {}", candidate.display(), e),
                }
                attempt += 1;
                continue;
            }

            match self.copy_new(&source, &candidate) {
                Ok((size_bytes, checksum)) => {
                    return Ok(MaterializeAction::Copied {
                        file_name,
                        size_bytes,
                        checksum,
                    })
                }
                // Lost a race with another writer; compare against what it wrote.
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(format!(
                        "Failed to copy {} to {}: {}",
                        source.display(),
                        candidate.display(),
                        e
                    ))
                }
            }
        }

        Err(format!(
            "No free file name for {} after {} attempts",
            name.with_suffix(0).to_string_lossy(),
            MAX_SUFFIX
        ))
    }
}

impl Materializer for FsMaterializer {
    fn name(&self) -> &str {
        "filesystem"
    }

    fn materialize(
        &self,
        matches: &MatchSet,
        job: &MaterializeJob,
    ) -> Result<MaterializeReport, MaterializeError> {
        let Some(destination) = job.destination.as_deref() else {
            return Ok(MaterializeReport::new(None));
        };

        self.prepare_target(destination)?;
        info!(
            "Materializing {} matches into {}",
            matches.len(),
            destination.display()
        );

        let mut report = MaterializeReport::new(Some(destination.to_path_buf()));
        for record in matches {
            let action =
                match self.place_record(record, &job.source_root, destination, job.rename) {
                    Ok(action) => action,
                    Err(reason) => {
                        warn!("Could not materialize {}: {}", record.relative_path, reason);
                        MaterializeAction::Failed { reason }
                    }
                };

            match &action {
                MaterializeAction::Copied { file_name, .. } => {
                    info!("Copied {} to {}", record.relative_path, file_name)
                }
                MaterializeAction::SkippedDuplicate { file_name } => debug!(
                    "Skipped {}: identical to {}",
                    record.relative_path, file_name
                ),
                MaterializeAction::SkippedSameFile => {
                    debug!("Skipped {}: already in place", record.relative_path)
                }
                MaterializeAction::Failed { .. } => {}
            }

            report.record(MaterializeOutcome {
                relative_path: record.relative_path.clone(),
                decoded_name: record.decoded_name.clone(),
                action,
            });
        }

        info!(
            "Materialize finished: {} copied, {} skipped, {} failed",
            report.copied_count(),
            report.skipped_count(),
            report.failed_count()
        );

        Ok(report)
    }
}
