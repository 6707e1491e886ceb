//! Materializer module for copying matched torrents into a target folder.
//!
//! This module provides the `Materializer` trait and a filesystem
//! implementation that copies matched `.torrent` files into a destination
//! directory, optionally renaming them after their decoded name.
//!
//! # Features
//!
//! - Copy-only: sources are never moved, modified or deleted
//! - Content-hash deduplication, so repeated runs create nothing new
//! - Collision-safe naming (`name_1.torrent`, `name_2.torrent`, ...)
//! - Create-new writes that never truncate an existing file
//! - Per-file failures are reported without aborting the run
//!
//! # Example
//!
//! ```ignore
//! use torfind_core::materializer::{FsMaterializer, Materializer, MaterializeJob};
//!
//! let materializer = FsMaterializer::with_defaults();
//! let job = MaterializeJob {
//!     source_root: PathBuf::from("/downloads"),
//!     destination: Some(PathBuf::from("/collected")),
//!     rename: true,
//! };
//!
//! let report = materializer.materialize(&matches, &job)?;
//! println!("Copied {} files ({} bytes)", report.copied_count(), report.total_bytes);
//! ```

mod checksum;
mod config;
mod error;
mod fs_materializer;
mod traits;
mod types;

pub use checksum::{file_checksum, StreamingHasher};
pub use config::MaterializerConfig;
pub use error::MaterializeError;
pub use fs_materializer::FsMaterializer;
pub use traits::Materializer;
pub use types::{ChecksumType, MaterializeAction, MaterializeJob, MaterializeOutcome, MaterializeReport};
