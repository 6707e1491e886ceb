pub mod config;
pub mod decoder;
pub mod finder;
pub mod matcher;
pub mod materializer;
pub mod normalizer;
pub mod scanner;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, NormalizerConfig,
    OutputConfig, SearchConfig,
};
pub use decoder::{decode_name, decode_name_from_bytes, DecodeError};
pub use finder::{Finder, FinderError, MaterializePhase, RunReport};
pub use matcher::{filter, MatchCriterion, MatchError, Matcher};
pub use materializer::{
    ChecksumType, FsMaterializer, MaterializeAction, MaterializeError, MaterializeJob,
    MaterializeOutcome, MaterializeReport, Materializer, MaterializerConfig,
};
pub use normalizer::{CharTable, IdentityNormalizer, Normalizer, ScriptNormalizer, TableError};
pub use scanner::{scan, scan_with, MatchSet, ScanError, ScanFailure, ScanOptions, ScanResult, TorrentRecord};
