//! Script normalization for name comparison.
//!
//! Torrent names and search text are folded from Traditional to Simplified
//! Chinese before they are compared, so a search for either script finds
//! both. Normalized text is only ever a comparison key: stored and displayed
//! names keep their original characters.
//!
//! The conversion data lives in a [`CharTable`]. The built-in table ships
//! with the crate; a user table can be layered on top of it.

mod error;
mod script;
mod table;
mod traits;

pub use error::TableError;
pub use script::ScriptNormalizer;
pub use table::CharTable;
pub use traits::{IdentityNormalizer, Normalizer};
