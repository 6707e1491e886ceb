//! Decoder module for reading the display name out of `.torrent` files.
//!
//! Only the `info.name` field is extracted. The whole file must still be
//! well-formed bencode, so a truncated or corrupt file never yields a
//! partial name.
//!
//! # Example
//!
//! ```ignore
//! use torfind_core::decoder::decode_name;
//!
//! let name = decode_name(Path::new("./downloads/album.torrent"))?;
//! println!("{name}");
//! ```

pub mod bencode;
mod error;
mod torrent;

pub use bencode::{BencodeError, Value};
pub use error::DecodeError;
pub use torrent::{decode_name, decode_name_from_bytes};
