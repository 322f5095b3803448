//! Binary mail table format.
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ HEADER (4 bytes)                     │
//! │  entry_count: u32 (big-endian)       │
//! ├──────────────────────────────────────┤
//! │ RECORD × entry_count                 │
//! │  message_id: [u8; 8] (NUL-padded)    │
//! │  flags: [u8; 3]                      │
//! │  reserved: u8 = 0                    │
//! │  file_name: bytes, NUL-terminated    │
//! │  (zero padding to a 4-byte boundary) │
//! └──────────────────────────────────────┘
//! ```
//!
//! Records follow each other with no separator beyond their own padding.

pub mod cursor;
pub mod record;
pub mod table;

use serde::{Deserialize, Serialize};

pub use cursor::ByteCursor;
pub use record::{decode_entry, encode_entry, encoded_len};
pub use table::{decode_table, encode_table};

/// Byte order of the leading entry count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CountByteOrder {
    #[default]
    Big,
    Little,
}

/// Knobs for [`decode_table`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Byte order of the entry count.
    pub byte_order: CountByteOrder,
    /// Ignore (with a warning) data left after the declared entries instead
    /// of failing with [`TrailingBytes`](crate::error::MailTableError::TrailingBytes).
    pub allow_trailing_bytes: bool,
}
