//! Line-oriented text form of a mail table.
//!
//! ```text
//! # Mail table
//!
//! {
//! 	AB # Message ID
//! 	[1, 2, 3] # Flags
//! 	f.txt # Filename
//! }
//! ```
//!
//! Anything after a `#` is a comment. Text outside `{ ... }` blocks is
//! ignored when parsing.

pub mod parse;
pub mod render;

pub use parse::parse_table;
pub use render::{ensure_representable, render_entry, render_table};

/// Comment line written at the top of every rendered table.
pub const HEADER: &str = "# Mail table";
