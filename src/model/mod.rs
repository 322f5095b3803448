//! Core data model types for mail tables.

pub mod mail;

pub use mail::{MailEntry, MailTable};
