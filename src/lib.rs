//! `mailtable` — lossless conversion between binary mail table files and
//! a line-oriented text form.
//!
//! The binary codec lives in [`codec`], the text form in [`text`], and
//! file-level operations with atomic writes in [`convert`].

pub mod codec;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod text;
