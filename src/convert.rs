//! File-level conversion between the binary and text forms.
//!
//! Inputs are read fully into memory; outputs are written to a temporary
//! file next to the destination and renamed into place only once complete,
//! so a failed conversion never leaves a partial file behind.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::codec::{decode_table, encode_table, CountByteOrder, DecodeOptions};
use crate::error::{MailTableError, Result};
use crate::model::mail::MailTable;
use crate::text::{ensure_representable, parse_table, render_table};

/// Direction of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionMode {
    /// Binary input, text output.
    BinToText,
    /// Text input, binary output.
    TextToBin,
}

/// Outcome of a successful [`convert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub mode: ConversionMode,
    pub entries: usize,
    pub bytes_written: u64,
}

/// Read a binary mail table file.
pub fn from_bin(path: &Path, options: &DecodeOptions) -> Result<MailTable> {
    let data = std::fs::read(path).map_err(|e| MailTableError::io(path, e))?;
    let table = decode_table(&data, options)?;
    debug!(path = %path.display(), entries = table.entry_count(), "Read binary table");
    Ok(table)
}

/// Read a text mail table file.
pub fn from_text(path: &Path) -> Result<MailTable> {
    let text = std::fs::read_to_string(path).map_err(|e| MailTableError::io(path, e))?;
    let table = parse_table(&text)?;
    debug!(path = %path.display(), entries = table.entry_count(), "Read text table");
    Ok(table)
}

/// Write `table` in binary form. Returns the number of bytes written.
pub fn write_to_bin(table: &MailTable, path: &Path, order: CountByteOrder) -> Result<u64> {
    let bytes = encode_table(table, order)?;
    write_atomic(path, &bytes)?;
    Ok(bytes.len() as u64)
}

/// Write `table` in text form. Returns the number of bytes written.
///
/// Fails without writing if a value would not read back unchanged.
pub fn write_to_text(table: &MailTable, path: &Path) -> Result<u64> {
    ensure_representable(table)?;
    let text = render_table(table);
    write_atomic(path, text.as_bytes())?;
    Ok(text.len() as u64)
}

/// Convert `input` into `output` in the given direction.
pub fn convert(
    input: &Path,
    output: &Path,
    mode: ConversionMode,
    options: &DecodeOptions,
) -> Result<ConversionSummary> {
    info!(
        input = %input.display(),
        output = %output.display(),
        ?mode,
        "Converting"
    );

    let (entries, bytes_written) = match mode {
        ConversionMode::BinToText => {
            let table = from_bin(input, options)?;
            (table.entry_count(), write_to_text(&table, output)?)
        }
        ConversionMode::TextToBin => {
            let table = from_text(input)?;
            (
                table.entry_count(),
                write_to_bin(&table, output, options.byte_order)?,
            )
        }
    };

    info!(entries, bytes = bytes_written, "Conversion complete");
    Ok(ConversionSummary {
        mode,
        entries,
        bytes_written,
    })
}

/// Write `bytes` to `path` through a temporary file in the same directory.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| MailTableError::io(dir, e))?;
    tmp.write_all(bytes)
        .map_err(|e| MailTableError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| MailTableError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| MailTableError::io(path, e.error))?;

    debug!(path = %path.display(), bytes = bytes.len(), "Output written");
    Ok(())
}
