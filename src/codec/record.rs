//! Encoding and decoding of a single mail table record.

use tracing::{debug, warn};

use crate::codec::cursor::ByteCursor;
use crate::error::{MailTableError, Result};
use crate::model::mail::{MailEntry, FLAG_COUNT, MESSAGE_ID_LEN};

/// Size of the fixed part of a record: message id, flags, reserved byte.
pub const HEADER_LEN: usize = MESSAGE_ID_LEN + FLAG_COUNT + 1;

/// File names (with terminator) are padded to a multiple of this.
pub const ALIGNMENT: usize = 4;

/// Zero bytes needed after `len` bytes to reach the next alignment boundary.
pub fn padding_for(len: usize) -> usize {
    (ALIGNMENT - len % ALIGNMENT) % ALIGNMENT
}

/// Exact number of bytes [`encode_entry`] produces for `entry`.
pub fn encoded_len(entry: &MailEntry) -> usize {
    let name_len = entry.file_name.len() + 1;
    HEADER_LEN + name_len + padding_for(name_len)
}

/// Append the binary form of `entry` to `out`.
///
/// Nothing is written if the entry fails validation.
pub fn encode_entry(entry: &MailEntry, out: &mut Vec<u8>) -> Result<()> {
    entry.validate()?;

    let mut message_id = [0u8; MESSAGE_ID_LEN];
    message_id[..entry.message_id.len()].copy_from_slice(entry.message_id.as_bytes());

    out.reserve(encoded_len(entry));
    out.extend_from_slice(&message_id);
    out.extend_from_slice(&entry.flags);
    out.push(0);
    out.extend_from_slice(entry.file_name.as_bytes());
    out.push(0);
    let padding = padding_for(entry.file_name.len() + 1);
    out.resize(out.len() + padding, 0);
    Ok(())
}

/// Read one record starting at the cursor position.
pub fn decode_entry(cursor: &mut ByteCursor<'_>) -> Result<MailEntry> {
    let start = cursor.position();

    let raw_id: [u8; MESSAGE_ID_LEN] = cursor.read_array("message id")?;
    let flags: [u8; FLAG_COUNT] = cursor.read_array("flags")?;
    let reserved = cursor.read_u8("reserved byte")?;
    let name = cursor.read_until_nul("file name")?;
    let padding = cursor.take(padding_for(name.len() + 1), "alignment padding")?;

    if reserved != 0 || padding.iter().any(|&b| b != 0) {
        warn!(
            offset = start,
            reserved,
            "Non-zero reserved/padding bytes will be written back as zeros"
        );
    }

    let id_len = raw_id
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |last| last + 1);
    let message_id = decode_string(&raw_id[..id_len], "message id", start)?;
    if message_id.contains('\0') {
        return Err(MailTableError::invalid(
            "message id",
            format!("record at offset {start} has a NUL inside the id"),
        ));
    }
    let file_name = decode_string(name, "file name", start)?;

    debug!(
        offset = start,
        bytes = cursor.position() - start,
        message_id = %message_id,
        "Decoded record"
    );

    Ok(MailEntry {
        message_id,
        flags,
        file_name,
    })
}

fn decode_string(bytes: &[u8], field: &'static str, offset: usize) -> Result<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| {
        MailTableError::invalid(field, format!("record at offset {offset} is not UTF-8: {e}"))
    })
}
