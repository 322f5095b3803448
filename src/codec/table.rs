//! Binary framing of a whole mail table: entry count plus records.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use tracing::{debug, warn};

use crate::codec::cursor::ByteCursor;
use crate::codec::record::{decode_entry, encode_entry, encoded_len};
use crate::codec::{CountByteOrder, DecodeOptions};
use crate::error::{MailTableError, Result};
use crate::model::mail::MailTable;

/// Size of the entry count header.
pub const COUNT_LEN: usize = 4;

/// Encode `table` into its binary form.
pub fn encode_table(table: &MailTable, order: CountByteOrder) -> Result<Vec<u8>> {
    let count = u32::try_from(table.entry_count()).map_err(|_| {
        MailTableError::invalid(
            "entry count",
            format!("{} entries do not fit a 32-bit count", table.entry_count()),
        )
    })?;

    let body_len: usize = table.iter().map(encoded_len).sum();
    let mut out = Vec::with_capacity(COUNT_LEN + body_len);

    let mut header = [0u8; COUNT_LEN];
    match order {
        CountByteOrder::Big => BigEndian::write_u32(&mut header, count),
        CountByteOrder::Little => LittleEndian::write_u32(&mut header, count),
    }
    out.extend_from_slice(&header);

    for entry in table {
        encode_entry(entry, &mut out)?;
    }

    debug!(count, bytes = out.len(), "Encoded table");
    Ok(out)
}

/// Decode a binary mail table.
///
/// The declared count is checked against the data: running out of records
/// early is a [`MailTableError::CountMismatch`], data left over afterwards is
/// a [`MailTableError::TrailingBytes`] unless `options` allow it.
pub fn decode_table(data: &[u8], options: &DecodeOptions) -> Result<MailTable> {
    let mut cursor = ByteCursor::new(data);

    let header = cursor.take(COUNT_LEN, "entry count")?;
    let declared = match options.byte_order {
        CountByteOrder::Big => BigEndian::read_u32(header),
        CountByteOrder::Little => LittleEndian::read_u32(header),
    };
    debug!(declared, bytes = data.len(), "Decoding table");

    // Each record takes at least 16 bytes, so don't trust `declared` for the allocation.
    let mut entries = Vec::with_capacity((declared as usize).min(cursor.remaining() / 16));
    for found in 0..declared {
        if cursor.is_empty() {
            return Err(MailTableError::CountMismatch { declared, found });
        }
        entries.push(decode_entry(&mut cursor)?);
    }

    let remaining = cursor.remaining();
    if remaining > 0 {
        if !options.allow_trailing_bytes {
            return Err(MailTableError::TrailingBytes {
                declared,
                remaining,
            });
        }
        warn!(
            declared,
            remaining, "Ignoring trailing bytes after the declared entries"
        );
    }

    Ok(MailTable::new(entries))
}
