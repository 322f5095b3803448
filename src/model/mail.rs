//! Mail table entry and table types.

use crate::error::{MailTableError, Result};

/// Width in bytes of the fixed message id field.
pub const MESSAGE_ID_LEN: usize = 8;

/// Number of flag bytes carried by every entry.
pub const FLAG_COUNT: usize = 3;

/// One record of a mail table.
///
/// Fields are public so tables can be built literally; call
/// [`MailEntry::validate`] (the codecs do) before trusting a hand-built value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MailEntry {
    /// Message identifier, at most [`MESSAGE_ID_LEN`] bytes, no NUL.
    pub message_id: String,

    /// Raw flag bytes, in file order.
    pub flags: [u8; FLAG_COUNT],

    /// Attached file name, no NUL.
    pub file_name: String,
}

impl MailEntry {
    /// Build a validated entry.
    pub fn new(
        message_id: impl Into<String>,
        flags: [u8; FLAG_COUNT],
        file_name: impl Into<String>,
    ) -> Result<Self> {
        let entry = Self {
            message_id: message_id.into(),
            flags,
            file_name: file_name.into(),
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Check that the entry can be encoded without loss.
    pub fn validate(&self) -> Result<()> {
        validate_message_id(&self.message_id)?;
        if self.file_name.as_bytes().contains(&0) {
            return Err(MailTableError::invalid(
                "file name",
                format!("{:?} contains a NUL byte", self.file_name),
            ));
        }
        Ok(())
    }
}

/// Reject message ids that do not fit the fixed 8-byte field.
pub fn validate_message_id(message_id: &str) -> Result<()> {
    let len = message_id.len();
    if len > MESSAGE_ID_LEN {
        return Err(MailTableError::invalid(
            "message id",
            format!("{message_id:?} is {len} bytes, at most {MESSAGE_ID_LEN} fit"),
        ));
    }
    if message_id.as_bytes().contains(&0) {
        return Err(MailTableError::invalid(
            "message id",
            format!("{message_id:?} contains a NUL byte"),
        ));
    }
    Ok(())
}

/// An ordered collection of [`MailEntry`] records.
///
/// The binary entry count is always derived from `entries`, so the two
/// can never disagree once a table is in memory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MailTable {
    pub entries: Vec<MailEntry>,
}

impl MailTable {
    pub fn new(entries: Vec<MailEntry>) -> Self {
        Self { entries }
    }

    /// Number of entries, as written in the binary count field.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MailEntry> {
        self.entries.iter()
    }
}

impl From<Vec<MailEntry>> for MailTable {
    fn from(entries: Vec<MailEntry>) -> Self {
        Self::new(entries)
    }
}

impl<'a> IntoIterator for &'a MailTable {
    type Item = &'a MailEntry;
    type IntoIter = std::slice::Iter<'a, MailEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_eight_byte_id() {
        let entry = MailEntry::new("ABCDEFGH", [0, 1, 255], "mail.bin").unwrap();
        assert_eq!(entry.message_id, "ABCDEFGH");
        assert_eq!(entry.flags, [0, 1, 255]);
    }

    #[test]
    fn test_new_rejects_long_id() {
        let err = MailEntry::new("ABCDEFGHI", [0; 3], "x").unwrap_err();
        assert!(matches!(
            err,
            MailTableError::InvalidEntry {
                field: "message id",
                ..
            }
        ));
    }

    #[test]
    fn test_multibyte_id_counts_bytes() {
        // 4 chars, 8 bytes
        assert!(validate_message_id("éééé").is_ok());
        assert!(validate_message_id("ééééé").is_err());
    }

    #[test]
    fn test_nul_rejected() {
        assert!(MailEntry::new("A\0", [0; 3], "x").is_err());
        assert!(MailEntry::new("A", [0; 3], "x\0y").is_err());
    }

    #[test]
    fn test_entry_count_follows_entries() {
        let mut table = MailTable::default();
        assert!(table.is_empty());
        table.entries.push(MailEntry::default());
        table.entries.push(MailEntry::default());
        assert_eq!(table.entry_count(), 2);
        assert_eq!(table.iter().count(), 2);
    }
}
