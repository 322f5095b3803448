//! Bounds-checked reader over an in-memory byte slice.

use crate::error::{MailTableError, Result};

/// Reads fields sequentially from a byte slice, tracking the position.
///
/// Every read names the field it is reading so that a short buffer turns
/// into a [`MailTableError::TruncatedInput`] pointing at the right place.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset from the start of the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Consume exactly `len` bytes.
    pub fn take(&mut self, len: usize, field: &'static str) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(MailTableError::TruncatedInput {
                field,
                offset: self.pos,
            });
        }
        let data = self.data;
        let bytes = &data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        Ok(self.take(1, field)?[0])
    }

    /// Consume a fixed-size array.
    pub fn read_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N, field)?);
        Ok(buf)
    }

    /// Consume bytes up to and including the next NUL; the NUL is not returned.
    pub fn read_until_nul(&mut self, field: &'static str) -> Result<&'a [u8]> {
        let data = self.data;
        let rest = &data[self.pos..];
        let Some(len) = rest.iter().position(|&b| b == 0) else {
            return Err(MailTableError::TruncatedInput {
                field,
                offset: self.pos,
            });
        };
        self.pos += len + 1;
        Ok(&rest[..len])
    }
}
