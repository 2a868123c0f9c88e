//! Word-aligned input cursor

use znn_primitives::U256;

use super::error::AbiError;
use super::writer::{padding_for, WORD_SIZE};

/// Cursor over encoded data.
///
/// Sub-readers are anchored at an absolute position so that offsets
/// found in a head section resolve against the start of the enclosing
/// argument list rather than the current read position.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    offset: usize,
    allow_loose: bool,
}

impl<'a> Reader<'a> {
    /// Strict reader over `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            allow_loose: false,
        }
    }

    /// Reader that tolerates a truncated final word on loose reads
    pub fn new_loose(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            allow_loose: true,
        }
    }

    /// Whether loose reads are permitted
    pub fn allow_loose(&self) -> bool {
        self.allow_loose
    }

    /// Bytes consumed so far
    pub fn consumed(&self) -> usize {
        self.offset
    }

    /// Bytes left after the cursor
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// New reader anchored `offset` bytes past the current cursor
    pub fn sub_reader(&self, offset: usize) -> Reader<'a> {
        let start = self.offset.saturating_add(offset);
        Reader {
            data: self.data.get(start..).unwrap_or(&[]),
            offset: 0,
            allow_loose: self.allow_loose,
        }
    }

    /// Read `length` bytes and advance to the next word boundary.
    ///
    /// With `loose` set on a loose reader, a final word shorter than the
    /// padding would require is accepted.
    pub fn read_bytes(&mut self, length: usize, loose: bool) -> Result<&'a [u8], AbiError> {
        let overrun = |needed: usize| AbiError::BufferOverrun {
            needed,
            available: self.data.len(),
        };

        let mut aligned = length.saturating_add(padding_for(length));
        let end = self.offset.saturating_add(aligned);
        if end > self.data.len() {
            let exact_end = self.offset.saturating_add(length);
            if self.allow_loose && loose && exact_end <= self.data.len() {
                aligned = length;
            } else {
                return Err(overrun(end));
            }
        }

        let data = self.data;
        let out = &data[self.offset..self.offset + length];
        self.offset += aligned;
        Ok(out)
    }

    /// Read one big-endian word
    pub fn read_value(&mut self) -> Result<U256, AbiError> {
        Ok(U256::from_big_endian(self.read_bytes(WORD_SIZE, false)?))
    }

    /// Read one word as an offset or length.
    ///
    /// Values that do not fit a `usize` saturate, so any read they drive
    /// reports a buffer overrun.
    pub fn read_usize(&mut self) -> Result<usize, AbiError> {
        let value = self.read_value()?;
        if value.bits() > 64 {
            return Ok(usize::MAX);
        }
        Ok(usize::try_from(value.low_u64()).unwrap_or(usize::MAX))
    }
}
