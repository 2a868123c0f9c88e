//! Word-aligned output buffer

use bytes::{BufMut, Bytes, BytesMut};
use znn_primitives::U256;

/// Size of a codec word in bytes
pub const WORD_SIZE: usize = 32;

/// Reserved word in a [`Writer`], patched later with [`Writer::update_value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot(usize);

/// Append-only buffer of 32-byte words
#[derive(Debug, Clone, Default)]
pub struct Writer {
    data: BytesMut,
}

impl Writer {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// View the written bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Finish writing
    pub fn into_bytes(self) -> Bytes {
        self.data.freeze()
    }

    /// Write raw bytes, right-padded with zeros to a word boundary
    pub fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        let padding = padding_for(bytes.len());
        self.data.reserve(bytes.len() + padding);
        self.data.put_slice(bytes);
        self.data.put_bytes(0, padding);
        bytes.len() + padding
    }

    /// Write a big-endian word
    pub fn write_value(&mut self, value: U256) -> usize {
        self.write_bytes(&word(value))
    }

    /// Reserve a zero word to be filled in once its value is known
    pub fn write_updatable_value(&mut self) -> Slot {
        let slot = Slot(self.data.len());
        self.data.put_bytes(0, WORD_SIZE);
        slot
    }

    /// Patch a word reserved by [`Writer::write_updatable_value`]
    pub fn update_value(&mut self, slot: Slot, value: U256) {
        let start = slot.0;
        self.data[start..start + WORD_SIZE].copy_from_slice(&word(value));
    }

    /// Append another writer's contents, returning the number of bytes written
    pub fn append_writer(&mut self, other: &Writer) -> usize {
        self.data.extend_from_slice(&other.data);
        other.len()
    }
}

/// Zero bytes needed to bring `len` up to a word boundary
pub(crate) fn padding_for(len: usize) -> usize {
    (WORD_SIZE - len % WORD_SIZE) % WORD_SIZE
}

fn word(value: U256) -> [u8; WORD_SIZE] {
    let mut out = [0u8; WORD_SIZE];
    value.to_big_endian(&mut out);
    out
}
