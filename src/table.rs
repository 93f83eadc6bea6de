//! Parameter byte tables
//!
//! A parameter table is the platform- and algorithm-specific byte encoding of
//! timing intervals, repeat counts and voice parameters authored for the
//! original sound interpreters. Tables are supplied by the resource-loading
//! collaborator and are opaque to this crate beyond the bytes the active
//! algorithm reads.
//!
//! Tables are immutable and cheaply cloneable; the read cursor lives in the
//! algorithm state, never in the table itself.

use std::sync::Arc;

/// Immutable, cheaply cloneable parameter byte table
///
/// Cloning shares the underlying bytes. A table outlives any single
/// activation that reads it; the algorithms never mutate it.
#[derive(Debug, Clone)]
pub struct ParameterTable {
    bytes: Arc<[u8]>,
}

impl ParameterTable {
    /// Create a table from raw parameter bytes
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        ParameterTable {
            bytes: bytes.into(),
        }
    }

    /// Byte at `index`, or `None` past the end of the table
    #[inline]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.bytes.get(index).copied()
    }

    /// Byte at `index`
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds. The algorithms only index inside
    /// the region delimited by their terminating sentinel, so an
    /// out-of-bounds read means a malformed table.
    #[inline]
    pub fn byte(&self, index: usize) -> u8 {
        self.bytes[index]
    }

    /// Number of bytes in the table
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the table holds no bytes
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Raw view of the table bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for ParameterTable {
    fn from(bytes: Vec<u8>) -> Self {
        ParameterTable::new(bytes)
    }
}

impl From<&[u8]> for ParameterTable {
    fn from(bytes: &[u8]) -> Self {
        ParameterTable::new(bytes.to_vec())
    }
}
