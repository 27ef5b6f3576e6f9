// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Bounds-checked sequential reader over an in-memory buffer.
//!
//! An annotation file is a flat big-endian stream of counts, lengths and
//! payloads. `ByteCursor` owns the read position and
//! checks the remaining length on every read, so a count that lies about the
//! data behind it becomes a `ShortRead` instead of a panic or a silent
//! partial read.
//!
//! The cursor never moves on failure: a short read leaves the position where
//! it was, which keeps byte offsets in diagnostics pointing at the field that
//! could not be read.

use std::fmt;

// ============================================================================
// SHORT READ
// ============================================================================

/// Fewer bytes remained than a read asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortRead {
    /// Byte offset where the failed read started.
    pub offset: usize,
    /// Bytes the read needed.
    pub requested: usize,
    /// Bytes that were left in the buffer.
    pub available: usize,
}

impl fmt::Display for ShortRead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "short read at byte {}: needed {} bytes, {} available",
            self.offset, self.requested, self.available
        )
    }
}

impl std::error::Error for ShortRead {}

// ============================================================================
// CURSOR
// ============================================================================

/// Sequential big-endian reader.
///
/// Invariant: `pos <= bytes.len()` at all times.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Current byte offset from the start of the buffer.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Consume exactly `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], ShortRead> {
        let available = self.remaining();
        if n > available {
            return Err(ShortRead {
                offset: self.pos,
                requested: n,
                available,
            });
        }
        let start = self.pos;
        self.pos += n;
        Ok(&self.bytes[start..self.pos])
    }

    /// Advance past `n` bytes without looking at them.
    pub fn skip(&mut self, n: usize) -> Result<(), ShortRead> {
        self.read_bytes(n).map(|_| ())
    }

    /// Consume exactly `N` bytes into a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ShortRead> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// Big-endian signed 32-bit integer.
    pub fn read_i32be(&mut self) -> Result<i32, ShortRead> {
        self.read_array::<4>().map(i32::from_be_bytes)
    }
}

// ============================================================================
// KANI PROOFS
// ============================================================================
//
// Run with: cargo kani
//
// Verified properties:
// 1. read_bytes never panics and never moves past the end of the buffer
// 2. a failed read leaves the position unchanged

#[cfg(kani)]
mod kani_proofs {
    use super::*;

    #[kani::proof]
    #[kani::unwind(10)]
    fn verify_read_bytes_stays_in_bounds() {
        let len: usize = kani::any_where(|&n| n <= 8);
        let bytes = [0u8; 8];
        let mut cursor = ByteCursor::new(&bytes[..len]);

        let first: usize = kani::any_where(|&n| n <= 10);
        let second: usize = kani::any_where(|&n| n <= 10);

        for n in [first, second] {
            let before = cursor.position();
            match cursor.read_bytes(n) {
                Ok(slice) => {
                    kani::assert(slice.len() == n, "read returns exactly n bytes");
                    kani::assert(cursor.position() == before + n, "position advances by n");
                }
                Err(e) => {
                    kani::assert(e.available < n, "short read only when n exceeds remaining");
                    kani::assert(cursor.position() == before, "failed read does not move");
                }
            }
            kani::assert(cursor.position() <= len, "position never passes the end");
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
