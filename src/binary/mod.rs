// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Big-endian binary primitives for the annotation decoder.
//!
//! # Security Considerations
//!
//! Annotation files are parsed as untrusted input:
//! - Every read is checked against the bytes actually remaining
//! - Counts read from the file never size an allocation on their own
//! - A short read is an error value, never a panic or a partial result
//!
//! # Layout conventions
//!
//! ```text
//! i32    4 bytes, big-endian, two's complement (counts, lengths, indices)
//! bytes  raw run of a length read just before it (names, filename)
//! ```

mod cursor;

pub use cursor::{ByteCursor, ShortRead};
