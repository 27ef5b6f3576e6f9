// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Color-table records and the loop that decodes them.
//!
//! Each record is `structure_index i32, name_length i32, name [u8],
//! r g b a i32`. The loop runs until the declared count or the first record
//! that cannot be decoded, whichever comes first. Records before the bad one
//! are kept as-is; the bad one becomes an [`EntryDiagnostic`] and nothing
//! after it is attempted. A truncated tail still yields every complete name.

use std::fmt;

use crate::binary::{ByteCursor, ShortRead};

/// RGBA block: four big-endian `i32` channels.
pub const RGBA_SIZE: usize = 16;

/// Smallest possible record: index + name length + empty name + RGBA.
pub const MIN_ENTRY_SIZE: usize = 4 + 4 + RGBA_SIZE;

/// Display color of a structure. Read to keep the layout in step; the name
/// listing never looks at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: i32,
    pub g: i32,
    pub b: i32,
    pub a: i32,
}

impl Rgba {
    fn from_be_bytes(raw: [u8; RGBA_SIZE]) -> Self {
        let channel = |i: usize| i32::from_be_bytes([raw[i], raw[i + 1], raw[i + 2], raw[i + 3]]);
        Self {
            r: channel(0),
            g: channel(4),
            b: channel(8),
            a: channel(12),
        }
    }
}

/// One named structure in the color table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTableEntry {
    pub structure_index: i32,
    pub name: String,
    pub color: Rgba,
}

/// Record field being read when an entry fault happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    StructureIndex,
    NameLength,
    Name,
    Color,
}

impl EntryField {
    pub fn as_str(self) -> &'static str {
        match self {
            EntryField::StructureIndex => "structure index",
            EntryField::NameLength => "name length",
            EntryField::Name => "name",
            EntryField::Color => "RGBA color",
        }
    }
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single record could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryFault {
    Truncated { field: EntryField, source: ShortRead },
    NegativeNameLength { value: i32 },
}

impl fmt::Display for EntryFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryFault::Truncated { field, source } => {
                write!(f, "{} truncated ({})", field, source)
            }
            EntryFault::NegativeNameLength { value } => {
                write!(f, "negative name length {}", value)
            }
        }
    }
}

impl std::error::Error for EntryFault {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EntryFault::Truncated { source, .. } => Some(source),
            EntryFault::NegativeNameLength { .. } => None,
        }
    }
}

/// Where and why the record loop stopped early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDiagnostic {
    /// Zero-based record index that failed.
    pub index: usize,
    /// Byte offset where that record starts.
    pub offset: usize,
    pub fault: EntryFault,
}

impl fmt::Display for EntryDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entry {} at byte {} skipped: {}",
            self.index, self.offset, self.fault
        )
    }
}

/// Lossy UTF-8 with trailing NUL padding removed.
pub(crate) fn decode_name(raw: &[u8]) -> String {
    let name = String::from_utf8_lossy(raw);
    name.trim_end_matches('\0').to_string()
}

fn field<T>(field: EntryField, result: Result<T, ShortRead>) -> Result<T, EntryFault> {
    result.map_err(|source| EntryFault::Truncated { field, source })
}

/// Decode one record at the cursor.
///
/// On `Err` the cursor may have advanced part-way into the record; callers
/// stop reading records at that point.
pub fn decode_entry(cursor: &mut ByteCursor<'_>) -> Result<ColorTableEntry, EntryFault> {
    let structure_index = field(EntryField::StructureIndex, cursor.read_i32be())?;
    let name_length = field(EntryField::NameLength, cursor.read_i32be())?;
    let name_length = usize::try_from(name_length)
        .map_err(|_| EntryFault::NegativeNameLength { value: name_length })?;
    let name = decode_name(field(EntryField::Name, cursor.read_bytes(name_length))?);
    let color = Rgba::from_be_bytes(field(EntryField::Color, cursor.read_array::<RGBA_SIZE>())?);

    Ok(ColorTableEntry {
        structure_index,
        name,
        color,
    })
}

/// Decode up to `entry_count` records, halting at the first fault.
///
/// A negative count decodes nothing.
pub(crate) fn decode_entries(
    cursor: &mut ByteCursor<'_>,
    entry_count: i32,
) -> (Vec<ColorTableEntry>, Option<EntryDiagnostic>) {
    let declared = usize::try_from(entry_count).unwrap_or(0);
    // Never trust the declared count for allocation
    let mut entries = Vec::with_capacity(declared.min(cursor.remaining() / MIN_ENTRY_SIZE));

    for index in 0..declared {
        let offset = cursor.position();
        match decode_entry(cursor) {
            Ok(entry) => entries.push(entry),
            Err(fault) => {
                return (
                    entries,
                    Some(EntryDiagnostic {
                        index,
                        offset,
                        fault,
                    }),
                );
            }
        }
    }

    (entries, None)
}
