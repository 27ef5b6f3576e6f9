// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fixed-shape fields that precede the color-table records.
//!
//! Layout up to the first record (big-endian throughout):
//!
//! ```text
//! vertex_count      i32
//! vertex table      [vertex_index i32, label_value i32] × vertex_count   (skipped)
//! has_color_table   i32   (anything but 1 ends the file for our purposes)
//! marker            i32   (< 0 → V2, otherwise V1)
//! max_struct_index  i32   (V2 only)
//! filename_length   i32
//! filename          [u8; filename_length]
//! entry_count       i32   (authoritative record count for both versions)
//! ```
//!
//! Every failure here is fatal. If we cannot get past these fields we do not
//! know where the records start.

use std::fmt;

use crate::binary::{ByteCursor, ShortRead};

use super::colortable::decode_name;
use super::AnnotError;

/// Bytes per vertex-label record: vertex index + packed annotation value.
pub const VERTEX_RECORD_SIZE: usize = 8;

/// Presence flag value announcing an embedded color table.
pub const COLOR_TABLE_PRESENT: i32 = 1;

/// The field being read when a fatal error happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStage {
    VertexCount,
    VertexTable,
    ColorTableFlag,
    VersionMarker,
    MaxStructureIndex,
    FilenameLength,
    Filename,
    EntryCount,
}

impl HeaderStage {
    pub fn as_str(self) -> &'static str {
        match self {
            HeaderStage::VertexCount => "vertex count",
            HeaderStage::VertexTable => "vertex label table",
            HeaderStage::ColorTableFlag => "color table flag",
            HeaderStage::VersionMarker => "color table version marker",
            HeaderStage::MaxStructureIndex => "max structure index",
            HeaderStage::FilenameLength => "embedded filename length",
            HeaderStage::Filename => "embedded filename",
            HeaderStage::EntryCount => "color table entry count",
        }
    }
}

impl fmt::Display for HeaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two historical color-table encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTableVersion {
    /// Marker is a non-negative entry count.
    V1,
    /// Marker is negative and followed by the max structure index.
    V2,
}

/// Filename block plus the entry count that trails it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FilenameBlock {
    pub source_filename: String,
    pub entry_count: i32,
}

/// Tag a short read with the stage it happened in.
fn at<T>(stage: HeaderStage, result: Result<T, ShortRead>) -> Result<T, AnnotError> {
    result.map_err(|source| AnnotError::Truncated { stage, source })
}

/// Read an `i32` that sizes a later read. Negative values are fatal.
fn read_length(cursor: &mut ByteCursor<'_>, stage: HeaderStage) -> Result<usize, AnnotError> {
    let offset = cursor.position();
    let value = at(stage, cursor.read_i32be())?;
    usize::try_from(value).map_err(|_| AnnotError::NegativeLength {
        stage,
        value,
        offset,
    })
}

/// Read the vertex count and step over the per-vertex label table.
pub(crate) fn read_vertex_table(cursor: &mut ByteCursor<'_>) -> Result<u32, AnnotError> {
    let count = read_length(cursor, HeaderStage::VertexCount)?;
    at(
        HeaderStage::VertexTable,
        cursor.skip(count.saturating_mul(VERTEX_RECORD_SIZE)),
    )?;
    // Came from a non-negative i32
    Ok(count as u32)
}

/// `true` only when the flag is exactly [`COLOR_TABLE_PRESENT`].
pub(crate) fn read_presence_flag(cursor: &mut ByteCursor<'_>) -> Result<bool, AnnotError> {
    let flag = at(HeaderStage::ColorTableFlag, cursor.read_i32be())?;
    Ok(flag == COLOR_TABLE_PRESENT)
}

/// Classify the table from its marker. V2 carries one extra field, kept for
/// inspection but never used to bound the record loop.
pub(crate) fn read_version(
    cursor: &mut ByteCursor<'_>,
) -> Result<(ColorTableVersion, Option<i32>), AnnotError> {
    let marker = at(HeaderStage::VersionMarker, cursor.read_i32be())?;
    if marker < 0 {
        let max_structure_index = at(HeaderStage::MaxStructureIndex, cursor.read_i32be())?;
        Ok((ColorTableVersion::V2, Some(max_structure_index)))
    } else {
        Ok((ColorTableVersion::V1, None))
    }
}

/// Read the length-prefixed source filename and the entry count after it.
pub(crate) fn read_filename_block(
    cursor: &mut ByteCursor<'_>,
) -> Result<FilenameBlock, AnnotError> {
    let len = read_length(cursor, HeaderStage::FilenameLength)?;
    let raw = at(HeaderStage::Filename, cursor.read_bytes(len))?;
    let entry_count = at(HeaderStage::EntryCount, cursor.read_i32be())?;
    Ok(FilenameBlock {
        source_filename: decode_name(raw),
        entry_count,
    })
}
