// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! FreeSurfer annotation (`.annot`) decoder.
//!
//! An annotation file assigns a parcellation label to every vertex of a
//! cortical surface and embeds a color table naming each structure. We only
//! want the names. The per-vertex table is stepped over, never interpreted.
//!
//! # Outcomes
//!
//! | Situation                         | Result                                   |
//! |-----------------------------------|------------------------------------------|
//! | Header fields unreadable          | `Err(AnnotError)`                        |
//! | Presence flag is not 1            | `Ok`, `color_table: None`                |
//! | Color table with zero entries     | `Ok`, `color_table: Some(..)`, no names  |
//! | Record `i` truncated or corrupt   | `Ok`, names `0..i`, `diagnostic: Some`   |
//! | Everything decodes                | `Ok`, all names in file order            |
//!
//! Decoding is a single forward pass over a buffer, bounded by the buffer
//! length no matter what the counts inside it claim.

pub mod colortable;
pub mod header;

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::binary::{ByteCursor, ShortRead};

pub use colortable::{
    decode_entry, ColorTableEntry, EntryDiagnostic, EntryFault, EntryField, Rgba,
};
pub use header::{ColorTableVersion, HeaderStage};

// ============================================================================
// ERRORS
// ============================================================================

/// Fatal decode failure: the file shape could not be established.
#[derive(Debug)]
pub enum AnnotError {
    /// A header field ran past the end of the buffer.
    Truncated {
        stage: HeaderStage,
        source: ShortRead,
    },
    /// A count or length field that sizes a later read was negative.
    NegativeLength {
        stage: HeaderStage,
        value: i32,
        offset: usize,
    },
    /// The file could not be read at all.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for AnnotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotError::Truncated { stage, .. } => {
                write!(f, "truncated annotation: {} unreadable", stage)
            }
            AnnotError::NegativeLength {
                stage,
                value,
                offset,
            } => write!(
                f,
                "corrupt annotation: {} is {} at byte {}",
                stage, value, offset
            ),
            AnnotError::Io { path, .. } => write!(f, "failed to read {}", path.display()),
        }
    }
}

impl std::error::Error for AnnotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnnotError::Truncated { source, .. } => Some(source),
            AnnotError::NegativeLength { .. } => None,
            AnnotError::Io { source, .. } => Some(source),
        }
    }
}

// ============================================================================
// DECODED FORM
// ============================================================================

/// Embedded lookup table of structure names and colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    pub version: ColorTableVersion,
    /// Present for V2 tables only. Informational.
    pub max_structure_index: Option<i32>,
    /// Lookup-table file the annotation was built from. Informational.
    pub source_filename: String,
    /// Record count as written in the file.
    pub declared_entries: i32,
    /// Successfully decoded records, in file order.
    pub entries: Vec<ColorTableEntry>,
}

/// Everything the decoder recovered from one annotation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotDecode {
    pub vertex_count: u32,
    /// `None` when the file carries no color table.
    pub color_table: Option<ColorTable>,
    /// Set when the record loop halted early.
    pub diagnostic: Option<EntryDiagnostic>,
}

impl AnnotDecode {
    /// Structure names in file order.
    pub fn names(&self) -> Vec<&str> {
        self.entries().iter().map(|e| e.name.as_str()).collect()
    }

    pub fn into_names(self) -> Vec<String> {
        self.color_table
            .map(|table| table.entries.into_iter().map(|e| e.name).collect())
            .unwrap_or_default()
    }

    pub fn entries(&self) -> &[ColorTableEntry] {
        match &self.color_table {
            Some(table) => &table.entries,
            None => &[],
        }
    }

    pub fn has_color_table(&self) -> bool {
        self.color_table.is_some()
    }

    /// No record was dropped.
    pub fn is_complete(&self) -> bool {
        self.diagnostic.is_none()
    }

    /// Records declared but never decoded: the failing one plus any after it.
    pub fn skipped_entries(&self) -> usize {
        let declared = self
            .color_table
            .as_ref()
            .map_or(0, |table| usize::try_from(table.declared_entries).unwrap_or(0));
        declared.saturating_sub(self.entries().len())
    }
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Decode an annotation held in memory.
///
/// Only header-level problems are errors. Record-level problems end the
/// record loop and come back as `AnnotDecode::diagnostic` alongside the
/// names decoded before them.
pub fn decode_annot(bytes: &[u8]) -> Result<AnnotDecode, AnnotError> {
    let mut cursor = ByteCursor::new(bytes);

    let vertex_count = header::read_vertex_table(&mut cursor)?;
    debug!(vertex_count, "skipped vertex label table");

    if !header::read_presence_flag(&mut cursor)? {
        debug!(vertex_count, "annotation has no color table");
        return Ok(AnnotDecode {
            vertex_count,
            color_table: None,
            diagnostic: None,
        });
    }

    let (version, max_structure_index) = header::read_version(&mut cursor)?;
    let header::FilenameBlock {
        source_filename,
        entry_count,
    } = header::read_filename_block(&mut cursor)?;
    debug!(
        ?version,
        ?max_structure_index,
        entry_count,
        source = %source_filename,
        "color table header"
    );

    if entry_count < 0 {
        warn!(entry_count, "negative color table entry count, decoding no entries");
    } else if entry_count == 0 {
        debug!("color table declares zero entries");
    }

    let (entries, diagnostic) = colortable::decode_entries(&mut cursor, entry_count);
    if let Some(d) = &diagnostic {
        warn!(
            index = d.index,
            offset = d.offset,
            decoded = entries.len(),
            reason = %d.fault,
            "color table entry loop halted"
        );
    } else if !cursor.is_exhausted() {
        debug!(trailing = cursor.remaining(), "bytes left after color table");
    }

    Ok(AnnotDecode {
        vertex_count,
        color_table: Some(ColorTable {
            version,
            max_structure_index,
            source_filename,
            declared_entries: entry_count,
            entries,
        }),
        diagnostic,
    })
}

/// Read an annotation file and decode it.
///
/// The file is read whole; the handle is closed before decoding starts.
pub fn read_annot<P: AsRef<Path>>(path: P) -> Result<AnnotDecode, AnnotError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| AnnotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), len = bytes.len(), "read annotation");
    decode_annot(&bytes)
}
