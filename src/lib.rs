// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! FreeSurfer surfaces and annotations for a browser brain-atlas viewer.
//!
//! The centerpiece is a standalone decoder for FreeSurfer annotation
//! (`.annot`) files that recovers the structure names from the embedded color
//! table, tolerating a truncated or corrupt tail. Around it sits an exporter
//! that reads a subject's surfaces and curvature through `neuroformats` and
//! turns them into the JSON the viewer loads.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────────┐
//! │  binary         │────▶│  annot               │  header → version →
//! │  (ByteCursor,   │     │  (decode_annot,      │  filename block →
//! │   ShortRead)    │     │   read_annot)        │  entry loop
//! └─────────────────┘     └──────────────────────┘
//!
//! ┌─────────────────┐     ┌──────────────────────┐
//! │  surface        │────▶│  generate            │  (geometry × hemisphere)
//! │  (read_surface, │     │  (run_generate,      │  → <hemi>_<geometry>.json
//! │   read_curvature│     │   GenerateConfig)    │
//! └─────────────────┘     └──────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use fsatlas::read_annot;
//!
//! let decoded = read_annot("lh.aparc.a2009s.annot")?;
//! for name in decoded.names() {
//!     println!("{}", name);
//! }
//! if let Some(diagnostic) = &decoded.diagnostic {
//!     eprintln!("{}", diagnostic);
//! }
//! ```

pub mod annot;
pub mod binary;
pub mod generate;
pub mod surface;
pub mod testing;

pub use annot::{
    decode_annot, decode_entry, read_annot, AnnotDecode, AnnotError, ColorTable, ColorTableEntry,
    ColorTableVersion, EntryDiagnostic, EntryFault, EntryField, HeaderStage, Rgba,
};
pub use binary::{ByteCursor, ShortRead};
pub use generate::{
    plan_jobs, run_generate, ExportJob, ExportedMesh, GenerateConfig, Geometry, Hemisphere,
};
pub use surface::{read_curvature, read_surface, Surface, SurfaceError};
