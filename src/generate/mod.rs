// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Export subject surfaces as viewer-ready JSON.
//!
//! For every selected geometry and both hemispheres this reads
//! `<subjects_dir>/<subject>/surf/<hemi>.<stem>` plus `<hemi>.curv` and
//! writes `<out_dir>/<hemi>_<geometry>.json`.

pub mod config;
pub mod parallel;

use std::fs;

use anyhow::{Context, Result};
use clap::ValueEnum;
#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};

pub use config::GenerateConfig;
pub use parallel::{export_all, export_mesh, ExportJob, ExportedMesh};

/// Surface geometry variants shipped with a FreeSurfer subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Geometry {
    /// Inflated surface (default, easiest to look at)
    Inflated,
    /// Original reconstructed surface
    Original,
    /// Pial (outer cortical) surface
    Pial,
    /// White matter surface
    White,
}

impl Geometry {
    pub const ALL: [Geometry; 4] = [
        Geometry::Inflated,
        Geometry::Original,
        Geometry::Pial,
        Geometry::White,
    ];

    /// Name used in output filenames.
    pub fn as_str(self) -> &'static str {
        match self {
            Geometry::Inflated => "inflated",
            Geometry::Original => "original",
            Geometry::Pial => "pial",
            Geometry::White => "white",
        }
    }

    /// Suffix of the FreeSurfer surface file.
    pub fn file_stem(self) -> &'static str {
        match self {
            Geometry::Original => "orig",
            other => other.as_str(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    Left,
    Right,
}

impl Hemisphere {
    pub const BOTH: [Hemisphere; 2] = [Hemisphere::Left, Hemisphere::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Hemisphere::Left => "lh",
            Hemisphere::Right => "rh",
        }
    }
}

/// Jobs in (geometry, hemisphere) order.
pub fn plan_jobs(geometries: &[Geometry]) -> Vec<ExportJob> {
    geometries
        .iter()
        .flat_map(|&geometry| {
            Hemisphere::BOTH
                .into_iter()
                .map(move |hemisphere| ExportJob {
                    geometry,
                    hemisphere,
                })
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("━━╸")
}

/// Export the selected geometries for both hemispheres.
pub fn run_generate(config: &GenerateConfig, geometries: &[Geometry]) -> Result<Vec<ExportedMesh>> {
    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("failed to create output dir {}", config.out_dir.display()))?;

    let jobs = plan_jobs(geometries);

    #[cfg(feature = "parallel")]
    let meshes = {
        let progress = ProgressBar::new(jobs.len() as u64);
        progress.set_style(create_progress_style());
        progress.set_prefix("Exporting");
        let meshes = export_all(config, &jobs, &progress);
        match &meshes {
            Ok(done) => progress.finish_with_message(format!("exported {} meshes", done.len())),
            Err(_) => progress.abandon(),
        }
        meshes?
    };

    #[cfg(not(feature = "parallel"))]
    let meshes = export_all(config, &jobs)?;

    Ok(meshes)
}
