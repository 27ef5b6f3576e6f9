// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-hemisphere mesh export, fanned out across geometries.
//!
//! Each (geometry, hemisphere) pair is independent: read one surface, read
//! the matching curvature, write one JSON file. With the `parallel` feature
//! the pairs run on rayon's pool and report into a shared progress bar.
//! Results come back in job order either way.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::surface::{read_curvature, read_surface};

use super::{GenerateConfig, Geometry, Hemisphere};

/// One file to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportJob {
    pub geometry: Geometry,
    pub hemisphere: Hemisphere,
}

impl ExportJob {
    /// `<hemi>_<geometry>.json`
    pub fn output_name(&self) -> String {
        format!("{}_{}.json", self.hemisphere.as_str(), self.geometry.as_str())
    }
}

/// A written mesh file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedMesh {
    pub job: ExportJob,
    pub path: PathBuf,
    pub vertex_count: usize,
    pub triangle_count: usize,
    pub bytes: usize,
}

/// JSON document consumed by the viewer.
#[derive(Serialize)]
struct MeshJson<'a> {
    vertices: &'a [[f32; 3]],
    triangles: &'a [[u32; 3]],
    curvature: &'a [f32],
}

/// Read, pair up and write one hemisphere's mesh.
pub fn export_mesh(config: &GenerateConfig, job: ExportJob) -> Result<ExportedMesh> {
    let surf_dir = config.surf_dir();
    let hemi = job.hemisphere.as_str();
    let surf_path = surf_dir.join(format!("{}.{}", hemi, job.geometry.file_stem()));
    let curv_path = surf_dir.join(format!("{}.curv", hemi));

    if !surf_path.exists() {
        bail!("surface file not found: {}", surf_path.display());
    }

    let surface = read_surface(&surf_path)
        .with_context(|| format!("failed to load surface {}", surf_path.display()))?;
    let curvature = read_curvature(&curv_path)
        .with_context(|| format!("failed to load curvature {}", curv_path.display()))?;

    if curvature.len() != surface.vertex_count() {
        bail!(
            "{} has {} curvature values but {} has {} vertices",
            curv_path.display(),
            curvature.len(),
            surf_path.display(),
            surface.vertex_count()
        );
    }

    if let Some((min, max)) = value_range(&curvature) {
        info!(hemi, geometry = job.geometry.as_str(), min, max, "curvature range");
    }

    let json = serde_json::to_vec(&MeshJson {
        vertices: &surface.vertices,
        triangles: &surface.triangles,
        curvature: &curvature,
    })?;

    let path = config.out_dir.join(job.output_name());
    fs::write(&path, &json).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), vertices = surface.vertex_count(), "exported mesh");

    Ok(ExportedMesh {
        job,
        path,
        vertex_count: surface.vertex_count(),
        triangle_count: surface.triangles.len(),
        bytes: json.len(),
    })
}

fn value_range(values: &[f32]) -> Option<(f32, f32)> {
    values.iter().copied().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Export every job, stopping at the first failure.
#[cfg(feature = "parallel")]
pub fn export_all(
    config: &GenerateConfig,
    jobs: &[ExportJob],
    progress: &ProgressBar,
) -> Result<Vec<ExportedMesh>> {
    jobs.par_iter()
        .map(|&job| {
            let mesh = export_mesh(config, job)?;
            progress.set_message(job.output_name());
            progress.inc(1);
            Ok(mesh)
        })
        .collect()
}

/// Export every job, stopping at the first failure.
#[cfg(not(feature = "parallel"))]
pub fn export_all(config: &GenerateConfig, jobs: &[ExportJob]) -> Result<Vec<ExportedMesh>> {
    jobs.iter().map(|&job| export_mesh(config, job)).collect()
}
