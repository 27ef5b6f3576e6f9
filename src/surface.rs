// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! FreeSurfer triangle surfaces and curvature files.
//!
//! Parsing is left to `neuroformats`. This module reshapes its flat
//! buffers into per-vertex and per-triangle arrays and checks that every
//! triangle references a vertex that exists, so the exporter never writes a
//! mesh the viewer cannot draw.
//!
//! ```text
//! neuroformats BrainMesh      Surface
//! vertices [x0 y0 z0 x1 ..] → vertices  [[x, y, z], ..]
//! faces    [a0 b0 c0 a1 ..] → triangles [[a, b, c], ..]   (0 <= i < vertex_count)
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// `neuroformats` could not read the file.
    Read {
        path: PathBuf,
        what: &'static str,
        reason: String,
    },
    /// A flat buffer is not a whole number of 3-tuples.
    Ragged { what: &'static str, len: usize },
    /// A triangle references a vertex that does not exist.
    FaceIndexOutOfRange {
        face: usize,
        index: i32,
        vertex_count: usize,
    },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::Read { path, what, reason } => {
                write!(f, "failed to read {} {}: {}", what, path.display(), reason)
            }
            SurfaceError::Ragged { what, len } => {
                write!(f, "{} buffer of length {} is not a multiple of 3", what, len)
            }
            SurfaceError::FaceIndexOutOfRange {
                face,
                index,
                vertex_count,
            } => write!(
                f,
                "face {} references vertex {} (surface has {})",
                face, index, vertex_count
            ),
        }
    }
}

impl std::error::Error for SurfaceError {}

fn read_error<E: fmt::Display>(path: &Path, what: &'static str) -> impl FnOnce(E) -> SurfaceError {
    let path = path.to_path_buf();
    move |e| SurfaceError::Read {
        path,
        what,
        reason: e.to_string(),
    }
}

// ============================================================================
// SURFACE
// ============================================================================

/// Triangulated surface mesh.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Surface {
    pub vertices: Vec<[f32; 3]>,
    pub triangles: Vec<[u32; 3]>,
}

impl Surface {
    /// Build from flat coordinate and face-index buffers.
    pub fn from_flat(vertices: &[f32], faces: &[i32]) -> Result<Self, SurfaceError> {
        let vertices = triples(vertices, "vertex")?;
        let vertex_count = vertices.len();

        let triangles = triples(faces, "face")?
            .into_iter()
            .enumerate()
            .map(|(face, corners)| {
                let mut triangle = [0u32; 3];
                for (slot, index) in triangle.iter_mut().zip(corners) {
                    *slot = u32::try_from(index)
                        .ok()
                        .filter(|&i| (i as usize) < vertex_count)
                        .ok_or(SurfaceError::FaceIndexOutOfRange {
                            face,
                            index,
                            vertex_count,
                        })?;
                }
                Ok(triangle)
            })
            .collect::<Result<Vec<_>, SurfaceError>>()?;

        Ok(Self {
            vertices,
            triangles,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

fn triples<T: Copy>(flat: &[T], what: &'static str) -> Result<Vec<[T; 3]>, SurfaceError> {
    if flat.len() % 3 != 0 {
        return Err(SurfaceError::Ragged {
            what,
            len: flat.len(),
        });
    }
    Ok(flat.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect())
}

/// Read a FreeSurfer triangle surface (`lh.pial`, `rh.inflated`, ...).
pub fn read_surface<P: AsRef<Path>>(path: P) -> Result<Surface, SurfaceError> {
    let path = path.as_ref();
    let surf = neuroformats::read_surf(path).map_err(read_error(path, "surface"))?;
    let surface = Surface::from_flat(&surf.mesh.vertices, &surf.mesh.faces)?;
    debug!(
        path = %path.display(),
        vertices = surface.vertex_count(),
        triangles = surface.triangles.len(),
        "read surface"
    );
    Ok(surface)
}

// ============================================================================
// CURVATURE
// ============================================================================

/// Read per-vertex curvature (`lh.curv`).
pub fn read_curvature<P: AsRef<Path>>(path: P) -> Result<Vec<f32>, SurfaceError> {
    let path = path.as_ref();
    let curv = neuroformats::read_curv(path).map_err(read_error(path, "curvature"))?;
    debug!(path = %path.display(), values = curv.data.len(), "read curvature");
    Ok(curv.data)
}
