// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It builds FreeSurfer byte streams so tests never need fixture files.
//! Surface and curvature streams are written to temp files and read back
//! through `neuroformats`.

#![doc(hidden)]

/// Builder for `.annot` byte buffers.
///
/// Defaults to zero vertices, a V1 color table, a short embedded filename and
/// no entries. Each setter overrides one field of the layout so tests can
/// produce exactly the malformed shape they care about.
#[derive(Debug, Clone)]
pub struct AnnotBuilder {
    vertex_count: i32,
    presence_flag: i32,
    marker: Option<i32>,
    max_structure_index: Option<i32>,
    filename: Vec<u8>,
    filename_length: Option<i32>,
    entry_count: Option<i32>,
    entries: Vec<(i32, Vec<u8>, [i32; 4])>,
    truncate: usize,
}

impl Default for AnnotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotBuilder {
    pub fn new() -> Self {
        Self {
            vertex_count: 0,
            presence_flag: 1,
            marker: None,
            max_structure_index: None,
            filename: b"colortable.txt\0".to_vec(),
            filename_length: None,
            entry_count: None,
            entries: Vec::new(),
            truncate: 0,
        }
    }

    /// Vertex count, with one label record per vertex.
    pub fn vertices(mut self, count: i32) -> Self {
        self.vertex_count = count;
        self
    }

    pub fn without_color_table(self) -> Self {
        self.presence_flag(0)
    }

    pub fn presence_flag(mut self, flag: i32) -> Self {
        self.presence_flag = flag;
        self
    }

    /// Explicit V1 marker (defaults to the entry count).
    pub fn marker(mut self, marker: i32) -> Self {
        self.marker = Some(marker);
        self
    }

    /// Switch to the V2 layout with the given max structure index.
    pub fn v2(mut self, max_structure_index: i32) -> Self {
        self.marker = Some(-2);
        self.max_structure_index = Some(max_structure_index);
        self
    }

    pub fn source_filename(mut self, name: &[u8]) -> Self {
        self.filename = name.to_vec();
        self
    }

    /// Override the written filename length without changing the bytes.
    pub fn filename_length(mut self, len: i32) -> Self {
        self.filename_length = Some(len);
        self
    }

    /// Override the written entry count (defaults to the number of entries).
    pub fn entry_count(mut self, count: i32) -> Self {
        self.entry_count = Some(count);
        self
    }

    pub fn entry(self, structure_index: i32, name: &[u8]) -> Self {
        let color = [structure_index & 0xFF, 20, 60, 0];
        self.entry_with_color(structure_index, name, color)
    }

    pub fn entry_with_color(mut self, structure_index: i32, name: &[u8], rgba: [i32; 4]) -> Self {
        self.entries.push((structure_index, name.to_vec(), rgba));
        self
    }

    /// Drop `n` bytes from the end of the finished buffer.
    pub fn truncate_tail(mut self, n: usize) -> Self {
        self.truncate = n;
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        put(&mut out, self.vertex_count);
        for vertex in 0..self.vertex_count.max(0) {
            put(&mut out, vertex);
            put(&mut out, 0x00DC_1414);
        }

        put(&mut out, self.presence_flag);
        if self.presence_flag == 1 {
            let entry_count = self.entry_count.unwrap_or(self.entries.len() as i32);
            put(&mut out, self.marker.unwrap_or(entry_count.max(0)));
            if let Some(max) = self.max_structure_index {
                put(&mut out, max);
            }

            put(
                &mut out,
                self.filename_length.unwrap_or(self.filename.len() as i32),
            );
            out.extend_from_slice(&self.filename);
            put(&mut out, entry_count);

            for (structure_index, name, rgba) in &self.entries {
                put(&mut out, *structure_index);
                put(&mut out, name.len() as i32);
                out.extend_from_slice(name);
                for channel in rgba {
                    put(&mut out, *channel);
                }
            }
        }

        let keep = out.len().saturating_sub(self.truncate);
        out.truncate(keep);
        out
    }
}

fn put(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// Triangle surface bytes (`0xFFFFFE` layout).
pub fn surface_bytes(vertices: &[[f32; 3]], triangles: &[[i32; 3]]) -> Vec<u8> {
    let mut out = vec![0xFF, 0xFF, 0xFE];
    out.extend_from_slice(b"created by fsatlas tests\n\n");
    put(&mut out, vertices.len() as i32);
    put(&mut out, triangles.len() as i32);
    for v in vertices {
        for c in v {
            out.extend_from_slice(&c.to_be_bytes());
        }
    }
    for t in triangles {
        for &i in t {
            put(&mut out, i);
        }
    }
    out
}

/// Curvature bytes in the `0xFFFFFF` layout.
pub fn curvature_bytes(values: &[f32], face_count: i32) -> Vec<u8> {
    let mut out = vec![0xFF, 0xFF, 0xFF];
    put(&mut out, values.len() as i32);
    put(&mut out, face_count);
    put(&mut out, 1);
    for v in values {
        out.extend_from_slice(&v.to_be_bytes());
    }
    out
}

/// Unit tetrahedron: four vertices, four faces.
pub fn tetrahedron() -> (Vec<[f32; 3]>, Vec<[i32; 3]>) {
    (
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ],
        vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
    )
}
