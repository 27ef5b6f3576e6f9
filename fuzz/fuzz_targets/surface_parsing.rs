// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reshaping a parsed mesh must reject bad buffers without panicking, and
//! every accepted triangle must index an existing vertex.

#![no_main]

use fsatlas::Surface;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (Vec<f32>, Vec<i32>)| {
    let (vertices, faces) = input;
    if let Ok(surface) = Surface::from_flat(&vertices, &faces) {
        // INVARIANT 1: nothing is dropped
        assert_eq!(surface.vertex_count() * 3, vertices.len());
        assert_eq!(surface.triangles.len() * 3, faces.len());

        // INVARIANT 2: every corner is a valid vertex
        for triangle in &surface.triangles {
            for &index in triangle {
                assert!((index as usize) < surface.vertex_count());
            }
        }
    }
});
