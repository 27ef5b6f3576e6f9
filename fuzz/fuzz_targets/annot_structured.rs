// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Structure-aware annotation fuzzing.
//!
//! Raw bytes rarely get past the header. This target builds files that are
//! valid up to a point and then lie about one field, so the entry loop sees
//! the interesting cases: truncated colors, negative name lengths, entry
//! counts that disagree with the data.

#![no_main]

use arbitrary::Arbitrary;
use fsatlas::decode_annot;
use fsatlas::testing::AnnotBuilder;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    vertices: u8,
    v2_max: Option<i32>,
    marker: Option<i32>,
    entry_count: Option<i32>,
    names: Vec<Vec<u8>>,
    truncate: u16,
}

fuzz_target!(|input: Input| {
    let mut builder = AnnotBuilder::new().vertices(i32::from(input.vertices));
    if let Some(max) = input.v2_max {
        builder = builder.v2(max);
    } else if let Some(marker) = input.marker.filter(|m| *m >= 0) {
        builder = builder.marker(marker);
    }
    if let Some(count) = input.entry_count {
        builder = builder.entry_count(count);
    }
    for (i, name) in input.names.iter().take(64).enumerate() {
        builder = builder.entry(i as i32, name);
    }
    let bytes = builder.truncate_tail(usize::from(input.truncate)).build();

    if let Ok(decoded) = decode_annot(&bytes) {
        let names = decoded.names();
        // Decoded names are a prefix of what was written.
        for (got, written) in names.iter().zip(&input.names) {
            let expected = String::from_utf8_lossy(written);
            assert_eq!(*got, expected.trim_end_matches('\0'));
        }
    }
});
