// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Annotation decoding under adversarial input.
//!
//! Counts inside an `.annot` file are attacker-controlled: a vertex count of
//! `i32::MAX`, a filename length larger than the file, a million declared
//! entries backed by one record. The worst case must be an error or a short
//! name list, never a panic or a huge allocation.

#![no_main]

use fsatlas::{decode_annot, ColorTableVersion};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(decoded) = decode_annot(data) else {
        return;
    };

    if let Some(table) = &decoded.color_table {
        // INVARIANT 1: never more entries than declared
        let declared = usize::try_from(table.declared_entries).unwrap_or(0);
        assert!(table.entries.len() <= declared);

        // INVARIANT 2: a diagnostic points at the first undecoded record
        if let Some(diagnostic) = &decoded.diagnostic {
            assert_eq!(diagnostic.index, table.entries.len());
            assert!(diagnostic.offset <= data.len());
        } else {
            assert_eq!(table.entries.len(), declared);
        }

        // INVARIANT 3: only V2 tables carry a max structure index
        assert_eq!(
            table.max_structure_index.is_some(),
            table.version == ColorTableVersion::V2
        );

        // INVARIANT 4: padding is always stripped
        for entry in &table.entries {
            assert!(!entry.name.ends_with('\0'));
        }
    } else {
        assert!(decoded.diagnostic.is_none());
    }

    // INVARIANT 5: decoding is deterministic
    assert_eq!(decode_annot(data).ok(), Some(decoded));
});
