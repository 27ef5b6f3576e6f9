//! Annotation layout tests: one test per documented decode outcome.

use fsatlas::{
    decode_annot, decode_entry, AnnotError, ByteCursor, ColorTableVersion, EntryFault, EntryField,
    HeaderStage, Rgba,
};

use crate::common::{destrieux_builder, AnnotBuilder, DESTRIEUX_NAMES};

// ============================================================================
// EMPTY OUTCOMES
// ============================================================================

#[test]
fn test_zero_vertices_without_color_table() {
    let bytes = AnnotBuilder::new().vertices(0).without_color_table().build();
    assert_eq!(bytes.len(), 8);

    let decoded = decode_annot(&bytes).unwrap();
    assert!(decoded.names().is_empty());
    assert!(decoded.diagnostic.is_none());
    assert!(!decoded.has_color_table());
}

#[test]
fn test_presence_flag_other_than_one_means_no_table() {
    for flag in [0, 2, -1, i32::MAX] {
        let bytes = AnnotBuilder::new().vertices(4).presence_flag(flag).build();
        let decoded = decode_annot(&bytes).unwrap();
        assert!(!decoded.has_color_table(), "flag {}", flag);
        assert_eq!(decoded.vertex_count, 4);
    }
}

#[test]
fn test_no_table_ignores_trailing_bytes() {
    let mut bytes = AnnotBuilder::new().without_color_table().build();
    bytes.extend_from_slice(b"garbage after the flag");
    let decoded = decode_annot(&bytes).unwrap();
    assert!(decoded.names().is_empty());
}

#[test]
fn test_zero_entry_table_is_success() {
    let decoded = decode_annot(&AnnotBuilder::new().vertices(2).build()).unwrap();
    assert!(decoded.has_color_table());
    assert!(decoded.names().is_empty());
    assert!(decoded.is_complete());
    assert_eq!(decoded.color_table.unwrap().declared_entries, 0);
}

// ============================================================================
// WELL-FORMED TABLES
// ============================================================================

#[test]
fn test_v1_names_in_order_with_padding_stripped() {
    let decoded = decode_annot(&destrieux_builder(16).build()).unwrap();

    assert_eq!(decoded.names(), DESTRIEUX_NAMES);
    assert_eq!(decoded.vertex_count, 16);
    assert!(decoded.is_complete());
}

#[test]
fn test_s1_padding_example() {
    let decoded = decode_annot(&AnnotBuilder::new().entry(1, b"S1\0\0").build()).unwrap();
    assert_eq!(decoded.into_names(), vec!["S1".to_string()]);
}

#[test]
fn test_v2_independent_of_max_structure_index() {
    let base = destrieux_builder(3);
    let expected = decode_annot(&base.build()).unwrap().into_names();

    for max in [0, 1, 75, -5, i32::MAX] {
        let v2 = base.clone().v2(max).build();
        assert_eq!(v2.len(), base.build().len() + 4);

        let decoded = decode_annot(&v2).unwrap();
        let table = decoded.color_table.as_ref().unwrap();
        assert_eq!(table.version, ColorTableVersion::V2);
        assert_eq!(table.max_structure_index, Some(max));
        assert_eq!(decoded.into_names(), expected);
    }
}

#[test]
fn test_entry_count_bounds_loop_not_marker() {
    // Marker claims 1, entry_count claims 3: all three are read.
    let bytes = AnnotBuilder::new()
        .marker(1)
        .entry(0, b"a")
        .entry(1, b"b")
        .entry(2, b"c")
        .build();
    assert_eq!(decode_annot(&bytes).unwrap().names(), ["a", "b", "c"]);
}

#[test]
fn test_entry_count_below_records_leaves_rest_unread() {
    let bytes = AnnotBuilder::new()
        .entry_count(1)
        .entry(0, b"read")
        .entry(1, b"unread")
        .build();
    let decoded = decode_annot(&bytes).unwrap();
    assert_eq!(decoded.names(), ["read"]);
    assert!(decoded.is_complete());
}

#[test]
fn test_invalid_utf8_is_replaced_not_fatal() {
    let bytes = AnnotBuilder::new()
        .entry(0, b"ok")
        .entry(1, b"bad\xFF\xFEname\0")
        .entry(2, b"after")
        .build();
    let decoded = decode_annot(&bytes).unwrap();

    assert_eq!(decoded.names().len(), 3);
    assert_eq!(decoded.names()[1], "bad\u{FFFD}\u{FFFD}name");
    assert_eq!(decoded.names()[2], "after");
    assert!(decoded.is_complete());
}

#[test]
fn test_empty_and_all_nul_names() {
    let bytes = AnnotBuilder::new()
        .entry(0, b"")
        .entry(1, b"\0\0\0\0")
        .build();
    assert_eq!(decode_annot(&bytes).unwrap().names(), ["", ""]);
}

#[test]
fn test_colors_are_decoded() {
    let bytes = AnnotBuilder::new()
        .entry_with_color(1001, b"ctx-lh-bankssts", [25, 100, 40, 0])
        .build();
    let decoded = decode_annot(&bytes).unwrap();
    let entry = &decoded.entries()[0];

    assert_eq!(entry.structure_index, 1001);
    assert_eq!(
        entry.color,
        Rgba {
            r: 25,
            g: 100,
            b: 40,
            a: 0
        }
    );
}

// ============================================================================
// PARTIAL RESULTS
// ============================================================================

#[test]
fn test_color_block_cut_to_ten_bytes() {
    let names = ["first", "second", "third", "fourth"];
    let builder = names
        .iter()
        .enumerate()
        .fold(AnnotBuilder::new().vertices(5), |b, (i, n)| {
            b.entry(i as i32, n.as_bytes())
        })
        .truncate_tail(6);

    let decoded = decode_annot(&builder.build()).unwrap();
    assert_eq!(decoded.names(), &names[..3]);

    let diagnostic = decoded.diagnostic.as_ref().unwrap();
    assert_eq!(diagnostic.index, 3);
    match &diagnostic.fault {
        EntryFault::Truncated { field, source } => {
            assert_eq!(*field, EntryField::Color);
            assert_eq!(source.requested, 16);
            assert_eq!(source.available, 10);
        }
        other => panic!("unexpected fault {:?}", other),
    }
}

#[test]
fn test_diagnostic_offset_points_at_record_start() {
    let full = AnnotBuilder::new().entry(0, b"kept").build();
    let bytes = AnnotBuilder::new()
        .entry(0, b"kept")
        .entry(1, b"lost")
        .truncate_tail(3)
        .build();

    let decoded = decode_annot(&bytes).unwrap();
    let diagnostic = decoded.diagnostic.unwrap();
    // Both headers are the same length; only the counts differ.
    assert_eq!(diagnostic.offset, full.len());
    assert_eq!(diagnostic.index, 1);
}

#[test]
fn test_declared_entries_beyond_buffer() {
    let bytes = AnnotBuilder::new()
        .entry_count(1_000_000)
        .entry(0, b"only")
        .build();
    let decoded = decode_annot(&bytes).unwrap();

    assert_eq!(decoded.names(), ["only"]);
    let diagnostic = decoded.diagnostic.as_ref().unwrap();
    assert_eq!(diagnostic.index, 1);
    assert!(matches!(
        diagnostic.fault,
        EntryFault::Truncated {
            field: EntryField::StructureIndex,
            ..
        }
    ));
    assert_eq!(decoded.skipped_entries(), 999_999);
}

#[test]
fn test_name_length_beyond_buffer() {
    let mut bytes = AnnotBuilder::new().entry(0, b"a").entry(1, b"b").build();
    // Patch the second record's name length (last record: 4 idx + 4 len + 1 name + 16 rgba).
    let len_at = bytes.len() - (4 + 1 + 16);
    bytes[len_at..len_at + 4].copy_from_slice(&i32::MAX.to_be_bytes());

    let decoded = decode_annot(&bytes).unwrap();
    assert_eq!(decoded.names(), ["a"]);
    assert!(matches!(
        decoded.diagnostic.unwrap().fault,
        EntryFault::Truncated {
            field: EntryField::Name,
            ..
        }
    ));
}

#[test]
fn test_negative_name_length_stops_loop() {
    let mut bytes = AnnotBuilder::new().entry(0, b"a").entry(1, b"b").build();
    let len_at = bytes.len() - (4 + 1 + 16);
    bytes[len_at..len_at + 4].copy_from_slice(&(-7i32).to_be_bytes());

    let decoded = decode_annot(&bytes).unwrap();
    assert_eq!(decoded.names(), ["a"]);
    assert_eq!(
        decoded.diagnostic.unwrap().fault,
        EntryFault::NegativeNameLength { value: -7 }
    );
}

#[test]
fn test_diagnostic_display_is_one_line() {
    let bytes = AnnotBuilder::new()
        .entry(0, b"x")
        .entry(1, b"y")
        .truncate_tail(1)
        .build();
    let text = decode_annot(&bytes).unwrap().diagnostic.unwrap().to_string();

    assert!(text.starts_with("entry 1 at byte "));
    assert!(text.contains("RGBA color truncated"));
    assert!(!text.contains('\n'));
}

// ============================================================================
// FATAL HEADER ERRORS
// ============================================================================

#[test]
fn test_every_header_prefix_is_fatal() {
    let bytes = AnnotBuilder::new().vertices(2).v2(10).entry(0, b"x").build();
    // vertex_count + 2 vertex records + flag + marker + max + filename length
    // + filename + entry_count
    let header_len = 4 + 16 + 4 + 4 + 4 + 4 + b"colortable.txt\0".len() + 4;

    for cut in 0..header_len {
        let result = decode_annot(&bytes[..cut]);
        assert!(
            matches!(result, Err(AnnotError::Truncated { .. })),
            "prefix of {} bytes: {:?}",
            cut,
            result
        );
    }
    assert!(decode_annot(&bytes[..header_len]).is_ok());
}

#[test]
fn test_stage_reported_for_truncated_filename() {
    let bytes = AnnotBuilder::new().filename_length(4096).build();
    match decode_annot(&bytes) {
        Err(AnnotError::Truncated { stage, source }) => {
            assert_eq!(stage, HeaderStage::Filename);
            assert_eq!(source.requested, 4096);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_negative_vertex_count_is_fatal() {
    let bytes = AnnotBuilder::new().vertices(-1).build();
    let err = decode_annot(&bytes).unwrap_err();
    assert!(matches!(
        err,
        AnnotError::NegativeLength {
            stage: HeaderStage::VertexCount,
            value: -1,
            offset: 0,
        }
    ));
    assert!(err.to_string().contains("-1"));
}

#[test]
fn test_huge_vertex_count_is_truncation_not_allocation() {
    let mut header = i32::MAX.to_be_bytes().to_vec();
    header.extend_from_slice(&[0; 12]);
    assert!(matches!(
        decode_annot(&header),
        Err(AnnotError::Truncated {
            stage: HeaderStage::VertexTable,
            ..
        })
    ));
}

#[test]
fn test_error_source_chain() {
    use std::error::Error;

    let err = decode_annot(&[0, 0]).unwrap_err();
    let source = err.source().expect("short read source");
    assert!(source.to_string().contains("needed 4 bytes, 2 available"));
}

// ============================================================================
// SINGLE ENTRY
// ============================================================================

#[test]
fn test_decode_entry_leaves_cursor_after_record() {
    let bytes = AnnotBuilder::new().entry(3, b"cuneus").entry(4, b"next").build();
    let decoded = decode_annot(&bytes).unwrap();
    let second_start = bytes.len() - (4 + 4 + 4 + 16);

    let mut cursor = ByteCursor::new(&bytes[second_start..]);
    let entry = decode_entry(&mut cursor).unwrap();
    assert_eq!(entry, decoded.entries()[1]);
    assert!(cursor.is_exhausted());
}
