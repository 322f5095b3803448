//! Integration tests for binary/text conversion of mail table files.

use std::path::Path;

use assert_fs::prelude::*;
use predicates::prelude::*;

use mailtable::codec::{decode_table, encode_table, CountByteOrder, DecodeOptions};
use mailtable::convert::{self, ConversionMode};
use mailtable::error::MailTableError;
use mailtable::model::{MailEntry, MailTable};
use mailtable::text::{parse_table, render_table};

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture_entries() -> Vec<MailEntry> {
    vec![
        MailEntry::new("AB", [1, 2, 3], "f.txt").unwrap(),
        MailEntry::new("MSG00002", [255, 0, 128], "report.pdf").unwrap(),
        MailEntry::new("M3", [0, 0, 0], "abc").unwrap(),
        MailEntry::new("", [16, 32, 64], "").unwrap(),
    ]
}

// ─── Test 1: Decode the binary fixture ──────────────────────────────

#[test]
fn test_from_bin_fixture() {
    let table = convert::from_bin(&fixture("simple.bin"), &DecodeOptions::default()).unwrap();
    assert_eq!(table.entries, fixture_entries());
}

// ─── Test 2: Parse the text fixture ─────────────────────────────────

#[test]
fn test_from_text_fixture() {
    let table = convert::from_text(&fixture("simple.txt")).unwrap();
    assert_eq!(table.entries, fixture_entries());
}

// ─── Test 3: binary → text → binary is byte-identical ───────────────

#[test]
fn test_bin_text_bin_identity() {
    let temp = assert_fs::TempDir::new().unwrap();
    let text = temp.child("table.txt");
    let bin = temp.child("table.bin");
    let options = DecodeOptions::default();

    convert::convert(&fixture("simple.bin"), text.path(), ConversionMode::BinToText, &options)
        .unwrap();
    convert::convert(text.path(), bin.path(), ConversionMode::TextToBin, &options).unwrap();

    let original = std::fs::read(fixture("simple.bin")).unwrap();
    bin.assert(predicate::path::eq_file(fixture("simple.bin")));
    assert_eq!(std::fs::read(bin.path()).unwrap(), original);
}

// ─── Test 4: text → binary → text is identical for canonical text ───

#[test]
fn test_text_bin_text_identity() {
    let temp = assert_fs::TempDir::new().unwrap();
    let bin = temp.child("table.bin");
    let text = temp.child("table.txt");
    let options = DecodeOptions::default();

    convert::convert(&fixture("simple.txt"), bin.path(), ConversionMode::TextToBin, &options)
        .unwrap();
    convert::convert(bin.path(), text.path(), ConversionMode::BinToText, &options).unwrap();

    let expected = std::fs::read_to_string(fixture("simple.txt")).unwrap();
    assert_eq!(std::fs::read_to_string(text.path()).unwrap(), expected);
}

// ─── Test 5: Hand-edited text with stray lines ──────────────────────

#[test]
fn test_edited_text_matches_canonical() {
    let edited = convert::from_text(&fixture("edited.txt")).unwrap();
    let canonical = convert::from_text(&fixture("simple.txt")).unwrap();
    assert_eq!(edited, canonical);

    let bytes = encode_table(&edited, CountByteOrder::Big).unwrap();
    assert_eq!(bytes, std::fs::read(fixture("simple.bin")).unwrap());
}

// ─── Test 6: Summary reports entries and size ───────────────────────

#[test]
fn test_conversion_summary() {
    let temp = assert_fs::TempDir::new().unwrap();
    let out = temp.child("out.bin");
    let summary = convert::convert(
        &fixture("simple.txt"),
        out.path(),
        ConversionMode::TextToBin,
        &DecodeOptions::default(),
    )
    .unwrap();
    assert_eq!(summary.mode, ConversionMode::TextToBin);
    assert_eq!(summary.entries, 4);
    assert_eq!(summary.bytes_written, 80);
}

// ─── Test 7: Failed conversion leaves no output ─────────────────────

#[test]
fn test_failed_conversion_leaves_no_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("bad.txt");
    input
        .write_str("{\n\tTOOLONGID # Message ID\n\t[1, 2, 3]\n\tx\n}\n")
        .unwrap();
    let out = temp.child("out.bin");

    let err = convert::convert(
        input.path(),
        out.path(),
        ConversionMode::TextToBin,
        &DecodeOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, MailTableError::MalformedField { line: 2, .. }));
    out.assert(predicate::path::missing());
    // No temporary files left behind either
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn test_failed_conversion_keeps_previous_output() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("short.bin");
    input.write_binary(&[0, 0, 0, 2]).unwrap();
    let out = temp.child("out.txt");
    out.write_str("previous").unwrap();

    let err = convert::convert(
        input.path(),
        out.path(),
        ConversionMode::BinToText,
        &DecodeOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        MailTableError::CountMismatch {
            declared: 2,
            found: 0
        }
    ));
    assert_eq!(std::fs::read_to_string(out.path()).unwrap(), "previous");
}

// ─── Test 8: Count validation against the fixture ───────────────────

#[test]
fn test_fixture_count_mismatches() {
    let original = std::fs::read(fixture("simple.bin")).unwrap();
    let options = DecodeOptions::default();

    let mut high = original.clone();
    high[3] = 9;
    assert!(matches!(
        decode_table(&high, &options),
        Err(MailTableError::CountMismatch {
            declared: 9,
            found: 4
        })
    ));

    let mut low = original.clone();
    low[3] = 3;
    assert!(matches!(
        decode_table(&low, &options),
        Err(MailTableError::TrailingBytes {
            declared: 3,
            remaining: 16
        })
    ));

    assert!(matches!(
        decode_table(&original[..original.len() - 1], &options),
        Err(MailTableError::TruncatedInput { .. })
    ));
}

// ─── Test 9: Error messages name the failure ────────────────────────

#[test]
fn test_error_messages() {
    let err = parse_table("{\nA\n[1, 2]\nb\n}").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("line 3"), "got: {msg}");

    let err = decode_table(&[0, 0, 0, 1, b'A'], &DecodeOptions::default()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("message id") && msg.contains("offset 4"), "got: {msg}");
}

// ─── Test 10: Rendering is stable across round trips ────────────────

#[test]
fn test_render_parse_render() {
    let table = MailTable::new(fixture_entries());
    let text = render_table(&table);
    let reparsed = parse_table(&text).unwrap();
    assert_eq!(render_table(&reparsed), text);
    assert_eq!(text, std::fs::read_to_string(fixture("simple.txt")).unwrap());
}
