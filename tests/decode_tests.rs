// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decode integration tests.
//!
//! Tests cover:
//! - Decoding flat and nested classes from JSON text
//! - Member order, unmapped members and repeated keys
//! - Malformed member names and structural errors with byte offsets
//! - Number, bool, string and date value rules
//! - Depth limits and trailing content

mod common;

use chrono::{TimeZone, Utc};

use common::{nested_tree_json, GraphNode, Metadata, Numbers, TreeNode, METADATA_JSON};
use jsonlink::{
    from_json, from_json_array, from_json_with, global_registry, DecodeOptions, JsonCursor,
    JsonLinkError, KeyFormatKind, StructuralKind,
};

fn metadata(member0: i32, member1: &str, member2: bool) -> Metadata {
    Metadata {
        member0,
        member1: member1.to_string(),
        member2,
    }
}

fn decode_err(text: &str) -> JsonLinkError {
    from_json::<Metadata>(text).unwrap_err()
}

// ============================================================================
// Object Decoding
// ============================================================================

#[test]
fn test_decode_flat_class() {
    let value: Metadata = from_json(METADATA_JSON).unwrap();
    assert_eq!(value, metadata(55, "hello", true));
}

#[test]
fn test_member_order_does_not_matter() {
    let value: Metadata =
        from_json(r#"{"member2":false,"member1":"b","member0":-3}"#).unwrap();
    assert_eq!(value, metadata(-3, "b", false));
}

#[test]
fn test_unmapped_members_are_skipped() {
    let text = r#"{
        "extra": [1, {"x": "}"}, "]"],
        "member0": 1,
        "other": {"deep": {"deeper": [true]}},
        "member1": "x",
        "flag": null,
        "member2": true,
        "last": "tail"
    }"#;
    let value: Metadata = from_json(text).unwrap();
    assert_eq!(value, metadata(1, "x", true));
}

#[test]
fn test_whitespace_between_tokens() {
    let text = "\n{\n\t\"member0\" : 1 ,\r\n \"member1\":\"x\" , \"member2\" : true\n}\n";
    assert_eq!(from_json::<Metadata>(text).unwrap(), metadata(1, "x", true));
}

#[test]
fn test_repeated_key_last_wins() {
    let text = r#"{"member0":1,"member1":"a","member2":true,"member0":2}"#;
    assert_eq!(from_json::<Metadata>(text).unwrap().member0, 2);
}

#[test]
fn test_empty_and_escaped_strings() {
    let value: Metadata =
        from_json(r#"{"member0":0,"member1":"","member2":false}"#).unwrap();
    assert_eq!(value.member1, "");

    let value: Metadata =
        from_json(r#"{"member0":0,"member1":"say \"hi\" \\","member2":false}"#).unwrap();
    assert_eq!(value.member1, r#"say \"hi\" \\"#);
}

#[test]
fn test_decode_nested_class() {
    let text = r#"{"metadata": {"member0": 1, "member1": "n", "member2": false}, "id": "42"}"#;
    let node: GraphNode = from_json(text).unwrap();
    assert_eq!(node.id, 42);
    assert_eq!(node.metadata, metadata(1, "n", false));
}

#[test]
fn test_decode_from_consecutive_objects() {
    let schema = global_registry().schema::<Metadata>().unwrap();
    let text = format!("{METADATA_JSON}\n{METADATA_JSON}");
    let mut cursor = JsonCursor::new(&text);
    let first = schema.decode_from(&mut cursor).unwrap();
    assert_eq!(cursor.position(), METADATA_JSON.len() + 1);
    let second = schema.decode_from(&mut cursor).unwrap();
    assert_eq!(first, second);
    assert!(cursor.is_at_end());
}

// ============================================================================
// Missing Members
// ============================================================================

#[test]
fn test_missing_required_member() {
    let err = decode_err(r#"{"member0":1,"member2":true}"#);
    assert_eq!(err, JsonLinkError::missing_field("Metadata", "member1"));
    assert_eq!(err.offset(), None);
}

#[test]
fn test_empty_object_misses_first_member() {
    let err = decode_err("{ }");
    assert_eq!(err, JsonLinkError::missing_field("Metadata", "member0"));
}

#[test]
fn test_missing_nested_member() {
    let text = r#"{"id":"1","metadata":{"member0":1,"member1":"x"}}"#;
    let err = from_json::<GraphNode>(text).unwrap_err();
    assert_eq!(err, JsonLinkError::missing_field("Metadata", "member2"));
}

// ============================================================================
// Malformed Member Names
// ============================================================================

#[test]
fn test_unquoted_lower_case_name() {
    let err = decode_err("{member0: 1}");
    assert_eq!(err, JsonLinkError::key_format(KeyFormatKind::LowerCase, 1));
}

#[test]
fn test_name_starting_with_digit() {
    let err = decode_err("{ 1: 2}");
    assert_eq!(err, JsonLinkError::key_format(KeyFormatKind::Digit, 2));
}

#[test]
fn test_doubled_comma() {
    let err = decode_err(r#"{"member0":1,,"member1":"x"}"#);
    assert_eq!(err, JsonLinkError::key_format(KeyFormatKind::Comma, 13));
}

#[test]
fn test_stray_colon_name() {
    let err = decode_err("{:1}");
    assert_eq!(err, JsonLinkError::key_format(KeyFormatKind::Colon, 1));
}

#[test]
fn test_upper_case_name() {
    let err = decode_err("{Member0:1}");
    assert_eq!(err, JsonLinkError::key_format(KeyFormatKind::NoOpeningQuote, 1));
}

#[test]
fn test_missing_colon() {
    let err = decode_err(r#"{"member0" 1}"#);
    assert_eq!(err, JsonLinkError::key_format(KeyFormatKind::MissingColon, 11));
}

// ============================================================================
// Structural Errors
// ============================================================================

#[test]
fn test_not_an_object() {
    assert_eq!(
        decode_err("[1]"),
        JsonLinkError::invalid_class_start("Metadata", 0)
    );
    assert_eq!(
        decode_err("  5"),
        JsonLinkError::invalid_class_start("Metadata", 2)
    );
    assert_eq!(decode_err(""), JsonLinkError::invalid_class_start("Metadata", 0));
}

#[test]
fn test_nested_value_not_an_object() {
    let err = from_json::<GraphNode>(r#"{"id":"1","metadata":7}"#).unwrap_err();
    assert_eq!(err, JsonLinkError::invalid_class_start("Metadata", 21));
}

#[test]
fn test_literal_without_separator() {
    let err = decode_err(r#"{"member0":1"#);
    assert_eq!(
        err,
        JsonLinkError::structural(StructuralKind::MissingSeparator, 11)
    );
}

#[test]
fn test_unterminated_string() {
    let err = decode_err(r#"{"member1":"abc"#);
    assert_eq!(
        err,
        JsonLinkError::structural(StructuralKind::UnterminatedString, 11)
    );
}

#[test]
fn test_unterminated_object() {
    let err = decode_err(r#"{"member0":1,"member1":"x""#);
    assert_eq!(
        err,
        JsonLinkError::structural(StructuralKind::UnterminatedObject, 26)
    );
}

#[test]
fn test_mismatched_close() {
    let err = decode_err(r#"{"member0":1,"member1":"x","member2":true]"#);
    assert_eq!(
        err,
        JsonLinkError::structural(StructuralKind::MismatchedClose(']'), 41)
    );
}

#[test]
fn test_unterminated_nested_array() {
    let err = decode_err(r#"{"member0":1,"skip":[1,2"#);
    assert!(matches!(
        err,
        JsonLinkError::Structural {
            kind: StructuralKind::UnterminatedArray,
            ..
        }
    ));
}

#[test]
fn test_trailing_content() {
    let text = r#"{"member0":1,"member1":"x","member2":true} x"#;
    assert_eq!(
        decode_err(text),
        JsonLinkError::structural(StructuralKind::TrailingCharacters, 43)
    );

    let options = DecodeOptions::default().with_trailing_content(true);
    let value: Metadata = from_json_with(text, &options).unwrap();
    assert_eq!(value, metadata(1, "x", true));

    // Trailing whitespace is always fine.
    assert!(from_json::<Metadata>(&format!("{METADATA_JSON} \n\t")).is_ok());
}

// ============================================================================
// Value Rules
// ============================================================================

#[test]
fn test_quoted_number_rejected() {
    let err = decode_err(r#"{"member0":"55","member1":"x","member2":true}"#);
    match err {
        JsonLinkError::InvalidValue {
            member,
            text,
            offset,
            ..
        } => {
            assert_eq!(member, "member0");
            assert_eq!(text, "55");
            assert_eq!(offset, 12);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_literal_as_string_always() {
    let err = from_json::<GraphNode>(
        r#"{"id":42,"metadata":{"member0":1,"member1":"x","member2":true}}"#,
    )
    .unwrap_err();
    assert!(matches!(err, JsonLinkError::InvalidValue { ref member, .. } if member == "id"));
}

#[test]
fn test_unquoted_string_rejected() {
    let err = decode_err(r#"{"member0":1,"member1":abc,"member2":true}"#);
    assert!(matches!(err, JsonLinkError::InvalidValue { ref member, .. } if member == "member1"));
}

#[test]
fn test_bool_first_letter_rule() {
    let decode = |literal: &str| {
        let text = format!(r#"{{"member0":1,"member1":"x","member2":{literal}}}"#);
        from_json::<Metadata>(&text).map(|value| value.member2)
    };
    assert!(decode("true").unwrap());
    assert!(decode("True").unwrap());
    assert!(!decode("false").unwrap());
    assert!(!decode("null").unwrap());
    assert!(decode("\"true\"").is_err());
}

#[test]
fn test_all_number_kinds() {
    let text = r#"{
        "a": -128, "b": 32767, "c": -5, "d": -9223372036854775808,
        "e": 255, "f": 65535, "g": 4294967295, "h": 18446744073709551615,
        "x": 1.5, "y": -2.5e-3
    }"#;
    let numbers: Numbers = from_json(text).unwrap();
    assert_eq!(numbers.a, i8::MIN);
    assert_eq!(numbers.b, i16::MAX);
    assert_eq!(numbers.c, -5);
    assert_eq!(numbers.d, i64::MIN);
    assert_eq!(numbers.e, u8::MAX);
    assert_eq!(numbers.f, u16::MAX);
    assert_eq!(numbers.g, u32::MAX);
    assert_eq!(numbers.h, u64::MAX);
    assert_eq!(numbers.x, 1.5);
    assert_eq!(numbers.y, -0.0025);
}

#[test]
fn test_number_out_of_range_or_malformed() {
    let base = r#""b":0,"c":0,"d":0,"e":0,"f":0,"g":0,"h":0,"x":0,"y":0"#;
    for literal in ["128", "-129", "1.5", "-", "1-", "0x10", "--1"] {
        let text = format!(r#"{{"a":{literal},{base}}}"#);
        let err = from_json::<Numbers>(&text).unwrap_err();
        assert!(
            matches!(err, JsonLinkError::InvalidValue { ref member, .. } if member == "a"),
            "{literal}: {err}"
        );
    }

    let text = r#"{"a":+7,"b":0,"c":0,"d":0,"e":0,"f":0,"g":0,"h":0,"x":0,"y":0}"#;
    assert_eq!(from_json::<Numbers>(text).unwrap().a, 7);
}

#[test]
fn test_unsigned_and_float_rejections() {
    let with = |member: &str, literal: &str| {
        let mut fields: Vec<String> = ["a", "b", "c", "d", "e", "f", "g", "h", "x", "y"]
            .iter()
            .map(|name| format!(r#""{name}":0"#))
            .collect();
        let index = fields
            .iter()
            .position(|field| field.starts_with(&format!(r#""{member}""#)))
            .unwrap();
        fields[index] = format!(r#""{member}":{literal}"#);
        from_json::<Numbers>(&format!("{{{}}}", fields.join(",")))
    };
    assert!(with("e", "-1").is_err());
    assert!(with("h", "18446744073709551616").is_err());
    assert!(with("x", "NaN").is_err());
    assert!(with("y", "1e400").is_err());
    assert!(with("y", "inf").is_err());
    assert_eq!(with("y", "1e3").unwrap().y, 1000.0);
    assert_eq!(with("g", "+12").unwrap().g, 12);
}

#[test]
fn test_date_formats() {
    let expected = Utc.with_ymd_and_hms(2021, 6, 30, 12, 0, 1).unwrap();
    for date in [
        "2021-06-30T12:00:01Z",
        "2021-06-30T14:00:01+02:00",
        "2021-06-30T12:00:01",
        "2021-06-30 12:00:01",
    ] {
        let text = format!(
            r#"{{"name":"a","joined":"{date}","tags":[],"scores":[]}}"#
        );
        let profile: common::Profile = from_json(&text).unwrap();
        assert_eq!(profile.joined, expected, "{date}");
    }

    let text = r#"{"name":"a","joined":"yesterday","tags":[],"scores":[]}"#;
    let err = from_json::<common::Profile>(text).unwrap_err();
    assert!(matches!(err, JsonLinkError::InvalidValue { ref member, .. } if member == "joined"));
}

// ============================================================================
// Depth Limits
// ============================================================================

#[test]
fn test_tree_within_depth() {
    let tree: TreeNode = from_json(&nested_tree_json(3)).unwrap();
    assert_eq!(tree.children.len(), 1);
    assert_eq!(tree.children[0].children[0].children.len(), 0);
}

#[test]
fn test_depth_limit_exceeded() {
    // Each tree level nests an array and an object.
    let options = DecodeOptions::default().with_max_depth(5);
    assert!(from_json_with::<TreeNode>(&nested_tree_json(3), &options).is_ok());

    let err = from_json_with::<TreeNode>(&nested_tree_json(4), &options).unwrap_err();
    assert!(matches!(
        err,
        JsonLinkError::Structural {
            kind: StructuralKind::DepthLimitExceeded(5),
            ..
        }
    ));
}

#[test]
fn test_hostile_nesting_fails_cleanly() {
    let err = from_json::<TreeNode>(&nested_tree_json(5000)).unwrap_err();
    assert!(matches!(
        err,
        JsonLinkError::Structural {
            kind: StructuralKind::DepthLimitExceeded(128),
            ..
        }
    ));
}

// ============================================================================
// Root Arrays
// ============================================================================

#[test]
fn test_root_array_of_classes() {
    let text = format!("[{METADATA_JSON}, {METADATA_JSON}]");
    let values: Vec<Metadata> = from_json_array(&text).unwrap();
    assert_eq!(values, vec![metadata(55, "hello", true); 2]);
}

#[test]
fn test_root_array_of_arrays() {
    let values: Vec<Vec<u16>> = from_json_array("[[1, 2], [], [3]]").unwrap();
    assert_eq!(values, vec![vec![1, 2], vec![], vec![3]]);
}

#[test]
fn test_root_array_element_error() {
    let err = from_json_array::<i32>(r#"[1, "2", 3]"#).unwrap_err();
    assert!(matches!(err, JsonLinkError::InvalidValue { offset: 5, .. }));

    let err = from_json_array::<i32>("[1, 2").unwrap_err();
    assert!(matches!(
        err,
        JsonLinkError::Structural {
            kind: StructuralKind::UnterminatedArray,
            offset: 0,
        }
    ));
}
