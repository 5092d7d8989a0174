//! Cross-feature cases: places where two dialect toggles meet and the
//! outcome is easy to get wrong.

use std::collections::HashMap;

use crate::tests::utils::{parse, value};
use crate::{Encoding, Options, Reader, Value};

#[test]
fn hjson_numbers_on_their_own_lines_stay_numbers() {
    let v = value("[\n1\n2\n]", Options::hjson());
    assert_eq!(
        v.as_array().unwrap().iter().map(Value::as_i64).collect::<Vec<_>>(),
        [Some(1), Some(2)]
    );
}

#[test]
fn comment_after_a_number_confirms_it() {
    let v = value("{a: 5 // note\n}", Options::hjson());
    assert!(v.get("a").unwrap().is_number());
    assert_eq!(v.get("a").and_then(Value::as_i64), Some(5));
}

#[test]
fn non_comment_slash_extends_into_a_quoteless_string() {
    let v = value("{a: 5/x\n}", Options::hjson());
    assert_eq!(v.get("a").and_then(Value::as_str), Some("5/x"));
}

#[test]
fn single_quoted_strings_take_unicode_escapes() {
    assert_eq!(value(r"'\u0041'", Options::json5()).as_str(), Some("A"));
}

#[test]
fn utf8_bom_fails_under_declared_ascii() {
    let bytes = [0xEF, 0xBB, 0xBF, b'1'];
    let mut reader = Reader::from_bytes(&bytes, Some(Encoding::Ascii), Options::json());
    let err = reader.parse_element(true).unwrap_err();
    assert_eq!(err.kind, crate::ErrorKind::NonAsciiByte(0xEF));
}

#[test]
fn navigation_can_restart_from_the_top() {
    let doc = r#"{"a": 1, "b": 2}"#;
    let mut reader = Reader::from_str(doc, Options::json());
    assert!(reader.find_property("b", true));
    assert_eq!(reader.parse_element(false).unwrap().as_i64(), Some(2));
    reader.set_position(0).unwrap();
    assert!(reader.find_property("a", true));
    assert_eq!(reader.parse_element(false).unwrap().as_i64(), Some(1));
}

#[test]
fn projection_into_a_map_type() {
    let doc = "{alpha: 1.5, beta: .5, gamma: 2e2}";
    let mut reader = Reader::from_str(doc, Options::json5());
    let map: HashMap<String, f64> = reader.parse_element_as(true).unwrap();
    assert_eq!(map["alpha"], 1.5);
    assert_eq!(map["beta"], 0.5);
    assert_eq!(map["gamma"], 200.0);
}

#[test]
fn paragraph_separator_continuation() {
    let options = Options {
        escaped_string_newlines: true,
        ..Options::json()
    };
    let doc = "\"a\\\u{2028}b\"";
    assert_eq!(value(doc, options).as_str(), Some("ab"));
}

#[test]
fn raw_line_separator_is_legal_inside_quoted_strings() {
    let v = value("\"a\u{2028}b\"", Options::json());
    assert_eq!(v.as_str(), Some("a\u{2028}b"));
}

#[test]
fn non_ascii_bareword_property_names() {
    let v = value("{café: 1}", Options::hjson());
    assert_eq!(v.get("café").and_then(Value::as_i64), Some(1));
}

#[test]
fn ecma_names_accept_non_ascii_letters() {
    let v = value("{café: 1}", Options::json5());
    assert_eq!(v.get("café").and_then(Value::as_i64), Some(1));
}

#[test]
fn incomplete_hjson_combines_with_quoteless_values() {
    let options = Options {
        incomplete_inputs: true,
        ..Options::hjson()
    };
    let v = value("a: first\nb: '''second", options);
    assert_eq!(v.get("a").and_then(Value::as_str), Some("first"));
    assert_eq!(v.get("b").and_then(Value::as_str), Some("second"));
}

#[test]
fn trailing_comma_needs_its_flag_even_with_omitted_commas() {
    let options = Options {
        omitted_commas: true,
        ..Options::json()
    };
    assert!(parse("[1, 2,]", options).is_err());
    let with_trailing = Options {
        trailing_commas: true,
        ..options
    };
    assert!(parse("[1, 2,]", with_trailing).is_ok());
}

#[test]
fn quoteless_strings_do_not_enable_quoteless_names() {
    let options = Options {
        quoteless_strings: true,
        ..Options::json()
    };
    assert!(parse("{a: b}", options).is_err());
}

#[test]
fn hjson_rejects_json5_only_shapes() {
    // Hexadecimal numbers and explicit plus signs are not Hjson; they fall
    // back to quoteless strings instead of failing.
    let v = value("{a: 0x10\nb: +5\n}", Options::hjson());
    assert_eq!(v.get("a").and_then(Value::as_str), Some("0x10"));
    assert_eq!(v.get("b").and_then(Value::as_str), Some("+5"));
}
