//! Strict-JSON conformance matrix: documents that must parse and documents
//! that must fail when every extension is disabled.

use rstest::rstest;

use crate::tests::utils::parse;
use crate::Options;

#[rstest]
// Literals and scalars
#[case::null("null")]
#[case::true_("true")]
#[case::false_("false")]
#[case::zero("0")]
#[case::negative_zero("-0")]
#[case::integer("123")]
#[case::negative("-123")]
#[case::fraction("123.456")]
#[case::exponent("20e1")]
#[case::exponent_plus("1e+2")]
#[case::exponent_upper("1E22")]
#[case::zero_exponent("0e+1")]
#[case::huge_exponent("123e65")]
#[case::zero_fraction("0.5")]
// Strings
#[case::empty_string("\"\"")]
#[case::plain_string("\"hello\"")]
#[case::escapes("\"\\\"\\\\\\/\\b\\f\\n\\r\\t\"")]
#[case::unicode_escape("\"\\u0060\"")]
#[case::nul_escape("\"\\u0000\"")]
#[case::raw_multibyte("\"こんにちは\"")]
#[case::raw_line_separator("\"a\u{2028}b\"")]
// Containers
#[case::empty_array("[]")]
#[case::empty_object("{}")]
#[case::nested_empty("[[]]")]
#[case::padded(" [ ] ")]
#[case::mixed_array("[null, true, false, 0, \"x\"]")]
#[case::empty_key("{\"\": \"\"}")]
#[case::space_key("{\" \": 1}")]
#[case::duplicate_keys("{\"a\": 1, \"a\": 2}")]
#[case::nested_object("{\"a\": {\"b\": [{\"c\": null}]}}")]
#[case::newline_separated("[1,\n2,\n3]")]
#[case::tab_separated("[1,\t2]")]
fn accepts(#[case] doc: &str) {
    assert!(
        parse(doc, Options::json()).is_ok(),
        "{doc:?} should parse under strict JSON"
    );
}

#[rstest]
// Numbers
#[case::hex("0x1")]
#[case::double_dot("1.2.3")]
#[case::bare_minus("-")]
#[case::double_zero("00")]
#[case::leading_zero("01")]
#[case::trailing_dot("2.e3")]
#[case::zero_trailing_dot("0.e1")]
#[case::leading_dot(".1")]
#[case::bare_dot(".")]
#[case::minus_dot("-.")]
#[case::plus_sign("+1")]
#[case::empty_exponent("[1e]")]
#[case::empty_signed_exponent("[1e+]")]
#[case::double_exponent("[1e2e3]")]
#[case::named_infinity("[Infinity]")]
#[case::named_nan("[NaN]")]
#[case::hex_letter("[12a]")]
// Strings
#[case::single_quoted("['a']")]
#[case::unterminated("\"abc")]
#[case::bare_backslash("\"\\")]
#[case::unknown_escape("\"\\e\"")]
#[case::short_unicode_escape("\"\\u12\"")]
#[case::lone_high_surrogate("\"\\uD800\"")]
#[case::double_high_surrogate("\"\\uD800\\uD800\"")]
#[case::raw_newline_in_string("\"a\nb\"")]
// Structure
#[case::open_object("{")]
#[case::close_object("}")]
#[case::open_array("[")]
#[case::close_array("]")]
#[case::mismatched_object("[}")]
#[case::mismatched_array("{]")]
#[case::name_without_value("{\"a\"}")]
#[case::missing_name("{:1}")]
#[case::semicolon_separator("{\"a\":1;\"b\":2}")]
#[case::leading_comma("[,1]")]
#[case::double_comma("[1,,2]")]
#[case::trailing_comma_array("[1,]")]
#[case::trailing_comma_object("{\"a\":1,}")]
#[case::missing_comma_array("[1 2]")]
#[case::missing_comma_object("{\"a\":1 \"b\":2}")]
#[case::missing_colon("{\"a\" 1}")]
#[case::bareword_name("{a:1}")]
#[case::bareword_value("[hello]")]
#[case::comma_only(",")]
#[case::comments_line("// c\n1")]
#[case::comments_block("/* c */1")]
#[case::comments_hash("# c\n1")]
#[case::nbsp_whitespace("\u{00A0}1")]
#[case::empty_document("")]
#[case::whitespace_only("   ")]
fn rejects(#[case] doc: &str) {
    assert!(
        parse(doc, Options::json()).is_err(),
        "{doc:?} should fail under strict JSON"
    );
}

#[test]
fn deep_nesting_round_trips() {
    let depth = 64;
    let doc = format!("{}1{}", "[".repeat(depth), "]".repeat(depth));
    let v = parse(&doc, Options::json()).unwrap();
    let mut cursor = &v;
    for _ in 0..depth {
        cursor = cursor.get_index(0).unwrap();
    }
    assert_eq!(cursor.as_i64(), Some(1));
}

#[test]
fn every_rejection_reports_a_position_inside_the_document() {
    for doc in ["[1,,2]", "{\"a\" 1}", "\"abc", "0x1"] {
        let err = parse(doc, Options::json()).unwrap_err();
        assert!(
            err.position <= doc.len(),
            "{doc:?} reported position {} past the end",
            err.position
        );
    }
}
