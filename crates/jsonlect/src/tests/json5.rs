use crate::tests::utils::{parse, project, value};
use crate::{Options, Value};

fn json5(text: &str) -> Value {
    value(text, Options::json5())
}

#[test]
fn kitchen_sink_document() {
    let doc = r#"{
        // comments
        unquoted: 'and you can quote me on that',
        singleQuotes: 'I can use "double quotes" here',
        hexadecimal: 0xdecaf,
        leadingDecimalPoint: .8675309,
        andTrailing: 8675309.,
        positiveSign: +1,
        trailingComma: 'in objects',
        andIn: ['arrays',],
        backwardsCompatible: "with JSON",
    }"#;
    let v = json5(doc);
    assert_eq!(
        v.get("unquoted").and_then(Value::as_str),
        Some("and you can quote me on that")
    );
    assert_eq!(
        v.get("singleQuotes").and_then(Value::as_str),
        Some("I can use \"double quotes\" here")
    );
    assert_eq!(v.get("hexadecimal").and_then(Value::as_i64), Some(0x000d_ecaf));
    assert_eq!(
        v.get("leadingDecimalPoint").and_then(Value::as_f64),
        Some(0.867_530_9)
    );
    assert_eq!(v.get("andTrailing").and_then(Value::as_f64), Some(8_675_309.0));
    assert_eq!(v.get("positiveSign").and_then(Value::as_i64), Some(1));
    assert_eq!(
        v.get("andIn").and_then(|a| a.get_index(0)).and_then(Value::as_str),
        Some("arrays")
    );
}

#[test]
fn infinity_and_nan() {
    assert_eq!(json5("Infinity").as_str(), Some("Infinity"));
    assert_eq!(json5("-Infinity").as_str(), Some("-Infinity"));
    assert_eq!(json5("+Infinity").as_str(), Some("+Infinity"));
    assert_eq!(json5("NaN").as_str(), Some("NaN"));
    assert_eq!(project::<f64>("Infinity", Options::json5()), f64::INFINITY);
    assert!(project::<f64>("NaN", Options::json5()).is_nan());
}

#[test]
fn signed_and_hex_numbers() {
    assert_eq!(json5("+0x20").as_i64(), Some(32));
    assert_eq!(json5("-0x20").as_i64(), Some(-32));
    assert_eq!(json5("+5").as_number().unwrap().as_str(), "+5");
}

#[test]
fn unicode_whitespace_is_trivia() {
    assert_eq!(json5("\u{2028}[\u{00A0}1,\u{2029}2\u{3000}]").as_array().map(Vec::len), Some(2));
}

#[test]
fn unknown_escapes_pass_through() {
    assert_eq!(json5(r#""\w""#).as_str(), Some("w"));
    assert_eq!(json5(r#"'\''"#).as_str(), Some("'"));
}

#[test]
fn multiline_string_continuations() {
    assert_eq!(json5("'one \\\ntwo'").as_str(), Some("one two"));
}

#[test]
fn identifier_rules_still_bind() {
    // Digits are not identifier scalars.
    assert!(parse("{1key: 1}", Options::json5()).is_err());
    // Quoteless string values are not part of JSON5.
    assert!(parse("{a: hello}", Options::json5()).is_err());
    // Triple-quoted strings are not part of JSON5.
    assert!(parse("{a: '''x'''}", Options::json5()).is_err());
}

#[test]
fn dollar_and_underscore_names() {
    let v = json5("{$ref: 1, _private: 2}");
    assert_eq!(v.get("$ref").and_then(Value::as_i64), Some(1));
    assert_eq!(v.get("_private").and_then(Value::as_i64), Some(2));
}
