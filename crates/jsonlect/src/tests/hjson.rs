use crate::tests::utils::{parse, tokens, value};
use crate::{Options, TokenKind, Value};

fn hjson(text: &str) -> Value {
    value(text, Options::hjson())
}

#[test]
fn quoteless_string_disambiguation() {
    let doc = "{\n\"a\": b,\n\"c\": d{}e\n\"f\":g h  i\n\"j\": k\n\"l\": 123m\n\"m\": 12/*3*/\n\"n\": .a\n\"o\": 5.\n}";
    let v = hjson(doc);
    assert_eq!(v.get("a").and_then(Value::as_str), Some("b,"));
    assert_eq!(v.get("c").and_then(Value::as_str), Some("d{}e"));
    assert_eq!(v.get("f").and_then(Value::as_str), Some("g h  i"));
    assert_eq!(v.get("j").and_then(Value::as_str), Some("k"));
    assert_eq!(v.get("l").and_then(Value::as_str), Some("123m"));
    assert_eq!(v.get("m").and_then(Value::as_i64), Some(12));
    assert!(v.get("m").unwrap().is_number());
    assert_eq!(v.get("n").and_then(Value::as_str), Some(".a"));
    assert_eq!(v.get("o").and_then(Value::as_str), Some("5."));
}

#[test]
fn named_floats_versus_lookalikes() {
    let options = Options {
        named_floating_point_literals: true,
        quoteless_strings: true,
        omitted_commas: true,
        ..Options::json()
    };
    let doc = "[\nInfinity\n-Infinity\nNaN\nInfinit5\n-Infinit5\nNa5\n]";
    let v = value(doc, options);
    let items = v.as_array().unwrap();
    let lexemes: Vec<&str> = items.iter().map(|item| item.as_str().unwrap()).collect();
    assert_eq!(
        lexemes,
        ["Infinity", "-Infinity", "NaN", "Infinit5", "-Infinit5", "Na5"]
    );
    // The first three carry their IEEE-754 values through the projection.
    assert_eq!("Infinity".parse::<f64>().unwrap(), f64::INFINITY);
    assert_eq!("-Infinity".parse::<f64>().unwrap(), f64::NEG_INFINITY);
    assert!("NaN".parse::<f64>().unwrap().is_nan());
    assert!("Infinit5".parse::<f64>().is_err());
}

#[test]
fn literal_values_still_parse() {
    let v = hjson("{\na: true\nb: false\nc: null\nd: 5\n}");
    assert_eq!(v.get("a"), Some(&Value::Bool(true)));
    assert_eq!(v.get("b"), Some(&Value::Bool(false)));
    assert_eq!(v.get("c"), Some(&Value::Null));
    assert_eq!(v.get("d").and_then(Value::as_i64), Some(5));
}

#[test]
fn literal_lookalikes_become_strings() {
    let v = hjson("{\na: true story\nb: null5\nc: falsey\n}");
    assert_eq!(v.get("a").and_then(Value::as_str), Some("true story"));
    assert_eq!(v.get("b").and_then(Value::as_str), Some("null5"));
    assert_eq!(v.get("c").and_then(Value::as_str), Some("falsey"));
}

#[test]
fn braceless_root_equals_braced() {
    assert_eq!(
        hjson("\"a\":\"b\",\"c\":\"d\""),
        hjson("{\"a\":\"b\",\"c\":\"d\"}")
    );
}

#[test]
fn braceless_root_with_newline_separators() {
    let v = hjson("a: 1\nb: two words\nc: true\n");
    assert_eq!(v.get("a").and_then(Value::as_i64), Some(1));
    assert_eq!(v.get("b").and_then(Value::as_str), Some("two words"));
    assert_eq!(v.get("c"), Some(&Value::Bool(true)));
}

#[test]
fn null_at_root_is_null() {
    assert_eq!(hjson("null"), Value::Null);
}

#[test]
fn null_colon_at_root_is_an_object_keyed_null() {
    let v = hjson("null: 5");
    assert_eq!(v.as_object().unwrap().len(), 1);
    assert_eq!(v.get("null").and_then(Value::as_i64), Some(5));
}

#[test]
fn stray_close_brace_in_braceless_root_errors() {
    assert!(parse("a: 1\n}", Options::hjson()).is_err());
}

#[test]
fn braceless_start_and_end_tokens_are_zero_length() {
    let items = tokens("a: 1", Options::hjson());
    let first = items.first().unwrap().as_ref().unwrap();
    assert_eq!((first.kind, first.position, first.length), (TokenKind::StartObject, 0, 0));
    let last = items.last().unwrap().as_ref().unwrap();
    // The closer sits right after the last value token.
    assert_eq!((last.kind, last.position, last.length), (TokenKind::EndObject, 4, 0));
}

#[test]
fn triple_quoted_indent_trimming() {
    let doc = concat!(
        "a: '''qwerty'''\n",
        "b: '''\n",
        "   qwerty\n",
        "   '''\n",
        "c: '''\n",
        "    qwerty\n",
        "   '''\n",
        "d: '''\n",
        "qwerty\n",
        "'''\n",
        "e: '''  qwerty  '''\n",
    );
    let v = hjson(doc);
    assert_eq!(v.get("a").and_then(Value::as_str), Some("qwerty"));
    assert_eq!(v.get("b").and_then(Value::as_str), Some("qwerty"));
    assert_eq!(v.get("c").and_then(Value::as_str), Some(" qwerty"));
    assert_eq!(v.get("d").and_then(Value::as_str), Some("qwerty"));
    assert_eq!(v.get("e").and_then(Value::as_str), Some("  qwerty  "));
}

#[test]
fn triple_quoted_preserves_interior_lines() {
    let v = hjson("text: '''\n  first\n    second\n  '''");
    assert_eq!(
        v.get("text").and_then(Value::as_str),
        Some("first\n  second")
    );
}

#[test]
fn comment_styles_mix() {
    let doc = "# hash\n// line\n/* block */\n{\na: 1 # trailing\n}";
    let v = hjson(doc);
    assert_eq!(v.get("a").and_then(Value::as_i64), Some(1));

    let items = tokens(doc, Options::hjson());
    let comments: Vec<String> = items
        .iter()
        .map(|item| item.as_ref().unwrap())
        .filter(|token| token.kind == TokenKind::Comment)
        .map(|token| token.value.clone())
        .collect();
    assert_eq!(comments, [" hash", " line", " block ", " trailing"]);
}

#[test]
fn quoteless_values_keep_interior_punctuation() {
    let v = hjson("{url: http://example.com/x?q=1\n}");
    assert_eq!(
        v.get("url").and_then(Value::as_str),
        Some("http://example.com/x?q=1")
    );
}

#[test]
fn commas_also_separate() {
    let v = hjson("{\"a\": 1, \"b\": 2}");
    assert_eq!(v.as_object().unwrap().len(), 2);
}
