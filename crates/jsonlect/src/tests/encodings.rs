use std::io::Cursor;

use rstest::rstest;

use crate::{Encoding, Options, Reader, Value};

const GREETING: &str = "こんにちは😀";

fn utf16_bytes(text: &str, big_endian: bool) -> Vec<u8> {
    let mut bytes = Vec::new();
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&if big_endian {
            unit.to_be_bytes()
        } else {
            unit.to_le_bytes()
        });
    }
    bytes
}

fn utf32_bytes(text: &str, big_endian: bool) -> Vec<u8> {
    let mut bytes = Vec::new();
    for c in text.chars() {
        let code = c as u32;
        bytes.extend_from_slice(&if big_endian {
            code.to_be_bytes()
        } else {
            code.to_le_bytes()
        });
    }
    bytes
}

fn doc() -> String {
    format!("\"{GREETING}\"")
}

#[rstest]
#[case::utf8(Encoding::Utf8)]
#[case::utf16le(Encoding::Utf16Le)]
#[case::utf16be(Encoding::Utf16Be)]
#[case::utf32le(Encoding::Utf32Le)]
#[case::utf32be(Encoding::Utf32Be)]
fn declared_encodings_round_trip(#[case] encoding: Encoding) {
    let bytes = match encoding {
        Encoding::Utf8 => doc().into_bytes(),
        Encoding::Utf16Le => utf16_bytes(&doc(), false),
        Encoding::Utf16Be => utf16_bytes(&doc(), true),
        Encoding::Utf32Le => utf32_bytes(&doc(), false),
        Encoding::Utf32Be => utf32_bytes(&doc(), true),
        Encoding::Ascii => unreachable!(),
    };
    let mut reader = Reader::from_bytes(&bytes, Some(encoding), Options::json());
    let value = reader.parse_element(true).unwrap();
    assert_eq!(value.as_str(), Some(GREETING));
}

#[test]
fn ascii_rejects_the_same_bytes() {
    let bytes = doc().into_bytes();
    let mut reader = Reader::from_bytes(&bytes, Some(Encoding::Ascii), Options::json());
    assert!(reader.parse_element(true).is_err());
}

#[test]
fn ascii_accepts_plain_documents() {
    let mut reader = Reader::from_bytes(b"[1, 2]", Some(Encoding::Ascii), Options::json());
    assert_eq!(
        reader.parse_element(true).unwrap(),
        Value::Array(vec![Value::from(1), Value::from(2)])
    );
}

#[rstest]
#[case::utf8(&[0xEF, 0xBB, 0xBF])]
#[case::utf16be(&[0xFE, 0xFF])]
#[case::utf16le(&[0xFF, 0xFE])]
#[case::utf32be(&[0x00, 0x00, 0xFE, 0xFF])]
#[case::utf32le(&[0xFF, 0xFE, 0x00, 0x00])]
fn boms_select_the_encoding(#[case] bom: &[u8]) {
    let (encoding, skip) = Encoding::detect(bom);
    assert_eq!(skip, bom.len());

    let mut bytes = bom.to_vec();
    match encoding {
        Encoding::Utf8 => bytes.extend_from_slice(doc().as_bytes()),
        Encoding::Utf16Le => bytes.extend_from_slice(&utf16_bytes(&doc(), false)),
        Encoding::Utf16Be => bytes.extend_from_slice(&utf16_bytes(&doc(), true)),
        Encoding::Utf32Le => bytes.extend_from_slice(&utf32_bytes(&doc(), false)),
        Encoding::Utf32Be => bytes.extend_from_slice(&utf32_bytes(&doc(), true)),
        Encoding::Ascii => unreachable!(),
    }
    let mut reader = Reader::from_bytes(&bytes, None, Options::json());
    assert_eq!(reader.parse_element(true).unwrap().as_str(), Some(GREETING));
}

#[test]
fn bomless_bytes_default_to_utf8() {
    let doc = doc();
    let mut reader = Reader::from_bytes(doc.as_bytes(), None, Options::json());
    assert_eq!(reader.parse_element(true).unwrap().as_str(), Some(GREETING));
}

#[test]
fn streams_parse_like_buffers() {
    let mut bytes = vec![0xFF, 0xFE];
    bytes.extend_from_slice(&utf16_bytes("{\"k\": [1, 2, 3]}", false));
    let mut reader = Reader::from_stream(Cursor::new(bytes), None, Options::json()).unwrap();
    let value = reader.parse_element(true).unwrap();
    assert_eq!(
        value.get("k").and_then(Value::as_array).map(Vec::len),
        Some(3)
    );
}

#[test]
fn stream_positions_support_navigation() {
    let doc = b"{\"first\": 1, \"second\": {\"third\": 5}}".to_vec();
    let mut reader = Reader::from_stream(Cursor::new(doc), None, Options::json()).unwrap();
    assert!(reader.find_property("second", true));
    let nested = reader.parse_element(false).unwrap();
    assert_eq!(nested.get("third").and_then(Value::as_i64), Some(5));
}

#[test]
fn scalar_lists_parse_and_count_positions_in_scalars() {
    let scalars: Vec<char> = "[\"😀\", 1]".chars().collect();
    let mut reader = Reader::from_scalars(&scalars, Options::json());
    let value = reader.parse_element(true).unwrap();
    assert_eq!(value.get_index(0).and_then(Value::as_str), Some("😀"));
    // Positions count scalars, so the cursor lands on the item count.
    assert_eq!(reader.position(), scalars.len());
}

#[test]
fn truncated_multibyte_sequences_fail() {
    // Cut through the final emoji so the last sequence is torn.
    let mut bytes = doc().into_bytes();
    bytes.truncate(bytes.len() - 2);
    let mut reader = Reader::from_bytes(&bytes, None, Options::json());
    let err = reader.parse_element(true).unwrap_err();
    assert_eq!(err.kind, crate::ErrorKind::MalformedEncoding(Encoding::Utf8));
}
