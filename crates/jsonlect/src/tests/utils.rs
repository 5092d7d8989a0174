use crate::{Error, Options, Reader, Result, Token, Value};

/// Parses `text` as a root element and returns the tree.
pub fn parse(text: &str, options: Options) -> Result<Value> {
    Reader::from_str(text, options).parse_element(true)
}

/// Parses `text`, panicking on error.
pub fn value(text: &str, options: Options) -> Value {
    parse(text, options).unwrap()
}

/// Parses `text`, panicking unless it fails.
pub fn parse_err(text: &str, options: Options) -> Error {
    parse(text, options).unwrap_err()
}

/// Collects the whole token stream of the root element.
pub fn tokens(text: &str, options: Options) -> Vec<Result<Token>> {
    let mut reader = Reader::from_str(text, options);
    reader.read_element(true).collect()
}

/// Projects `text` into `T` through the serde layer.
pub fn project<T: serde::de::DeserializeOwned>(text: &str, options: Options) -> T {
    Reader::from_str(text, options)
        .parse_element_as::<T>(true)
        .unwrap()
}
