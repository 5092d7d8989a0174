//! Assembles the generic [`Value`] tree from a token stream.

use crate::error::{Error, ErrorKind, Result};
use crate::token::{Token, TokenKind};
use crate::value::{Map, Number, Value};

enum Parent {
    Object(Map, Option<String>),
    Array(Vec<Value>),
}

/// Consumes the tokens of one element and builds its value.
///
/// Comments are skipped, the first error token is propagated verbatim, and
/// a pending property name whose value never arrived (truncated input) is
/// dropped with its object.
pub(crate) fn build_value<I>(tokens: &mut I) -> Result<Value>
where
    I: Iterator<Item = Result<Token>>,
{
    let mut stack: Vec<Parent> = Vec::new();
    let mut at = 0usize;
    for item in tokens {
        let token = item?;
        at = token.end();
        let completed = match token.kind {
            TokenKind::Comment => continue,
            TokenKind::PropertyName => {
                if let Some(Parent::Object(_, pending)) = stack.last_mut() {
                    *pending = Some(token.value);
                }
                continue;
            }
            TokenKind::StartObject => {
                stack.push(Parent::Object(Map::new(), None));
                continue;
            }
            TokenKind::StartArray => {
                stack.push(Parent::Array(Vec::new()));
                continue;
            }
            TokenKind::EndObject | TokenKind::EndArray => match stack.pop() {
                Some(Parent::Object(map, _)) => Value::Object(map),
                Some(Parent::Array(items)) => Value::Array(items),
                None => {
                    return Err(Error::new(
                        ErrorKind::Syntax("unexpected container close"),
                        token.position,
                    ));
                }
            },
            TokenKind::Null => Value::Null,
            TokenKind::True => Value::Bool(true),
            TokenKind::False => Value::Bool(false),
            TokenKind::String => Value::String(token.value),
            TokenKind::Number => Value::Number(Number::from_lexeme(token.value)),
        };
        match stack.last_mut() {
            None => return Ok(completed),
            Some(Parent::Array(items)) => items.push(completed),
            Some(Parent::Object(map, pending)) => {
                let name = pending
                    .take()
                    .expect("the structural parser emits a name before each member value");
                map.insert(name, completed);
            }
        }
    }
    Err(Error::new(ErrorKind::UnexpectedEndOfInput, at))
}
