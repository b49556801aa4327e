//! The public decoding façade.
//!
//! Grounded on `tomllib::TOMLParser::parse`'s ownership-passing shape
//! (`fn parse(self, input) -> (TOMLParser, ParseResult)`), simplified to a
//! plain function since this crate owns no manipulation/round-trip state to
//! hand back to the caller — spec.md §6 asks only for a one-shot decode.

use crate::error::{Diagnostics, Error};
use crate::parser::{node_into_value, Parser};
use crate::utf8;
use crate::value::Value;

/// Decodes a complete TOML 1.0.0 document into a [`Value`].
///
/// # Examples
///
/// ```
/// use toml_decoder::{parse, Value};
///
/// let doc = parse("title = \"TOML Example\"\n").unwrap();
/// assert_eq!(doc.as_table().unwrap().get("title"), Some(&Value::String("TOML Example".to_string())));
/// ```
pub fn parse(input: &str) -> Result<Value, Error> {
    utf8::validate(input.as_bytes())?;
    let root = Parser::new(input).parse()?;
    Ok(node_into_value(&root))
}

/// As [`parse`], but on failure returns a rendered [`Diagnostics`] alongside
/// the error, per spec.md §6.
pub fn parse_with_diagnostics(input: &str) -> Result<Value, (Error, Diagnostics)> {
    parse(input).map_err(|e| {
        let diag = Diagnostics::new(&e, input);
        (e, diag)
    })
}
