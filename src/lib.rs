//! A decoder for TOML 1.0.0 documents.
//!
//! This crate turns a TOML document into an owned [`Value`] tree: tables,
//! arrays, strings, integers, floats, booleans, and the four RFC 3339
//! date/time shapes TOML distinguishes. It does not preserve comments,
//! whitespace, or key order as written (key order *within* a table is
//! preserved — see [`Table`] — but the document's original formatting is
//! not retained anywhere), and it is a decoder only: there is no encoder.
//!
//! # Examples
//!
//! ```
//! use toml_decoder::parse;
//!
//! let doc = parse(r#"
//! title = "TOML Example"
//!
//! [owner]
//! name = "Tom Preston-Werner"
//! "#).unwrap();
//!
//! let owner = doc.as_table().unwrap().get("owner").unwrap().as_table().unwrap();
//! assert_eq!(owner.get("name").unwrap().to_string(), "Tom Preston-Werner");
//! ```
//!
//! On failure, [`parse_with_diagnostics`] renders a human-readable
//! diagnostic pointing at the offending line and column:
//!
//! ```
//! use toml_decoder::parse_with_diagnostics;
//!
//! let err = parse_with_diagnostics("a = 1\na = 2\n").unwrap_err();
//! eprintln!("{}", err.1);
//! ```

mod decode;
mod error;
mod parser;
mod scanner;
mod utf8;
mod value;

pub use decode::{parse, parse_with_diagnostics};
pub use error::{Diagnostics, Error, Position};
pub use value::{Date, DateTime, Table, Time, Value};
