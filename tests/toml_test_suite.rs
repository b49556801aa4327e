//! A hand-written subset of representative valid/invalid TOML fixtures.
//!
//! The full upstream `toml-test` corpus is an external collaborator
//! exercised against `src/bin/toml-test-decoder.rs` in CI, not vendored
//! into this crate's own test suite (spec.md §1 scope); this file covers
//! the shapes that corpus is built from, so a regression here is caught
//! before a CI run against the real harness would.

use toml_decoder::{parse, Value};

#[test]
fn valid_basic_document() {
    let input = r#"
title = "TOML Example"

[owner]
name = "Tom Preston-Werner"
dob = 1979-05-27T07:32:00-08:00

[database]
enabled = true
ports = [ 8000, 8001, 8002 ]
data = [ ["gamma", "delta"], [1, 2] ]

[servers]

[servers.alpha]
ip = "10.0.0.1"
role = "frontend"

[servers.beta]
ip = "10.0.0.2"
role = "backend"
"#;
    let doc = parse(input).unwrap();
    let table = doc.as_table().unwrap();
    assert_eq!(table.get("title"), Some(&Value::String("TOML Example".to_string())));
    let servers = table.get("servers").unwrap().as_table().unwrap();
    assert_eq!(
        servers.get("alpha").unwrap().as_table().unwrap().get("ip"),
        Some(&Value::String("10.0.0.1".to_string()))
    );
    assert_eq!(
        servers.get("beta").unwrap().as_table().unwrap().get("role"),
        Some(&Value::String("backend".to_string()))
    );
}

#[test]
fn valid_array_of_tables_with_inline_values() {
    let input = r#"
[[products]]
name = "Hammer"
sku = 738594937

[[products]]

[[products]]
name = "Nail"
sku = 284758393
color = "gray"
"#;
    let doc = parse(input).unwrap();
    let products = doc.as_table().unwrap().get("products").unwrap().as_array().unwrap();
    assert_eq!(products.len(), 3);
    assert!(products[1].as_table().unwrap().is_empty());
    assert_eq!(products[2].as_table().unwrap().get("color"), Some(&Value::String("gray".to_string())));
}

#[test]
fn valid_inline_tables_and_arrays() {
    let input = r#"
name = { first = "Tom", last = "Preston-Werner" }
points = [ { x = 1, y = 2 }, { x = 3, y = 4 } ]
"#;
    let doc = parse(input).unwrap();
    let table = doc.as_table().unwrap();
    let name = table.get("name").unwrap().as_table().unwrap();
    assert_eq!(name.get("first"), Some(&Value::String("Tom".to_string())));
    let points = table.get("points").unwrap().as_array().unwrap();
    assert_eq!(points.len(), 2);
}

#[test]
fn valid_literal_and_multiline_strings() {
    let input = "regex = '<\\i\\c*\\s*>'\nlines = \"\"\"\nLine 1\nLine 2\"\"\"\n";
    let doc = parse(input).unwrap();
    let table = doc.as_table().unwrap();
    assert_eq!(table.get("regex"), Some(&Value::String("<\\i\\c*\\s*>".to_string())));
    assert_eq!(table.get("lines"), Some(&Value::String("Line 1\nLine 2".to_string())));
}

#[test]
fn valid_numeric_forms() {
    let input = "int1 = 99\nint2 = 0x1A\nint3 = 0o17\nint4 = 0b1101\nflt1 = 6.02e23\nflt2 = inf\nflt3 = nan\n";
    let doc = parse(input).unwrap();
    let table = doc.as_table().unwrap();
    assert_eq!(table.get("int1"), Some(&Value::Integer(99)));
    assert_eq!(table.get("int2"), Some(&Value::Integer(26)));
    assert_eq!(table.get("int3"), Some(&Value::Integer(15)));
    assert_eq!(table.get("int4"), Some(&Value::Integer(13)));
    assert_eq!(table.get("flt2"), Some(&Value::Float(f64::INFINITY)));
}

#[test]
fn invalid_duplicate_table_header() {
    let input = "[a]\nb = 1\n\n[a]\nc = 2\n";
    assert!(parse(input).is_err());
}

#[test]
fn invalid_leading_zero_integer() {
    assert!(parse("n = 0123\n").is_err());
}

#[test]
fn invalid_control_character_in_string() {
    let input = "s = \"a\u{0001}b\"\n";
    assert!(parse(input).is_err());
}

#[test]
fn invalid_inline_table_trailing_comma() {
    assert!(parse("t = { a = 1, }\n").is_err());
}

#[test]
fn invalid_array_of_tables_colliding_with_table() {
    let input = "[fruit]\nname = \"apple\"\n\n[[fruit]]\nname = \"banana\"\n";
    assert!(parse(input).is_err());
}
