//! `toml-test`-compatible decoder harness (spec.md §6).
//!
//! Grounded on `tomllib::src::bin::tomlkit`'s shape: `env_logger::init()` at
//! the top of `main`, stdin read in full up front, one pass over the parsed
//! result to produce the tool's output. Unlike `tomlkit`, which exposes a
//! `pirate`-based flag grammar for manipulating a document, this binary has
//! exactly one job — decode stdin and print the `toml-test` JSON projection
//! to stdout, or a diagnostic to stderr — so it carries none of `tomlkit`'s
//! CLI argument machinery.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use serde_json::json;
use toml_decoder::{parse_with_diagnostics, Table, Value};

fn main() -> ExitCode {
    env_logger::init();

    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        eprintln!("error reading stdin: {e}");
        return ExitCode::FAILURE;
    }

    match parse_with_diagnostics(&input) {
        Ok(value) => {
            let json = project(&value);
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            if serde_json::to_writer(&mut handle, &json).is_err() || writeln!(handle).is_err() {
                eprintln!("error writing output");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        },
        Err((_, diagnostics)) => {
            eprint!("{diagnostics}");
            ExitCode::FAILURE
        },
    }
}

/// Projects a decoded [`Value`] into the tagged JSON shape `toml-test`
/// expects: `{"type": "<tag>", "value": "<text>"}` for scalars, a plain
/// JSON array for TOML arrays, and a plain JSON object for TOML tables.
fn project(value: &Value) -> serde_json::Value {
    match value {
        Value::Table(t) => project_table(t),
        Value::Array(items) => serde_json::Value::Array(items.iter().map(project).collect()),
        scalar => json!({
            "type": scalar.type_str(),
            "value": scalar.to_string(),
        }),
    }
}

fn project_table(table: &Table) -> serde_json::Value {
    let mut map = serde_json::Map::with_capacity(table.len());
    for (k, v) in table {
        map.insert(k.clone(), project(v));
    }
    serde_json::Value::Object(map)
}
