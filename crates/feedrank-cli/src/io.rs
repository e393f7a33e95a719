//! JSON input and output for the CLI commands.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context;
use feedrank_core::{CanonicalItem, RawRecord};
use serde::Serialize;
use serde_json::Value;

/// Read the whole input document from `path`, or stdin when `None`.
pub(crate) fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read input from stdin")?;
            Ok(buf)
        }
    }
}

/// Parse a JSON array of raw source records.
///
/// Elements that are not objects become empty records so the batch keeps
/// its length; the normalizer then fills them with defaults.
pub(crate) fn parse_records(input: &str) -> anyhow::Result<Vec<RawRecord>> {
    let value: Value = serde_json::from_str(input).context("input is not valid JSON")?;
    let Value::Array(elements) = value else {
        anyhow::bail!("input must be a JSON array of records");
    };

    let records = elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| match element {
            Value::Object(map) => map,
            other => {
                tracing::warn!(
                    index,
                    kind = json_kind(&other),
                    "non-object record treated as empty"
                );
                RawRecord::new()
            }
        })
        .collect();

    Ok(records)
}

/// Parse a JSON array of canonical items, as written by `normalize` or `dedup`.
pub(crate) fn parse_items(input: &str) -> anyhow::Result<Vec<CanonicalItem>> {
    serde_json::from_str(input).context("input must be a JSON array of canonical items")
}

pub(crate) fn write_json<W, T>(mut out: W, value: &T, pretty: bool) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize + ?Sized,
{
    if pretty {
        serde_json::to_writer_pretty(&mut out, value)?;
    } else {
        serde_json::to_writer(&mut out, value)?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
