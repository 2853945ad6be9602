//! Reading local datasets and writing run artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;

use crate::describe::{ColumnSummary, STAT_ROWS};
use crate::error::{Error, Result};
use crate::normalize::{normalize, Normalized};
use crate::record::Record;

/// Timestamp format used in artifact file names
pub const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Read a JSON array of records from disk and normalize it
pub fn load_dataset(path: &Path) -> Result<Normalized> {
    let text = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&text)?;
    match value {
        Value::Array(items) => {
            let out = normalize(&items);
            tracing::info!("Loaded {} records from {}", out.records.len(), path.display());
            Ok(out)
        }
        Value::Object(_) => Err(Error::NotAnArray("an object")),
        Value::String(_) => Err(Error::NotAnArray("a string")),
        Value::Number(_) => Err(Error::NotAnArray("a number")),
        Value::Bool(_) => Err(Error::NotAnArray("a boolean")),
        Value::Null => Err(Error::NotAnArray("null")),
    }
}

/// `{dir}/{prefix}_{stamp}.{ext}`, with `_1`, `_2`, ... appended if taken
pub fn stamped_path(dir: &Path, prefix: &str, ext: &str, at: DateTime<Local>) -> PathBuf {
    let stem = format!("{}_{}", prefix, at.format(STAMP_FORMAT));
    let mut candidate = dir.join(format!("{}.{}", stem, ext));
    let mut n = 1;
    while candidate.exists() {
        candidate = dir.join(format!("{}_{}.{}", stem, n, ext));
        n += 1;
    }
    candidate
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Serialize JSON with four-space indentation
fn to_json_4<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Write the raw fetched records as `pokemons_{stamp}.json` under `dir`
pub fn write_fetch_artifact(dir: &Path, records: &[Record], at: DateTime<Local>) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let path = stamped_path(dir, "pokemons", "json", at);
    fs::write(&path, to_json_4(records)?)?;
    tracing::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(path)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn format_cell(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.6}", v)
    }
}

/// Render the description table as an HTML `<table>`
pub fn render_description_html(summary: &[ColumnSummary]) -> String {
    let mut html = String::new();
    html.push_str("<table border=\"1\" class=\"dataframe\">\n");
    html.push_str("  <thead>\n    <tr style=\"text-align: right;\">\n      <th></th>\n");
    for col in summary {
        html.push_str(&format!("      <th>{}</th>\n", escape_html(&col.column)));
    }
    html.push_str("    </tr>\n  </thead>\n  <tbody>\n");

    for row in STAT_ROWS {
        html.push_str(&format!("    <tr>\n      <th>{}</th>\n", escape_html(row)));
        for col in summary {
            let cell = col.get(row).map(format_cell).unwrap_or_default();
            html.push_str(&format!("      <td>{}</td>\n", cell));
        }
        html.push_str("    </tr>\n");
    }

    html.push_str("  </tbody>\n</table>");
    html
}

/// Write `Pokemon_Report_{stamp}.html` under `dir`
pub fn write_report(dir: &Path, summary: &[ColumnSummary], at: DateTime<Local>) -> Result<PathBuf> {
    ensure_dir(dir)?;
    let path = stamped_path(dir, "Pokemon_Report", "html", at);
    fs::write(&path, render_description_html(summary))?;
    tracing::info!("Report generated: {}", path.display());
    Ok(path)
}
