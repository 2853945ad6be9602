//! Terminal rendering: record tables, bar charts, summary blocks

use anyhow::Result;
use pokepipe::{Metric, Record};
use serde_json::Value;

use crate::cli::OutputFormat;

/// Columns shown for fetched creatures
pub const FETCH_COLUMNS: &[&str] = &[
    "id",
    "name",
    "type_1",
    "type_2",
    "hp",
    "attack",
    "defense",
    "speed",
    "total_power",
];

/// Columns shown for local datasets
pub const EXPLORE_COLUMNS: &[&str] = &[
    "name",
    "main_type",
    "hp",
    "attack",
    "defense",
    "speed",
    "power_score",
];

const BAR_WIDTH: usize = 40;

/// Get a field of a record as JSON
pub fn field_json(record: &Record, field: &str) -> Value {
    match field {
        "id" => record.id.map(Value::from).unwrap_or(Value::Null),
        "name" => Value::from(record.name.as_str()),
        "type_1" | "main_type" => Value::from(record.main_type.as_str()),
        "type_2" => record
            .type_2
            .as_deref()
            .map(Value::from)
            .unwrap_or(Value::Null),
        "hp" => Value::from(record.stats.hp),
        "attack" => Value::from(record.stats.attack),
        "defense" => Value::from(record.stats.defense),
        "speed" => Value::from(record.stats.speed),
        "power_score" => Value::from(Metric::PowerScore.value(record)),
        "total_power" => Value::from(Metric::TotalPower.value(record)),
        _ => Value::Null,
    }
}

/// Get a field of a record as display text (empty when absent)
pub fn field_value(record: &Record, field: &str) -> String {
    match field_json(record, field) {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Display width for a column
fn field_display_width(field: &str) -> usize {
    match field {
        "id" => 4,
        "name" => 14,
        "type_1" | "type_2" | "main_type" => 10,
        "hp" | "speed" => 5,
        "attack" | "defense" => 7,
        _ => 11,
    }
}

/// Escape a string for CSV output
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Render records in the requested format
pub fn render_records(records: &[&Record], columns: &[&str], format: OutputFormat) -> Result<String> {
    let mut out = String::new();

    match format {
        OutputFormat::Json => {
            let rows: Vec<Value> = records
                .iter()
                .map(|r| {
                    let obj: serde_json::Map<String, Value> = columns
                        .iter()
                        .map(|c| ((*c).to_string(), field_json(r, c)))
                        .collect();
                    Value::Object(obj)
                })
                .collect();
            out.push_str(&serde_json::to_string_pretty(&rows)?);
            out.push('\n');
        }
        OutputFormat::Csv => {
            out.push_str(&columns.join(","));
            out.push('\n');
            for r in records {
                let values: Vec<String> = columns
                    .iter()
                    .map(|c| escape_csv(&field_value(r, c)))
                    .collect();
                out.push_str(&values.join(","));
                out.push('\n');
            }
        }
        OutputFormat::Table => {
            let col_widths: Vec<usize> = columns.iter().map(|c| field_display_width(c)).collect();

            let header: String = columns
                .iter()
                .zip(&col_widths)
                .map(|(c, w)| format!("{:<width$}", c, width = w))
                .collect::<Vec<_>>()
                .join(" ");
            out.push_str(header.trim_end());
            out.push('\n');
            out.push_str(&"-".repeat(header.trim_end().chars().count()));
            out.push('\n');

            for r in records {
                let row: String = columns
                    .iter()
                    .zip(&col_widths)
                    .map(|(c, w)| {
                        let val = field_value(r, c);
                        let truncated = if val.chars().count() > *w {
                            let mut s: String = val.chars().take(*w - 1).collect();
                            s.push('…');
                            s
                        } else {
                            val
                        };
                        format!("{:<width$}", truncated, width = w)
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                out.push_str(row.trim_end());
                out.push('\n');
            }
        }
    }

    Ok(out)
}

/// Horizontal bar chart scaled so the largest value spans the full width
pub fn bar_chart(title: &str, rows: &[(String, f64)]) -> String {
    let mut out = format!("{}\n", title);
    if rows.is_empty() {
        out.push_str("  (no data)\n");
        return out;
    }

    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max = rows.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);

    for (label, value) in rows {
        let len = if max > 0.0 {
            ((value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        let shown = if value.fract() == 0.0 {
            format!("{}", value)
        } else {
            format!("{:.1}", value)
        };
        out.push_str(&format!(
            "  {:<lw$} {} {}\n",
            label,
            "█".repeat(len),
            shown,
            lw = label_width
        ));
    }
    out
}

/// Free-text summary of a table
pub fn summary_text(records: &[Record], metric: Metric) -> String {
    let Ok(strongest) = pokepipe::strongest(&records.iter().collect::<Vec<_>>(), metric) else {
        return "No records to summarize.".to_string();
    };
    let types = pokepipe::distinct_types(records).len();
    let avg_attack = pokepipe::mean_of(records, |r| r.stats.attack).unwrap_or_default();
    let avg_defense = pokepipe::mean_of(records, |r| r.stats.defense).unwrap_or_default();
    let avg_speed = pokepipe::mean_of(records, |r| r.stats.speed).unwrap_or_default();

    format!(
        "{} creatures across {} types were analyzed. The strongest is {} with a {} of {}.\n\
         Average attack is {:.1}, average defense {:.1}, and average speed {:.1}.",
        records.len(),
        types,
        strongest.name,
        metric,
        metric.value(strongest),
        avg_attack,
        avg_defense,
        avg_speed
    )
}
