//! Coerce heterogeneous creature records into uniform [`Record`]s.
//!
//! Local datasets come from many dumps with inconsistent schemas: the type
//! may live in `type_1`, `type` or a `types` list, and any stat column may
//! be missing entirely. Normalization never rejects a record.

use serde_json::{Map, Value};

use crate::record::{Record, StatField, Stats, UNKNOWN_NAME, UNKNOWN_TYPE};

/// Output of [`normalize`]
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub records: Vec<Record>,
    /// Stat columns absent from every input record, filled with zero
    pub defaulted_columns: Vec<StatField>,
    /// Per-record holes inside a present column, filled with zero
    pub missing_values: usize,
    /// Values that were present but not a usable number
    pub coerced_values: usize,
}

/// Normalize a sequence of raw JSON records
pub fn normalize(raw: &[Value]) -> Normalized {
    let empty = Map::new();
    let objects: Vec<&Map<String, Value>> = raw
        .iter()
        .map(|v| v.as_object().unwrap_or(&empty))
        .collect();

    let defaulted_columns: Vec<StatField> = StatField::ALL
        .iter()
        .copied()
        .filter(|field| !objects.iter().any(|o| o.contains_key(field.column())))
        .collect();

    for field in &defaulted_columns {
        tracing::debug!("Column '{}' absent from input, defaulting to 0", field);
    }

    let mut out = Normalized {
        defaulted_columns,
        ..Default::default()
    };

    for (index, obj) in objects.iter().enumerate() {
        let mut stats = Stats::default();

        for field in StatField::ALL {
            if out.defaulted_columns.contains(field) {
                continue;
            }
            match obj.get(field.column()) {
                None | Some(Value::Null) => {
                    tracing::warn!("Record {} has no '{}', using 0", index, field);
                    out.missing_values += 1;
                }
                Some(value) => match coerce_stat(value) {
                    Some(v) => field.set(&mut stats, v),
                    None => {
                        tracing::warn!("Record {} has non-numeric '{}': {}", index, field, value);
                        out.coerced_values += 1;
                    }
                },
            }
        }

        out.records.push(Record {
            id: obj.get("id").and_then(coerce_stat).filter(|id| *id > 0),
            name: obj
                .get("name")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .unwrap_or(UNKNOWN_NAME)
                .to_string(),
            main_type: resolve_main_type(obj),
            type_2: None,
            stats,
        });
    }

    out
}

/// Resolve the single main type of a record.
///
/// Precedence: `type_1`, then `type`, then the first entry of `types`,
/// then [`UNKNOWN_TYPE`].
pub fn resolve_main_type(obj: &Map<String, Value>) -> String {
    if let Some(t) = obj.get("type_1").and_then(type_name) {
        return t;
    }
    if let Some(t) = obj.get("type").and_then(type_name) {
        return t;
    }
    if let Some(t) = obj
        .get("types")
        .and_then(Value::as_array)
        .and_then(|types| types.first())
        .and_then(type_name)
    {
        return t;
    }
    UNKNOWN_TYPE.to_string()
}

/// Accepts a bare string or a catalog wrapper (`{"type": {"name": ...}}`)
fn type_name(value: &Value) -> Option<String> {
    let name = match value {
        Value::String(s) => Some(s.as_str()),
        Value::Object(o) => o
            .get("type")
            .and_then(|t| t.get("name"))
            .or_else(|| o.get("name"))
            .and_then(Value::as_str),
        _ => None,
    }?;
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Coerce a JSON value to a non-negative integer stat.
///
/// Negative numbers clamp to 0, floats truncate, numeric strings parse and
/// values above `u32::MAX` saturate.
fn coerce_stat(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Some(u32::try_from(u).unwrap_or(u32::MAX))
            } else if n.as_i64().is_some() {
                Some(0)
            } else {
                n.as_f64().filter(|f| f.is_finite()).map(clamp_float)
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(clamp_float),
        _ => None,
    }
}

fn clamp_float(f: f64) -> u32 {
    if f <= 0.0 {
        0
    } else if f >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        f as u32
    }
}
