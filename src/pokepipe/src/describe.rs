//! Descriptive statistics over the numeric columns of a table.

use serde::Serialize;

use crate::record::{Metric, Record, StatField};

/// Row labels, in display order
pub const STAT_ROWS: &[&str] = &["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Summary of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1); NaN for a single value
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub max: f64,
}

impl ColumnSummary {
    fn from_values(column: &str, mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);

        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let std = if n > 1 {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            f64::NAN
        };

        Some(Self {
            column: column.to_string(),
            count: n,
            mean,
            std,
            min: values[0],
            p25: quantile(&values, 0.25),
            p50: quantile(&values, 0.50),
            p75: quantile(&values, 0.75),
            max: values[n - 1],
        })
    }

    /// Value for a row label from [`STAT_ROWS`]
    pub fn get(&self, row: &str) -> Option<f64> {
        match row {
            "count" => Some(self.count as f64),
            "mean" => Some(self.mean),
            "std" => Some(self.std),
            "min" => Some(self.min),
            "25%" => Some(self.p25),
            "50%" => Some(self.p50),
            "75%" => Some(self.p75),
            "max" => Some(self.max),
            _ => None,
        }
    }
}

/// Linear interpolation between closest ranks; `sorted` must be non-empty
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Describe `id` (when every record has one), the four stats and `metric`
pub fn describe(records: &[Record], metric: Metric) -> Vec<ColumnSummary> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut columns: Vec<(String, Vec<f64>)> = Vec::new();

    let ids: Option<Vec<f64>> = records
        .iter()
        .map(|r| r.id.map(f64::from))
        .collect();
    if let Some(ids) = ids {
        columns.push(("id".to_string(), ids));
    }

    for field in StatField::ALL {
        columns.push((
            field.column().to_string(),
            records
                .iter()
                .map(|r| f64::from(field.get(&r.stats)))
                .collect(),
        ));
    }
    columns.push((
        metric.column().to_string(),
        records.iter().map(|r| metric.value(r) as f64).collect(),
    ));

    columns
        .into_iter()
        .filter_map(|(name, values)| ColumnSummary::from_values(&name, values))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::tests::scored;

    #[test]
    fn test_quantiles_interpolate() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert!((quantile(&v, 0.25) - 1.75).abs() < 1e-9);
        assert!((quantile(&v, 0.5) - 2.5).abs() < 1e-9);
        assert!((quantile(&v, 0.75) - 3.25).abs() < 1e-9);
    }

    #[test]
    fn test_describe_columns() {
        let table = vec![
            scored("a", "fire", 10),
            scored("b", "fire", 20),
            scored("c", "fire", 30),
        ];
        let summary = describe(&table, Metric::TotalPower);
        let names: Vec<&str> = summary.iter().map(|c| c.column.as_str()).collect();
        // No ids on these records
        assert_eq!(
            names,
            vec!["hp", "attack", "defense", "speed", "total_power"]
        );

        let hp = &summary[0];
        assert_eq!(hp.count, 3);
        assert!((hp.mean - 20.0).abs() < 1e-9);
        assert!((hp.std - 10.0).abs() < 1e-9);
        assert_eq!(hp.min, 10.0);
        assert_eq!(hp.p50, 20.0);
        assert_eq!(hp.max, 30.0);
        assert_eq!(hp.get("75%"), Some(25.0));
    }

    #[test]
    fn test_describe_includes_ids() {
        let mut a = scored("a", "fire", 10);
        a.id = Some(1);
        let summary = describe(&[a], Metric::PowerScore);
        assert_eq!(summary[0].column, "id");
        assert!(summary[0].std.is_nan());
    }

    #[test]
    fn test_describe_empty() {
        assert!(describe(&[], Metric::PowerScore).is_empty());
    }
}
