//! Per-type aggregates behind the type-level charts.
//!
//! Ties are broken by the order in which a type first appears in the table.

use std::collections::HashMap;

use crate::record::{Metric, Record};

/// Group records by main type, preserving first-seen order
fn group_by_type<'a, I>(records: I) -> Vec<(&'a str, Vec<&'a Record>)>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&Record>)> = Vec::new();

    for r in records {
        let slot = *index.entry(r.main_type.as_str()).or_insert_with(|| {
            groups.push((r.main_type.as_str(), Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(r);
    }
    groups
}

/// Mean metric per main type, highest mean first
pub fn mean_by_type<'a, I>(records: I, metric: Metric) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut means: Vec<(String, f64)> = group_by_type(records)
        .into_iter()
        .map(|(kind, members)| {
            let total: u64 = members.iter().map(|r| metric.value(r)).sum();
            (kind.to_string(), total as f64 / members.len() as f64)
        })
        .collect();

    // Stable sort keeps first-seen order among equal means
    means.sort_by(|a, b| b.1.total_cmp(&a.1));
    means
}

/// Number of records per main type, most common first
pub fn count_by_type<'a, I>(records: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut counts: Vec<(String, usize)> = group_by_type(records)
        .into_iter()
        .map(|(kind, members)| (kind.to_string(), members.len()))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Arithmetic mean of a stat over the records, `None` when empty
pub fn mean_of<'a, I, F>(records: I, stat: F) -> Option<f64>
where
    I: IntoIterator<Item = &'a Record>,
    F: Fn(&Record) -> u32,
{
    let (sum, n) = records
        .into_iter()
        .fold((0u64, 0usize), |(s, n), r| (s + u64::from(stat(r)), n + 1));
    (n > 0).then(|| sum as f64 / n as f64)
}
