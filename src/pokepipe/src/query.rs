//! Type/threshold filtering and strongest-record selection.

use crate::error::{Error, Result};
use crate::record::{Metric, Record};

/// Type selector for filtering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TypeSelector {
    /// No type filter
    #[default]
    All,
    /// Exact `main_type` match
    Exact(String),
}

impl TypeSelector {
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::All => true,
            Self::Exact(t) => record.main_type == *t,
        }
    }
}

impl std::str::FromStr for TypeSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s == "*" || s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            Ok(Self::Exact(s.to_string()))
        }
    }
}

impl std::fmt::Display for TypeSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Exact(t) => write!(f, "{}", t),
        }
    }
}

/// Filter parameters
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub selector: TypeSelector,
    /// Inclusive lower bound on the metric
    pub min_power: u64,
    pub metric: Metric,
}

impl RecordFilter {
    pub fn matches(&self, record: &Record) -> bool {
        self.selector.matches(record) && self.metric.value(record) >= self.min_power
    }

    /// Records passing the filter, in table order
    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|r| self.matches(r)).collect()
    }
}

/// The record with the highest metric; ties go to the earliest record.
///
/// Fails with [`Error::EmptyResult`] when `records` is empty.
pub fn strongest<'a>(records: &[&'a Record], metric: Metric) -> Result<&'a Record> {
    let mut best: Option<&'a Record> = None;
    for &r in records {
        match best {
            Some(b) if metric.value(r) <= metric.value(b) => {}
            _ => best = Some(r),
        }
    }
    best.ok_or(Error::EmptyResult)
}

/// A filtered subview together with its strongest record
#[derive(Debug, Clone)]
pub struct QueryResult<'a> {
    pub matches: Vec<&'a Record>,
    pub strongest: &'a Record,
}

/// Filter `records` and pick the strongest match
pub fn query<'a>(records: &'a [Record], filter: &RecordFilter) -> Result<QueryResult<'a>> {
    let matches = filter.apply(records);
    let strongest = strongest(&matches, filter.metric)?;
    Ok(QueryResult { matches, strongest })
}

/// Smallest and largest metric values in the table
pub fn metric_range(records: &[Record], metric: Metric) -> Option<(u64, u64)> {
    let values = records.iter().map(|r| metric.value(r));
    let min = values.clone().min()?;
    let max = values.max()?;
    Some((min, max))
}

/// Distinct main types in first-seen order
pub fn distinct_types(records: &[Record]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for r in records {
        if !seen.contains(&r.main_type.as_str()) {
            seen.push(&r.main_type);
        }
    }
    seen
}
