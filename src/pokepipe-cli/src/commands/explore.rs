//! Local dataset dashboard

use anyhow::{Context, Result};
use pokepipe::{
    distinct_types, load_dataset, mean_by_type, metric_range, query, Error, Metric, Record,
    RecordFilter, TypeSelector,
};

use crate::cli::{ExploreArgs, OutputFormat};
use crate::render::{bar_chart, render_records, EXPLORE_COLUMNS};

const METRIC: Metric = Metric::PowerScore;

/// Handle `explore`
pub fn handle(args: &ExploreArgs) -> Result<()> {
    let dataset = load_dataset(&args.input)
        .with_context(|| format!("Failed to load dataset {}", args.input.display()))?;

    if !dataset.defaulted_columns.is_empty() {
        let cols: Vec<&str> = dataset.defaulted_columns.iter().map(|c| c.column()).collect();
        tracing::info!("Columns missing from dataset, filled with 0: {}", cols.join(", "));
    }
    if dataset.missing_values + dataset.coerced_values > 0 {
        tracing::warn!(
            "{} missing and {} non-numeric stat values replaced with 0",
            dataset.missing_values,
            dataset.coerced_values
        );
    }

    let records = dataset.records;
    let Some(range) = metric_range(&records, METRIC) else {
        println!("Dataset {} contains no records", args.input.display());
        return Ok(());
    };

    let selector: TypeSelector = args.type_filter.parse()?;
    if let TypeSelector::Exact(t) = &selector {
        if !distinct_types(&records).contains(&t.as_str()) {
            tracing::warn!("No creature in the dataset has main type '{}'", t);
        }
    }

    let filter = RecordFilter {
        selector,
        min_power: clamp_threshold(args.min_power, range),
        metric: METRIC,
    };

    if args.format == OutputFormat::Table {
        print!("{}", render_explore(&records, &filter)?);
    } else {
        print!("{}", render_records(&filter.apply(&records), EXPLORE_COLUMNS, args.format)?);
    }
    Ok(())
}

/// Keep a requested threshold inside the observed `(min, max)` range
pub fn clamp_threshold(requested: Option<u64>, (min, max): (u64, u64)) -> u64 {
    match requested {
        None => min,
        Some(v) => {
            let clamped = v.clamp(min, max);
            if clamped != v {
                tracing::info!("Minimum power {} clamped to {}", v, clamped);
            }
            clamped
        }
    }
}

/// Filters, strongest record, mean power by type, filtered table
pub fn render_explore(records: &[Record], filter: &RecordFilter) -> Result<String> {
    let mut out = String::new();

    let types = distinct_types(records);
    out.push_str(&format!("Types: All, {}\n", types.join(", ")));
    out.push_str(&format!(
        "Filter: type {}, power score >= {}\n\n",
        filter.selector, filter.min_power
    ));

    out.push_str("== Strongest ==\n");
    let view = match query(records, filter) {
        Ok(result) => {
            out.push_str(&format!(
                "{} ({}, Power Score: {})\n",
                result.strongest.name,
                result.strongest.main_type,
                METRIC.value(result.strongest)
            ));
            result.matches
        }
        Err(Error::EmptyResult) => {
            out.push_str("No records match filter\n");
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };

    out.push_str("\n== Power by Type ==\n");
    out.push_str(&bar_chart(
        "Mean power score by main type",
        &mean_by_type(records, METRIC),
    ));

    out.push_str(&format!(
        "\n== Records ({} of {}) ==\n",
        view.len(),
        records.len()
    ));
    out.push_str(&render_records(&view, EXPLORE_COLUMNS, OutputFormat::Table)?);
    Ok(out)
}
