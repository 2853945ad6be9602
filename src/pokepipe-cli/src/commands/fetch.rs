//! Fetch pipeline: catalog → artifact → dashboard → report

use anyhow::{bail, Context, Result};
use pokepipe::{
    count_by_type, describe, fetch_records, query, write_fetch_artifact, write_report, Catalog,
    Error, FetchCache, FetchOutcome, HttpCatalog, Metric, Record, RecordFilter, TypeSelector,
};
use std::io::{IsTerminal, Write};

use crate::cli::{FetchArgs, OutputFormat};
use crate::config::Config;
use crate::render::{bar_chart, render_records, summary_text, FETCH_COLUMNS};

const METRIC: Metric = Metric::TotalPower;

/// Handle `fetch`
pub fn handle(args: &FetchArgs) -> Result<()> {
    let config = Config::load()?;
    let api_base = config.api_base(args.api_base.as_deref());
    let catalog = HttpCatalog::with_timeout(&api_base, config.timeout());
    let source = catalog.base();
    tracing::debug!("Fetching {} creatures from {}", args.count, source);

    let mut cache = if args.no_cache {
        FetchCache::in_memory()
    } else {
        FetchCache::on_disk(Config::cache_dir()?)
    };
    if args.refresh && cache.invalidate(source, args.count)? {
        tracing::info!("Dropped cached fetch of {} creatures", args.count);
    }

    let (outcome, cached) = fetch_cached(&catalog, &mut cache, source, args.count)?;
    if outcome.records.is_empty() {
        bail!(
            "No creatures could be fetched from {} ({} requests failed)",
            source,
            outcome.skipped.len()
        );
    }

    let now = chrono::Local::now();
    let data_dir = config.data_dir(args.data_dir.as_deref());
    let artifact = write_fetch_artifact(&data_dir, &outcome.records, now)
        .with_context(|| format!("Failed to write fetch artifact to {}", data_dir.display()))?;

    let filter = RecordFilter {
        selector: args.type_filter.parse()?,
        min_power: args.min_power.unwrap_or(0),
        metric: METRIC,
    };

    let out = if args.format == OutputFormat::Table {
        let mut text = format!(
            "{} Pokémon fetched successfully!{}\n",
            outcome.records.len(),
            if cached { " (cached)" } else { "" }
        );
        if !outcome.skipped.is_empty() {
            let ids: Vec<String> = outcome.skipped.iter().map(|i| i.to_string()).collect();
            text.push_str(&format!("Skipped ids: {}\n", ids.join(", ")));
        }
        text.push_str(&format!("Raw data saved to {}\n\n", artifact.display()));
        text.push_str(&render_dashboard(&outcome.records, &filter)?);
        text
    } else {
        render_records(&filter.apply(&outcome.records), FETCH_COLUMNS, args.format)?
    };
    print!("{}", out);

    if !args.no_report {
        let report_dir = config.report_dir(args.report_dir.as_deref());
        let summary = describe(&outcome.records, METRIC);
        let path = write_report(&report_dir, &summary, now)
            .with_context(|| format!("Failed to write report to {}", report_dir.display()))?;
        if args.format == OutputFormat::Table {
            println!("\nReport generated: {}", path.display());
        }
    }

    Ok(())
}

/// Fetch `count` creatures, reusing a cached result when one exists.
///
/// Returns the outcome and whether it came from the cache. Runs where every
/// request failed are not cached.
pub fn fetch_cached<C: Catalog + ?Sized>(
    catalog: &C,
    cache: &mut FetchCache,
    api_base: &str,
    count: u32,
) -> Result<(FetchOutcome, bool)> {
    if let Some(entry) = cache.get(api_base, count) {
        tracing::info!("Using cached fetch of {} creatures from {}", count, entry.created_at);
        return Ok((entry.outcome.clone(), true));
    }

    let show_progress = std::io::stderr().is_terminal();
    let outcome = fetch_records(catalog, count, |id, total| {
        if show_progress {
            eprint!("\rFetching Pokémon data... {}/{}", id, total);
            let _ = std::io::stderr().flush();
        }
    });
    if show_progress {
        eprintln!();
    }

    if !outcome.records.is_empty() {
        cache
            .put(api_base, count, outcome.clone())
            .context("Failed to store fetch result in cache")?;
    }
    Ok((outcome, false))
}

/// Strongest record, attack and type charts, summary and table
pub fn render_dashboard(records: &[Record], filter: &RecordFilter) -> Result<String> {
    let mut out = String::new();

    out.push_str("== Strongest Pokémon ==\n");
    let view = match query(records, filter) {
        Ok(result) => {
            out.push_str(&format!(
                "{} (Total Power: {})\n",
                result.strongest.name,
                METRIC.value(result.strongest)
            ));
            result.matches
        }
        Err(Error::EmptyResult) => {
            out.push_str(&format!(
                "No records match filter (type {}, total power >= {})\n",
                filter.selector, filter.min_power
            ));
            Vec::new()
        }
        Err(e) => return Err(e.into()),
    };
    if filter.selector != TypeSelector::All || filter.min_power > 0 {
        out.push_str(&format!(
            "Filter: type {}, total power >= {} ({} of {} shown)\n",
            filter.selector,
            filter.min_power,
            view.len(),
            records.len()
        ));
    }

    out.push_str("\n== Pokémon Stats Overview ==\n");
    let attack: Vec<(String, f64)> = view
        .iter()
        .map(|r| (r.name.clone(), f64::from(r.stats.attack)))
        .collect();
    out.push_str(&bar_chart("Attack Power per Pokémon", &attack));
    out.push('\n');

    let types: Vec<(String, f64)> = count_by_type(view.iter().copied())
        .into_iter()
        .map(|(t, n)| (t, n as f64))
        .collect();
    out.push_str(&bar_chart("Distribution by Type", &types));

    out.push_str("\n== Summary ==\n");
    out.push_str(&summary_text(records, METRIC));
    out.push('\n');

    out.push_str("\n== Summary Table ==\n");
    out.push_str(&render_records(&view, FETCH_COLUMNS, OutputFormat::Table)?);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokepipe::fetch::{CatalogEntry, NamedResource, StatEntry, TypeSlot};
    use std::cell::Cell;

    struct FakeCatalog {
        calls: Cell<u32>,
        failing: Vec<u32>,
    }

    impl Catalog for FakeCatalog {
        fn fetch_entry(&self, id: u32) -> pokepipe::Result<CatalogEntry> {
            self.calls.set(self.calls.get() + 1);
            if self.failing.contains(&id) {
                return Err(Error::Status {
                    code: 404,
                    url: format!("fake://pokemon/{}", id),
                });
            }
            let named = |n: &str| NamedResource {
                name: n.to_string(),
                url: None,
            };
            Ok(CatalogEntry {
                name: format!("mon{}", id),
                types: vec![TypeSlot {
                    slot: 1,
                    kind: named(if id % 2 == 0 { "water" } else { "fire" }),
                }],
                stats: ["hp", "attack", "defense", "speed"]
                    .iter()
                    .map(|s| StatEntry {
                        base_stat: id * 10,
                        stat: named(s),
                    })
                    .collect(),
            })
        }
    }

    fn catalog(failing: &[u32]) -> FakeCatalog {
        FakeCatalog {
            calls: Cell::new(0),
            failing: failing.to_vec(),
        }
    }

    const BASE: &str = "fake://api";

    #[test]
    fn test_fetch_cached_reuses_result() {
        let source = catalog(&[]);
        let mut cache = FetchCache::in_memory();

        let (first, cached) = fetch_cached(&source, &mut cache, BASE, 10).unwrap();
        assert!(!cached);
        assert_eq!(first.records.len(), 10);
        assert_eq!(source.calls.get(), 10);

        let (second, cached) = fetch_cached(&source, &mut cache, BASE, 10).unwrap();
        assert!(cached);
        assert_eq!(second.records, first.records);
        assert_eq!(source.calls.get(), 10);

        cache.invalidate(BASE, 10).unwrap();
        let (_, cached) = fetch_cached(&source, &mut cache, BASE, 10).unwrap();
        assert!(!cached);
        assert_eq!(source.calls.get(), 20);
    }

    #[test]
    fn test_total_failure_not_cached() {
        let source = catalog(&[1, 2, 3]);
        let mut cache = FetchCache::in_memory();
        let (outcome, _) = fetch_cached(&source, &mut cache, BASE, 3).unwrap();
        assert!(outcome.records.is_empty());
        assert!(cache.get(BASE, 3).is_none());
    }

    #[test]
    fn test_dashboard_sections() {
        let source = catalog(&[3]);
        let outcome = fetch_records(&source, 5, |_, _| {});
        let text = render_dashboard(&outcome.records, &RecordFilter {
            metric: METRIC,
            ..Default::default()
        })
        .unwrap();

        assert!(text.contains("Mon5 (Total Power: 200)"));
        assert!(text.contains("Attack Power per Pokémon"));
        assert!(text.contains("Distribution by Type"));
        assert!(text.contains("4 creatures across 2 types"));
        assert!(!text.contains("Mon3"));
    }

    #[test]
    fn test_dashboard_empty_filter() {
        let source = catalog(&[]);
        let outcome = fetch_records(&source, 3, |_, _| {});
        let filter = RecordFilter {
            selector: "grass".parse().unwrap(),
            min_power: 0,
            metric: METRIC,
        };
        let text = render_dashboard(&outcome.records, &filter).unwrap();
        assert!(text.contains("No records match filter"));
        assert!(text.contains("(no data)"));
    }
}
