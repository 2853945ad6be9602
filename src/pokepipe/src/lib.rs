//! # pokepipe
//!
//! PokéPipeline library - creature catalog fetching, normalization, and analysis.
//!
//! This library provides functionality to:
//! - Fetch creatures sequentially from a PokéAPI-compatible catalog
//! - Normalize heterogeneous local datasets into uniform records
//! - Filter by type and minimum power, and pick the strongest record
//! - Aggregate power by type and describe numeric columns
//! - Persist fetch artifacts and HTML reports, and cache fetch results
//!
//! ## Example
//!
//! ```no_run
//! use pokepipe::{fetch_records, query, HttpCatalog, Metric, RecordFilter, DEFAULT_API_BASE};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = HttpCatalog::new(DEFAULT_API_BASE);
//! let outcome = fetch_records(&catalog, 30, |_, _| {});
//!
//! let filter = RecordFilter {
//!     min_power: 300,
//!     metric: Metric::TotalPower,
//!     ..Default::default()
//! };
//! let result = query(&outcome.records, &filter)?;
//! println!("Strongest: {}", result.strongest.name);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod cache;
pub mod describe;
pub mod error;
pub mod fetch;
#[cfg(feature = "http")]
pub mod http;
pub mod normalize;
pub mod query;
pub mod record;
pub mod store;

#[doc(inline)]
pub use aggregate::{count_by_type, mean_by_type, mean_of};
#[doc(inline)]
pub use cache::{cache_key, CacheEntry, FetchCache};
#[doc(inline)]
pub use describe::{describe, ColumnSummary};
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use fetch::{fetch_records, Catalog, CatalogEntry, FetchOutcome};
#[cfg(feature = "http")]
#[doc(inline)]
pub use http::{HttpCatalog, DEFAULT_API_BASE, DEFAULT_TIMEOUT};
#[doc(inline)]
pub use normalize::{normalize, Normalized};
#[doc(inline)]
pub use query::{distinct_types, metric_range, query, strongest, QueryResult, RecordFilter, TypeSelector};
#[doc(inline)]
pub use record::{Metric, Record, StatField, Stats};
#[doc(inline)]
pub use store::{load_dataset, write_fetch_artifact, write_report};
