//! Sequential retrieval of creatures from a remote catalog.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::record::{capitalize, Record, StatField, Stats, UNKNOWN_TYPE};

/// A `{ "name": ..., "url": ... }` reference as the catalog returns it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    pub stat: NamedResource,
}

/// The subset of a `/pokemon/{id}` document the pipeline reads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
}

impl CatalogEntry {
    /// Look up a base stat by its catalog name
    pub fn base_stat(&self, name: &str) -> Option<u32> {
        self.stats
            .iter()
            .find(|s| s.stat.name == name)
            .map(|s| s.base_stat)
    }

    /// Type names ordered by slot
    pub fn type_names(&self) -> Vec<&str> {
        let mut slots: Vec<&TypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|t| t.slot);
        slots.into_iter().map(|t| t.kind.name.as_str()).collect()
    }

    /// Extract the fetch-shape record for catalog id `id`
    pub fn to_record(&self, id: u32) -> Record {
        let types = self.type_names();
        let mut stats = Stats::default();

        for field in StatField::ALL {
            match self.base_stat(field.column()) {
                Some(v) => field.set(&mut stats, v),
                None => tracing::warn!("#{} ({}) has no '{}' stat, using 0", id, self.name, field),
            }
        }

        Record {
            id: Some(id),
            name: capitalize(&self.name),
            main_type: types
                .first()
                .map(|t| t.to_string())
                .unwrap_or_else(|| UNKNOWN_TYPE.to_string()),
            type_2: types.get(1).map(|t| t.to_string()),
            stats,
        }
    }
}

/// A source of catalog entries indexed by sequential integer id
pub trait Catalog {
    /// Retrieve one entry. Any error means the id is skipped.
    fn fetch_entry(&self, id: u32) -> Result<CatalogEntry>;
}

/// Result of a fetch run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchOutcome {
    /// Records in ascending id order
    pub records: Vec<Record>,
    /// Ids whose retrieval failed
    pub skipped: Vec<u32>,
}

/// Fetch ids `1..=count` one after another.
///
/// Failed ids are left out of the result and listed in
/// [`FetchOutcome::skipped`]. `progress` is called before each request with
/// `(id, count)`.
pub fn fetch_records<C, F>(catalog: &C, count: u32, mut progress: F) -> FetchOutcome
where
    C: Catalog + ?Sized,
    F: FnMut(u32, u32),
{
    let mut outcome = FetchOutcome::default();

    for id in 1..=count {
        progress(id, count);
        match catalog.fetch_entry(id) {
            Ok(entry) => outcome.records.push(entry.to_record(id)),
            Err(e) => {
                tracing::debug!("Skipping #{}: {}", id, e);
                outcome.skipped.push(id);
            }
        }
    }

    tracing::info!(
        "Fetched {} of {} creatures ({} skipped)",
        outcome.records.len(),
        count,
        outcome.skipped.len()
    );
    outcome
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::RefCell;

    /// In-memory catalog; ids listed in `failing` return a 404
    pub(crate) struct MockCatalog {
        pub failing: Vec<u32>,
        pub calls: RefCell<Vec<u32>>,
    }

    impl MockCatalog {
        pub(crate) fn new(failing: &[u32]) -> Self {
            Self {
                failing: failing.to_vec(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    pub(crate) fn entry(name: &str, types: &[&str], base: u32) -> CatalogEntry {
        let stat_names = [
            "hp",
            "attack",
            "defense",
            "special-attack",
            "special-defense",
            "speed",
        ];
        CatalogEntry {
            name: name.to_string(),
            types: types
                .iter()
                .enumerate()
                .map(|(i, t)| TypeSlot {
                    slot: i as u32 + 1,
                    kind: NamedResource {
                        name: t.to_string(),
                        url: None,
                    },
                })
                .collect(),
            stats: stat_names
                .iter()
                .enumerate()
                .map(|(i, n)| StatEntry {
                    base_stat: base + i as u32,
                    stat: NamedResource {
                        name: n.to_string(),
                        url: None,
                    },
                })
                .collect(),
        }
    }

    impl Catalog for MockCatalog {
        fn fetch_entry(&self, id: u32) -> Result<CatalogEntry> {
            self.calls.borrow_mut().push(id);
            if self.failing.contains(&id) {
                return Err(Error::Status {
                    code: 404,
                    url: format!("mock://pokemon/{}", id),
                });
            }
            Ok(entry(&format!("mon{}", id), &["normal"], id * 10))
        }
    }

    #[test]
    fn test_failed_id_is_skipped() {
        let catalog = MockCatalog::new(&[3]);
        let outcome = fetch_records(&catalog, 5, |_, _| {});
        let ids: Vec<u32> = outcome.records.iter().filter_map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 4, 5]);
        assert_eq!(outcome.skipped, vec![3]);
    }

    #[test]
    fn test_requests_are_sequential() {
        let catalog = MockCatalog::new(&[]);
        let mut seen = Vec::new();
        fetch_records(&catalog, 4, |id, total| seen.push((id, total)));
        assert_eq!(*catalog.calls.borrow(), vec![1, 2, 3, 4]);
        assert_eq!(seen, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
    }

    #[test]
    fn test_zero_count_fetches_nothing() {
        let catalog = MockCatalog::new(&[]);
        let outcome = fetch_records(&catalog, 0, |_, _| {});
        assert!(outcome.records.is_empty());
        assert!(catalog.calls.borrow().is_empty());
    }

    #[test]
    fn test_stats_found_by_name() {
        let mut e = entry("pidgey", &["normal", "flying"], 40);
        e.stats.reverse();
        let r = e.to_record(16);
        assert_eq!(r.name, "Pidgey");
        assert_eq!(r.main_type, "normal");
        assert_eq!(r.type_2.as_deref(), Some("flying"));
        assert_eq!(r.stats.hp, 40);
        assert_eq!(r.stats.attack, 41);
        assert_eq!(r.stats.defense, 42);
        assert_eq!(r.stats.speed, 45);
    }

    #[test]
    fn test_types_ordered_by_slot() {
        let mut e = entry("x", &["grass", "poison"], 1);
        e.types.reverse();
        assert_eq!(e.type_names(), vec!["grass", "poison"]);
    }

    #[test]
    fn test_missing_stat_and_type() {
        let e = CatalogEntry {
            name: "MISSINGNO".to_string(),
            types: Vec::new(),
            stats: Vec::new(),
        };
        let r = e.to_record(0);
        assert_eq!(r.name, "Missingno");
        assert_eq!(r.main_type, "Unknown");
        assert_eq!(r.type_2, None);
        assert_eq!(r.total_power(), 0);
    }

    #[test]
    fn test_parse_catalog_document() {
        let doc = r#"{
            "id": 1,
            "name": "bulbasaur",
            "height": 7,
            "types": [
                {"slot": 1, "type": {"name": "grass", "url": "https://pokeapi.co/api/v2/type/12/"}},
                {"slot": 2, "type": {"name": "poison", "url": "https://pokeapi.co/api/v2/type/4/"}}
            ],
            "stats": [
                {"base_stat": 45, "effort": 0, "stat": {"name": "hp", "url": ""}},
                {"base_stat": 49, "effort": 0, "stat": {"name": "attack", "url": ""}},
                {"base_stat": 49, "effort": 0, "stat": {"name": "defense", "url": ""}},
                {"base_stat": 65, "effort": 1, "stat": {"name": "special-attack", "url": ""}},
                {"base_stat": 65, "effort": 0, "stat": {"name": "special-defense", "url": ""}},
                {"base_stat": 45, "effort": 0, "stat": {"name": "speed", "url": ""}}
            ]
        }"#;
        let entry: CatalogEntry = serde_json::from_str(doc).unwrap();
        let r = entry.to_record(1);
        assert_eq!(r.name, "Bulbasaur");
        assert_eq!(r.total_power(), 45 + 49 + 49 + 45);
    }
}
