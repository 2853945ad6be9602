//! Explicit, content-addressed cache of fetch results.
//!
//! Entries are keyed by the SHA-256 of the API base and the requested count,
//! so repeating a fetch with the same count against the same server reuses
//! the earlier result, and two servers never share an entry. The cache is
//! owned by the caller and only changes through [`FetchCache::put`],
//! [`FetchCache::invalidate`] and [`FetchCache::clear`].

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::fetch::FetchOutcome;

/// Cache key for a fetch of `count` records from `api_base`
pub fn cache_key(api_base: &str, count: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_base.trim_end_matches('/').as_bytes());
    hasher.update(b"\n");
    hasher.update(count.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

/// A cached fetch result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub api_base: String,
    pub count: u32,
    /// RFC 3339 creation time
    pub created_at: String,
    pub outcome: FetchOutcome,
}

pub struct FetchCache {
    dir: Option<PathBuf>,
    memory: HashMap<String, CacheEntry>,
}

impl FetchCache {
    /// Cache that lives only as long as this value
    pub fn in_memory() -> Self {
        Self {
            dir: None,
            memory: HashMap::new(),
        }
    }

    /// Cache persisted as `{key}.json` files under `dir`
    pub fn on_disk(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            memory: HashMap::new(),
        }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    fn entry_path(&self, key: &str) -> Option<PathBuf> {
        self.dir.as_ref().map(|d| d.join(format!("{}.json", key)))
    }

    /// Look up a previous fetch. Unreadable disk entries count as misses.
    pub fn get(&mut self, api_base: &str, count: u32) -> Option<&CacheEntry> {
        let key = cache_key(api_base, count);

        if !self.memory.contains_key(&key) {
            let path = self.entry_path(&key)?;
            let text = fs::read_to_string(&path).ok()?;
            match serde_json::from_str::<CacheEntry>(&text) {
                Ok(entry) => {
                    self.memory.insert(key.clone(), entry);
                }
                Err(e) => {
                    tracing::warn!("Ignoring corrupt cache entry {}: {}", path.display(), e);
                    return None;
                }
            }
        }

        tracing::debug!("Cache hit for {} x{}", api_base, count);
        self.memory.get(&key)
    }

    /// Store a fetch result, replacing any previous entry for the same key
    pub fn put(&mut self, api_base: &str, count: u32, outcome: FetchOutcome) -> Result<()> {
        let key = cache_key(api_base, count);
        let entry = CacheEntry {
            api_base: api_base.trim_end_matches('/').to_string(),
            count,
            created_at: chrono::Utc::now().to_rfc3339(),
            outcome,
        };

        if let Some(path) = self.entry_path(&key) {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, serde_json::to_vec(&entry)?)?;
        }
        self.memory.insert(key, entry);
        Ok(())
    }

    /// Drop one entry; returns whether anything was removed
    pub fn invalidate(&mut self, api_base: &str, count: u32) -> Result<bool> {
        let key = cache_key(api_base, count);
        let mut removed = self.memory.remove(&key).is_some();

        if let Some(path) = self.entry_path(&key) {
            if path.exists() {
                fs::remove_file(&path)?;
                removed = true;
            }
        }
        Ok(removed)
    }

    /// Drop every entry; returns how many were removed
    pub fn clear(&mut self) -> Result<usize> {
        let mut keys: Vec<String> = self.memory.drain().map(|(k, _)| k).collect();

        for path in self.disk_entries()? {
            fs::remove_file(&path)?;
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }

        keys.sort();
        keys.dedup();
        Ok(keys.len())
    }

    /// All entries, oldest first
    pub fn entries(&self) -> Result<Vec<CacheEntry>> {
        let mut all: HashMap<String, CacheEntry> = self.memory.clone();

        for path in self.disk_entries()? {
            let Some(key) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if all.contains_key(key) {
                continue;
            }
            if let Ok(entry) = serde_json::from_str::<CacheEntry>(&fs::read_to_string(&path)?) {
                all.insert(key.to_string(), entry);
            }
        }

        let mut entries: Vec<CacheEntry> = all.into_values().collect();
        entries.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(entries)
    }

    fn disk_entries(&self) -> Result<Vec<PathBuf>> {
        let Some(dir) = &self.dir else {
            return Ok(Vec::new());
        };
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
            if path.is_file() && is_json {
                paths.push(path);
            }
        }
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::fetch_records;
    use crate::fetch::tests::MockCatalog;

    const BASE: &str = "https://pokeapi.co/api/v2";

    fn outcome(n: u32) -> FetchOutcome {
        fetch_records(&MockCatalog::new(&[]), n, |_, _| {})
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(cache_key(BASE, 30), cache_key("https://pokeapi.co/api/v2/", 30));
        assert_ne!(cache_key(BASE, 30), cache_key(BASE, 31));
        assert_ne!(cache_key(BASE, 30), cache_key("http://localhost:8000", 30));
        assert_eq!(cache_key(BASE, 30).len(), 64);
    }

    #[test]
    fn test_in_memory_hit_and_invalidate() {
        let mut cache = FetchCache::in_memory();
        assert!(cache.get(BASE, 10).is_none());

        cache.put(BASE, 10, outcome(10)).unwrap();
        assert_eq!(cache.get(BASE, 10).unwrap().outcome.records.len(), 10);
        assert!(cache.get(BASE, 11).is_none());

        assert!(cache.invalidate(BASE, 10).unwrap());
        assert!(cache.get(BASE, 10).is_none());
        assert!(!cache.invalidate(BASE, 10).unwrap());
    }

    #[test]
    fn test_disk_cache_survives_new_instance() {
        let temp_dir = tempfile::tempdir().unwrap();
        {
            let mut cache = FetchCache::on_disk(temp_dir.path());
            cache.put(BASE, 12, outcome(12)).unwrap();
        }

        let mut cache = FetchCache::on_disk(temp_dir.path());
        let entry = cache.get(BASE, 12).unwrap();
        assert_eq!(entry.count, 12);
        assert_eq!(entry.outcome.records[11].id, Some(12));
    }

    #[test]
    fn test_entries_and_clear() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut cache = FetchCache::on_disk(temp_dir.path());
        cache.put(BASE, 10, outcome(10)).unwrap();
        cache.put(BASE, 20, outcome(20)).unwrap();

        let fresh = FetchCache::on_disk(temp_dir.path());
        assert_eq!(fresh.entries().unwrap().len(), 2);

        assert_eq!(cache.clear().unwrap(), 2);
        assert!(cache.entries().unwrap().is_empty());
        assert!(cache.get(BASE, 10).is_none());
    }

    #[test]
    fn test_corrupt_entry_is_a_miss() {
        let temp_dir = tempfile::tempdir().unwrap();
        let key = cache_key(BASE, 10);
        fs::write(temp_dir.path().join(format!("{}.json", key)), "{not json").unwrap();

        let mut cache = FetchCache::on_disk(temp_dir.path());
        assert!(cache.get(BASE, 10).is_none());
    }
}
