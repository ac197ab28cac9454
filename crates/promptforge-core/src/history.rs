use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::StoreError;

pub const HISTORY_CAP: usize = 100;

const HISTORY_COLLECTION: &str = "history";
const FAVORITES_COLLECTION: &str = "favorites";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub prompt: String,
    pub platform: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    pub timestamp: String,
    #[serde(default = "default_usage_count")]
    pub usage_count: u64,
    #[serde(default)]
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreStats {
    pub total_prompts: usize,
    pub favorite_count: usize,
    pub most_used_platform: String,
    pub average_prompt_length: u64,
}

/// Durable keyed storage behind the history store. Reads tolerate missing or
/// unreadable payloads by returning `None`; writes surface
/// [`StoreError::PersistenceUnavailable`] when the backend cannot complete.
pub trait StorageBackend {
    fn read(&self, collection: &str) -> Option<Value>;
    fn write(&mut self, collection: &str, payload: &Value) -> Result<(), StoreError>;
}

/// Stores both collections as one JSON object file, keyed by collection name.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, collection: &str) -> Option<Value> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let parsed: Value = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "discarding unreadable collections file"
                );
                return None;
            }
        };
        parsed.as_object()?.get(collection).cloned()
    }

    fn write(&mut self, collection: &str, payload: &Value) -> Result<(), StoreError> {
        let mut on_disk = read_json_object(&self.path).unwrap_or_default();
        on_disk.insert(collection.to_string(), payload.clone());
        write_json_object(&self.path, &on_disk)
    }
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    collections: HashMap<String, Value>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, collection: &str) -> Option<Value> {
        self.collections.get(collection).cloned()
    }

    fn write(&mut self, collection: &str, payload: &Value) -> Result<(), StoreError> {
        self.collections
            .insert(collection.to_string(), payload.clone());
        Ok(())
    }
}

/// Prompt history plus favorites, written through the backend on every
/// mutation. Saves deduplicate on `(prompt, platform)`, history keeps the
/// most recent [`HISTORY_CAP`] entries, favorites are unique by entry id.
pub struct HistoryStore {
    backend: Box<dyn StorageBackend>,
    history: Vec<HistoryEntry>,
    favorites: Vec<HistoryEntry>,
}

impl HistoryStore {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        let history = read_collection(backend.as_ref(), HISTORY_COLLECTION);
        let favorites = read_collection(backend.as_ref(), FAVORITES_COLLECTION);
        Self {
            backend,
            history,
            favorites,
        }
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn favorites(&self) -> &[HistoryEntry] {
        &self.favorites
    }

    pub fn find(&self, id: &str) -> Option<&HistoryEntry> {
        self.history.iter().find(|entry| entry.id == id)
    }

    pub fn save(
        &mut self,
        prompt: &str,
        platform: &str,
        parameters: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let timestamp = now_utc_iso();
        if let Some(existing) = self
            .history
            .iter_mut()
            .find(|entry| entry.prompt == prompt && entry.platform == platform)
        {
            existing.usage_count += 1;
            existing.timestamp = timestamp;
            tracing::debug!(
                platform,
                usage_count = existing.usage_count,
                "refreshed existing history entry"
            );
        } else {
            self.history.insert(
                0,
                HistoryEntry {
                    id: Uuid::new_v4().to_string(),
                    prompt: prompt.to_string(),
                    platform: platform.to_string(),
                    parameters,
                    timestamp,
                    usage_count: 1,
                    is_favorite: false,
                },
            );
            self.history.truncate(HISTORY_CAP);
            tracing::debug!(platform, total = self.history.len(), "saved history entry");
        }
        self.persist()
    }

    /// Returns false without mutating anything when the entry id is already
    /// a favorite.
    pub fn add_to_favorites(&mut self, entry: HistoryEntry) -> Result<bool, StoreError> {
        if self.favorites.iter().any(|favorite| favorite.id == entry.id) {
            return Ok(false);
        }
        let mut entry = entry;
        entry.is_favorite = true;
        if let Some(existing) = self.history.iter_mut().find(|item| item.id == entry.id) {
            existing.is_favorite = true;
        }
        tracing::debug!(id = %entry.id, "added favorite");
        self.favorites.insert(0, entry);
        self.persist()?;
        Ok(true)
    }

    pub fn remove_from_favorites(&mut self, id: &str) -> Result<(), StoreError> {
        self.favorites.retain(|favorite| favorite.id != id);
        if let Some(entry) = self.history.iter_mut().find(|item| item.id == id) {
            entry.is_favorite = false;
        }
        tracing::debug!(id, "removed favorite");
        self.persist()
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.history.clear();
        self.favorites.clear();
        tracing::debug!("cleared history and favorites");
        self.persist()
    }

    pub fn stats(&self) -> StoreStats {
        let mut platform_counts: IndexMap<&str, usize> = IndexMap::new();
        for entry in &self.history {
            *platform_counts.entry(entry.platform.as_str()).or_insert(0) += 1;
        }
        let mut most_used_platform = "None";
        let mut best = 0;
        for (platform, count) in &platform_counts {
            if *count > best {
                best = *count;
                most_used_platform = platform;
            }
        }

        let total_length: usize = self
            .history
            .iter()
            .map(|entry| entry.prompt.chars().count())
            .sum();
        let average_prompt_length = if self.history.is_empty() {
            0
        } else {
            (total_length as f64 / self.history.len() as f64).round() as u64
        };

        StoreStats {
            total_prompts: self.history.len(),
            favorite_count: self.favorites.len(),
            most_used_platform: most_used_platform.to_string(),
            average_prompt_length,
        }
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let history = serde_json::to_value(&self.history)?;
        let favorites = serde_json::to_value(&self.favorites)?;
        self.backend.write(HISTORY_COLLECTION, &history)?;
        self.backend.write(FAVORITES_COLLECTION, &favorites)
    }
}

fn read_collection(backend: &dyn StorageBackend, collection: &str) -> Vec<HistoryEntry> {
    let Some(payload) = backend.read(collection) else {
        return Vec::new();
    };
    let Some(items) = payload.as_array() else {
        tracing::warn!(collection, "stored collection is not a list, starting empty");
        return Vec::new();
    };
    let mut entries = Vec::new();
    for item in items {
        match serde_json::from_value::<HistoryEntry>(item.clone()) {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                tracing::warn!(collection, error = %err, "skipping undecodable history entry");
            }
        }
    }
    entries
}

fn read_json_object(path: &Path) -> Option<Map<String, Value>> {
    let raw = std::fs::read_to_string(path).ok()?;
    let parsed: Value = serde_json::from_str(&raw).ok()?;
    parsed.as_object().cloned()
}

fn write_json_object(path: &Path, payload: &Map<String, Value>) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|err| StoreError::PersistenceUnavailable(err.to_string()))?;
    }
    let rendered = serde_json::to_string_pretty(&Value::Object(payload.clone()))?;
    std::fs::write(path, rendered)
        .map_err(|err| StoreError::PersistenceUnavailable(err.to_string()))
}

fn now_utc_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

fn default_usage_count() -> u64 {
    1
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map, Value};

    use super::{
        FileBackend, HistoryStore, MemoryBackend, StorageBackend, HISTORY_CAP,
    };
    use crate::error::StoreError;

    fn memory_store() -> HistoryStore {
        HistoryStore::new(Box::new(MemoryBackend::new()))
    }

    #[test]
    fn save_deduplicates_on_prompt_and_platform() -> anyhow::Result<()> {
        let mut store = memory_store();
        store.save("a cat", "midjourney", Map::new())?;
        store.save("a cat", "midjourney", Map::new())?;
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.history()[0].usage_count, 2);

        store.save("a cat", "dalle", Map::new())?;
        assert_eq!(store.history().len(), 2);
        assert_eq!(store.history()[0].platform, "dalle");
        Ok(())
    }

    #[test]
    fn dedup_refreshes_in_place_without_reordering() -> anyhow::Result<()> {
        let mut store = memory_store();
        store.save("first", "qwen", Map::new())?;
        store.save("second", "qwen", Map::new())?;
        let original_id = store.history()[1].id.clone();
        let original_timestamp = store.history()[1].timestamp.clone();

        store.save("first", "qwen", Map::new())?;
        assert_eq!(store.history()[0].prompt, "second");
        assert_eq!(store.history()[1].prompt, "first");
        assert_eq!(store.history()[1].id, original_id);
        assert_eq!(store.history()[1].usage_count, 2);
        assert!(store.history()[1].timestamp >= original_timestamp);
        Ok(())
    }

    #[test]
    fn history_keeps_only_most_recent_entries() -> anyhow::Result<()> {
        let mut store = memory_store();
        for index in 0..=HISTORY_CAP {
            store.save(&format!("prompt {index}"), "universal", Map::new())?;
        }
        assert_eq!(store.history().len(), HISTORY_CAP);
        assert_eq!(store.history()[0].prompt, format!("prompt {HISTORY_CAP}"));
        assert!(store
            .history()
            .iter()
            .all(|entry| entry.prompt != "prompt 0"));
        Ok(())
    }

    #[test]
    fn favorites_are_unique_by_id() -> anyhow::Result<()> {
        let mut store = memory_store();
        store.save("a cat", "midjourney", Map::new())?;
        let entry = store.history()[0].clone();
        assert!(store.add_to_favorites(entry.clone())?);
        assert!(!store.add_to_favorites(entry)?);
        assert_eq!(store.favorites().len(), 1);
        Ok(())
    }

    #[test]
    fn favoriting_marks_the_matching_history_entry() -> anyhow::Result<()> {
        let mut store = memory_store();
        store.save("a cat", "midjourney", Map::new())?;
        let entry = store.history()[0].clone();
        assert!(!entry.is_favorite);

        store.add_to_favorites(entry)?;
        assert!(store.history()[0].is_favorite);
        assert!(store.favorites()[0].is_favorite);
        Ok(())
    }

    #[test]
    fn unfavoriting_clears_the_flag_and_leaves_others_untouched() -> anyhow::Result<()> {
        let mut store = memory_store();
        store.save("kept", "qwen", Map::new())?;
        store.save("favored", "qwen", Map::new())?;
        let favored = store.history()[0].clone();
        store.add_to_favorites(favored.clone())?;
        let untouched = store.history()[1].clone();

        store.remove_from_favorites(&favored.id)?;
        assert!(store.favorites().is_empty());
        assert!(!store.history()[0].is_favorite);
        assert_eq!(store.history()[1], untouched);
        Ok(())
    }

    #[test]
    fn clear_empties_both_collections() -> anyhow::Result<()> {
        let mut store = memory_store();
        store.save("a cat", "qwen", Map::new())?;
        let entry = store.history()[0].clone();
        store.add_to_favorites(entry)?;

        store.clear()?;
        assert!(store.history().is_empty());
        assert!(store.favorites().is_empty());
        Ok(())
    }

    #[test]
    fn file_backend_persists_across_instances() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("collections.json");
        {
            let mut store = HistoryStore::new(Box::new(FileBackend::new(&path)));
            let mut parameters = Map::new();
            parameters.insert("cfg_scale".to_string(), json!(7.5));
            store.save("a cat", "midjourney", parameters)?;
            let entry = store.history()[0].clone();
            store.add_to_favorites(entry)?;
        }

        let store = HistoryStore::new(Box::new(FileBackend::new(&path)));
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.favorites().len(), 1);
        assert!(store.history()[0].is_favorite);
        assert_eq!(store.history()[0].parameters.get("cfg_scale"), Some(&json!(7.5)));
        Ok(())
    }

    #[test]
    fn corrupt_file_loads_as_empty_and_recovers_on_save() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("collections.json");
        std::fs::write(&path, "not json {")?;

        let mut store = HistoryStore::new(Box::new(FileBackend::new(&path)));
        assert!(store.history().is_empty());
        assert!(store.favorites().is_empty());

        store.save("a cat", "qwen", Map::new())?;
        let reloaded = HistoryStore::new(Box::new(FileBackend::new(&path)));
        assert_eq!(reloaded.history().len(), 1);
        Ok(())
    }

    #[test]
    fn write_failure_surfaces_persistence_unavailable() {
        struct FailingBackend;

        impl StorageBackend for FailingBackend {
            fn read(&self, _collection: &str) -> Option<Value> {
                None
            }

            fn write(&mut self, _collection: &str, _payload: &Value) -> Result<(), StoreError> {
                Err(StoreError::PersistenceUnavailable("disk full".to_string()))
            }
        }

        let mut store = HistoryStore::new(Box::new(FailingBackend));
        let err = store.save("a cat", "qwen", Map::new()).unwrap_err();
        assert!(matches!(err, StoreError::PersistenceUnavailable(_)));
    }

    #[test]
    fn stats_aggregate_counts_and_rounded_average() -> anyhow::Result<()> {
        let mut store = memory_store();
        assert_eq!(store.stats().most_used_platform, "None");
        assert_eq!(store.stats().average_prompt_length, 0);

        store.save("abcd", "midjourney", Map::new())?;
        store.save("abcdef", "dalle", Map::new())?;
        store.save("abcdefg", "midjourney", Map::new())?;
        let stats = store.stats();
        assert_eq!(stats.total_prompts, 3);
        assert_eq!(stats.favorite_count, 0);
        assert_eq!(stats.most_used_platform, "midjourney");
        assert_eq!(stats.average_prompt_length, 6);
        Ok(())
    }

    #[test]
    fn stats_tie_keeps_first_platform_seen_during_aggregation() -> anyhow::Result<()> {
        let mut store = memory_store();
        store.save("one", "qwen", Map::new())?;
        store.save("two", "gemini", Map::new())?;
        // aggregation walks history newest first
        assert_eq!(store.stats().most_used_platform, "gemini");
        Ok(())
    }
}
