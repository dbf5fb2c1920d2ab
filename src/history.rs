use crate::state::{HistoryEntry, HistoryKind};
use crate::storage::{StorageError, StoragePort};

pub const HISTORY_KEY: &str = "summer_toolbox_history";
pub const HISTORY_CAP: usize = 50;

/// Capped log of past operations, newest first.
///
/// The whole collection lives in one record of the storage port; every
/// mutation is a read-modify-write of that record. Nothing is cached in
/// memory, so a failed write leaves no trace.
#[derive(Clone, Copy, Debug)]
pub struct HistoryStore<S: StoragePort> {
    storage: S,
    max_size: usize,
}

impl<S: StoragePort> HistoryStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_capacity(storage, HISTORY_CAP)
    }

    pub fn with_capacity(storage: S, max_size: usize) -> Self {
        Self { storage, max_size }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Record a completed operation, stamped with the current time.
    pub fn append(
        &self,
        kind: HistoryKind,
        input: impl Into<String>,
        output: impl Into<String>,
    ) -> Result<HistoryEntry, StorageError> {
        self.append_at(kind, input, output, now_millis())
    }

    pub fn append_at(
        &self,
        kind: HistoryKind,
        input: impl Into<String>,
        output: impl Into<String>,
        timestamp: i64,
    ) -> Result<HistoryEntry, StorageError> {
        let entry = HistoryEntry {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            input: input.into(),
            output: output.into(),
            timestamp,
        };

        let mut entries = self.load_for_update()?;
        entries.insert(0, entry.clone());
        entries.truncate(self.max_size);
        self.save(&entries)?;

        Ok(entry)
    }

    /// Newest first. Missing or unreadable data reads as an empty log.
    pub fn list(&self) -> Vec<HistoryEntry> {
        match self.load() {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("history unreadable, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Remove the entry with `id`. Unknown ids are a no-op.
    pub fn delete_by_id(&self, id: &str) -> Result<(), StorageError> {
        let mut entries = self.load_for_update()?;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);

        if entries.len() != before {
            self.save(&entries)?;
        }
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(HISTORY_KEY)
    }

    fn load(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        match self.storage.get(HISTORY_KEY)? {
            Some(json) => serde_json::from_str(&json).map_err(|e| StorageError::Malformed(e.to_string())),
            None => Ok(Vec::new()),
        }
    }

    /// Current entries for a read-modify-write. Corrupt data is replaced by
    /// the next write; a storage that cannot be read fails the mutation.
    fn load_for_update(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        match self.load() {
            Err(StorageError::Malformed(reason)) => {
                log::warn!("discarding malformed history: {}", reason);
                Ok(Vec::new())
            }
            other => other,
        }
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<(), StorageError> {
        let json = serde_json::to_string(entries).map_err(|e| StorageError::Malformed(e.to_string()))?;
        self.storage.set(HISTORY_KEY, &json)
    }
}

#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> i64 {
    js_sys::Date::now() as i64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use std::cell::Cell;

    fn store() -> HistoryStore<MemoryStorage> {
        HistoryStore::new(MemoryStorage::new())
    }

    fn inputs(store: &HistoryStore<MemoryStorage>) -> Vec<String> {
        store.list().into_iter().map(|e| e.input).collect()
    }

    /// Storage whose reads or writes can be switched off.
    #[derive(Clone, Default)]
    struct FlakyStorage {
        inner: MemoryStorage,
        fail_reads: std::rc::Rc<Cell<bool>>,
        fail_writes: std::rc::Rc<Cell<bool>>,
    }

    impl StoragePort for FlakyStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            if self.fail_reads.get() {
                return Err(StorageError::Read {
                    key: key.to_string(),
                    reason: "denied".to_string(),
                });
            }
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail_writes.get() {
                return Err(StorageError::Unavailable);
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            if self.fail_writes.get() {
                return Err(StorageError::Unavailable);
            }
            self.inner.remove(key)
        }
    }

    mod append_tests {
        use super::*;

        #[test]
        fn new_store_is_empty() {
            assert!(store().list().is_empty());
        }

        #[test]
        fn append_records_fields() {
            let store = store();
            let before = now_millis();
            let entry = store
                .append(HistoryKind::UrlEncode, "hello world", "hello%20world")
                .unwrap();

            let listed = store.list();
            assert_eq!(listed.len(), 1);
            assert_eq!(listed[0], entry);
            assert_eq!(listed[0].kind.tag(), "url-encode");
            assert_eq!(listed[0].input, "hello world");
            assert_eq!(listed[0].output, "hello%20world");
            assert!(listed[0].timestamp >= before);
        }

        #[test]
        fn newest_first() {
            let store = store();
            store.append(HistoryKind::UrlEncode, "a", "a").unwrap();
            store.append(HistoryKind::UrlEncode, "b", "b").unwrap();
            store.append(HistoryKind::UrlEncode, "c", "c").unwrap();
            assert_eq!(inputs(&store), vec!["c", "b", "a"]);
        }

        #[test]
        fn ids_are_unique_within_same_millisecond() {
            let store = store();
            for i in 0..20 {
                store.append_at(HistoryKind::JsonFormat, i.to_string(), "{}", 42).unwrap();
            }
            let mut ids: Vec<String> = store.list().into_iter().map(|e| e.id).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), 20);
        }

        #[test]
        fn length_is_min_of_appends_and_cap() {
            for n in [0usize, 1, 49, 50, 51, 75] {
                let store = store();
                for i in 0..n {
                    store.append(HistoryKind::Base64Encode, i.to_string(), "x").unwrap();
                }
                assert_eq!(store.list().len(), n.min(HISTORY_CAP), "after {} appends", n);
            }
        }

        #[test]
        fn fifty_first_append_evicts_oldest() {
            let store = store();
            for i in 1..=50 {
                store.append(HistoryKind::UrlEncode, format!("X-{}", i), "out").unwrap();
            }
            store.append(HistoryKind::UrlEncode, "X-51st", "out").unwrap();

            let listed = inputs(&store);
            assert_eq!(listed.len(), 50);
            assert_eq!(listed[0], "X-51st");
            assert_eq!(listed[49], "X-2");
            assert!(!listed.contains(&"X-1".to_string()));
        }

        #[test]
        fn custom_capacity() {
            let store = HistoryStore::with_capacity(MemoryStorage::new(), 3);
            for i in 1..=4 {
                store.append(HistoryKind::HtmlEncode, i.to_string(), "").unwrap();
            }
            assert_eq!(inputs(&store), vec!["4", "3", "2"]);
        }

        #[test]
        fn zero_capacity_keeps_nothing() {
            let store = HistoryStore::with_capacity(MemoryStorage::new(), 0);
            store.append(HistoryKind::HtmlEncode, "a", "b").unwrap();
            assert!(store.list().is_empty());
        }

        #[test]
        fn failed_write_leaves_log_unchanged() {
            let storage = FlakyStorage::default();
            let store = HistoryStore::new(storage.clone());
            store.append(HistoryKind::UrlDecode, "kept", "kept").unwrap();

            storage.fail_writes.set(true);
            let err = store.append(HistoryKind::UrlDecode, "lost", "lost").unwrap_err();
            assert_eq!(err, StorageError::Unavailable);

            storage.fail_writes.set(false);
            let store = HistoryStore::new(storage);
            let listed: Vec<String> = store.list().into_iter().map(|e| e.input).collect();
            assert_eq!(listed, vec!["kept"]);
        }

        #[test]
        fn unreadable_storage_fails_append_without_overwriting() {
            let storage = FlakyStorage::default();
            let store = HistoryStore::new(storage.clone());
            store.append(HistoryKind::UrlEncode, "first", "").unwrap();
            store.append(HistoryKind::UrlEncode, "second", "").unwrap();

            storage.fail_reads.set(true);
            let err = store.append(HistoryKind::UrlEncode, "third", "").unwrap_err();
            assert!(matches!(err, StorageError::Read { .. }));

            storage.fail_reads.set(false);
            let listed: Vec<String> = store.list().into_iter().map(|e| e.input).collect();
            assert_eq!(listed, vec!["second", "first"]);
        }

        #[test]
        fn append_over_corrupt_data_starts_fresh() {
            let storage = MemoryStorage::new();
            storage.set(HISTORY_KEY, "not json").unwrap();
            let store = HistoryStore::new(storage);
            store.append(HistoryKind::UnicodeEncode, "a", "\\u0061").unwrap();
            assert_eq!(store.list().len(), 1);
        }
    }

    mod list_tests {
        use super::*;

        #[test]
        fn malformed_record_reads_as_empty() {
            let storage = MemoryStorage::new();
            storage.set(HISTORY_KEY, "{\"broken\":").unwrap();
            assert!(HistoryStore::new(storage).list().is_empty());
        }

        #[test]
        fn list_is_idempotent() {
            let store = store();
            store.append(HistoryKind::UrlEncode, "a", "a").unwrap();
            assert_eq!(store.list(), store.list());
        }

        #[test]
        fn persisted_layout_is_a_json_array() {
            let storage = MemoryStorage::new();
            let store = HistoryStore::new(storage.clone());
            store.append_at(HistoryKind::Base64Decode, "aGk=", "hi", 1_700_000_000_000).unwrap();

            let raw = storage.get(HISTORY_KEY).unwrap().unwrap();
            let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
            let item = &value.as_array().unwrap()[0];
            assert_eq!(item["type"], "base64-decode");
            assert_eq!(item["input"], "aGk=");
            assert_eq!(item["output"], "hi");
            assert_eq!(item["timestamp"], 1_700_000_000_000i64);
            assert!(item["id"].is_string());
        }
    }

    mod delete_tests {
        use super::*;

        #[test]
        fn removes_only_matching_entry() {
            let store = store();
            store.append(HistoryKind::UrlEncode, "a", "").unwrap();
            let b = store.append(HistoryKind::UrlEncode, "b", "").unwrap();
            store.append(HistoryKind::UrlEncode, "c", "").unwrap();

            store.delete_by_id(&b.id).unwrap();
            assert_eq!(inputs(&store), vec!["c", "a"]);
        }

        #[test]
        fn unknown_id_is_noop() {
            let store = store();
            store.append(HistoryKind::UrlEncode, "a", "").unwrap();
            store.delete_by_id("nonexistent").unwrap();
            assert_eq!(inputs(&store), vec!["a"]);
        }

        #[test]
        fn delete_on_empty_store() {
            let store = store();
            store.delete_by_id("nonexistent").unwrap();
            assert!(store.list().is_empty());
        }

        #[test]
        fn deleting_twice_matches_deleting_once() {
            let store = store();
            let a = store.append(HistoryKind::UrlEncode, "a", "").unwrap();
            store.append(HistoryKind::UrlEncode, "b", "").unwrap();

            store.delete_by_id(&a.id).unwrap();
            let once = store.list();
            store.delete_by_id(&a.id).unwrap();
            assert_eq!(store.list(), once);
        }

        #[test]
        fn unreadable_storage_fails_delete() {
            let storage = FlakyStorage::default();
            let store = HistoryStore::new(storage.clone());
            let entry = store.append(HistoryKind::UrlEncode, "a", "").unwrap();

            storage.fail_reads.set(true);
            assert!(matches!(store.delete_by_id(&entry.id), Err(StorageError::Read { .. })));
            assert!(matches!(store.delete_by_id("x"), Err(StorageError::Read { .. })));

            storage.fail_reads.set(false);
            assert_eq!(store.list(), vec![entry]);
        }

        #[test]
        fn delete_on_corrupt_data_is_noop() {
            let storage = MemoryStorage::new();
            storage.set(HISTORY_KEY, "not json").unwrap();
            let store = HistoryStore::new(storage.clone());
            store.delete_by_id("x").unwrap();
            assert_eq!(storage.get(HISTORY_KEY).unwrap().as_deref(), Some("not json"));
        }

        #[test]
        fn delete_write_failure_propagates() {
            let storage = FlakyStorage::default();
            let store = HistoryStore::new(storage.clone());
            let entry = store.append(HistoryKind::UrlEncode, "a", "").unwrap();

            storage.fail_writes.set(true);
            assert!(store.delete_by_id(&entry.id).is_err());
            assert_eq!(store.list().len(), 1);
        }
    }

    mod clear_tests {
        use super::*;

        #[test]
        fn clear_empties_log() {
            let store = store();
            for i in 0..5 {
                store.append(HistoryKind::JsonFormat, i.to_string(), "").unwrap();
            }
            store.clear().unwrap();
            assert!(store.list().is_empty());
        }

        #[test]
        fn clear_twice_is_fine() {
            let store = store();
            store.append(HistoryKind::JsonFormat, "a", "").unwrap();
            store.clear().unwrap();
            store.clear().unwrap();
            assert!(store.list().is_empty());
        }

        #[test]
        fn clear_failure_propagates() {
            let storage = FlakyStorage::default();
            storage.fail_writes.set(true);
            assert!(HistoryStore::new(storage).clear().is_err());
        }

        #[test]
        fn append_after_clear_starts_over() {
            let store = store();
            store.append(HistoryKind::JsonFormat, "old", "").unwrap();
            store.clear().unwrap();
            store.append(HistoryKind::JsonFormat, "new", "").unwrap();
            assert_eq!(inputs(&store), vec!["new"]);
        }
    }
}
