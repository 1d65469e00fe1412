//! Set logs - append-only history per exercise

use std::collections::BTreeMap;

use anyhow::Result;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{load_record, save_record, string_or_number};
use crate::calendar::{DateKey, date_key};
use crate::db::KvStore;

/// Storage key of the serialized log store
pub const LOGS_KEY: &str = "workoutLogs";

/// One completed set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetLogEntry {
    #[serde(deserialize_with = "string_or_number")]
    pub weight: String,
    #[serde(deserialize_with = "string_or_number")]
    pub reps: String,
    pub date: DateKey,
    /// Epoch millis, authoritative for recency
    pub timestamp: i64,
}

/// Exercise id -> sets in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogStore {
    logs: BTreeMap<String, Vec<SetLogEntry>>,
}

impl LogStore {
    pub fn load(kv: &impl KvStore) -> Self {
        let logs: BTreeMap<String, Vec<SetLogEntry>> = load_record(kv, LOGS_KEY);
        debug!("loaded set logs for {} exercises", logs.len());
        Self { logs }
    }

    /// Stamp and append a set, then persist the whole store.
    ///
    /// Blank exercise id, weight or reps is rejected without touching the
    /// store and yields `Ok(None)`.
    pub fn append(
        &mut self,
        kv: &mut impl KvStore,
        exercise_id: &str,
        weight: &str,
        reps: &str,
        now: DateTime<Local>,
    ) -> Result<Option<SetLogEntry>> {
        let (exercise_id, weight, reps) = (exercise_id.trim(), weight.trim(), reps.trim());
        if exercise_id.is_empty() || weight.is_empty() || reps.is_empty() {
            debug!("ignoring incomplete set for '{exercise_id}'");
            return Ok(None);
        }

        let entry = SetLogEntry {
            weight: weight.to_string(),
            reps: reps.to_string(),
            date: date_key(now.date_naive()),
            timestamp: now.timestamp_millis(),
        };
        self.logs
            .entry(exercise_id.to_string())
            .or_default()
            .push(entry.clone());
        save_record(kv, LOGS_KEY, &self.logs)?;

        info!("logged {}kg x {} for {exercise_id}", entry.weight, entry.reps);
        Ok(Some(entry))
    }

    pub fn history(&self, exercise_id: &str) -> &[SetLogEntry] {
        self.logs.get(exercise_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    pub fn reset(&mut self, kv: &mut impl KvStore) -> Result<()> {
        self.logs.clear();
        kv.remove(LOGS_KEY)
    }

    /// Forget in-memory state only, the caller removes the record
    pub(crate) fn clear(&mut self) {
        self.logs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::db::testing::FailingStore;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_append_stamps_and_persists() {
        let mut kv = MemoryStore::new();
        let mut store = LogStore::default();
        let now = at(2024, 1, 2, 18);

        let entry = store.append(&mut kv, "bench", "62", "8", now).unwrap().unwrap();
        assert_eq!(entry.date, "2024-01-02");
        assert_eq!(entry.timestamp, now.timestamp_millis());
        assert_eq!(store.history("bench"), &[entry]);

        let reloaded = LogStore::load(&kv);
        assert_eq!(reloaded, store);
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut kv = MemoryStore::new();
        let mut store = LogStore::default();
        for reps in ["10", "9", "8"] {
            store.append(&mut kv, "squat", "100", reps, at(2024, 1, 2, 18)).unwrap();
        }
        let reps: Vec<_> = store.history("squat").iter().map(|e| e.reps.as_str()).collect();
        assert_eq!(reps, ["10", "9", "8"]);
    }

    #[test]
    fn test_append_rejects_blank_input() {
        let mut kv = MemoryStore::new();
        let mut store = LogStore::default();
        let now = at(2024, 1, 2, 18);

        assert!(store.append(&mut kv, "bench", "", "8", now).unwrap().is_none());
        assert!(store.append(&mut kv, "bench", "60", "  ", now).unwrap().is_none());
        assert!(store.append(&mut kv, "", "60", "8", now).unwrap().is_none());
        assert!(store.is_empty());
        assert_eq!(kv.get(LOGS_KEY).unwrap(), None);
    }

    #[test]
    fn test_history_unknown_exercise_is_empty() {
        let store = LogStore::default();
        assert!(store.history("deadlift").is_empty());
    }

    #[test]
    fn test_load_corrupt_record_is_empty() {
        let mut kv = MemoryStore::new();
        kv.set(LOGS_KEY, "{not json").unwrap();
        assert!(LogStore::load(&kv).is_empty());
    }

    #[test]
    fn test_load_accepts_numeric_fields() {
        let mut kv = MemoryStore::new();
        kv.set(
            LOGS_KEY,
            r#"{"bench":[{"weight":60,"reps":"10","date":"2024-01-01","timestamp":1}]}"#,
        )
        .unwrap();
        let store = LogStore::load(&kv);
        assert_eq!(store.history("bench")[0].weight, "60");
        assert_eq!(store.history("bench")[0].reps, "10");
    }

    #[test]
    fn test_failed_persist_keeps_entry_in_memory() {
        let mut kv = FailingStore { fail_set: true, ..Default::default() };
        let mut store = LogStore::default();

        let err = store.append(&mut kv, "bench", "60", "10", at(2024, 1, 2, 18)).unwrap_err();
        assert!(err.to_string().contains("disk full"));
        assert_eq!(store.history("bench").len(), 1);
        assert_eq!(kv.get(LOGS_KEY).unwrap(), None);
    }

    #[test]
    fn test_reset_removes_record() {
        let mut kv = MemoryStore::new();
        let mut store = LogStore::default();
        store.append(&mut kv, "bench", "60", "10", at(2024, 1, 1, 9)).unwrap();

        store.reset(&mut kv).unwrap();
        assert!(store.is_empty());
        assert_eq!(kv.get(LOGS_KEY).unwrap(), None);
    }
}
