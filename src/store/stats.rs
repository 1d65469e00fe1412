//! Daily body stats - one record per date

use std::collections::BTreeMap;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{load_record, save_record, string_or_number};
use crate::calendar::DateKey;
use crate::db::KvStore;

/// Storage key of the serialized stats store
pub const STATS_KEY: &str = "dailyStats";

/// Body weight and estimated calories burned, both free-form form input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStatRecord {
    #[serde(default, deserialize_with = "string_or_number")]
    pub weight: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub calories: String,
}

impl DailyStatRecord {
    pub fn new(weight: impl Into<String>, calories: impl Into<String>) -> Self {
        Self {
            weight: weight.into(),
            calories: calories.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsStore {
    records: BTreeMap<DateKey, DailyStatRecord>,
}

impl StatsStore {
    pub fn load(kv: &impl KvStore) -> Self {
        let records: BTreeMap<DateKey, DailyStatRecord> = load_record(kv, STATS_KEY);
        debug!("loaded {} daily stat records", records.len());
        Self { records }
    }

    /// Replace the record for `date` wholesale and persist
    pub fn upsert(&mut self, kv: &mut impl KvStore, date: &str, record: DailyStatRecord) -> Result<()> {
        info!("saving stats for {date}: weight '{}', calories '{}'", record.weight, record.calories);
        self.records.insert(date.to_string(), record);
        save_record(kv, STATS_KEY, &self.records)
    }

    pub fn get(&self, date: &str) -> Option<&DailyStatRecord> {
        self.records.get(date)
    }

    /// All records ordered by date
    pub fn records(&self) -> &BTreeMap<DateKey, DailyStatRecord> {
        &self.records
    }

    /// Editable record for `date`: the saved one, or an empty one.
    ///
    /// An empty calorie field is pre-filled with `calorie_hint`. The result
    /// is a suggestion and is not written back.
    pub fn draft_for(&self, date: &str, calorie_hint: Option<u32>) -> DailyStatRecord {
        let mut draft = self.get(date).cloned().unwrap_or_default();
        if draft.calories.trim().is_empty()
            && let Some(hint) = calorie_hint
        {
            draft.calories = hint.to_string();
        }
        draft
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn reset(&mut self, kv: &mut impl KvStore) -> Result<()> {
        self.records.clear();
        kv.remove(STATS_KEY)
    }

    pub(crate) fn clear(&mut self) {
        self.records.clear();
    }
}
