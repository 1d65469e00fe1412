//! Persisted stores - set logs and daily body stats
//!
//! Each store is serialized whole as one JSON record and rewritten after
//! every mutation.

pub mod logs;
pub mod stats;

pub use logs::{LOGS_KEY, LogStore, SetLogEntry};
pub use stats::{DailyStatRecord, STATS_KEY, StatsStore};

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::db::KvStore;

/// Read a record, treating a missing or unreadable one as empty
fn load_record<T: DeserializeOwned + Default>(kv: &impl KvStore, key: &str) -> T {
    let raw = match kv.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(err) => {
            warn!("failed to read {key}: {err:#}");
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!("discarding corrupt {key} record: {err}");
            T::default()
        }
    }
}

fn save_record<T: Serialize>(kv: &mut impl KvStore, key: &str, value: &T) -> Result<()> {
    let payload = serde_json::to_string(value)?;
    kv.set(key, &payload)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Text(String),
    Number(serde_json::Number),
    Null(()),
}

/// Form inputs were stored either as strings or as numbers
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(text) => text,
        Loose::Number(number) => number.to_string(),
        Loose::Null(()) => String::new(),
    })
}
