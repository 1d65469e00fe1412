//! Session - owns the log and stats stores for the running app

use anyhow::Result;
use chrono::{DateTime, Datelike, Local, NaiveDate};
use tracing::{info, warn};

use crate::analytics::{ChartSeries, ExerciseView, RECENT_DAYS, SessionAggregator, TrendProjector};
use crate::calendar::{self, date_key};
use crate::db::KvStore;
use crate::exercises::{find_day, find_exercise};
use crate::store::{DailyStatRecord, LOGS_KEY, LogStore, STATS_KEY, SetLogEntry, StatsStore};

/// Target used for exercises missing from the schedule
const FALLBACK_TARGET_SETS: &str = "3";

pub struct Session<S: KvStore> {
    storage: S,
    logs: LogStore,
    stats: StatsStore,
}

impl<S: KvStore> Session<S> {
    /// Load both stores; unreadable records start empty
    pub fn open(storage: S) -> Self {
        let logs = LogStore::load(&storage);
        let stats = StatsStore::load(&storage);
        Self { storage, logs, stats }
    }

    pub fn log_set(&mut self, exercise_id: &str, weight: &str, reps: &str) -> Result<Option<SetLogEntry>> {
        self.log_set_at(exercise_id, weight, reps, Local::now())
    }

    pub fn log_set_at(
        &mut self,
        exercise_id: &str,
        weight: &str,
        reps: &str,
        now: DateTime<Local>,
    ) -> Result<Option<SetLogEntry>> {
        self.logs.append(&mut self.storage, exercise_id.trim(), weight, reps, now)
    }

    pub fn history(&self, exercise_id: &str) -> &[SetLogEntry] {
        self.logs.history(exercise_id.trim())
    }

    pub fn exercise_view(&self, exercise_id: &str) -> ExerciseView {
        self.exercise_view_at(exercise_id, calendar::today())
    }

    pub fn exercise_view_at(&self, exercise_id: &str, today: NaiveDate) -> ExerciseView {
        let exercise_id = exercise_id.trim();
        let target = find_exercise(exercise_id)
            .map(|e| e.sets)
            .unwrap_or(FALLBACK_TARGET_SETS);
        let today = date_key(today);
        SessionAggregator::new(self.logs.history(exercise_id), &today).view(target)
    }

    pub fn save_daily_stats(&mut self, weight: &str, calories: &str) -> Result<()> {
        self.save_daily_stats_at(weight, calories, calendar::today())
    }

    pub fn save_daily_stats_at(&mut self, weight: &str, calories: &str, today: NaiveDate) -> Result<()> {
        let record = DailyStatRecord::new(weight.trim(), calories.trim());
        self.stats.upsert(&mut self.storage, &date_key(today), record)
    }

    pub fn daily_stats(&self, date: NaiveDate) -> Option<&DailyStatRecord> {
        self.stats.get(&date_key(date))
    }

    /// Today's stats form content, calories suggested from the schedule
    pub fn stats_draft(&self, today: NaiveDate) -> DailyStatRecord {
        let hint = find_day(today.weekday()).and_then(|d| d.estimated_calories);
        self.stats.draft_for(&date_key(today), hint)
    }

    pub fn chart_series(&self) -> ChartSeries {
        TrendProjector::project(self.stats.records(), RECENT_DAYS)
    }

    /// Clear both stores. Does nothing unless `confirmed`; returns whether
    /// data was cleared.
    pub fn reset_all_data(&mut self, confirmed: bool) -> Result<bool> {
        if !confirmed {
            info!("reset declined, keeping data");
            return Ok(false);
        }

        self.storage.remove_all(&[LOGS_KEY, STATS_KEY])?;
        self.logs.clear();
        self.stats.clear();
        warn!("all workout logs and daily stats deleted");
        Ok(true)
    }
}
