//! Per-exercise session view: today's sets, previous session, progress

use crate::exercises::parse_target_sets;
use crate::store::SetLogEntry;

/// What the exercise card shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExerciseView {
    /// Sets logged today, in logging order
    pub todays_sets: Vec<SetLogEntry>,
    /// Sets of the most recent earlier day, set 1 first
    pub last_session_sets: Vec<SetLogEntry>,
    /// 0..=100
    pub progress_percent: u32,
    /// Most recently logged set, used as input placeholder
    pub last_entry: Option<SetLogEntry>,
}

/// Splits one exercise's history into sessions relative to today
pub struct SessionAggregator<'a> {
    history: &'a [SetLogEntry],
    today: &'a str,
}

impl<'a> SessionAggregator<'a> {
    pub fn new(history: &'a [SetLogEntry], today: &'a str) -> Self {
        Self { history, today }
    }

    pub fn todays_sets(&self) -> Vec<SetLogEntry> {
        self.history
            .iter()
            .filter(|e| e.date == self.today)
            .cloned()
            .collect()
    }

    /// Sets of the latest day before today (by timestamp), oldest first
    pub fn last_session_sets(&self) -> Vec<SetLogEntry> {
        let Some(last_date) = self
            .history
            .iter()
            .rev()
            .filter(|e| e.date != self.today)
            .max_by_key(|e| e.timestamp)
            .map(|e| e.date.as_str())
        else {
            return Vec::new();
        };

        let mut sets: Vec<SetLogEntry> = self
            .history
            .iter()
            .filter(|e| e.date == last_date)
            .cloned()
            .collect();
        sets.sort_by_key(|e| e.timestamp);
        sets
    }

    pub fn progress_percent(&self, target_sets: &str) -> u32 {
        let done = self.history.iter().filter(|e| e.date == self.today).count();
        progress_percent(done, parse_target_sets(target_sets))
    }

    pub fn view(&self, target_sets: &str) -> ExerciseView {
        let todays_sets = self.todays_sets();
        let target = parse_target_sets(target_sets);
        ExerciseView {
            progress_percent: progress_percent(todays_sets.len(), target),
            todays_sets,
            last_session_sets: self.last_session_sets(),
            last_entry: self.history.last().cloned(),
        }
    }
}

/// `done / target` as a percentage, capped at 100
pub fn progress_percent(done: usize, target: u32) -> u32 {
    let target = target.max(1) as usize;
    (done.saturating_mul(100) / target).min(100) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str, weight: &str, reps: &str, timestamp: i64) -> SetLogEntry {
        SetLogEntry {
            weight: weight.to_string(),
            reps: reps.to_string(),
            date: date.to_string(),
            timestamp,
        }
    }

    #[test]
    fn test_today_and_last_session_split() {
        let history = vec![
            entry("2024-01-01", "60", "10", 1),
            entry("2024-01-02", "62", "8", 2),
        ];
        let agg = SessionAggregator::new(&history, "2024-01-02");

        assert_eq!(agg.todays_sets(), vec![entry("2024-01-02", "62", "8", 2)]);
        assert_eq!(agg.last_session_sets(), vec![entry("2024-01-01", "60", "10", 1)]);
    }

    #[test]
    fn test_last_session_picks_most_recent_prior_day() {
        let history = vec![
            entry("2024-01-01", "55", "10", 10),
            entry("2024-01-03", "60", "10", 30),
            entry("2024-01-03", "60", "9", 31),
            entry("2024-01-05", "62", "8", 50),
        ];
        let agg = SessionAggregator::new(&history, "2024-01-05");
        let last = agg.last_session_sets();

        assert_eq!(last.len(), 2);
        assert_eq!(last[0].reps, "10");
        assert_eq!(last[1].reps, "9");
        assert!(last.iter().all(|e| e.date != "2024-01-05"));
    }

    #[test]
    fn test_last_session_uses_timestamp_not_insertion_order() {
        // Appended out of order after a clock change
        let history = vec![
            entry("2024-01-04", "70", "5", 400),
            entry("2024-01-02", "65", "5", 200),
            entry("2024-01-04", "70", "4", 401),
        ];
        let agg = SessionAggregator::new(&history, "2024-01-06");
        let reps: Vec<_> = agg.last_session_sets().into_iter().map(|e| e.reps).collect();
        assert_eq!(reps, ["5", "4"]);
    }

    #[test]
    fn test_last_session_tie_goes_to_first_logged() {
        let history = vec![
            entry("2024-01-01", "60", "10", 5),
            entry("2024-01-02", "62", "8", 5),
        ];
        let agg = SessionAggregator::new(&history, "2024-01-03");
        assert_eq!(agg.last_session_sets(), vec![entry("2024-01-01", "60", "10", 5)]);
    }

    #[test]
    fn test_only_today_means_no_last_session() {
        let history = vec![entry("2024-01-02", "62", "8", 2)];
        let agg = SessionAggregator::new(&history, "2024-01-02");
        assert!(agg.last_session_sets().is_empty());
    }

    #[test]
    fn test_empty_history() {
        let agg = SessionAggregator::new(&[], "2024-01-02");
        let view = agg.view("3-4");
        assert!(view.todays_sets.is_empty());
        assert!(view.last_session_sets.is_empty());
        assert_eq!(view.progress_percent, 0);
        assert!(view.last_entry.is_none());
    }

    #[test]
    fn test_progress_range_target() {
        let history = vec![
            entry("2024-01-02", "60", "10", 1),
            entry("2024-01-02", "60", "10", 2),
            entry("2024-01-02", "60", "9", 3),
        ];
        let agg = SessionAggregator::new(&history, "2024-01-02");
        assert_eq!(agg.progress_percent("3-4"), 75);
        assert_eq!(agg.progress_percent("3"), 100);
        assert_eq!(agg.progress_percent("2"), 100);
    }

    #[test]
    fn test_progress_percent_bounds() {
        assert_eq!(progress_percent(0, 3), 0);
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(10, 4), 100);
        assert_eq!(progress_percent(1, 0), 100);
        for done in 0..20 {
            for target in 0..10 {
                assert!(progress_percent(done, target) <= 100);
            }
        }
    }

    #[test]
    fn test_view_last_entry_is_latest_appended() {
        let history = vec![
            entry("2024-01-01", "60", "10", 1),
            entry("2024-01-01", "62", "8", 2),
        ];
        let view = SessionAggregator::new(&history, "2024-01-02").view("3");
        assert_eq!(view.last_entry, Some(entry("2024-01-01", "62", "8", 2)));
        assert_eq!(view.last_session_sets.len(), 2);
    }
}
