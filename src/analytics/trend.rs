//! Body-weight trend for the chart

use std::collections::BTreeMap;

use crate::calendar::{DateKey, parse_date_key, short_label};
use crate::store::DailyStatRecord;

/// How many most recent stat days feed the chart
pub const RECENT_DAYS: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub date: DateKey,
    /// "9 Feb"
    pub label: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartSeries {
    /// Chronological points, at least two
    Points(Vec<ChartPoint>),
    /// Fewer than two days with a weight; show a placeholder instead
    InsufficientData,
}

impl ChartSeries {
    pub fn points(&self) -> &[ChartPoint] {
        match self {
            ChartSeries::Points(points) => points,
            ChartSeries::InsufficientData => &[],
        }
    }
}

pub struct TrendProjector;

impl TrendProjector {
    /// Last `limit` stat days in date order, minus days without a weight
    pub fn project(records: &BTreeMap<DateKey, DailyStatRecord>, limit: usize) -> ChartSeries {
        let skip = records.len().saturating_sub(limit);
        let points: Vec<ChartPoint> = records
            .iter()
            .skip(skip)
            .filter_map(|(date, record)| {
                let weight = parse_weight(&record.weight)?;
                let label = parse_date_key(date)
                    .map(short_label)
                    .unwrap_or_else(|| date.clone());
                Some(ChartPoint {
                    date: date.clone(),
                    label,
                    weight,
                })
            })
            .collect();

        if points.len() < 2 {
            ChartSeries::InsufficientData
        } else {
            ChartSeries::Points(points)
        }
    }
}

/// Weight as typed into the form; blank or non-numeric is "no weight"
fn parse_weight(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.replace(',', ".").parse::<f64>().ok().filter(|w| w.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(rows: &[(&str, &str, &str)]) -> BTreeMap<DateKey, DailyStatRecord> {
        rows.iter()
            .map(|(date, weight, calories)| (date.to_string(), DailyStatRecord::new(*weight, *calories)))
            .collect()
    }

    #[test]
    fn test_single_weight_is_insufficient() {
        let records = stats(&[("2024-01-01", "80", ""), ("2024-01-02", "", "")]);
        assert_eq!(TrendProjector::project(&records, RECENT_DAYS), ChartSeries::InsufficientData);
    }

    #[test]
    fn test_calorie_only_days_do_not_count() {
        let records = stats(&[
            ("2024-01-01", "80", "400"),
            ("2024-01-02", "", "450"),
            ("2024-01-03", "", "500"),
        ]);
        assert_eq!(TrendProjector::project(&records, RECENT_DAYS), ChartSeries::InsufficientData);
        assert!(TrendProjector::project(&BTreeMap::new(), RECENT_DAYS).points().is_empty());
    }

    #[test]
    fn test_points_chronological_with_labels() {
        let records = stats(&[
            ("2024-02-09", "79.5", ""),
            ("2024-01-31", "80", ""),
            ("2024-02-01", "", "300"),
            ("2024-02-03", "79,8", ""),
        ]);
        let series = TrendProjector::project(&records, RECENT_DAYS);
        let points = series.points();

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].date, "2024-01-31");
        assert_eq!(points[0].label, "31 Jan");
        assert_eq!(points[1].weight, 79.8);
        assert_eq!(points[2].label, "9 Feb");
    }

    #[test]
    fn test_only_recent_days_used() {
        let rows: Vec<(String, String)> = (1..=10)
            .map(|d| (format!("2024-01-{d:02}"), format!("{}", 90 - d)))
            .collect();
        let records: BTreeMap<DateKey, DailyStatRecord> = rows
            .iter()
            .map(|(date, weight)| (date.clone(), DailyStatRecord::new(weight.as_str(), "")))
            .collect();

        let series = TrendProjector::project(&records, RECENT_DAYS);
        let points = series.points();
        assert_eq!(points.len(), RECENT_DAYS);
        assert_eq!(points[0].date, "2024-01-04");
        assert_eq!(points[6].date, "2024-01-10");
    }

    #[test]
    fn test_limit_applies_before_filtering() {
        // Older weights are outside the window even though recent days lack one
        let records = stats(&[
            ("2024-01-01", "80", ""),
            ("2024-01-02", "81", ""),
            ("2024-01-03", "", "300"),
            ("2024-01-04", "82", ""),
        ]);
        assert_eq!(TrendProjector::project(&records, 2), ChartSeries::InsufficientData);
    }

    #[test]
    fn test_non_numeric_weight_dropped() {
        assert_eq!(parse_weight(" 80.5 "), Some(80.5));
        assert_eq!(parse_weight("heavy"), None);
        assert_eq!(parse_weight(""), None);
    }
}
