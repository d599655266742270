//! Daily mood trend series.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{Mood, MoodEntry};
use crate::stats::CalendarMonth;

/// One day of the trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Day of month, 1-based.
    pub day: u32,
    pub date: NaiveDate,
    /// Mood rank for the day, `None` when nothing was recorded.
    pub score: Option<u8>,
    pub mood: Option<Mood>,
}

impl TrendPoint {
    pub fn is_gap(&self) -> bool {
        self.mood.is_none()
    }
}

/// One point per day of `month`, in day order.
///
/// Days without an entry stay as gaps; nothing is interpolated. When a day
/// has several entries the first one in the collection wins.
pub fn daily_trend_series(entries: &[MoodEntry], month: CalendarMonth) -> Vec<TrendPoint> {
    let mut by_date: HashMap<NaiveDate, Mood> = HashMap::new();
    for entry in entries.iter().filter(|e| month.contains(e.date)) {
        by_date.entry(entry.date).or_insert(entry.mood);
    }

    month
        .days()
        .map(|date| {
            let mood = by_date.get(&date).copied();
            TrendPoint {
                day: date.day(),
                date,
                score: mood.map(Mood::score),
                mood,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mood(id: &str, date: &str, mood: Mood) -> MoodEntry {
        MoodEntry::new(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(), mood).with_id(id)
    }

    fn june() -> CalendarMonth {
        CalendarMonth::new(2024, 6).unwrap()
    }

    #[test]
    fn test_gap_is_preserved() {
        let entries = vec![
            mood("1", "2024-06-01", Mood::Happy),
            mood("3", "2024-06-03", Mood::Sad),
        ];

        let series = daily_trend_series(&entries, june());

        assert_eq!(series.len(), 30);
        assert_eq!(series[0].day, 1);
        assert_eq!(series[0].score, Some(Mood::Happy.score()));
        assert_eq!(series[0].mood, Some(Mood::Happy));
        assert_eq!(series[1].day, 2);
        assert!(series[1].is_gap());
        assert_eq!(series[1].score, None);
        assert_eq!(series[2].score, Some(Mood::Sad.score()));
    }

    #[test]
    fn test_empty_collection_all_gaps() {
        let series = daily_trend_series(&[], june());
        assert_eq!(series.len(), 30);
        assert!(series.iter().all(TrendPoint::is_gap));
    }

    #[test]
    fn test_days_in_order_with_dates() {
        let series = daily_trend_series(&[], CalendarMonth::new(2024, 2).unwrap());
        let days: Vec<u32> = series.iter().map(|p| p.day).collect();
        assert_eq!(days, (1..=29).collect::<Vec<_>>());
        assert_eq!(
            series[28].date,
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_first_entry_wins_on_duplicate_date() {
        let entries = vec![
            mood("a", "2024-06-05", Mood::Angry),
            mood("b", "2024-06-05", Mood::Excited),
        ];
        let series = daily_trend_series(&entries, june());
        assert_eq!(series[4].mood, Some(Mood::Angry));
    }

    #[test]
    fn test_ignores_other_months() {
        let entries = vec![mood("a", "2024-07-01", Mood::Happy)];
        let series = daily_trend_series(&entries, june());
        assert!(series.iter().all(TrendPoint::is_gap));
    }
}
