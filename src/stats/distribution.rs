//! Per-month mood distribution.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::{Mood, MoodEntry};
use crate::stats::CalendarMonth;

/// Count of entries per mood.
///
/// Every mood is always present, with zero for moods not recorded, so a
/// chart legend can be drawn without existence checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodDistribution {
    counts: BTreeMap<Mood, usize>,
}

impl Default for MoodDistribution {
    fn default() -> Self {
        Self {
            counts: Mood::all().iter().map(|&mood| (mood, 0)).collect(),
        }
    }
}

impl MoodDistribution {
    /// Count moods over `entries` without any date filter.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a MoodEntry>,
    {
        let mut distribution = Self::default();
        for entry in entries {
            *distribution.counts.entry(entry.mood).or_insert(0) += 1;
        }
        distribution
    }

    pub fn count(&self, mood: Mood) -> usize {
        self.counts.get(&mood).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// True when no mood has a non-zero count.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Fraction of entries with this mood, 0.0 when there are none.
    pub fn share(&self, mood: Mood) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.count(mood) as f64 / total as f64
        }
    }

    /// `(mood, count)` pairs in rank order, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (Mood, usize)> + '_ {
        self.counts.iter().map(|(&mood, &count)| (mood, count))
    }
}

/// Mood counts for entries dated within `month`.
pub fn monthly_mood_distribution(entries: &[MoodEntry], month: CalendarMonth) -> MoodDistribution {
    MoodDistribution::from_entries(entries.iter().filter(|e| month.contains(e.date)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn mood(id: &str, date: &str, mood: Mood) -> MoodEntry {
        MoodEntry::new(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(), mood).with_id(id)
    }

    fn june() -> CalendarMonth {
        CalendarMonth::new(2024, 6).unwrap()
    }

    #[test]
    fn test_empty_collection_has_every_mood_at_zero() {
        let distribution = monthly_mood_distribution(&[], june());

        assert_eq!(distribution.iter().count(), Mood::all().len());
        for &m in Mood::all() {
            assert_eq!(distribution.count(m), 0);
        }
        assert!(distribution.is_empty());
        assert_eq!(distribution.share(Mood::Happy), 0.0);
    }

    #[test]
    fn test_counts_only_selected_month() {
        let entries = vec![
            mood("1", "2024-06-01", Mood::Happy),
            mood("2", "2024-06-02", Mood::Happy),
            mood("3", "2024-06-30", Mood::Sad),
            mood("4", "2024-05-31", Mood::Angry),
            mood("5", "2024-07-01", Mood::Excited),
        ];

        let distribution = monthly_mood_distribution(&entries, june());

        assert_eq!(distribution.count(Mood::Happy), 2);
        assert_eq!(distribution.count(Mood::Sad), 1);
        assert_eq!(distribution.count(Mood::Angry), 0);
        assert_eq!(distribution.count(Mood::Excited), 0);
        assert_eq!(distribution.total(), 3);
    }

    #[test]
    fn test_share() {
        let entries = vec![
            mood("1", "2024-06-01", Mood::Happy),
            mood("2", "2024-06-02", Mood::Happy),
            mood("3", "2024-06-03", Mood::Sad),
            mood("4", "2024-06-04", Mood::Neutral),
        ];
        let distribution = monthly_mood_distribution(&entries, june());
        assert!((distribution.share(Mood::Happy) - 0.5).abs() < f64::EPSILON);
        assert!((distribution.share(Mood::Sad) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_iter_in_rank_order() {
        let moods: Vec<Mood> = MoodDistribution::default().iter().map(|(m, _)| m).collect();
        assert_eq!(moods, Mood::all());
    }

    #[test]
    fn test_serializes_with_mood_keys() {
        let entries = vec![mood("1", "2024-06-01", Mood::Happy)];
        let json = serde_json::to_value(monthly_mood_distribution(&entries, june())).unwrap();
        assert_eq!(json["counts"]["happy"], 1);
        assert_eq!(json["counts"]["angry"], 0);
    }
}
