//! Day-based views anchored on today: the current streak and this week.

use std::collections::HashSet;

use chrono::{Datelike, Days, NaiveDate};

use crate::core::MoodEntry;

/// Consecutive days, walking back from `today`, that have a mood entry.
///
/// Returns 0 when `today` has no entry, even if yesterday does.
pub fn current_streak(entries: &[MoodEntry], today: NaiveDate) -> u32 {
    let recorded: HashSet<NaiveDate> = entries.iter().map(|e| e.date).collect();

    let mut streak = 0;
    let mut day = Some(today);
    while let Some(date) = day.filter(|d| recorded.contains(d)) {
        streak += 1;
        day = date.pred_opt();
    }
    streak
}

/// First day (Sunday) of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Entries dated in the Sunday-to-Saturday week containing `today`.
///
/// Sorted by date; entries on the same date keep stored order.
pub fn week_entries(entries: &[MoodEntry], today: NaiveDate) -> Vec<MoodEntry> {
    let start = week_start(today);
    let end = start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);

    let mut week: Vec<MoodEntry> = entries
        .iter()
        .filter(|e| e.date >= start && e.date <= end)
        .cloned()
        .collect();
    week.sort_by_key(|e| e.date);
    week
}
