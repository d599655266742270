//! Combined statistics view.
//!
//! Reads both collections once and derives everything the stats screen
//! shows. Nothing is cached; each call re-reads the store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{EntryStore, JournalEntry};
use crate::stats::{
    current_streak, daily_trend_series, monthly_mood_distribution, top_tags, CalendarMonth,
    MoodDistribution, TagCount, TrendPoint,
};
use crate::storage::KeyValueStore;

/// Total number of journal entries.
pub fn journal_entry_count(journal_entries: &[JournalEntry]) -> usize {
    journal_entries.len()
}

/// Everything the stats view shows for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub month: CalendarMonth,
    pub today: NaiveDate,
    pub journal_entries: usize,
    /// All mood entries, not only this month's.
    pub mood_entries: usize,
    pub current_streak: u32,
    pub distribution: MoodDistribution,
    pub trend: Vec<TrendPoint>,
    pub top_tags: Vec<TagCount>,
}

impl StatsSummary {
    /// Derive the summary from the store's current contents.
    pub fn collect<S: KeyValueStore>(
        store: &EntryStore<S>,
        month: CalendarMonth,
        today: NaiveDate,
        top_tags_limit: usize,
    ) -> Self {
        let journal = store.list_journal_entries();
        let moods = store.list_mood_entries();

        Self {
            month,
            today,
            journal_entries: journal_entry_count(&journal),
            mood_entries: moods.len(),
            current_streak: current_streak(&moods, today),
            distribution: monthly_mood_distribution(&moods, month),
            trend: daily_trend_series(&moods, month),
            top_tags: top_tags(&moods, month, top_tags_limit),
        }
    }

    /// Days in the month that have a recorded mood.
    pub fn days_recorded(&self) -> usize {
        self.trend.iter().filter(|p| !p.is_gap()).count()
    }
}
