//! Daybook - journaling and mood tracking
//!
//! Daybook keeps two collections, free-form journal entries and one mood
//! per day, on top of a pluggable key-value store. Statistics for a calendar
//! month (distribution, daily trend, top tags, streak) are derived on demand
//! from the stored entries.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod stats;
pub mod storage;

pub use config::Config;
pub use core::{
    generate_id, Entry, EntryStore, JournalEntry, Mood, MoodEntry, JOURNAL_ENTRIES_KEY,
    MOOD_ENTRIES_KEY,
};
pub use error::{DaybookError, Result};
pub use stats::{
    current_streak, daily_trend_series, journal_entry_count, monthly_mood_distribution, top_tags,
    week_entries, CalendarMonth, MoodDistribution, StatsSummary, TagCount, TrendPoint,
};
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};

// CLI commands
pub use cli::{InitCommand, JournalCommand, MoodCommand, StatsCommand};
