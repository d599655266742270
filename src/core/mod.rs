//! Core types and persistence for Daybook.
//!
//! This module contains the journal and mood entry types and the entry
//! store that persists them into a key-value medium.

pub mod entry;
pub mod store;

pub use entry::{generate_id, Entry, JournalEntry, Mood, MoodEntry, UNTITLED};
pub use store::{EntryStore, JOURNAL_ENTRIES_KEY, MOOD_ENTRIES_KEY};
