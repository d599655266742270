//! Entry store for Daybook.
//!
//! Journal and mood entries are persisted as two JSON arrays under fixed
//! keys of an injected [`KeyValueStore`]. Every mutation reads the whole
//! collection, changes it, and writes it back.
//!
//! Reads fail soft: a missing, unreadable, or malformed collection lists as
//! empty. Writes fail loud so the caller can keep the draft and retry; a
//! collection that cannot be decoded is never overwritten.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::entry::{generate_id, Entry, JournalEntry, Mood, MoodEntry};
use crate::error::{DaybookError, FailOpen, Result};
use crate::storage::KeyValueStore;

/// Storage key for the journal entry collection.
pub const JOURNAL_ENTRIES_KEY: &str = "journal-entries";

/// Storage key for the mood entry collection.
pub const MOOD_ENTRIES_KEY: &str = "mood-entries";

/// Value written for a collection with no entries.
const EMPTY_COLLECTION: &str = "[]";

/// Journal and mood collections on top of a key-value medium.
#[derive(Debug)]
pub struct EntryStore<S: KeyValueStore> {
    storage: S,
}

impl<S: KeyValueStore> EntryStore<S> {
    /// Create a store over the given medium.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Access the underlying medium.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Write an empty collection under each key that has no value.
    ///
    /// Safe to call on every start: existing values, even malformed ones,
    /// are left alone.
    pub fn initialize_if_absent(&self) -> Result<()> {
        for key in [JOURNAL_ENTRIES_KEY, MOOD_ENTRIES_KEY] {
            if self.storage.get(key)?.is_none() {
                tracing::debug!(key, "initializing empty collection");
                self.storage.set(key, EMPTY_COLLECTION)?;
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Journal entries
    // -------------------------------------------------------------------------

    /// All journal entries in stored order.
    pub fn list_journal_entries(&self) -> Vec<JournalEntry> {
        self.list(JOURNAL_ENTRIES_KEY)
    }

    /// All journal entries, newest date first.
    ///
    /// Entries sharing a date keep their stored order.
    pub fn list_journal_entries_newest_first(&self) -> Vec<JournalEntry> {
        let mut entries = self.list_journal_entries();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    pub fn get_journal_entry(&self, id: &str) -> Option<JournalEntry> {
        self.list_journal_entries()
            .into_iter()
            .find(|entry| entry.id == id)
    }

    /// Insert the entry, or replace the stored entry with the same id.
    pub fn save_journal_entry(&self, entry: &JournalEntry) -> Result<()> {
        self.upsert(JOURNAL_ENTRIES_KEY, entry)
    }

    /// Remove the entry with this id. Missing ids are a no-op.
    pub fn delete_journal_entry(&self, id: &str) -> Result<()> {
        self.remove::<JournalEntry>(JOURNAL_ENTRIES_KEY, id)
    }

    // -------------------------------------------------------------------------
    // Mood entries
    // -------------------------------------------------------------------------

    /// All mood entries in stored order.
    pub fn list_mood_entries(&self) -> Vec<MoodEntry> {
        self.list(MOOD_ENTRIES_KEY)
    }

    pub fn get_mood_entry(&self, id: &str) -> Option<MoodEntry> {
        self.list_mood_entries()
            .into_iter()
            .find(|entry| entry.id == id)
    }

    /// First mood entry recorded for `date`.
    pub fn get_mood_entry_by_date(&self, date: NaiveDate) -> Option<MoodEntry> {
        self.list_mood_entries()
            .into_iter()
            .find(|entry| entry.date == date)
    }

    /// Insert the entry, or replace the stored entry with the same id.
    pub fn save_mood_entry(&self, entry: &MoodEntry) -> Result<()> {
        self.upsert(MOOD_ENTRIES_KEY, entry)
    }

    /// Remove the entry with this id. Missing ids are a no-op.
    pub fn delete_mood_entry(&self, id: &str) -> Result<()> {
        self.remove::<MoodEntry>(MOOD_ENTRIES_KEY, id)
    }

    /// Record the mood for a day, editing that day's entry if one exists.
    ///
    /// The first entry already stored for `date` keeps its id and is
    /// overwritten; otherwise a new id is generated. Notes and tags replace
    /// whatever the day had before.
    pub fn record_mood(
        &self,
        date: NaiveDate,
        mood: Mood,
        notes: Option<String>,
        tags: Vec<String>,
    ) -> Result<MoodEntry> {
        let id = self
            .get_mood_entry_by_date(date)
            .map(|existing| existing.id)
            .unwrap_or_else(generate_id);

        let mut entry = MoodEntry::new(date, mood).with_id(id).with_tags(tags);
        entry.notes = notes;

        self.save_mood_entry(&entry)?;
        Ok(entry)
    }

    // -------------------------------------------------------------------------
    // Collection plumbing
    // -------------------------------------------------------------------------

    /// Decode the collection under `key`; absent means empty.
    ///
    /// Mutations propagate `MalformedData` from here, leaving the stored
    /// value untouched.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.storage.get(key)? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|e| DaybookError::malformed(key, e.to_string()))
            }
            None => Ok(Vec::new()),
        }
    }

    fn list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.load(key)
            .fail_open_default(&format!("reading '{}'", key))
    }

    fn persist<T: Serialize>(&self, key: &str, entries: &[T]) -> Result<()> {
        let json = serde_json::to_string(entries)?;
        self.storage.set(key, &json)
    }

    fn upsert<T>(&self, key: &str, entry: &T) -> Result<()>
    where
        T: Entry + Clone + Serialize + DeserializeOwned,
    {
        let mut entries: Vec<T> = self.load(key)?;

        match entries.iter().position(|e| e.id() == entry.id()) {
            Some(index) => entries[index] = entry.clone(),
            None => entries.push(entry.clone()),
        }

        self.persist(key, &entries)
    }

    fn remove<T>(&self, key: &str, id: &str) -> Result<()>
    where
        T: Entry + Serialize + DeserializeOwned,
    {
        let mut entries: Vec<T> = self.load(key)?;
        entries.retain(|e| e.id() != id);
        self.persist(key, &entries)
    }
}
