//! Entry types for Daybook.
//!
//! Journal entries hold free text; mood entries hold one categorical mood
//! per day plus optional notes and tags. Both serialize to the same JSON
//! shape the collections have always been stored in.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DaybookError, Result};

/// Title shown for journal entries saved without one.
pub const UNTITLED: &str = "Untitled Entry";

/// Width of the random part of a generated id (13 base-36 digits cover u64).
const ID_SUFFIX_WIDTH: usize = 13;

/// Common accessors for stored entries.
///
/// The entry store is generic over this so journal and mood collections
/// share one upsert/delete path.
pub trait Entry {
    /// Opaque identifier, unique within its collection.
    fn id(&self) -> &str;

    /// Calendar date the entry pertains to.
    fn date(&self) -> NaiveDate;
}

/// Mood category.
///
/// Declaration order is the rank order, so the derived `Ord` sorts from
/// angry to excited.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Angry,
    Sad,
    #[default]
    Neutral,
    Happy,
    Excited,
}

impl Mood {
    /// Get all mood variants in rank order.
    pub fn all() -> &'static [Mood] {
        &[
            Mood::Angry,
            Mood::Sad,
            Mood::Neutral,
            Mood::Happy,
            Mood::Excited,
        ]
    }

    /// Numeric rank used by the trend series (1 = angry, 5 = excited).
    pub fn score(self) -> u8 {
        match self {
            Mood::Angry => 1,
            Mood::Sad => 2,
            Mood::Neutral => 3,
            Mood::Happy => 4,
            Mood::Excited => 5,
        }
    }

    /// Inverse of [`Mood::score`].
    pub fn from_score(score: u8) -> Option<Mood> {
        Mood::all().iter().copied().find(|m| m.score() == score)
    }

    /// Stored name.
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Angry => "angry",
            Mood::Sad => "sad",
            Mood::Neutral => "neutral",
            Mood::Happy => "happy",
            Mood::Excited => "excited",
        }
    }

    /// Get the display name for this mood.
    pub fn display_name(self) -> &'static str {
        match self {
            Mood::Angry => "Angry",
            Mood::Sad => "Sad",
            Mood::Neutral => "Neutral",
            Mood::Happy => "Happy",
            Mood::Excited => "Excited",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Angry => "\u{1F621}",
            Mood::Sad => "\u{1F622}",
            Mood::Neutral => "\u{1F610}",
            Mood::Happy => "\u{1F60A}",
            Mood::Excited => "\u{1F929}",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = DaybookError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Mood::all()
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let names: Vec<&str> = Mood::all().iter().map(|m| m.as_str()).collect();
                DaybookError::invalid_entry(format!(
                    "unknown mood '{}', expected one of: {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}

/// A free-text journal entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JournalEntry {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl JournalEntry {
    /// Create a new entry with a freshly generated id.
    pub fn new(date: NaiveDate, content: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            date,
            title: None,
            content: content.into(),
            tags: Vec::new(),
        }
    }

    /// Use an existing id (editing rather than creating).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add tags through [`JournalEntry::add_tag`], so blanks and repeats drop out.
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        for tag in tags {
            self.add_tag(tag.as_ref());
        }
        self
    }

    /// Add a trimmed tag. Returns false for blank or already-present tags.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        push_tag(&mut self.tags, tag)
    }

    /// Remove a tag. Returns whether it was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Title for display, falling back to [`UNTITLED`].
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => UNTITLED,
        }
    }

    /// Check the entry is worth saving.
    pub fn validate(&self) -> Result<()> {
        if self.content.trim().is_empty() {
            return Err(DaybookError::invalid_entry(
                "content is empty; write something before saving",
            ));
        }
        Ok(())
    }
}

impl Entry for JournalEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// A recorded mood for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodEntry {
    pub id: String,
    pub date: NaiveDate,
    pub mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl MoodEntry {
    /// Create a new mood entry with a freshly generated id.
    pub fn new(date: NaiveDate, mood: Mood) -> Self {
        Self {
            id: generate_id(),
            date,
            mood,
            notes: None,
            tags: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        for tag in tags {
            push_tag(&mut self.tags, tag.as_ref());
        }
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Add the tag if missing, remove it if present.
    ///
    /// Returns whether the tag is present afterwards.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if self.has_tag(tag) {
            self.tags.retain(|t| t != tag);
            false
        } else {
            push_tag(&mut self.tags, tag)
        }
    }
}

impl Entry for MoodEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn date(&self) -> NaiveDate {
        self.date
    }
}

fn push_tag(tags: &mut Vec<String>, tag: &str) -> bool {
    let tag = tag.trim();
    if tag.is_empty() || tags.iter().any(|t| t == tag) {
        return false;
    }
    tags.push(tag.to_string());
    true
}

/// Generate an entry id.
///
/// Format: base-36 millisecond timestamp followed by a zero-padded base-36
/// random `u64`. Needs no shared state, so ids from separate stores or
/// processes only collide if both the millisecond and 64 random bits match.
pub fn generate_id() -> String {
    let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
    let suffix: u64 = rand::random();
    format!(
        "{}{:0>width$}",
        to_base36(millis),
        to_base36(suffix),
        width = ID_SUFFIX_WIDTH
    )
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
