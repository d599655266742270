//! Mood command for Daybook.
//!
//! Records, shows, lists, and deletes mood entries.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::cli::{date_or_today, DATE_FORMAT};
use crate::core::{EntryStore, Mood, MoodEntry};
use crate::error::{DaybookError, Result};
use crate::stats::{week_entries, CalendarMonth};
use crate::storage::KeyValueStore;

/// Options for the mood command.
#[derive(Debug, Clone, Default)]
pub struct MoodOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// What the mood command should do.
#[derive(Debug, Clone)]
pub enum MoodAction {
    /// Record the mood for a day, replacing that day's entry if present.
    Record {
        mood: String,
        date: Option<String>,
        notes: Option<String>,
        tags: Vec<String>,
    },
    /// Show the entry for a day (default today).
    Show { date: Option<String> },
    /// List entries newest first, optionally for one `YYYY-MM` month.
    List {
        month: Option<String>,
        limit: Option<usize>,
    },
    /// Entries for the current Sunday-to-Saturday week.
    Week,
    /// Delete an entry by id.
    Delete { id: String },
}

impl MoodAction {
    fn name(&self) -> &'static str {
        match self {
            MoodAction::Record { .. } => "record",
            MoodAction::Show { .. } => "show",
            MoodAction::List { .. } => "list",
            MoodAction::Week => "week",
            MoodAction::Delete { .. } => "delete",
        }
    }
}

/// Output format for the mood command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodOutput {
    /// Whether the action succeeded.
    pub success: bool,
    /// Which action ran.
    pub action: String,
    /// Number of entries in `entries`.
    pub count: usize,
    /// Entries recorded, shown, listed, or deleted.
    pub entries: Vec<MoodEntry>,
    /// Error message if the action failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MoodOutput {
    /// Create a successful output.
    pub fn success(action: &str, entries: Vec<MoodEntry>) -> Self {
        Self {
            success: true,
            action: action.to_string(),
            count: entries.len(),
            entries,
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(action: &str, error: impl Into<String>) -> Self {
        Self {
            success: false,
            action: action.to_string(),
            count: 0,
            entries: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// The mood command implementation.
pub struct MoodCommand<S: KeyValueStore> {
    store: EntryStore<S>,
    today: NaiveDate,
}

impl<S: KeyValueStore> MoodCommand<S> {
    /// Create a new mood command dated today.
    pub fn new(store: EntryStore<S>) -> Self {
        Self {
            store,
            today: Local::now().date_naive(),
        }
    }

    /// Override today's date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Run the mood command.
    pub fn run(&self, action: &MoodAction) -> MoodOutput {
        let name = action.name();
        let result = match action {
            MoodAction::Record {
                mood,
                date,
                notes,
                tags,
            } => self
                .record(mood, date.as_deref(), notes.as_deref(), tags)
                .map(|e| vec![e]),
            MoodAction::Show { date } => self.show(date.as_deref()).map(|e| vec![e]),
            MoodAction::List { month, limit } => self.list(month.as_deref(), *limit),
            MoodAction::Week => Ok(week_entries(&self.store.list_mood_entries(), self.today)),
            MoodAction::Delete { id } => self.delete(id),
        };

        match result {
            Ok(entries) => MoodOutput::success(name, entries),
            Err(e) => MoodOutput::failure(name, e.to_string()),
        }
    }

    fn record(
        &self,
        mood: &str,
        date: Option<&str>,
        notes: Option<&str>,
        tags: &[String],
    ) -> Result<MoodEntry> {
        let mood: Mood = mood.parse()?;
        let date = date_or_today(date, self.today)?;
        let notes = notes
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        let entry = self.store.record_mood(date, mood, notes, tags.to_vec())?;
        tracing::debug!(id = %entry.id, %date, %mood, "mood recorded");
        Ok(entry)
    }

    fn show(&self, date: Option<&str>) -> Result<MoodEntry> {
        let date = date_or_today(date, self.today)?;
        self.store.get_mood_entry_by_date(date).ok_or_else(|| {
            DaybookError::not_found(format!("mood entry for {}", date.format(DATE_FORMAT)))
        })
    }

    fn list(&self, month: Option<&str>, limit: Option<usize>) -> Result<Vec<MoodEntry>> {
        let month = month.map(str::parse::<CalendarMonth>).transpose()?;

        let mut entries = self.store.list_mood_entries();
        if let Some(month) = month {
            entries.retain(|e| month.contains(e.date));
        }
        // Stable, so same-date entries keep stored order
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        Ok(entries)
    }

    /// Deleting an unknown id succeeds with nothing removed.
    fn delete(&self, id: &str) -> Result<Vec<MoodEntry>> {
        let removed = self.store.get_mood_entry(id);
        self.store.delete_mood_entry(id)?;
        Ok(removed.into_iter().collect())
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &MoodOutput, options: &MoodOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    /// Format output as human-readable text.
    fn format_human_readable(&self, output: &MoodOutput) -> String {
        if !output.success {
            return format!(
                "Mood {} failed: {}\n",
                output.action,
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        match output.action.as_str() {
            "record" => match output.entries.first() {
                Some(entry) => format!("Recorded {}\n", format_line(entry)),
                None => String::new(),
            },
            "show" => output
                .entries
                .first()
                .map(|entry| format_lines(std::slice::from_ref(entry)))
                .unwrap_or_default(),
            "delete" => match output.entries.first() {
                Some(entry) => format!("Deleted {}\n", format_line(entry)),
                None => "Nothing to delete.\n".to_string(),
            },
            "week" if output.entries.is_empty() => "No moods recorded this week.\n".to_string(),
            _ if output.entries.is_empty() => "No moods recorded yet.\n".to_string(),
            _ => format_lines(&output.entries),
        }
    }
}

fn format_line(entry: &MoodEntry) -> String {
    let mut line = format!(
        "{}  {} {}",
        entry.date.format(DATE_FORMAT),
        entry.mood.emoji(),
        entry.mood.display_name()
    );
    if !entry.tags.is_empty() {
        line.push_str(&format!("  [{}]", entry.tags.join(", ")));
    }
    line
}

fn format_lines(entries: &[MoodEntry]) -> String {
    let mut lines = Vec::new();
    for entry in entries {
        lines.push(format_line(entry));
        if let Some(notes) = &entry.notes {
            lines.push(format!("   {}", notes));
        }
        lines.push(format!("   ID: {}", entry.id));
    }
    lines.join("\n") + "\n"
}
