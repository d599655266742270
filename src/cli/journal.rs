//! Journal command for Daybook.
//!
//! Lists, shows, writes, and deletes journal entries.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::cli::{date_or_today, parse_date, DATE_FORMAT};
use crate::config::Config;
use crate::core::{EntryStore, JournalEntry};
use crate::error::{DaybookError, Result};
use crate::storage::KeyValueStore;

/// Options for the journal command.
#[derive(Debug, Clone, Default)]
pub struct JournalOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Fields for creating or editing an entry.
#[derive(Debug, Clone, Default)]
pub struct JournalDraft {
    /// Existing entry to edit. A new id is generated when absent.
    pub id: Option<String>,
    /// Entry date as `YYYY-MM-DD`. Defaults to today, or the edited entry's date.
    pub date: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    /// Replaces the edited entry's tags when non-empty.
    pub tags: Vec<String>,
    /// Drop the edited entry's tags before applying `tags`.
    pub clear_tags: bool,
}

/// What the journal command should do.
#[derive(Debug, Clone)]
pub enum JournalAction {
    /// List entries newest first.
    List { limit: Option<usize> },
    /// Show one entry.
    Show { id: String },
    /// Create or edit an entry.
    Write(JournalDraft),
    /// Delete an entry.
    Delete { id: String },
}

impl JournalAction {
    fn name(&self) -> &'static str {
        match self {
            JournalAction::List { .. } => "list",
            JournalAction::Show { .. } => "show",
            JournalAction::Write(_) => "write",
            JournalAction::Delete { .. } => "delete",
        }
    }
}

/// Output format for the journal command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalOutput {
    /// Whether the action succeeded.
    pub success: bool,
    /// Which action ran.
    pub action: String,
    /// Number of entries in `entries`.
    pub count: usize,
    /// Entries listed, shown, written, or deleted.
    pub entries: Vec<JournalEntry>,
    /// Error message if the action failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JournalOutput {
    /// Create a successful output.
    pub fn success(action: &str, entries: Vec<JournalEntry>) -> Self {
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

/// The journal command implementation.
pub struct JournalCommand<S: KeyValueStore> {
    store: EntryStore<S>,
    config: Config,
    today: NaiveDate,
}

impl<S: KeyValueStore> JournalCommand<S> {
    /// Create a new journal command dated today.
    pub fn new(store: EntryStore<S>, config: Config) -> Self {
        Self {
            store,
            config,
            today: Local::now().date_naive(),
        }
    }

    /// Override today's date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Run the journal command.
    pub fn run(&self, action: &JournalAction) -> JournalOutput {
        let name = action.name();
        let result = match action {
            JournalAction::List { limit } => Ok(self.list(*limit)),
            JournalAction::Show { id } => self.show(id).map(|e| vec![e]),
            JournalAction::Write(draft) => self.write(draft).map(|e| vec![e]),
            JournalAction::Delete { id } => self.delete(id),
        };

        match result {
            Ok(entries) => JournalOutput::success(name, entries),
            Err(e) => JournalOutput::failure(name, e.to_string()),
        }
    }

    fn list(&self, limit: Option<usize>) -> Vec<JournalEntry> {
        let mut entries = self.store.list_journal_entries_newest_first();
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        entries
    }

    fn show(&self, id: &str) -> Result<JournalEntry> {
        self.store
            .get_journal_entry(id)
            .ok_or_else(|| DaybookError::not_found(format!("journal entry '{}'", id)))
    }

    fn write(&self, draft: &JournalDraft) -> Result<JournalEntry> {
        let entry = match draft.id.as_deref() {
            Some(id) => {
                let existing = self.show(id)?;
                self.apply_edit(existing, draft)?
            }
            None => {
                let date = date_or_today(draft.date.as_deref(), self.today)?;
                let mut entry =
                    JournalEntry::new(date, draft.content.clone().unwrap_or_default())
                        .with_tags(&draft.tags);
                entry.title = draft.title.clone().filter(|t| !t.trim().is_empty());
                entry
            }
        };

        if self.config.journal.require_content {
            entry.validate()?;
        }

        self.store.save_journal_entry(&entry)?;
        tracing::debug!(id = %entry.id, "journal entry saved");
        Ok(entry)
    }

    fn apply_edit(&self, mut entry: JournalEntry, draft: &JournalDraft) -> Result<JournalEntry> {
        if let Some(date) = draft.date.as_deref() {
            entry.date = parse_date(date)?;
        }
        if let Some(title) = &draft.title {
            entry.title = Some(title.clone()).filter(|t| !t.trim().is_empty());
        }
        if let Some(content) = &draft.content {
            entry.content = content.clone();
        }
        if draft.clear_tags || !draft.tags.is_empty() {
            entry.tags.clear();
            for tag in &draft.tags {
                entry.add_tag(tag);
            }
        }
        Ok(entry)
    }

    /// Deleting an unknown id succeeds with nothing removed.
    fn delete(&self, id: &str) -> Result<Vec<JournalEntry>> {
        let removed = self.store.get_journal_entry(id);
        self.store.delete_journal_entry(id)?;
        Ok(removed.into_iter().collect())
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &JournalOutput, options: &JournalOptions) -> String {
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
    fn format_human_readable(&self, output: &JournalOutput) -> String {
        if !output.success {
            return format!(
                "Journal {} failed: {}\n",
                output.action,
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        match output.action.as_str() {
            "list" => format_list(&output.entries),
            "show" => output.entries.first().map(format_entry).unwrap_or_default(),
            "write" => match output.entries.first() {
                Some(entry) => format!("Saved \"{}\" ({})\n", entry.display_title(), entry.id),
                None => String::new(),
            },
            _ => match output.entries.first() {
                Some(entry) => format!("Deleted \"{}\" ({})\n", entry.display_title(), entry.id),
                None => "Nothing to delete.\n".to_string(),
            },
        }
    }
}

fn format_list(entries: &[JournalEntry]) -> String {
    if entries.is_empty() {
        return "No journal entries yet.\n".to_string();
    }

    let mut lines = vec![format!("{} journal entr{}:\n", entries.len(), plural(entries.len()))];
    for entry in entries {
        let mut line = format!(
            "{}  {}",
            entry.date.format(DATE_FORMAT),
            entry.display_title()
        );
        if !entry.tags.is_empty() {
            line.push_str(&format!("  [{}]", entry.tags.join(", ")));
        }
        lines.push(line);
        lines.push(format!("   ID: {}", entry.id));
    }
    lines.join("\n") + "\n"
}

fn format_entry(entry: &JournalEntry) -> String {
    let mut lines = vec![
        entry.display_title().to_string(),
        entry.date.format("%A, %B %-d, %Y").to_string(),
    ];
    if !entry.tags.is_empty() {
        lines.push(format!("Tags: {}", entry.tags.join(", ")));
    }
    lines.push(String::new());
    lines.push(entry.content.clone());
    lines.join("\n") + "\n"
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "y"
    } else {
        "ies"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;
    use std::sync::Arc;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn setup() -> (
        JournalCommand<Arc<MemoryKeyValueStore>>,
        EntryStore<Arc<MemoryKeyValueStore>>,
    ) {
        let storage = Arc::new(MemoryKeyValueStore::new());
        let cmd = JournalCommand::new(EntryStore::new(Arc::clone(&storage)), Config::default())
            .with_today(date("2024-06-10"));
        (cmd, EntryStore::new(storage))
    }

    fn write(content: &str) -> JournalAction {
        JournalAction::Write(JournalDraft {
            content: Some(content.to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_write_defaults_to_today() {
        let (cmd, store) = setup();

        let output = cmd.run(&JournalAction::Write(JournalDraft {
            title: Some("Morning".to_string()),
            content: Some("Coffee and rain".to_string()),
            tags: vec![" Home ".to_string(), "Home".to_string()],
            ..Default::default()
        }));

        assert!(output.success);
        let entry = &output.entries[0];
        assert_eq!(entry.date, date("2024-06-10"));
        assert_eq!(entry.title.as_deref(), Some("Morning"));
        assert_eq!(entry.tags, vec!["Home".to_string()]);
        assert_eq!(store.get_journal_entry(&entry.id).as_ref(), Some(entry));
    }

    #[test]
    fn test_write_blank_content_refused() {
        let (cmd, store) = setup();

        let output = cmd.run(&write("   \n"));

        assert!(!output.success);
        assert!(output.error.unwrap().contains("content is empty"));
        assert!(store.list_journal_entries().is_empty());
    }

    #[test]
    fn test_write_blank_content_allowed_when_configured() {
        let storage = Arc::new(MemoryKeyValueStore::new());
        let mut config = Config::default();
        config.journal.require_content = false;
        let cmd = JournalCommand::new(EntryStore::new(Arc::clone(&storage)), config);

        assert!(cmd.run(&write("")).success);
        assert_eq!(EntryStore::new(storage).list_journal_entries().len(), 1);
    }

    #[test]
    fn test_write_invalid_date() {
        let (cmd, _) = setup();

        let output = cmd.run(&JournalAction::Write(JournalDraft {
            date: Some("June 9th".to_string()),
            content: Some("text".to_string()),
            ..Default::default()
        }));

        assert!(!output.success);
        assert!(output.error.unwrap().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_edit_keeps_id_and_unchanged_fields() {
        let (cmd, store) = setup();
        let original = JournalEntry::new(date("2024-06-01"), "first draft")
            .with_id("j1")
            .with_title("Walk")
            .with_tags(["Outside"]);
        store.save_journal_entry(&original).unwrap();

        let output = cmd.run(&JournalAction::Write(JournalDraft {
            id: Some("j1".to_string()),
            content: Some("second draft".to_string()),
            ..Default::default()
        }));

        assert!(output.success);
        let stored = store.get_journal_entry("j1").unwrap();
        assert_eq!(stored.content, "second draft");
        assert_eq!(stored.title.as_deref(), Some("Walk"));
        assert_eq!(stored.date, date("2024-06-01"));
        assert_eq!(stored.tags, vec!["Outside".to_string()]);
        assert_eq!(store.list_journal_entries().len(), 1);
    }

    #[test]
    fn test_edit_can_clear_all_tags() {
        let (cmd, store) = setup();
        store
            .save_journal_entry(
                &JournalEntry::new(date("2024-06-01"), "text")
                    .with_id("j1")
                    .with_tags(["Work", "Travel"]),
            )
            .unwrap();

        let output = cmd.run(&JournalAction::Write(JournalDraft {
            id: Some("j1".to_string()),
            clear_tags: true,
            ..Default::default()
        }));

        assert!(output.success);
        let stored = store.get_journal_entry("j1").unwrap();
        assert!(stored.tags.is_empty());
        assert_eq!(stored.content, "text");
    }

    #[test]
    fn test_edit_clear_tags_then_add() {
        let (cmd, store) = setup();
        store
            .save_journal_entry(
                &JournalEntry::new(date("2024-06-01"), "text")
                    .with_id("j1")
                    .with_tags(["Work"]),
            )
            .unwrap();

        cmd.run(&JournalAction::Write(JournalDraft {
            id: Some("j1".to_string()),
            clear_tags: true,
            tags: vec!["Rest".to_string()],
            ..Default::default()
        }));

        assert_eq!(
            store.get_journal_entry("j1").unwrap().tags,
            vec!["Rest".to_string()]
        );
    }

    #[test]
    fn test_edit_unknown_id_fails() {
        let (cmd, store) = setup();

        let output = cmd.run(&JournalAction::Write(JournalDraft {
            id: Some("missing".to_string()),
            content: Some("text".to_string()),
            ..Default::default()
        }));

        assert!(!output.success);
        assert_eq!(
            output.error.as_deref(),
            Some("journal entry 'missing' not found")
        );
        assert!(store.list_journal_entries().is_empty());
    }

    #[test]
    fn test_list_newest_first_with_limit() {
        let (cmd, store) = setup();
        for (id, d) in [("a", "2024-06-01"), ("b", "2024-06-03"), ("c", "2024-06-02")] {
            store
                .save_journal_entry(&JournalEntry::new(date(d), "x").with_id(id))
                .unwrap();
        }

        let output = cmd.run(&JournalAction::List { limit: Some(2) });

        let ids: Vec<&str> = output.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
        assert_eq!(output.count, 2);
    }

    #[test]
    fn test_show_and_delete() {
        let (cmd, store) = setup();
        store
            .save_journal_entry(&JournalEntry::new(date("2024-06-01"), "x").with_id("a"))
            .unwrap();

        assert!(cmd.run(&JournalAction::Show { id: "a".to_string() }).success);

        let deleted = cmd.run(&JournalAction::Delete { id: "a".to_string() });
        assert!(deleted.success);
        assert_eq!(deleted.count, 1);

        assert!(!cmd.run(&JournalAction::Show { id: "a".to_string() }).success);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let (cmd, _) = setup();

        let output = cmd.run(&JournalAction::Delete {
            id: "ghost".to_string(),
        });

        assert!(output.success);
        assert_eq!(output.count, 0);
        assert_eq!(
            cmd.format_output(&output, &JournalOptions::default()),
            "Nothing to delete.\n"
        );
    }

    #[test]
    fn test_format_human_readable() {
        let (cmd, _) = setup();
        let empty = cmd.run(&JournalAction::List { limit: None });
        assert_eq!(
            cmd.format_output(&empty, &JournalOptions::default()),
            "No journal entries yet.\n"
        );

        let saved = cmd.run(&write("hello"));
        let text = cmd.format_output(&saved, &JournalOptions::default());
        assert!(text.starts_with("Saved \"Untitled Entry\""));

        let listed = cmd.run(&JournalAction::List { limit: None });
        let text = cmd.format_output(&listed, &JournalOptions::default());
        assert!(text.contains("1 journal entry:"));
        assert!(text.contains("2024-06-10  Untitled Entry"));
    }

    #[test]
    fn test_format_json_and_quiet() {
        let (cmd, _) = setup();
        let output = cmd.run(&write("hello"));

        let json = cmd.format_output(
            &output,
            &JournalOptions {
                json: true,
                quiet: false,
            },
        );
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["action"], "write");
        assert_eq!(parsed["entries"][0]["date"], "2024-06-10");

        let quiet = JournalOptions {
            json: false,
            quiet: true,
        };
        assert!(cmd.format_output(&output, &quiet).is_empty());
    }
}
