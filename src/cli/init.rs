//! Init command for Daybook.
//!
//! Creates the Daybook home and data directories, writes a default config
//! file, and seeds both entry collections.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{EntryStore, JOURNAL_ENTRIES_KEY, MOOD_ENTRIES_KEY};
use crate::storage::{FileKeyValueStore, KeyValueStore};

/// Options for the init command.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Overwrite an existing config file.
    pub force: bool,
}

/// Output format for the init command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitOutput {
    /// Whether initialization was successful.
    pub success: bool,
    /// Files and directories created.
    pub created: Vec<String>,
    /// Files and directories that already existed.
    pub skipped: Vec<String>,
    /// Error message if initialization failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InitOutput {
    /// Create a successful output.
    pub fn success(created: Vec<String>, skipped: Vec<String>) -> Self {
        Self {
            success: true,
            created,
            skipped,
            error: None,
        }
    }

    /// Create a failed output, keeping what was done before the failure.
    pub fn failure(error: impl Into<String>, created: Vec<String>, skipped: Vec<String>) -> Self {
        Self {
            success: false,
            created,
            skipped,
            error: Some(error.into()),
        }
    }
}

/// Default config.toml content.
const DEFAULT_CONFIG: &str = r#"# Daybook Configuration
#
# Every setting is optional. Environment variables override this file:
# DAYBOOK_DATA_DIR, DAYBOOK_TOP_TAGS, DAYBOOK_REQUIRE_CONTENT.

[storage]
# data_dir = "/path/to/daybook/data"

[stats]
top_tags = 5

[journal]
require_content = true
"#;

/// The init command implementation.
pub struct InitCommand {
    home: PathBuf,
    data_dir: PathBuf,
}

impl InitCommand {
    /// Create a new init command for the given home and data directories.
    pub fn new(home: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            data_dir: data_dir.into(),
        }
    }

    /// Run the init command.
    pub fn run(&self, options: &InitOptions) -> InitOutput {
        let mut created = Vec::new();
        let mut skipped = Vec::new();

        for dir in [&self.home, &self.data_dir] {
            match self.ensure_dir(dir) {
                Ok(true) => created.push(dir.display().to_string()),
                Ok(false) => skipped.push(dir.display().to_string()),
                Err(e) => return InitOutput::failure(e, created, skipped),
            }
        }

        let config_path = self.home.join("config.toml");
        match self.ensure_file(&config_path, DEFAULT_CONFIG, options.force) {
            Ok(true) => created.push(config_path.display().to_string()),
            Ok(false) => skipped.push(config_path.display().to_string()),
            Err(e) => return InitOutput::failure(e, created, skipped),
        }

        let storage = match FileKeyValueStore::with_dir(&self.data_dir) {
            Ok(storage) => storage,
            Err(e) => return InitOutput::failure(e.to_string(), created, skipped),
        };

        // Note which collections exist before seeding so the report is accurate
        let existing: Vec<bool> = [JOURNAL_ENTRIES_KEY, MOOD_ENTRIES_KEY]
            .iter()
            .map(|key| storage.contains(key).unwrap_or(false))
            .collect();

        let store = EntryStore::new(storage);
        if let Err(e) = store.initialize_if_absent() {
            return InitOutput::failure(e.to_string(), created, skipped);
        }

        for (key, existed) in [JOURNAL_ENTRIES_KEY, MOOD_ENTRIES_KEY].iter().zip(existing) {
            let path = self.data_dir.join(format!("{}.json", key));
            if existed {
                skipped.push(path.display().to_string());
            } else {
                created.push(path.display().to_string());
            }
        }

        InitOutput::success(created, skipped)
    }

    /// Ensure a directory exists.
    /// Returns Ok(true) if created, Ok(false) if already exists.
    fn ensure_dir(&self, path: &Path) -> Result<bool, String> {
        if path.exists() {
            if path.is_dir() {
                return Ok(false);
            }
            return Err(format!("{} exists but is not a directory", path.display()));
        }

        fs::create_dir_all(path)
            .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))?;

        Ok(true)
    }

    /// Ensure a file exists with the given content.
    /// Returns Ok(true) if written, Ok(false) if already exists.
    fn ensure_file(&self, path: &Path, content: &str, force: bool) -> Result<bool, String> {
        if path.exists() && !force {
            return Ok(false);
        }

        fs::write(path, content)
            .map_err(|e| format!("Failed to write file {}: {}", path.display(), e))?;

        Ok(true)
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &InitOutput, options: &InitOptions) -> String {
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
    fn format_human_readable(&self, output: &InitOutput) -> String {
        let mut lines = Vec::new();

        if !output.success {
            lines.push(format!(
                "Init failed: {}",
                output.error.as_deref().unwrap_or("unknown error")
            ));
            if !output.created.is_empty() {
                lines.push(String::new());
                lines.push("Partially created before failure:".to_string());
                for path in &output.created {
                    lines.push(format!("  {}", path));
                }
            }
            return lines.join("\n") + "\n";
        }

        if output.created.is_empty() {
            return "Daybook already initialized.\n".to_string();
        }

        lines.push("Created:".to_string());
        for path in &output.created {
            lines.push(format!("  {}", path));
        }

        if !output.skipped.is_empty() {
            lines.push("Already exists (skipped):".to_string());
            for path in &output.skipped {
                lines.push(format!("  {}", path));
            }
        }

        lines.push(String::new());
        lines.push("Daybook initialized successfully.".to_string());

        lines.join("\n") + "\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    fn command(temp: &TempDir) -> InitCommand {
        let home = temp.path().join(".daybook");
        InitCommand::new(&home, home.join("data"))
    }

    #[test]
    fn test_init_output_failure_keeps_partial_state() {
        let output = InitOutput::failure("permission denied", vec!["dir".to_string()], vec![]);

        assert!(!output.success);
        assert_eq!(output.created, vec!["dir".to_string()]);
        assert_eq!(output.error, Some("permission denied".to_string()));
    }

    #[test]
    fn test_init_creates_layout() {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join(".daybook");

        let output = command(&temp).run(&InitOptions::default());

        assert!(output.success);
        assert!(home.is_dir());
        assert!(home.join("data").is_dir());
        assert!(home.join("config.toml").exists());
        assert_eq!(
            fs::read_to_string(home.join("data").join("journal-entries.json")).unwrap(),
            "[]"
        );
        assert_eq!(
            fs::read_to_string(home.join("data").join("mood-entries.json")).unwrap(),
            "[]"
        );
        assert_eq!(output.created.len(), 5);
        assert!(output.skipped.is_empty());
    }

    #[test]
    fn test_default_config_parses_to_defaults() {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join(".daybook");
        command(&temp).run(&InitOptions::default());

        let config = Config::load_from_file(&home.join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_init_idempotent() {
        let temp = TempDir::new().unwrap();
        let cmd = command(&temp);

        cmd.run(&InitOptions::default());
        let second = cmd.run(&InitOptions::default());

        assert!(second.success);
        assert!(second.created.is_empty());
        assert_eq!(second.skipped.len(), 5);
    }

    #[test]
    fn test_init_keeps_existing_entries() {
        let temp = TempDir::new().unwrap();
        let data = temp.path().join(".daybook").join("data");
        fs::create_dir_all(&data).unwrap();
        let existing = r#"[{"id":"a","date":"2024-06-01","mood":"happy","tags":[]}]"#;
        fs::write(data.join("mood-entries.json"), existing).unwrap();

        let output = command(&temp).run(&InitOptions::default());

        assert!(output.success);
        assert_eq!(
            fs::read_to_string(data.join("mood-entries.json")).unwrap(),
            existing
        );
    }

    #[test]
    fn test_init_force_rewrites_config_only() {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join(".daybook");
        let cmd = command(&temp);
        cmd.run(&InitOptions::default());
        fs::write(home.join("config.toml"), "[stats]\ntop_tags = 9\n").unwrap();

        let output = cmd.run(&InitOptions {
            force: true,
            ..Default::default()
        });

        assert!(output.success);
        assert_eq!(
            fs::read_to_string(home.join("config.toml")).unwrap(),
            DEFAULT_CONFIG
        );
    }

    #[test]
    fn test_init_fails_when_home_is_a_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".daybook"), "not a dir").unwrap();

        let output = command(&temp).run(&InitOptions::default());

        assert!(!output.success);
        assert!(output.error.unwrap().contains("not a directory"));
    }

    #[test]
    fn test_format_output_modes() {
        let temp = TempDir::new().unwrap();
        let cmd = command(&temp);
        let output = cmd.run(&InitOptions::default());

        let quiet = InitOptions {
            quiet: true,
            ..Default::default()
        };
        assert!(cmd.format_output(&output, &quiet).is_empty());

        let json = InitOptions {
            json: true,
            ..Default::default()
        };
        let parsed: serde_json::Value =
            serde_json::from_str(&cmd.format_output(&output, &json)).unwrap();
        assert_eq!(parsed["success"], true);

        let human = cmd.format_output(&output, &InitOptions::default());
        assert!(human.contains("Daybook initialized successfully."));
    }
}
