//! Daybook - journaling and mood tracking
//!
//! CLI entry point with global panic handler.

use std::io::Write;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use daybook::cli::journal::{JournalAction, JournalCommand, JournalDraft, JournalOptions};
use daybook::cli::mood::{MoodAction, MoodCommand, MoodOptions};
use daybook::config::{daybook_home, Config};
use daybook::core::EntryStore;
use daybook::error::{exit_codes, DaybookError};
use daybook::storage::FileKeyValueStore;

// =============================================================================
// CLI Definition
// =============================================================================

/// Daybook - journaling and mood tracking
#[derive(Parser)]
#[command(name = "daybook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, empty collections, and a default config
    Init {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
        /// Overwrite an existing config file
        #[arg(long, short)]
        force: bool,
    },

    /// Write and read journal entries
    Journal {
        #[command(subcommand)]
        action: JournalSubcommand,
        /// Output as JSON
        #[arg(long, short, global = true)]
        json: bool,
        /// Suppress output
        #[arg(long, short, global = true)]
        quiet: bool,
    },

    /// Record and review daily moods
    Mood {
        #[command(subcommand)]
        action: MoodSubcommand,
        /// Output as JSON
        #[arg(long, short, global = true)]
        json: bool,
        /// Suppress output
        #[arg(long, short, global = true)]
        quiet: bool,
    },

    /// Show mood statistics for a month
    Stats {
        /// Month as YYYY-MM (default: current month)
        #[arg(long, short)]
        month: Option<String>,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },
}

#[derive(Subcommand)]
enum JournalSubcommand {
    /// List entries, newest first
    List {
        /// Maximum number of entries
        #[arg(long, short)]
        limit: Option<usize>,
    },
    /// Show one entry
    Show {
        /// Entry ID
        id: String,
    },
    /// Write a new entry, or edit one with --id
    Write {
        /// Entry text
        #[arg(long, short)]
        content: Option<String>,
        /// Entry title
        #[arg(long, short)]
        title: Option<String>,
        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Remove the edited entry's existing tags
        #[arg(long)]
        clear_tags: bool,
        /// Entry date as YYYY-MM-DD (default: today)
        #[arg(long, short)]
        date: Option<String>,
        /// ID of an entry to edit
        #[arg(long)]
        id: Option<String>,
    },
    /// Delete an entry
    Delete {
        /// Entry ID
        id: String,
    },
}

#[derive(Subcommand)]
enum MoodSubcommand {
    /// Record the mood for a day (angry, sad, neutral, happy, excited)
    Record {
        /// Mood name
        mood: String,
        /// Date as YYYY-MM-DD (default: today)
        #[arg(long, short)]
        date: Option<String>,
        /// Free-form notes
        #[arg(long, short)]
        notes: Option<String>,
        /// Activity or context tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Show the mood for a day
    Show {
        /// Date as YYYY-MM-DD (default: today)
        #[arg(long, short)]
        date: Option<String>,
    },
    /// List recorded moods, newest first
    List {
        /// Only this month, as YYYY-MM
        #[arg(long, short)]
        month: Option<String>,
        /// Maximum number of entries
        #[arg(long, short)]
        limit: Option<usize>,
    },
    /// Moods recorded this week (Sunday to Saturday)
    Week,
    /// Delete a mood entry
    Delete {
        /// Entry ID
        id: String,
    },
}

impl From<JournalSubcommand> for JournalAction {
    fn from(action: JournalSubcommand) -> Self {
        match action {
            JournalSubcommand::List { limit } => JournalAction::List { limit },
            JournalSubcommand::Show { id } => JournalAction::Show { id },
            JournalSubcommand::Write {
                content,
                title,
                tags,
                clear_tags,
                date,
                id,
            } => JournalAction::Write(JournalDraft {
                id,
                date,
                title,
                content,
                tags,
                clear_tags,
            }),
            JournalSubcommand::Delete { id } => JournalAction::Delete { id },
        }
    }
}

impl From<MoodSubcommand> for MoodAction {
    fn from(action: MoodSubcommand) -> Self {
        match action {
            MoodSubcommand::Record {
                mood,
                date,
                notes,
                tags,
            } => MoodAction::Record {
                mood,
                date,
                notes,
                tags,
            },
            MoodSubcommand::Show { date } => MoodAction::Show { date },
            MoodSubcommand::List { month, limit } => MoodAction::List { month, limit },
            MoodSubcommand::Week => MoodAction::Week,
            MoodSubcommand::Delete { id } => MoodAction::Delete { id },
        }
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> ExitCode {
    setup_panic_handler();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("daybook error: {}", e);
            ExitCode::from(exit_codes::ERROR as u8)
        }
    }
}

/// Set up the global panic handler.
///
/// On panic, logs to ~/.daybook/crash.log and exits with code 3.
fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("daybook panic: {}", info);

        if let Some(home) = daybook_home() {
            let crash_log = home.join("crash.log");
            if let Ok(mut file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&crash_log)
            {
                let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
                let _ = writeln!(file, "[{}] {}", timestamp, info);
            }
        }

        std::process::exit(exit_codes::CRASH);
    }));
}

/// Run the CLI and return the exit code.
fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load();

    match cli.command {
        Commands::Init { json, quiet, force } => run_init(&config, json, quiet, force),
        Commands::Journal {
            action,
            json,
            quiet,
        } => run_journal(config, action.into(), json, quiet),
        Commands::Mood {
            action,
            json,
            quiet,
        } => run_mood(&config, action.into(), json, quiet),
        Commands::Stats { month, json, quiet } => run_stats(config, month, json, quiet),
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

/// Convert a success boolean to an exit code.
fn success_to_exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::from(exit_codes::SUCCESS as u8)
    } else {
        ExitCode::from(exit_codes::ERROR as u8)
    }
}

/// Open the entry store in the configured data directory.
fn open_store(config: &Config) -> Result<EntryStore<FileKeyValueStore>, DaybookError> {
    let dir = config.resolved_data_dir().ok_or_else(|| {
        DaybookError::config("Could not determine data directory (no home directory)")
    })?;
    let store = EntryStore::new(FileKeyValueStore::with_dir(dir)?);
    store.initialize_if_absent()?;
    Ok(store)
}

fn print(formatted: &str) {
    if !formatted.is_empty() {
        print!("{}", formatted);
    }
}

fn run_init(
    config: &Config,
    json: bool,
    quiet: bool,
    force: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use daybook::cli::init::{InitCommand, InitOptions};

    let home = daybook_home().ok_or("Could not determine Daybook home directory")?;
    let data_dir = config
        .resolved_data_dir()
        .unwrap_or_else(|| home.join("data"));

    let cmd = InitCommand::new(home, data_dir);
    let options = InitOptions { json, quiet, force };

    let output = cmd.run(&options);
    print(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_journal(
    config: Config,
    action: JournalAction,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let store = open_store(&config)?;
    let cmd = JournalCommand::new(store, config);
    let options = JournalOptions { json, quiet };

    let output = cmd.run(&action);
    print(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_mood(
    config: &Config,
    action: MoodAction,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let store = open_store(config)?;
    let cmd = MoodCommand::new(store);
    let options = MoodOptions { json, quiet };

    let output = cmd.run(&action);
    print(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}

fn run_stats(
    config: Config,
    month: Option<String>,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    use daybook::cli::stats::{StatsCommand, StatsOptions};

    let store = open_store(&config)?;
    let cmd = StatsCommand::new(store, config);
    let options = StatsOptions { json, quiet, month };

    let output = cmd.run(&options);
    print(&cmd.format_output(&output, &options));

    Ok(success_to_exit_code(output.success))
}
