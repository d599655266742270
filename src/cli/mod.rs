//! CLI commands for Daybook.
//!
//! Each command follows the same shape: an options struct, a serializable
//! output with `success`, a `run` that never panics on bad data, and a
//! `format_output` that honours `--json` and `--quiet`.
//!
//! - **Setup**: init
//! - **Entries**: journal, mood
//! - **Insights**: stats

pub mod init;
pub mod journal;
pub mod mood;
pub mod stats;

pub use init::InitCommand;
pub use journal::JournalCommand;
pub use mood::MoodCommand;
pub use stats::StatsCommand;

use chrono::NaiveDate;

use crate::error::{DaybookError, Result};

/// Date format accepted on the command line and used in output.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` argument.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| DaybookError::invalid_date(value, "YYYY-MM-DD"))
}

/// Parse an optional date argument, defaulting to `today`.
pub fn date_or_today(value: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    value.map(parse_date).transpose().map(|d| d.unwrap_or(today))
}
