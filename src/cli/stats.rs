//! Stats command for Daybook.
//!
//! Shows the month view: mood distribution, daily trend, top tags, streak,
//! and entry counts.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::core::{EntryStore, Mood};
use crate::error::{DaybookError, Result};
use crate::stats::{CalendarMonth, StatsSummary};
use crate::storage::KeyValueStore;

/// Width of the longest distribution bar.
const BAR_WIDTH: usize = 20;

/// Options for the stats command.
#[derive(Debug, Clone, Default)]
pub struct StatsOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Month as `YYYY-MM`. Defaults to the current month.
    pub month: Option<String>,
}

/// Output format for the stats command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    /// Whether stats were computed.
    pub success: bool,
    /// The month view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<StatsSummary>,
    /// Error message if stats failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatsOutput {
    /// Create a successful output.
    pub fn success(summary: StatsSummary) -> Self {
        Self {
            success: true,
            summary: Some(summary),
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            summary: None,
            error: Some(error.into()),
        }
    }
}

/// The stats command implementation.
pub struct StatsCommand<S: KeyValueStore> {
    store: EntryStore<S>,
    config: Config,
    today: NaiveDate,
}

impl<S: KeyValueStore> StatsCommand<S> {
    /// Create a new stats command dated today.
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

    /// Run the stats command.
    pub fn run(&self, options: &StatsOptions) -> StatsOutput {
        match self.resolve_month(options.month.as_deref()) {
            Ok(month) => StatsOutput::success(StatsSummary::collect(
                &self.store,
                month,
                self.today,
                self.config.stats.top_tags,
            )),
            Err(e) => StatsOutput::failure(e.to_string()),
        }
    }

    /// Parse the requested month, refusing months after the current one.
    fn resolve_month(&self, month: Option<&str>) -> Result<CalendarMonth> {
        let current = CalendarMonth::containing(self.today);
        let Some(raw) = month else {
            return Ok(current);
        };

        let month: CalendarMonth = raw.parse()?;
        if month > current {
            return Err(DaybookError::invalid_date(
                raw,
                format!("a month no later than {}", current),
            ));
        }
        Ok(month)
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &StatsOutput, options: &StatsOptions) -> String {
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
    fn format_human_readable(&self, output: &StatsOutput) -> String {
        let summary = match (&output.summary, output.success) {
            (Some(summary), true) => summary,
            _ => {
                return format!(
                    "Stats failed: {}\n",
                    output.error.as_deref().unwrap_or("unknown error")
                );
            }
        };

        let mut lines = vec![
            format!("Mood statistics for {}", summary.month),
            "=".repeat(40),
            String::new(),
            format!("Journal entries:  {}", summary.journal_entries),
            format!("Mood entries:     {}", summary.mood_entries),
            format!(
                "Current streak:   {} day{}",
                summary.current_streak,
                if summary.current_streak == 1 { "" } else { "s" }
            ),
            format!(
                "Days recorded:    {}/{}",
                summary.days_recorded(),
                summary.month.len_days()
            ),
            String::new(),
        ];

        lines.push("Mood distribution".to_string());
        lines.push("-".repeat(40));
        if summary.distribution.is_empty() {
            lines.push("  No moods recorded this month.".to_string());
        } else {
            let max = summary
                .distribution
                .iter()
                .map(|(_, count)| count)
                .max()
                .unwrap_or(0);
            for (mood, count) in summary.distribution.iter() {
                lines.push(format!(
                    "  {} {:<8} {:>3}  {}",
                    mood.emoji(),
                    mood.display_name(),
                    count,
                    bar(count, max)
                ));
            }
        }
        lines.push(String::new());

        lines.push("Daily trend".to_string());
        lines.push("-".repeat(40));
        lines.push(format!("  {}", trend_line(summary)));
        lines.push("  (1 = angry ... 5 = excited, . = no entry)".to_string());
        lines.push(String::new());

        lines.push("Top tags".to_string());
        lines.push("-".repeat(40));
        if summary.top_tags.is_empty() {
            lines.push("  No tags this month.".to_string());
        } else {
            for (i, tag) in summary.top_tags.iter().enumerate() {
                lines.push(format!("  {}. {} ({})", i + 1, tag.tag, tag.count));
            }
        }

        lines.join("\n") + "\n"
    }
}

fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    "#".repeat(count * BAR_WIDTH / max)
}

/// One character per day: the mood score, or `.` for a gap.
fn trend_line(summary: &StatsSummary) -> String {
    summary
        .trend
        .iter()
        .map(|point| match point.mood {
            Some(mood) => char::from(b'0' + Mood::score(mood)),
            None => '.',
        })
        .collect()
}
