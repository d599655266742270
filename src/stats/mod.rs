//! Derived statistics for Daybook.
//!
//! Pure, read-only views over the mood collection: monthly distribution,
//! daily trend, top tags, streak, and the current week. `StatsSummary`
//! bundles them for one month straight from an entry store.

pub mod distribution;
pub mod month;
pub mod streak;
pub mod summary;
pub mod tags;
pub mod trend;

pub use distribution::{monthly_mood_distribution, MoodDistribution};
pub use month::CalendarMonth;
pub use streak::{current_streak, week_entries, week_start};
pub use summary::{journal_entry_count, StatsSummary};
pub use tags::{top_tags, TagCount, DEFAULT_TOP_TAGS};
pub use trend::{daily_trend_series, TrendPoint};
