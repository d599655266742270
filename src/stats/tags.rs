//! Tag frequency for a month.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::MoodEntry;
use crate::stats::CalendarMonth;

/// Number of tags the stats view shows when no limit is configured.
pub const DEFAULT_TOP_TAGS: usize = 5;

/// A tag and how many entries carried it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// The `limit` most frequent tags on entries dated within `month`.
///
/// Sorted by count descending. Equal counts keep the order in which each tag
/// was first seen walking the collection.
pub fn top_tags(entries: &[MoodEntry], month: CalendarMonth, limit: usize) -> Vec<TagCount> {
    // Vec keeps first-seen order, the map finds a tag's slot.
    let mut counts: Vec<TagCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for entry in entries.iter().filter(|e| month.contains(e.date)) {
        for tag in &entry.tags {
            match index.get(tag.as_str()) {
                Some(&slot) => counts[slot].count += 1,
                None => {
                    index.insert(tag.as_str(), counts.len());
                    counts.push(TagCount {
                        tag: tag.clone(),
                        count: 1,
                    });
                }
            }
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Mood;
    use chrono::NaiveDate;

    fn tagged(date: &str, tags: &[&str]) -> MoodEntry {
        MoodEntry::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            Mood::Neutral,
        )
        .with_tags(tags.iter().copied())
    }

    fn june() -> CalendarMonth {
        CalendarMonth::new(2024, 6).unwrap()
    }

    #[test]
    fn test_ties_keep_first_seen_order_and_truncate() {
        let entries = vec![
            tagged("2024-06-01", &["Work", "Sleep"]),
            tagged("2024-06-02", &["Family", "Sleep", "Work"]),
            tagged("2024-06-03", &["Work", "Sleep"]),
        ];

        let top = top_tags(&entries, june(), 2);

        assert_eq!(
            top,
            vec![
                TagCount {
                    tag: "Work".to_string(),
                    count: 3
                },
                TagCount {
                    tag: "Sleep".to_string(),
                    count: 3
                },
            ]
        );
    }

    #[test]
    fn test_descending_by_count() {
        let entries = vec![
            tagged("2024-06-01", &["Food"]),
            tagged("2024-06-02", &["Exercise", "Food"]),
            tagged("2024-06-03", &["Exercise"]),
            tagged("2024-06-04", &["Exercise"]),
        ];

        let tags: Vec<(String, usize)> = top_tags(&entries, june(), DEFAULT_TOP_TAGS)
            .into_iter()
            .map(|t| (t.tag, t.count))
            .collect();
        assert_eq!(
            tags,
            vec![("Exercise".to_string(), 3), ("Food".to_string(), 2)]
        );
    }

    #[test]
    fn test_only_selected_month() {
        let entries = vec![
            tagged("2024-05-31", &["Work"]),
            tagged("2024-06-15", &["Health"]),
        ];
        let top = top_tags(&entries, june(), 5);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].tag, "Health");
    }

    #[test]
    fn test_empty_and_zero_limit() {
        assert!(top_tags(&[], june(), 5).is_empty());
        let entries = vec![tagged("2024-06-01", &["Work"])];
        assert!(top_tags(&entries, june(), 0).is_empty());
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        let entries = vec![tagged("2024-06-01", &["work", "Work"])];
        assert_eq!(top_tags(&entries, june(), 5).len(), 2);
    }
}
