//! Mood analytics over a user's mood-tagged entries
//!
//! All functions here are pure: they take the records already scoped to one
//! user plus the reference day, and return zeroed structures instead of
//! errors when there is nothing to aggregate.

pub mod calendar;
pub mod correlations;
pub mod statistics;
pub mod timeline;

pub use calendar::{mood_calendar, CalendarDay, CalendarEntry, MoodCalendar};
pub use correlations::{mood_correlations, MoodCorrelations, WEEKDAYS};
pub use statistics::{mood_statistics, MoodStatistics, MoodTrend, Period, TrendDirection};
pub use timeline::{mood_timeline, Consistency, ConsistencyLevel, MoodTimeline, TimelinePoint};

use super::mood::Mood;
use chrono::NaiveDate;
use indexmap::IndexMap;

/// The slice of an entry that mood analytics needs
#[derive(Debug, Clone, PartialEq)]
pub struct MoodRecord<'a> {
    pub entry_date: NaiveDate,
    pub mood: Mood,
    pub title: &'a str,
    pub word_count: usize,
    pub notebook: &'a str,
}

/// Count moods, keeping the order in which each mood was first seen
pub fn count_moods<I>(moods: I) -> IndexMap<Mood, usize>
where
    I: IntoIterator<Item = Mood>,
{
    let mut counts = IndexMap::new();
    for mood in moods {
        *counts.entry(mood).or_insert(0) += 1;
    }
    counts
}

/// Most frequent key; ties go to the key seen first
pub fn plurality<K: Copy>(counts: &IndexMap<K, usize>) -> Option<K> {
    let mut best: Option<(K, usize)> = None;
    for (key, count) in counts {
        if best.is_none_or(|(_, top)| *count > top) {
            best = Some((*key, *count));
        }
    }
    best.map(|(key, _)| key)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
