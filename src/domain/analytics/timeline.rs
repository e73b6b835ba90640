//! Mood timeline and consistency score

use super::{round2, MoodRecord};
use crate::domain::mood::Mood;
use chrono::{Duration, NaiveDate};
use serde::Serialize;

pub const DEFAULT_TIMELINE_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub mood: Mood,
    pub mood_label: &'static str,
    pub entry_name: String,
    pub word_count: usize,
    pub notebook: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsistencyLevel {
    /// No entries to judge
    Stable,
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Consistency {
    pub score: f64,
    pub changes: usize,
    pub level: ConsistencyLevel,
}

impl Consistency {
    /// 100 minus the share of adjacent entries whose mood differs
    pub fn of(sequence: &[Mood]) -> Self {
        if sequence.is_empty() {
            return Consistency {
                score: 0.0,
                changes: 0,
                level: ConsistencyLevel::Stable,
            };
        }

        let changes = sequence.windows(2).filter(|w| w[0] != w[1]).count();
        let transitions = (sequence.len() - 1).max(1) as f64;
        let score = (100.0 - changes as f64 / transitions * 100.0).max(0.0);

        let level = if score > 70.0 {
            ConsistencyLevel::High
        } else if score > 40.0 {
            ConsistencyLevel::Medium
        } else {
            ConsistencyLevel::Low
        };

        Consistency {
            score: round2(score),
            changes,
            level,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodTimeline {
    pub days: u32,
    pub total_entries: usize,
    pub points: Vec<TimelinePoint>,
    pub consistency: Consistency,
}

/// Mood-tagged entries dated on or after `today - days`, oldest first.
pub fn mood_timeline(records: &[MoodRecord<'_>], days: u32, today: NaiveDate) -> MoodTimeline {
    // A window reaching past the calendar's first day has no lower bound
    let start = today.checked_sub_signed(Duration::days(i64::from(days)));

    let mut window: Vec<&MoodRecord<'_>> = records
        .iter()
        .filter(|r| start.is_none_or(|s| r.entry_date >= s))
        .collect();
    window.sort_by_key(|r| r.entry_date);

    let points: Vec<TimelinePoint> = window
        .iter()
        .map(|r| TimelinePoint {
            date: r.entry_date,
            mood: r.mood,
            mood_label: r.mood.label(),
            entry_name: r.title.to_string(),
            word_count: r.word_count,
            notebook: r.notebook.to_string(),
        })
        .collect();

    let sequence: Vec<Mood> = points.iter().map(|p| p.mood).collect();

    MoodTimeline {
        days,
        total_entries: points.len(),
        consistency: Consistency::of(&sequence),
        points,
    }
}
