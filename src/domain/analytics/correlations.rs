//! Mood against word count, notebook and weekday

use super::{round2, MoodRecord};
use crate::domain::mood::Mood;
use chrono::Datelike;
use indexmap::IndexMap;
use serde::Serialize;

pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodCorrelations {
    pub mood_avg_words: IndexMap<Mood, f64>,
    /// Mood → notebook name → count
    pub mood_notebook_distribution: IndexMap<Mood, IndexMap<String, usize>>,
    /// Mood → counts indexed Monday = 0 .. Sunday = 6
    pub mood_weekday_distribution: IndexMap<Mood, [usize; 7]>,
    pub weekdays: [&'static str; 7],
}

impl MoodCorrelations {
    pub fn empty() -> Self {
        MoodCorrelations {
            mood_avg_words: IndexMap::new(),
            mood_notebook_distribution: IndexMap::new(),
            mood_weekday_distribution: IndexMap::new(),
            weekdays: WEEKDAYS,
        }
    }
}

pub fn mood_correlations(records: &[MoodRecord<'_>]) -> MoodCorrelations {
    let mut correlations = MoodCorrelations::empty();

    let mut word_totals: IndexMap<Mood, (usize, usize)> = IndexMap::new();
    for record in records {
        let (sum, count) = word_totals.entry(record.mood).or_insert((0, 0));
        *sum += record.word_count;
        *count += 1;

        *correlations
            .mood_notebook_distribution
            .entry(record.mood)
            .or_default()
            .entry(record.notebook.to_string())
            .or_insert(0) += 1;

        let weekday = record.entry_date.weekday().num_days_from_monday() as usize;
        correlations
            .mood_weekday_distribution
            .entry(record.mood)
            .or_insert([0; 7])[weekday] += 1;
    }

    correlations.mood_avg_words = word_totals
        .into_iter()
        .map(|(mood, (sum, count))| (mood, round2(sum as f64 / count as f64)))
        .collect();

    correlations
}
