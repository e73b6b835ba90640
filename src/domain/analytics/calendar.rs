//! Month view of moods grouped by day

use super::{count_moods, plurality, MoodRecord};
use crate::domain::mood::Mood;
use crate::error::{JournoError, Result};
use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEntry {
    pub name: String,
    pub mood: Mood,
    pub mood_label: &'static str,
    pub word_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct CalendarDay {
    pub moods: Vec<Mood>,
    pub entries: Vec<CalendarEntry>,
    /// Most frequent mood of the day, first seen wins ties
    pub primary_mood: Option<Mood>,
    pub entry_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodCalendar {
    pub year: i32,
    pub month: u32,
    pub days: BTreeMap<NaiveDate, CalendarDay>,
    pub mood_summary: IndexMap<Mood, usize>,
    pub total_days_with_entries: usize,
    pub total_entries: usize,
}

/// Group the month's mood-tagged entries by calendar day.
pub fn mood_calendar(records: &[MoodRecord<'_>], year: i32, month: u32) -> Result<MoodCalendar> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        JournoError::InvalidArgument(format!("Invalid calendar month: {}-{:02}", year, month))
    })?;

    let in_month: Vec<&MoodRecord<'_>> = records
        .iter()
        .filter(|r| r.entry_date.year() == first.year() && r.entry_date.month() == first.month())
        .collect();

    let mut days: BTreeMap<NaiveDate, CalendarDay> = BTreeMap::new();
    for record in &in_month {
        let day = days.entry(record.entry_date).or_default();
        day.moods.push(record.mood);
        day.entries.push(CalendarEntry {
            name: record.title.to_string(),
            mood: record.mood,
            mood_label: record.mood.label(),
            word_count: record.word_count,
        });
        day.entry_count += 1;
    }

    for day in days.values_mut() {
        day.primary_mood = plurality(&count_moods(day.moods.iter().copied()));
    }

    Ok(MoodCalendar {
        year,
        month,
        total_days_with_entries: days.len(),
        total_entries: in_month.len(),
        mood_summary: count_moods(in_month.iter().map(|r| r.mood)),
        days,
    })
}
