//! Mood distribution, most common mood and week-over-week trends

use super::{count_moods, plurality, round2, MoodRecord};
use crate::domain::mood::Mood;
use chrono::{Datelike, Duration, NaiveDate};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Reporting window for mood statistics, anchored at today
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    All,
    /// The last 7 days
    Week,
    /// Since the first of the current month
    Month,
    /// Since January 1st
    Year,
}

impl Period {
    /// First included date, or `None` for no lower bound
    pub fn start(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            Period::All => None,
            Period::Week => Some(today - Duration::days(7)),
            Period::Month => today.with_day(1),
            Period::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Period::All => "all",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        };
        f.write_str(name)
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Period::All),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            _ => Err(format!(
                "Invalid period: '{}'. Valid periods are: all, week, month, year",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

/// Trailing 7 days compared with the 7 days before them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodTrend {
    pub recent_count: usize,
    pub previous_count: usize,
    pub trend_percentage: f64,
    pub trend_direction: TrendDirection,
}

impl MoodTrend {
    pub fn new(recent_count: usize, previous_count: usize) -> Self {
        let trend = if previous_count == 0 {
            if recent_count > 0 {
                100.0
            } else {
                0.0
            }
        } else {
            (recent_count as f64 - previous_count as f64) / previous_count as f64 * 100.0
        };

        let trend_direction = if trend > 0.0 {
            TrendDirection::Up
        } else if trend < 0.0 {
            TrendDirection::Down
        } else {
            TrendDirection::Stable
        };

        MoodTrend {
            recent_count,
            previous_count,
            trend_percentage: round2(trend),
            trend_direction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodStatistics {
    pub period: Period,
    pub total_entries: usize,
    pub mood_counts: IndexMap<Mood, usize>,
    pub mood_percentages: IndexMap<Mood, f64>,
    pub most_common_mood: Option<Mood>,
    pub mood_trends: IndexMap<Mood, MoodTrend>,
    /// Notebook name → mood → count
    pub notebook_breakdown: IndexMap<String, IndexMap<Mood, usize>>,
}

impl MoodStatistics {
    pub fn empty(period: Period) -> Self {
        MoodStatistics {
            period,
            total_entries: 0,
            mood_counts: IndexMap::new(),
            mood_percentages: IndexMap::new(),
            most_common_mood: None,
            mood_trends: IndexMap::new(),
            notebook_breakdown: IndexMap::new(),
        }
    }
}

/// Aggregate mood statistics over `records` for the given period.
pub fn mood_statistics(records: &[MoodRecord<'_>], period: Period, today: NaiveDate) -> MoodStatistics {
    let start = period.start(today);
    let in_period: Vec<&MoodRecord<'_>> = records
        .iter()
        .filter(|r| start.is_none_or(|s| r.entry_date >= s))
        .collect();

    if in_period.is_empty() {
        return MoodStatistics::empty(period);
    }

    let total_entries = in_period.len();
    let mood_counts = count_moods(in_period.iter().map(|r| r.mood));

    let mood_percentages = mood_counts
        .iter()
        .map(|(mood, count)| (*mood, round2(*count as f64 / total_entries as f64 * 100.0)))
        .collect();

    let mut notebook_breakdown: IndexMap<String, IndexMap<Mood, usize>> = IndexMap::new();
    for record in &in_period {
        *notebook_breakdown
            .entry(record.notebook.to_string())
            .or_default()
            .entry(record.mood)
            .or_insert(0) += 1;
    }

    MoodStatistics {
        period,
        total_entries,
        most_common_mood: plurality(&mood_counts),
        mood_percentages,
        mood_counts,
        mood_trends: mood_trends(records, today),
        notebook_breakdown,
    }
}

/// Per-mood change between `[today-7, today]` and `[today-14, today-7)`.
pub fn mood_trends(records: &[MoodRecord<'_>], today: NaiveDate) -> IndexMap<Mood, MoodTrend> {
    let recent_start = today - Duration::days(7);
    let previous_start = recent_start - Duration::days(7);

    let recent = count_moods(
        records
            .iter()
            .filter(|r| r.entry_date >= recent_start && r.entry_date <= today)
            .map(|r| r.mood),
    );
    let previous = count_moods(
        records
            .iter()
            .filter(|r| r.entry_date >= previous_start && r.entry_date < recent_start)
            .map(|r| r.mood),
    );

    let mut trends = IndexMap::new();
    for mood in recent.keys().chain(previous.keys()) {
        if trends.contains_key(mood) {
            continue;
        }
        let recent_count = recent.get(mood).copied().unwrap_or(0);
        let previous_count = previous.get(mood).copied().unwrap_or(0);
        trends.insert(*mood, MoodTrend::new(recent_count, previous_count));
    }
    trends
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(date: NaiveDate, mood: Mood, notebook: &'static str) -> MoodRecord<'static> {
        MoodRecord {
            entry_date: date,
            mood,
            title: "entry",
            word_count: 10,
            notebook,
        }
    }

    #[test]
    fn test_period_start() {
        let today = day(2025, 3, 10);
        assert_eq!(Period::All.start(today), None);
        assert_eq!(Period::Week.start(today), Some(day(2025, 3, 3)));
        assert_eq!(Period::Month.start(today), Some(day(2025, 3, 1)));
        assert_eq!(Period::Year.start(today), Some(day(2025, 1, 1)));
    }

    #[test]
    fn test_parse_period() {
        assert_eq!(Period::from_str("Week").unwrap(), Period::Week);
        assert!(Period::from_str("decade").is_err());
    }

    #[test]
    fn test_empty_statistics() {
        let stats = mood_statistics(&[], Period::All, day(2025, 3, 10));
        assert_eq!(stats, MoodStatistics::empty(Period::All));
        assert_eq!(stats.total_entries, 0);
        assert!(stats.most_common_mood.is_none());
    }

    #[test]
    fn test_counts_percentages_and_most_common() {
        let today = day(2025, 3, 10);
        let records = vec![
            record(day(2025, 3, 9), Mood::Happy, "Daily"),
            record(day(2025, 3, 8), Mood::Sad, "Work"),
            record(day(2025, 3, 7), Mood::Happy, "Daily"),
        ];
        let stats = mood_statistics(&records, Period::All, today);

        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.mood_counts[&Mood::Happy], 2);
        assert_eq!(stats.mood_percentages[&Mood::Happy], 66.67);
        assert_eq!(stats.mood_percentages[&Mood::Sad], 33.33);
        assert_eq!(stats.most_common_mood, Some(Mood::Happy));
        assert_eq!(stats.notebook_breakdown["Daily"][&Mood::Happy], 2);
        assert_eq!(stats.notebook_breakdown["Work"][&Mood::Sad], 1);

        let total: f64 = stats.mood_percentages.values().sum();
        assert!((total - 100.0).abs() < 0.05);
    }

    #[test]
    fn test_most_common_tie_uses_first_seen() {
        let today = day(2025, 3, 10);
        let records = vec![
            record(day(2025, 3, 9), Mood::Tired, "A"),
            record(day(2025, 3, 8), Mood::Grateful, "A"),
        ];
        let stats = mood_statistics(&records, Period::All, today);
        assert_eq!(stats.most_common_mood, Some(Mood::Tired));
    }

    #[test]
    fn test_period_filters_records() {
        let today = day(2025, 3, 10);
        let records = vec![
            record(day(2025, 3, 2), Mood::Happy, "A"),
            record(day(2025, 2, 20), Mood::Sad, "A"),
        ];
        let month = mood_statistics(&records, Period::Month, today);
        assert_eq!(month.total_entries, 1);
        assert_eq!(month.mood_counts.get(&Mood::Sad), None);

        let week = mood_statistics(&records, Period::Week, today);
        assert_eq!(week.total_entries, 0);
    }

    #[test]
    fn test_trend_new() {
        let up = MoodTrend::new(3, 0);
        assert_eq!(up.trend_percentage, 100.0);
        assert_eq!(up.trend_direction, TrendDirection::Up);

        let flat = MoodTrend::new(0, 0);
        assert_eq!(flat.trend_percentage, 0.0);
        assert_eq!(flat.trend_direction, TrendDirection::Stable);

        let down = MoodTrend::new(1, 4);
        assert_eq!(down.trend_percentage, -75.0);
        assert_eq!(down.trend_direction, TrendDirection::Down);
    }

    #[test]
    fn test_trend_windows() {
        let today = day(2025, 3, 14);
        let records = vec![
            record(day(2025, 3, 14), Mood::Happy, "A"),
            record(day(2025, 3, 7), Mood::Happy, "A"),
            record(day(2025, 3, 6), Mood::Happy, "A"),
            record(day(2025, 3, 6), Mood::Sad, "A"),
            record(day(2025, 2, 27), Mood::Angry, "A"),
        ];
        let trends = mood_trends(&records, today);

        // 03-07 is the first day of the recent window; 03-06 the last of the previous one.
        assert_eq!(trends[&Mood::Happy].recent_count, 2);
        assert_eq!(trends[&Mood::Happy].previous_count, 1);
        assert_eq!(trends[&Mood::Happy].trend_percentage, 100.0);
        assert_eq!(trends[&Mood::Sad].trend_direction, TrendDirection::Down);
        assert!(!trends.contains_key(&Mood::Angry));
    }
}
