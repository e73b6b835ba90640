//! Output formatting utilities

use crate::application::{EntryDetails, NotebookSummary, TagSummary};
use crate::domain::analytics::{MoodCalendar, MoodCorrelations, MoodStatistics, MoodTimeline};
use crate::domain::Version;
use chrono::{DateTime, Utc};
use std::fmt::Write as _;

/// Format notebooks for display
pub fn format_notebook_list(notebooks: &[NotebookSummary]) -> String {
    if notebooks.is_empty() {
        return "No notebooks found".to_string();
    }

    let mut output = String::new();
    for summary in notebooks {
        let nb = &summary.notebook;
        let _ = write!(
            output,
            "{:>4}  {}  ({} entries",
            nb.id.0, nb.name, summary.entries_count
        );
        if let Some(last) = summary.last_entry_date {
            let _ = write!(output, ", last {}", last.format("%Y-%m-%d"));
        }
        output.push(')');
        if !nb.active {
            output.push_str(" [archived]");
        }
        output.push('\n');
    }
    output
}

/// Format tags for display
pub fn format_tag_list(tags: &[TagSummary]) -> String {
    if tags.is_empty() {
        return "No tags found".to_string();
    }

    let mut output = String::new();
    for summary in tags {
        let _ = write!(
            output,
            "{:>4}  #{}  ({} entries)",
            summary.tag.id.0, summary.tag.name, summary.entries_count
        );
        if !summary.tag.active {
            output.push_str(" [archived]");
        }
        output.push('\n');
    }
    output
}

/// One line per entry: id, date, state, favorite marker, title, mood
pub fn format_entry_list(entries: &[EntryDetails]) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for details in entries {
        let e = &details.entry;
        let _ = write!(
            output,
            "{:>4}  {}  {:<9}  {}{}",
            e.id.0,
            e.entry_date.format("%Y-%m-%d"),
            e.state.label(),
            if e.favorite { "⭐ " } else { "" },
            e.title
        );
        if let Some(mood) = e.mood {
            let _ = write!(output, "  {}", mood.label());
        }
        output.push('\n');
    }
    output
}

pub fn format_entry_details(details: &EntryDetails) -> String {
    let e = &details.entry;
    let mut output = String::new();

    let _ = writeln!(output, "{}", e.title);
    let _ = writeln!(output, "Date:       {}", e.entry_date.format("%Y-%m-%d"));
    let _ = writeln!(output, "Notebook:   {}", details.notebook);
    if !details.tags.is_empty() {
        let _ = writeln!(output, "Tags:       {}", details.tags.join(", "));
    }
    if let Some(mood) = e.mood {
        let _ = writeln!(output, "Mood:       {}", mood.label());
    }
    let _ = writeln!(output, "Status:     {}", e.state.label());
    if e.favorite {
        output.push_str("Favorite:   ⭐\n");
    }
    let _ = writeln!(output, "Words:      {}", e.word_count);
    let _ = writeln!(output, "Characters: {}", e.char_count);
    let _ = writeln!(
        output,
        "Version:    {} ({} stored)",
        e.display_version(),
        details.versions_count
    );

    if let Some(content) = e.content.as_deref().filter(|c| !c.is_empty()) {
        let _ = write!(output, "\n{}\n", content);
    }
    output
}

pub fn format_version_list(versions: &[Version], now: DateTime<Utc>) -> String {
    if versions.is_empty() {
        return "No versions yet".to_string();
    }

    let mut output = String::new();
    for v in versions {
        let _ = writeln!(
            output,
            "v{:<3}  {}  {} words  {}",
            v.number,
            v.time_ago(now),
            v.word_count,
            v.preview()
        );
    }
    output
}

pub fn format_mood_statistics(stats: &MoodStatistics) -> String {
    if stats.total_entries == 0 {
        return format!("No mood-tagged entries ({})", stats.period);
    }

    let mut output = String::new();
    let _ = writeln!(
        output,
        "Mood statistics ({}): {} entries",
        stats.period, stats.total_entries
    );
    if let Some(mood) = stats.most_common_mood {
        let _ = writeln!(output, "Most common: {}", mood.label());
    }

    output.push('\n');
    for (mood, count) in &stats.mood_counts {
        let pct = stats.mood_percentages.get(mood).copied().unwrap_or(0.0);
        let _ = write!(output, "{:<14} {:>4}  {:>6.2}%", mood.label(), count, pct);
        if let Some(trend) = stats.mood_trends.get(mood) {
            let _ = write!(
                output,
                "  {} {:+.2}%",
                format!("{:?}", trend.trend_direction).to_lowercase(),
                trend.trend_percentage
            );
        }
        output.push('\n');
    }

    if !stats.notebook_breakdown.is_empty() {
        output.push_str("\nBy notebook:\n");
        for (notebook, moods) in &stats.notebook_breakdown {
            let parts: Vec<String> = moods
                .iter()
                .map(|(mood, count)| format!("{} {}", mood, count))
                .collect();
            let _ = writeln!(output, "  {}: {}", notebook, parts.join(", "));
        }
    }
    output
}

pub fn format_mood_timeline(timeline: &MoodTimeline) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "Last {} days: {} entries, consistency {:.2} ({})",
        timeline.days,
        timeline.total_entries,
        timeline.consistency.score,
        format!("{:?}", timeline.consistency.level).to_lowercase()
    );
    for point in &timeline.points {
        let _ = writeln!(
            output,
            "{}  {:<14} {} ({})",
            point.date.format("%Y-%m-%d"),
            point.mood_label,
            point.entry_name,
            point.notebook
        );
    }
    output
}

pub fn format_mood_calendar(calendar: &MoodCalendar) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{}-{:02}: {} entries on {} days",
        calendar.year, calendar.month, calendar.total_entries, calendar.total_days_with_entries
    );
    for (date, day) in &calendar.days {
        let primary = day.primary_mood.map(|m| m.label()).unwrap_or("-");
        let titles: Vec<&str> = day.entries.iter().map(|e| e.name.as_str()).collect();
        let _ = writeln!(
            output,
            "{}  {:<14} {}",
            date.format("%d %a"),
            primary,
            titles.join(", ")
        );
    }
    output
}

pub fn format_mood_correlations(correlations: &MoodCorrelations) -> String {
    if correlations.mood_avg_words.is_empty() {
        return "No mood-tagged entries".to_string();
    }

    let mut output = String::from("Average words per mood:\n");
    for (mood, avg) in &correlations.mood_avg_words {
        let _ = writeln!(output, "  {:<14} {:.2}", mood.label(), avg);
    }

    output.push_str("\nBy weekday:\n");
    let header: Vec<&str> = correlations.weekdays.iter().map(|d| &d[..3]).collect();
    let _ = writeln!(output, "  {:<14} {}", "", header.join(" "));
    for (mood, counts) in &correlations.mood_weekday_distribution {
        let cells: Vec<String> = counts.iter().map(|c| format!("{:>3}", c)).collect();
        let _ = writeln!(output, "  {:<14} {}", mood.label(), cells.join(" "));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analytics::{mood_statistics, MoodRecord, Period};
    use crate::domain::{Color, Mood, Notebook, NotebookId, Tag, TagId, UserId};
    use chrono::NaiveDate;

    #[test]
    fn test_format_empty_lists() {
        assert_eq!(format_notebook_list(&[]), "No notebooks found");
        assert_eq!(format_tag_list(&[]), "No tags found");
        assert_eq!(format_entry_list(&[]), "No entries found");
        assert_eq!(format_version_list(&[], Utc::now()), "No versions yet");
    }

    #[test]
    fn test_format_notebook_list() {
        let summaries = vec![NotebookSummary {
            notebook: Notebook {
                id: NotebookId(2),
                name: "Work".to_string(),
                description: None,
                color: Color::default(),
                user: UserId::new("ana"),
                active: false,
            },
            entries_count: 3,
            last_entry_date: NaiveDate::from_ymd_opt(2025, 1, 17),
        }];
        assert_eq!(
            format_notebook_list(&summaries),
            "   2  Work  (3 entries, last 2025-01-17) [archived]\n"
        );
    }

    #[test]
    fn test_format_tag_list() {
        let tags = vec![TagSummary {
            tag: Tag {
                id: TagId(1),
                name: "personal".to_string(),
                color: Color::default(),
                active: true,
            },
            entries_count: 0,
        }];
        assert_eq!(format_tag_list(&tags), "   1  #personal  (0 entries)\n");
    }

    #[test]
    fn test_format_mood_statistics() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let records = vec![
            MoodRecord {
                entry_date: today,
                mood: Mood::Happy,
                title: "a",
                word_count: 1,
                notebook: "Daily",
            },
            MoodRecord {
                entry_date: today,
                mood: Mood::Sad,
                title: "b",
                word_count: 1,
                notebook: "Daily",
            },
        ];
        let output = format_mood_statistics(&mood_statistics(&records, Period::All, today));
        assert!(output.starts_with("Mood statistics (all): 2 entries\n"));
        assert!(output.contains("Most common: 😊 Happy"));
        assert!(output.contains("50.00%"));
        assert!(output.contains("Daily: happy 1, sad 1"));
    }

    #[test]
    fn test_format_empty_statistics() {
        let stats = MoodStatistics::empty(Period::Week);
        assert_eq!(format_mood_statistics(&stats), "No mood-tagged entries (week)");
    }
}
