//! Read-only mood queries over one user's entries

use crate::domain::analytics::{
    mood_calendar, mood_correlations, mood_statistics, mood_timeline, MoodCalendar,
    MoodCorrelations, MoodStatistics, MoodTimeline, Period,
};
use crate::domain::UserContext;
use crate::error::Result;
use crate::infrastructure::{FileSystemRepository, JournalRepository};
use chrono::{Datelike, Local, NaiveDate};

pub struct MoodAnalyticsService {
    repository: FileSystemRepository,
    today: NaiveDate,
}

impl MoodAnalyticsService {
    pub fn new(repository: FileSystemRepository) -> Self {
        Self::with_today(repository, Local::now().date_naive())
    }

    /// Anchor every period and window at a fixed date
    pub fn with_today(repository: FileSystemRepository, today: NaiveDate) -> Self {
        MoodAnalyticsService { repository, today }
    }

    pub fn get_mood_statistics(&self, ctx: &UserContext, period: Period) -> Result<MoodStatistics> {
        let journal = self.repository.load_journal()?;
        let stats = mood_statistics(&journal.mood_records(ctx), period, self.today);
        tracing::debug!(user = %ctx.user, %period, total = stats.total_entries, "mood statistics");
        Ok(stats)
    }

    pub fn get_mood_timeline(&self, ctx: &UserContext, days: u32) -> Result<MoodTimeline> {
        let journal = self.repository.load_journal()?;
        Ok(mood_timeline(&journal.mood_records(ctx), days, self.today))
    }

    /// Month view; year and month default to the current ones
    pub fn get_mood_calendar(
        &self,
        ctx: &UserContext,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<MoodCalendar> {
        let journal = self.repository.load_journal()?;
        mood_calendar(
            &journal.mood_records(ctx),
            year.unwrap_or(self.today.year()),
            month.unwrap_or(self.today.month()),
        )
    }

    pub fn get_mood_correlations(&self, ctx: &UserContext) -> Result<MoodCorrelations> {
        let journal = self.repository.load_journal()?;
        Ok(mood_correlations(&journal.mood_records(ctx)))
    }
}
