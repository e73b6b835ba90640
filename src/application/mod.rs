//! Application layer - Use cases and orchestration

pub mod compare;
pub mod entries;
pub mod export;
pub mod init;
pub mod manage_config;
pub mod mood_analytics;
pub mod notebooks;
pub mod tags;

pub use compare::CompareService;
pub use entries::{EntryDetails, EntryService};
pub use export::{ExportService, ExportedDocument};
pub use manage_config::ConfigService;
pub use mood_analytics::MoodAnalyticsService;
pub use notebooks::{NotebookService, NotebookSummary};
pub use tags::{TagService, TagSummary};
