//! Domain layer - Journal records, text rules and analytics

pub mod analytics;
pub mod authoring;
pub mod diff;
pub mod entry;
pub mod export;
pub mod ids;
pub mod journal;
pub mod mood;
pub mod notebook;
pub mod palette;
pub mod tag;
pub mod text;
pub mod version;

pub use entry::{Entry, EntryState};
pub use ids::{EntryId, NotebookId, TagId, UserContext, UserId, VersionId};
pub use journal::{EntryChanges, Journal, NewEntry, NewNotebook};
pub use mood::Mood;
pub use notebook::Notebook;
pub use palette::Color;
pub use tag::Tag;
pub use version::Version;
