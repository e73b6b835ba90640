//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{
    Cli, Commands, ContentArgs, EntryCommand, ExportFormat, MoodCommand, NotebookCommand,
    TagCommand,
};
pub use output::{
    format_entry_details, format_entry_list, format_mood_calendar, format_mood_correlations,
    format_mood_statistics, format_mood_timeline, format_notebook_list, format_tag_list,
    format_version_list,
};
