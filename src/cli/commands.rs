//! CLI command definitions

use crate::domain::analytics::Period;
use crate::domain::{Color, EntryId, NotebookId};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "journo")]
#[command(about = "Personal journal with history, mood analytics and export", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new journal
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Manage notebooks
    Notebook {
        #[command(subcommand)]
        action: NotebookCommand,
    },

    /// Manage tags
    Tag {
        #[command(subcommand)]
        action: TagCommand,
    },

    /// Write and manage entries
    Entry {
        #[command(subcommand)]
        action: EntryCommand,
    },

    /// List the stored versions of an entry
    Versions { entry: EntryId },

    /// Restore an entry's content from one of its versions
    Restore {
        entry: EntryId,
        /// Version number, as shown by `journo versions`
        version: u32,
    },

    /// Find entries containing every term (terms of 2 characters or fewer are ignored)
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Mood analytics
    Mood {
        #[command(subcommand)]
        action: MoodCommand,
    },

    /// Export an entry as Markdown or PDF
    Export {
        entry: EntryId,

        #[arg(short, long, value_enum, default_value_t = ExportFormat::Md)]
        format: ExportFormat,

        /// Directory to write the file into
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },

    /// Write an HTML page comparing two versions, or a version with the current content
    Compare {
        entry: EntryId,

        /// Version number on the left side
        from: u32,

        /// Version number on the right side, or "current"
        #[arg(default_value = "current")]
        to: String,

        /// File to write (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum NotebookCommand {
    /// Create a notebook
    New {
        name: String,

        #[arg(short, long)]
        description: Option<String>,

        /// Palette index (0-11) or color name; random when omitted
        #[arg(short, long)]
        color: Option<Color>,
    },

    /// List notebooks with entry counts
    List {
        /// Include archived notebooks
        #[arg(short, long)]
        all: bool,
    },

    Archive { id: NotebookId },

    Unarchive { id: NotebookId },

    /// Delete a notebook; refused while it has entries unless --cascade
    Delete {
        id: NotebookId,

        /// Delete the notebook's entries and their history too
        #[arg(long)]
        cascade: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagCommand {
    /// Create a tag
    New {
        name: String,

        /// Palette index (0-11) or color name; random when omitted
        #[arg(short, long)]
        color: Option<Color>,
    },

    /// List tags with entry counts
    List {
        /// Include archived tags
        #[arg(short, long)]
        all: bool,
    },

    /// Archive a tag (by id or name), detaching it from all entries
    Archive { tag: String },

    Unarchive { tag: String },

    /// Permanently delete a tag (by id or name)
    Delete { tag: String },
}

#[derive(Subcommand, Debug)]
pub enum EntryCommand {
    /// Create an entry
    New {
        title: String,

        #[arg(short, long)]
        notebook: NotebookId,

        /// Entry date as YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,

        #[arg(short, long)]
        mood: Option<String>,

        /// Tag id or name; repeat for several
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        #[command(flatten)]
        content: ContentArgs,

        #[arg(long)]
        favorite: bool,
    },

    /// Replace an entry's content; the previous content is kept as a version
    Edit {
        id: EntryId,

        #[command(flatten)]
        content: ContentArgs,

        /// Remove the content entirely
        #[arg(long, conflicts_with_all = ["text", "html", "file"])]
        clear: bool,
    },

    /// Change an entry's metadata (never creates a version)
    Set {
        id: EntryId,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        date: Option<String>,

        #[arg(short, long, conflicts_with = "no_mood")]
        mood: Option<String>,

        #[arg(long)]
        no_mood: bool,

        #[arg(short, long)]
        notebook: Option<NotebookId>,

        /// Replace the tags; repeat for several
        #[arg(short, long = "tag", conflicts_with = "no_tags")]
        tags: Vec<String>,

        #[arg(long)]
        no_tags: bool,
    },

    Show { id: EntryId },

    List,

    /// Draft → published
    Publish { id: EntryId },

    /// Published or archived → draft
    Draft { id: EntryId },

    /// Published → archived
    Archive { id: EntryId },

    /// Toggle the favorite flag
    Favorite { id: EntryId },

    /// Copy an entry without its history
    Duplicate { id: EntryId },

    /// Delete an entry and its versions
    Delete { id: EntryId },
}

/// Where entry content comes from
#[derive(clap::Args, Debug, Default)]
#[group(multiple = false)]
pub struct ContentArgs {
    /// Content written as Markdown
    #[arg(long)]
    pub text: Option<String>,

    /// Content given as rich-text markup, stored verbatim
    #[arg(long)]
    pub html: Option<String>,

    /// Read Markdown content from a file
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum MoodCommand {
    /// Mood counts, percentages, trends and notebook breakdown
    Stats {
        /// all, week, month or year
        #[arg(short, long, default_value = "all")]
        period: Period,

        #[arg(long)]
        json: bool,
    },

    /// Mood-tagged entries over the last N days with a consistency score
    Timeline {
        #[arg(short, long, default_value_t = 30)]
        days: u32,

        #[arg(long)]
        json: bool,
    },

    /// Entries of one month grouped by day
    Calendar {
        #[arg(short, long)]
        year: Option<i32>,

        #[arg(short, long)]
        month: Option<u32>,

        #[arg(long)]
        json: bool,
    },

    /// Mood against word count, notebook and weekday
    Correlations {
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Md,
    Pdf,
}
