//! Error types for journo

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for journo
#[derive(Debug, Error)]
pub enum JournoError {
    #[error("Not a journo directory: {0}")]
    NotJournoDirectory(PathBuf),

    /// Missing record, or a record owned by somebody else.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Cannot move entry from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Cannot delete notebook '{0}' that still has entries")]
    NotebookHasEntries(String),

    #[error("Version {number} already exists for entry {entry}")]
    VersionConflict { entry: u64, number: u32 },

    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl JournoError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            JournoError::NotJournoDirectory(_) => 2,
            JournoError::NotFound(_) => 3,
            JournoError::Validation(_)
            | JournoError::InvalidTransition { .. }
            | JournoError::InvalidArgument(_) => 4,
            JournoError::NotebookHasEntries(_) => 5,
            JournoError::Render(_) => 6,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            JournoError::NotJournoDirectory(path) => {
                format!(
                    "Not a journo directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'journo init' in this directory to create a new journal\n\
                    • Navigate to an existing journo directory\n\
                    • Set JOURNO_ROOT environment variable to your journal path",
                    path.display()
                )
            }
            JournoError::NotebookHasEntries(name) => {
                format!(
                    "Cannot delete notebook '{}' that still has entries.\n\n\
                    Use the cascading delete instead:\n\
                    journo notebook delete <ID> --cascade",
                    name
                )
            }
            JournoError::InvalidTransition { from, to } => {
                format!(
                    "Cannot move entry from {} to {}\n\n\
                    Allowed transitions:\n\
                    • draft → published (journo entry publish)\n\
                    • published → archived (journo entry archive)\n\
                    • published or archived → draft (journo entry draft)",
                    from, to
                )
            }
            JournoError::Render(msg) => {
                format!(
                    "Rendering failed: {}\n\n\
                    Suggestions:\n\
                    • Check that wkhtmltopdf is installed\n\
                    • Configure the renderer path: journo config renderer /path/to/wkhtmltopdf\n\
                    • Export as Markdown instead: journo export <ID> --format md",
                    msg
                )
            }
            JournoError::InvalidArgument(msg) => {
                if msg.contains("Invalid mood") {
                    format!(
                        "{}\n\n\
                        Valid moods: happy, sad, excited, angry, peaceful, anxious, grateful, tired",
                        self
                    )
                } else if msg.contains("date format") {
                    format!(
                        "{}\n\n\
                        Expected format: YYYY-MM-DD\n\
                        Example: journo entry new \"Morning walk\" --notebook 1 --date 2025-01-17",
                        self
                    )
                } else {
                    self.to_string()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using JournoError
pub type Result<T> = std::result::Result<T, JournoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_journo_directory_suggestion() {
        let err = JournoError::NotJournoDirectory(PathBuf::from("/tmp/test"));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("journo init"));
        assert!(msg.contains("JOURNO_ROOT"));
        assert!(msg.contains("Suggestions"));
    }

    #[test]
    fn test_notebook_has_entries_points_to_cascade() {
        let err = JournoError::NotebookHasEntries("Work".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("Work"));
        assert!(msg.contains("--cascade"));
    }

    #[test]
    fn test_render_error_suggestions() {
        let err = JournoError::Render("exit status 1".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("wkhtmltopdf"));
        assert!(msg.contains("--format md"));
    }

    #[test]
    fn test_invalid_mood_suggestions() {
        let err = JournoError::InvalidArgument("Invalid mood: 'meh'".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("happy, sad, excited"));
    }

    #[test]
    fn test_invalid_date_suggestions() {
        let err = JournoError::InvalidArgument("Invalid date format: '17/01/2025'".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(JournoError::NotFound("entry 1".into()).exit_code(), 3);
        assert_eq!(JournoError::Validation("x".into()).exit_code(), 4);
        assert_eq!(JournoError::NotebookHasEntries("x".into()).exit_code(), 5);
        assert_eq!(JournoError::Config("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = JournoError::NotFound("entry 7".to_string());
        assert_eq!(err.display_with_suggestions(), "Not found: entry 7");
    }
}
