//! Notebooks group a user's entries

use super::ids::{NotebookId, UserId};
use super::palette::Color;
use crate::error::{JournoError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notebook {
    pub id: NotebookId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub color: Color,
    pub user: UserId,
    /// Cleared by archiving (soft delete)
    pub active: bool,
}

/// Notebook and tag names must not be blank.
pub fn validate_name(kind: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(JournoError::Validation(format!("{} name cannot be empty.", kind)));
    }
    Ok(())
}
