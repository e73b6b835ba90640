//! Cross-cutting labels

use super::ids::TagId;
use super::palette::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub color: Color,
    pub active: bool,
}
