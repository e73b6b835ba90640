//! Display colors shared by notebooks and tags

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const NAMES: [&str; 12] = [
    "Grey",
    "Red",
    "Orange",
    "Yellow",
    "Light Blue",
    "Dark Purple",
    "Salmon Pink",
    "Medium Blue",
    "Dark Blue",
    "Fuchsia",
    "Green",
    "Purple",
];

/// Palette index in `0..12`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub struct Color(u8);

impl Color {
    pub const COUNT: u8 = NAMES.len() as u8;

    pub fn new(index: u8) -> Option<Self> {
        (index < Self::COUNT).then_some(Color(index))
    }

    /// Pick a random palette entry
    pub fn random() -> Self {
        Color(rand::thread_rng().gen_range(0..Self::COUNT))
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    pub fn name(&self) -> &'static str {
        NAMES[self.0 as usize]
    }
}

impl TryFrom<u8> for Color {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Color::new(value).ok_or_else(|| format!("Invalid color index: {}", value))
    }
}

impl From<Color> for u8 {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = String;

    /// Accepts either the index or the color name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<u8>() {
            return Color::try_from(index);
        }
        NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(trimmed))
            .map(|i| Color(i as u8))
            .ok_or_else(|| format!("Invalid color: '{}'", s))
    }
}
