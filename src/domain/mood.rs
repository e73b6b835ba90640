//! Mood definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Emotional state attached to an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Excited,
    Angry,
    Peaceful,
    Anxious,
    Grateful,
    Tired,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Excited,
        Mood::Angry,
        Mood::Peaceful,
        Mood::Anxious,
        Mood::Grateful,
        Mood::Tired,
    ];

    /// Stored code, e.g. `happy`
    pub fn code(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Excited => "excited",
            Mood::Angry => "angry",
            Mood::Peaceful => "peaceful",
            Mood::Anxious => "anxious",
            Mood::Grateful => "grateful",
            Mood::Tired => "tired",
        }
    }

    /// Display label, e.g. `😊 Happy`
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "😊 Happy",
            Mood::Sad => "😢 Sad",
            Mood::Excited => "😃 Excited",
            Mood::Angry => "😠 Angry",
            Mood::Peaceful => "😌 Peaceful",
            Mood::Anxious => "😰 Anxious",
            Mood::Grateful => "🙏 Grateful",
            Mood::Tired => "😴 Tired",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.code() == normalized)
            .ok_or_else(|| {
                format!(
                    "Invalid mood: '{}'. Valid moods are: happy, sad, excited, angry, peaceful, anxious, grateful, tired",
                    s
                )
            })
    }
}
