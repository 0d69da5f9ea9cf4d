use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::tone::Tone;

/// Session-unique episode identity.  Two episodes are the same episode iff
/// their ids are equal; nothing else is compared.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeId(String);

impl EpisodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EpisodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A feed entry: either a catalog episode or one produced by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub id: EpisodeId,
    pub title: String,
    /// Catalog entries carry a loosely matching label; generated entries carry
    /// whatever free-form topic they were generated for.
    #[serde(default)]
    pub topic: Option<String>,
    /// Only set on generated episodes.
    #[serde(default)]
    pub tone: Option<Tone>,
    /// Minutes.
    pub length: u32,
    pub description: String,
    /// Only set on generated episodes.
    #[serde(default)]
    pub created_at: Option<DateTime<Local>>,
}

impl Episode {
    pub fn is_generated(&self) -> bool {
        self.created_at.is_some()
    }

    /// Clipboard text for the share action.
    pub fn share_text(&self) -> String {
        format!("{} — {}", self.title, self.description)
    }

    /// "9 min"
    pub fn length_badge(&self) -> String {
        format!("{} min", self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Episode {
        Episode {
            id: EpisodeId::new("e9"),
            title: "Night Shift".into(),
            topic: Some("Work & Purpose".into()),
            tone: None,
            length: 6,
            description: "A nurse counts the hours.".into(),
            created_at: None,
        }
    }

    #[test]
    fn share_text_joins_title_and_description() {
        assert_eq!(sample().share_text(), "Night Shift — A nurse counts the hours.");
    }

    #[test]
    fn length_badge() {
        assert_eq!(sample().length_badge(), "6 min");
    }

    #[test]
    fn id_serializes_as_plain_string() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], "e9");
        assert_eq!(json["tone"], serde_json::Value::Null);
        assert!(!sample().is_generated());
    }
}
