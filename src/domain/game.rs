use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::{Placement, Points};

/// One recorded game. Records are immutable - the history is append-only
/// and only a league reset clears it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// When the game was recorded
    #[serde(deserialize_with = "flexible_timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Placement for every player listed when the game was recorded.
    /// Names may no longer be on the roster.
    pub results: BTreeMap<String, Placement>,
    #[serde(default)]
    pub notes: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub mvp: Option<String>,
    #[serde(default)]
    pub deck_used: String,
}

impl GameRecord {
    pub fn new(results: BTreeMap<String, Placement>) -> Self {
        Self {
            timestamp: Utc::now(),
            results,
            notes: String::new(),
            mvp: None,
            deck_used: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_mvp(mut self, mvp: Option<String>) -> Self {
        self.mvp = mvp.filter(|name| !name.is_empty());
        self
    }

    pub fn with_deck_used(mut self, deck_used: impl Into<String>) -> Self {
        self.deck_used = deck_used.into();
        self
    }

    /// Placement recorded for `name`, if the player was listed in this game.
    pub fn placement_of(&self, name: &str) -> Option<Placement> {
        self.results.get(name).copied()
    }

    pub fn is_mvp(&self, name: &str) -> bool {
        self.mvp.as_deref() == Some(name)
    }

    /// Players who actually took part, in name order.
    pub fn participants(&self) -> impl Iterator<Item = (&str, Placement)> {
        self.results
            .iter()
            .filter(|(_, placement)| placement.played())
            .map(|(name, placement)| (name.as_str(), *placement))
    }

    /// Points this game awarded to `name`, MVP bonus included.
    pub fn points_for(&self, name: &str) -> Points {
        let placement = self
            .placement_of(name)
            .filter(Placement::played)
            .map(|p| p.points())
            .unwrap_or(0);
        placement + Points::from(self.is_mvp(name))
    }

    /// Every player name this record mentions, results and MVP alike.
    pub fn mentions(&self, name: &str) -> bool {
        self.results.contains_key(name) || self.is_mvp(name)
    }
}

/// Timestamp format written by older save files, read as UTC.
const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accept RFC 3339, falling back to the older `YYYY-MM-DD HH:MM:SS` form.
fn flexible_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(&value) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&value, LEGACY_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{}': {}", value, e)))
}

/// Older save files store a missing MVP as an empty string.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|name| !name.is_empty()))
}
