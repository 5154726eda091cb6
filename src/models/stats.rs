//! Aggregate usage statistics.

use serde::{Deserialize, Deserializer, Serialize};

/// Weak pointer to a game, denormalized into the stats record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameRef {
    #[serde(deserialize_with = "super::game::string_or_number")]
    pub id: String,
    pub title: String,
}

/// The single aggregate usage snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(default)]
    pub total_visits: u64,
    #[serde(default)]
    pub today_visits: u64,
    #[serde(default)]
    pub total_plays: u64,
    #[serde(default)]
    pub today_plays: u64,
    #[serde(default)]
    pub active_users: u64,
    #[serde(default)]
    pub most_played_game: Option<GameRef>,
}

/// Which pair of counters an increment applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Visits,
    Plays,
}

impl StatKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "visits" => Some(StatKind::Visits),
            "plays" => Some(StatKind::Plays),
            _ => None,
        }
    }
}

/// Request body for supplying externally computed stats fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatsRequest {
    #[serde(default)]
    pub active_users: Option<u64>,
    /// Absent leaves the pointer alone, `null` clears it.
    #[serde(default, deserialize_with = "present")]
    pub most_played_game_id: Option<Option<String>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
