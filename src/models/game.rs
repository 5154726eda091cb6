//! Game model matching the frontend Game interface.

use serde::{Deserialize, Deserializer, Serialize};

/// Visibility of a game in the public catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Active,
    Inactive,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Active => "active",
            GameStatus::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(GameStatus::Active),
            "inactive" => Some(GameStatus::Inactive),
            _ => None,
        }
    }
}

/// A cataloged playable entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub category: String,
    pub iframe_url: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: GameStatus,
    #[serde(default)]
    pub play_count: u64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    pub added_date: String,
}

/// Validated input for a new game, produced by the API layer.
#[derive(Debug, Clone)]
pub struct NewGame {
    pub title: String,
    pub category: String,
    pub iframe_url: String,
    pub thumbnail: String,
    pub description: Option<String>,
    pub status: GameStatus,
}

/// Request body for creating a new game.
///
/// Every field is optional at the wire level so that missing fields can be
/// reported together instead of failing on the first one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub iframe_url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for updating an existing game. Omitted fields keep their value.
///
/// `playCount` is not accepted here; it only grows through recorded plays.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGameRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub iframe_url: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<GameStatus>,
}

/// Older documents stored ids as JSON numbers.
pub(super) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
