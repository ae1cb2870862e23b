use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Points needed to advance one level.
pub const POINTS_PER_LEVEL: u64 = 1000;

/// Level reached with the given number of points (level 1 starts at 0 points).
pub fn level_for_points(points: u64) -> u32 {
    u32::try_from(points / POINTS_PER_LEVEL + 1).unwrap_or(u32::MAX)
}

/// Player account record as held by the store.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2, never exposed in JSON
    pub avatar: Option<String>,
    pub level: u32,
    pub points: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub points: u64,
}

/// Catalog entry for one embeddable title.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub category: String,
    pub secondary_category: Option<String>,
    pub thumbnail_url: String,
    pub is_featured: bool,
    pub is_new: bool,
    pub rating: u8,      // rounded mean of all ratings, 0 when unrated
    pub play_count: u64, // incremented on every recorded play
    #[serde(default)]
    pub hidden: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Game {
    /// Case-insensitive match against the primary or secondary category.
    pub fn in_category(&self, category: &str) -> bool {
        let wanted = category.to_lowercase();
        self.category.to_lowercase() == wanted
            || self
                .secondary_category
                .as_deref()
                .is_some_and(|c| c.to_lowercase() == wanted)
    }

    /// Case-insensitive substring match on title or description.
    pub fn matches_text(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewGame {
    pub title: String,
    pub description: String,
    pub category: String,
    pub secondary_category: Option<String>,
    pub thumbnail_url: String,
    pub is_featured: bool,
    pub is_new: bool,
    pub rating: u8,
    pub play_count: u64,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u32,
    pub game_id: u32,
    pub user_id: u32,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// One user's 1-5 score for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: u32,
    pub game_id: u32,
    pub user_id: u32,
    pub rating: u8,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A single play session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameHistory {
    pub id: u32,
    pub game_id: u32,
    pub user_id: u32,
    pub score: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub played_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewGameHistory {
    pub game_id: u32,
    pub user_id: u32,
    pub score: u64,
    /// Defaults to now; sample data backdates it.
    pub played_at: Option<OffsetDateTime>,
}
