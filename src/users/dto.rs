use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::catalog::models::User;

/// User as returned to clients: everything except credentials.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: u32,
    pub username: String,
    pub email: String,
    pub avatar: Option<String>,
    pub level: u32,
    pub points: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            avatar: u.avatar,
            level: u.level,
            points: u.points,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default = "default_leaderboard_limit")]
    pub limit: usize,
}

fn default_leaderboard_limit() -> usize {
    10
}
