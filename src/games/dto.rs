use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct GamesQuery {
    /// Case-insensitive substring of title or description.
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PopularQuery {
    #[serde(default = "default_popular_limit")]
    pub limit: usize,
}

fn default_popular_limit() -> usize {
    5
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayRequest {
    #[serde(default)]
    pub user_id: Option<u32>,
    #[serde(default)]
    pub score: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    #[serde(default)]
    pub user_id: Option<u32>,
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRequest {
    #[serde(default)]
    pub user_id: Option<u32>,
    /// Range-checked by the rating mutator, not by deserialization.
    pub rating: i64,
}
