//! Mutators that change derived state. Each one leaves `Game::rating`,
//! `Game::play_count` and `User::level` consistent before returning.

use tracing::{info, warn};

use super::error::CatalogError;
use super::models::{level_for_points, Comment, Game, NewGameHistory, NewUser, Rating, User};
use super::store::CatalogStore;

/// Score needed for one point.
pub const SCORE_PER_POINT: u64 = 100;

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;

/// Rounded mean, halves away from zero. `None` when there is nothing to average.
fn rounded_mean(values: &[u8]) -> Option<u8> {
    if values.is_empty() {
        return None;
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    let n = values.len() as u64;
    u8::try_from((2 * sum + n) / (2 * n)).ok()
}

impl CatalogStore {
    /// Count a play. History and points are only touched when a user is given;
    /// a missing user never aborts the play itself.
    pub fn record_play(
        &mut self,
        game_id: u32,
        user_id: Option<u32>,
        score: Option<u64>,
    ) -> Result<Game, CatalogError> {
        let game = self
            .game_mut(game_id)
            .ok_or_else(|| CatalogError::game_not_found(game_id))?;
        game.play_count += 1;
        let game = game.clone();

        if let Some(user_id) = user_id {
            let score = score.unwrap_or(0);
            self.create_game_history(NewGameHistory {
                game_id,
                user_id,
                score,
                played_at: None,
            });

            if score > 0 {
                if let Err(e) = self.award_points(user_id, score / SCORE_PER_POINT) {
                    warn!(error = %e, user_id, game_id, "points not awarded");
                }
            }
        }

        info!(game_id, play_count = game.play_count, "play recorded");
        Ok(game)
    }

    pub fn award_points(&mut self, user_id: u32, points: u64) -> Result<User, CatalogError> {
        let user = self
            .user_mut(user_id)
            .ok_or_else(|| CatalogError::user_not_found(user_id))?;
        user.points = user.points.saturating_add(points);
        let previous = user.level;
        user.level = level_for_points(user.points);
        if user.level > previous {
            info!(user_id, level = user.level, "level up");
        }
        Ok(user.clone())
    }

    /// Upsert the caller's rating for a game and refresh the game's average.
    /// One rating per (game, user): a second submission replaces the first.
    pub fn submit_rating(
        &mut self,
        game_id: u32,
        user_id: u32,
        value: i64,
    ) -> Result<Rating, CatalogError> {
        if self.game(game_id).is_none() {
            return Err(CatalogError::game_not_found(game_id));
        }
        let value = u8::try_from(value)
            .ok()
            .filter(|v| (MIN_RATING..=MAX_RATING).contains(&i64::from(*v)))
            .ok_or_else(|| {
                CatalogError::invalid(format!(
                    "rating must be between {MIN_RATING} and {MAX_RATING}"
                ))
            })?;

        let existing = self
            .ratings
            .values_mut()
            .find(|r| r.game_id == game_id && r.user_id == user_id);
        let rating = match existing {
            Some(row) => {
                row.rating = value;
                row.created_at = time::OffsetDateTime::now_utc();
                row.clone()
            }
            None => self.create_rating(game_id, user_id, value),
        };

        self.refresh_game_rating(game_id);
        info!(game_id, user_id, rating = value, "rating submitted");
        Ok(rating)
    }

    /// Leaves the stored value alone when the game has no ratings.
    fn refresh_game_rating(&mut self, game_id: u32) {
        let values: Vec<u8> = self
            .ratings
            .values()
            .filter(|r| r.game_id == game_id)
            .map(|r| r.rating)
            .collect();
        if let (Some(avg), Some(game)) = (rounded_mean(&values), self.game_mut(game_id)) {
            game.rating = avg;
        }
    }

    pub fn submit_comment(
        &mut self,
        game_id: u32,
        user_id: u32,
        content: &str,
    ) -> Result<Comment, CatalogError> {
        if self.game(game_id).is_none() {
            return Err(CatalogError::game_not_found(game_id));
        }
        let content = content.trim();
        if content.is_empty() {
            return Err(CatalogError::invalid("comment must not be empty"));
        }
        let comment = self.create_comment(game_id, user_id, content.to_owned());
        info!(game_id, user_id, comment_id = comment.id, "comment posted");
        Ok(comment)
    }

    /// Create an account; usernames are unique ignoring case.
    pub fn register_user(&mut self, mut input: NewUser) -> Result<User, CatalogError> {
        input.username = input.username.trim().to_owned();
        if input.username.is_empty() {
            return Err(CatalogError::invalid("username must not be empty"));
        }
        if self.user_by_username(&input.username).is_some() {
            return Err(CatalogError::Conflict("Username already taken".into()));
        }
        input.points = 0;
        let user = self.create_user(input);
        info!(user_id = user.id, username = %user.username, "user registered");
        Ok(user)
    }
}
