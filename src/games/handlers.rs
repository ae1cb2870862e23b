use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{CommentRequest, GamesQuery, PlayRequest, PopularQuery, RatingRequest};
use crate::{
    auth::Player,
    catalog::{
        models::{Comment, Game, Rating},
        CatalogError,
    },
    error::ApiResult,
    extract::{AppJson, AppPath, AppQuery},
    state::AppState,
};

// --- public routers ---

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/games", get(list_games))
        .route("/games/featured", get(featured_games))
        .route("/games/new", get(new_games))
        .route("/games/popular", get(popular_games))
        .route("/games/category/:category", get(games_by_category))
        .route("/games/:id", get(get_game))
        .route("/games/:id/comments", get(list_comments))
        .route("/games/:id/ratings", get(list_ratings))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/games/:id/play", post(record_play))
        .route("/games/:id/comments", post(post_comment))
        .route("/games/:id/rate", post(rate_game))
}

// --- reads ---

#[instrument(skip(state))]
pub async fn list_games(
    State(state): State<AppState>,
    AppQuery(q): AppQuery<GamesQuery>,
) -> Json<Vec<Game>> {
    let store = state.store.read().await;
    let games = match q.search.as_deref().map(str::trim) {
        Some(term) if !term.is_empty() => store.search_games(term),
        _ => store.games(),
    };
    Json(games)
}

#[instrument(skip(state))]
pub async fn featured_games(State(state): State<AppState>) -> Json<Vec<Game>> {
    Json(state.store.read().await.featured_games())
}

#[instrument(skip(state))]
pub async fn new_games(State(state): State<AppState>) -> Json<Vec<Game>> {
    Json(state.store.read().await.new_games())
}

#[instrument(skip(state))]
pub async fn popular_games(
    State(state): State<AppState>,
    AppQuery(q): AppQuery<PopularQuery>,
) -> Json<Vec<Game>> {
    Json(state.store.read().await.popular_games(q.limit))
}

#[instrument(skip(state))]
pub async fn games_by_category(
    State(state): State<AppState>,
    AppPath(category): AppPath<String>,
) -> Json<Vec<Game>> {
    Json(state.store.read().await.games_by_category(&category))
}

/// Hidden games are still reachable here.
#[instrument(skip(state))]
pub async fn get_game(
    State(state): State<AppState>,
    AppPath(id): AppPath<u32>,
) -> ApiResult<Json<Game>> {
    let game = state
        .store
        .read()
        .await
        .game(id)
        .cloned()
        .ok_or_else(|| CatalogError::game_not_found(id))?;
    Ok(Json(game))
}

#[instrument(skip(state))]
pub async fn list_comments(
    State(state): State<AppState>,
    AppPath(id): AppPath<u32>,
) -> Json<Vec<Comment>> {
    Json(state.store.read().await.comments_by_game(id))
}

#[instrument(skip(state))]
pub async fn list_ratings(
    State(state): State<AppState>,
    AppPath(id): AppPath<u32>,
) -> Json<Vec<Rating>> {
    Json(state.store.read().await.ratings_by_game(id))
}

// --- writes ---

/// In static mode writes only check the game exists and get logged.
async fn static_game(state: &AppState, id: u32) -> ApiResult<Game> {
    let game = state
        .store
        .read()
        .await
        .game(id)
        .cloned()
        .ok_or_else(|| CatalogError::game_not_found(id))?;
    Ok(game)
}

/// Comments and ratings need a user, from the session or the body.
fn required_user(player: Player, claimed: Option<u32>) -> ApiResult<u32> {
    player
        .acting_for(claimed)?
        .ok_or_else(|| CatalogError::invalid("userId is required").into())
}

/// POST /games/:id/play { userId?, score? }
#[instrument(skip(state, body))]
pub async fn record_play(
    State(state): State<AppState>,
    AppPath(id): AppPath<u32>,
    player: Player,
    AppJson(body): AppJson<PlayRequest>,
) -> ApiResult<Json<Game>> {
    let user_id = player.acting_for(body.user_id)?;
    if state.config.is_static() {
        let game = static_game(&state, id).await?;
        info!(game_id = id, title = %game.title, "play ignored in static mode");
        return Ok(Json(game));
    }
    let game = state
        .store
        .write()
        .await
        .record_play(id, user_id, body.score)?;
    Ok(Json(game))
}

#[instrument(skip(state, body))]
pub async fn post_comment(
    State(state): State<AppState>,
    AppPath(id): AppPath<u32>,
    player: Player,
    AppJson(body): AppJson<CommentRequest>,
) -> ApiResult<Response> {
    let user_id = required_user(player, body.user_id)?;
    if state.config.is_static() {
        static_game(&state, id).await?;
        info!(game_id = id, content = %body.content, "comment ignored in static mode");
        return Ok(StatusCode::ACCEPTED.into_response());
    }
    let comment = state
        .store
        .write()
        .await
        .submit_comment(id, user_id, &body.content)?;
    Ok((StatusCode::CREATED, Json(comment)).into_response())
}

#[instrument(skip(state, body))]
pub async fn rate_game(
    State(state): State<AppState>,
    AppPath(id): AppPath<u32>,
    player: Player,
    AppJson(body): AppJson<RatingRequest>,
) -> ApiResult<Response> {
    let user_id = required_user(player, body.user_id)?;
    if state.config.is_static() {
        static_game(&state, id).await?;
        info!(game_id = id, rating = body.rating, "rating ignored in static mode");
        return Ok(StatusCode::ACCEPTED.into_response());
    }
    let rating = state
        .store
        .write()
        .await
        .submit_rating(id, user_id, body.rating)?;
    Ok((StatusCode::CREATED, Json(rating)).into_response())
}
