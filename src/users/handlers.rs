use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::dto::{LeaderboardQuery, PublicUser};
use crate::{
    catalog::{models::GameHistory, CatalogError},
    error::ApiResult,
    extract::{AppPath, AppQuery},
    state::AppState,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:id", get(get_user))
        .route("/users/:id/history", get(get_history))
        .route("/leaderboard", get(leaderboard))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<u32>,
) -> ApiResult<Json<PublicUser>> {
    let user = state
        .store
        .read()
        .await
        .user(id)
        .cloned()
        .ok_or_else(|| CatalogError::user_not_found(id))?;
    Ok(Json(user.into()))
}

#[instrument(skip(state))]
pub async fn get_history(
    State(state): State<AppState>,
    AppPath(id): AppPath<u32>,
) -> ApiResult<Json<Vec<GameHistory>>> {
    let store = state.store.read().await;
    if store.user(id).is_none() {
        return Err(CatalogError::user_not_found(id).into());
    }
    Ok(Json(store.history_by_user(id)))
}

#[instrument(skip(state))]
pub async fn leaderboard(
    State(state): State<AppState>,
    AppQuery(q): AppQuery<LeaderboardQuery>,
) -> ApiResult<Json<Vec<PublicUser>>> {
    let players = state.store.read().await.top_players(q.limit);
    Ok(Json(players.into_iter().map(PublicUser::from).collect()))
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::{Request, StatusCode}};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::{
        app::build_app,
        catalog::CatalogStore,
        config::CatalogMode,
        state::AppState,
    };

    async fn get(uri: &str) -> (StatusCode, Value) {
        let store = CatalogStore::seeded("not-a-real-hash").unwrap();
        let app = build_app(AppState::fake(store, CatalogMode::Dynamic));
        let resp = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn user_without_password() {
        let (status, body) = get("/api/users/1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "JediMaster");
        assert_eq!(body["level"], 10);
        assert!(body.get("password").is_none());
        assert!(body.get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn unknown_user_is_404() {
        let (status, body) = get("/api/users/404").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "User not found");
        assert_eq!(get("/api/users/404/history").await.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_id_is_bad_request() {
        assert_eq!(get("/api/users/abc").await.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn history_newest_first() {
        let (status, body) = get("/api/users/1/history").await;
        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["score"], 5280);
        assert_eq!(rows[1]["score"], 12450);
        assert!(rows[0]["playedAt"].is_string());
    }

    #[tokio::test]
    async fn leaderboard_limit_and_order() {
        let (_, body) = get("/api/leaderboard?limit=2").await;
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["username"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["JediMaster", "PixelPro"]);

        let (_, body) = get("/api/leaderboard").await;
        assert_eq!(body.as_array().unwrap().len(), 5);
        assert!(body[0].get("passwordHash").is_none());
    }
}
