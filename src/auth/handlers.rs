use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, RegisterRequest, SessionResponse},
        services::{hash_password, is_valid_email, password_long_enough, verify_password},
        session::{Player, SessionKeys},
    },
    catalog::{models::NewUser, CatalogError},
    error::{ApiError, ApiResult},
    extract::AppJson,
    state::AppState,
    users::dto::PublicUser,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/users", post(register))
        .route("/auth/login", post(login))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

fn start_session(state: &AppState, user: PublicUser) -> ApiResult<SessionResponse> {
    let token = SessionKeys::from_ref(state).issue(user.id)?;
    Ok(SessionResponse { token, user })
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(mut payload): AppJson<RegisterRequest>,
) -> ApiResult<Response> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(CatalogError::invalid("Invalid email").into());
    }

    if !password_long_enough(&payload.password) {
        warn!("password too short");
        return Err(CatalogError::invalid("Password too short").into());
    }

    if state.config.is_static() {
        info!("registration ignored in static mode");
        return Ok(StatusCode::ACCEPTED.into_response());
    }

    let password_hash = hash_password(&payload.password)?;

    let user = state.store.write().await.register_user(NewUser {
        username: payload.username,
        email: payload.email,
        password_hash,
        avatar: payload.avatar.filter(|a| !a.trim().is_empty()),
        points: 0,
    })?;

    let body = start_session(&state, PublicUser::from(user))?;
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

/// Username lookup is case-insensitive; the password is always checked.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let user = state
        .store
        .read()
        .await
        .user_by_username(payload.username.trim())
        .cloned();

    let Some(user) = user else {
        warn!("login unknown username");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = user.id, "login invalid password");
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    info!(user_id = user.id, "user logged in");
    Ok(Json(start_session(&state, PublicUser::from(user))?))
}

#[instrument(skip(state))]
pub async fn get_me(State(state): State<AppState>, player: Player) -> ApiResult<Json<PublicUser>> {
    let user_id = player.required()?;
    let user = state
        .store
        .read()
        .await
        .user(user_id)
        .cloned()
        .ok_or_else(|| {
            warn!(user_id, "session for unknown user");
            ApiError::Unauthorized("User not found".into())
        })?;

    Ok(Json(PublicUser::from(user)))
}
