use serde::{Deserialize, Serialize};

use crate::users::dto::PublicUser;

/// Claims of a session token; `sub` is the player's user id.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: u32,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Returned by register and login.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub user: PublicUser,
}
