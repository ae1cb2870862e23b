//! Session tokens and the `Player` extractor.
//!
//! A session token pins the player a write acts for. Requests without an
//! `Authorization` header stay anonymous and fall back to the `userId` in the
//! body; a header that is present must carry a valid token.

use anyhow::Context;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration, OffsetDateTime};
use tracing::{debug, warn};

use super::dto::SessionClaims;
use crate::config::JwtConfig;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl SessionKeys {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl: Duration::minutes(config.ttl_minutes.max(1)),
        }
    }

    pub fn issue(&self, user_id: u32) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let claims = SessionClaims {
            sub: user_id,
            iat: now.unix_timestamp(),
            exp: (now + self.ttl).unix_timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .context("sign session token")?;
        debug!(user_id, "session issued");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> jsonwebtoken::errors::Result<SessionClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        decode::<SessionClaims>(token, &self.decoding, &validation).map(|data| data.claims)
    }
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        Self::new(&state.config.jwt)
    }
}

/// The caller of a request: `Some(user id)` with a valid session, `None` when
/// anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player(pub Option<u32>);

impl Player {
    pub fn required(self) -> ApiResult<u32> {
        self.0
            .ok_or_else(|| ApiError::Unauthorized("Sign in required".into()))
    }

    /// The user a write is recorded for. With a session the body may omit
    /// `userId` but cannot name anyone else.
    pub fn acting_for(self, claimed: Option<u32>) -> ApiResult<Option<u32>> {
        match (self.0, claimed) {
            (Some(signed_in), Some(claimed)) if signed_in != claimed => {
                warn!(signed_in, claimed, "userId does not match session");
                Err(ApiError::Unauthorized("userId does not match session".into()))
            }
            (Some(signed_in), _) => Ok(Some(signed_in)),
            (None, claimed) => Ok(claimed),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Player
where
    S: Send + Sync,
    SessionKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(Self(None));
        };

        let token = header
            .to_str()
            .ok()
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::Unauthorized("Malformed Authorization header".into()))?;

        let claims = SessionKeys::from_ref(state)
            .verify(token.trim())
            .map_err(|e| {
                warn!(error = %e, "session token rejected");
                ApiError::Unauthorized("Invalid or expired session".into())
            })?;

        Ok(Self(Some(claims.sub)))
    }
}
