use thiserror::Error;

/// Failures raised by catalog operations. All of them are terminal: the store
/// cannot fail on its own, so there is nothing to retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: u32 },
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Conflict(String),
}

impl CatalogError {
    pub fn game_not_found(id: u32) -> Self {
        Self::NotFound { entity: "Game", id }
    }

    pub fn user_not_found(id: u32) -> Self {
        Self::NotFound { entity: "User", id }
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
