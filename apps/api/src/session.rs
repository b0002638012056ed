use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;

/// Header carrying the signed-in user's id, set by the auth proxy in front of the API.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The signed-in user. Handlers that take a `Session` reject anonymous requests.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(AppError::Unauthorized)?;

        Ok(Session {
            user_id: user_id.to_string(),
        })
    }
}
