use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::AppState;
use crate::domain::entities::User;
use crate::shared::errors::AppError;

/// Identity header set by the authenticating gateway in front of this
/// service. The authentication protocol itself is the gateway's concern;
/// this service only resolves the id against the user store.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated caller, resolved from [`USER_ID_HEADER`].
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| AppError::Unauthorized("Missing identity header".to_string()))?;

        let id: i32 = header
            .to_str()
            .ok()
            .and_then(|raw| raw.parse().ok())
            .ok_or_else(|| AppError::Unauthorized("Malformed identity header".to_string()))?;

        let user = state
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::Unauthorized(format!("Unknown user {}", id)))?;

        Ok(CurrentUser(user))
    }
}
