//! Caller identity extractors.
//!
//! Authentication happens upstream; the gateway forwards the authenticated
//! username in the `X-Username` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use portfolio_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the authenticated username.
pub const USERNAME_HEADER: &str = "x-username";

/// The caller's username, if the request carries one.
///
/// ```ignore
/// async fn my_handler(caller: CallerIdentity) -> AppResult<Json<()>> {
///     tracing::info!(username = ?caller.username, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallerIdentity {
    pub username: Option<String>,
}

impl FromRequestParts<AppState> for CallerIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let username = match parts.headers.get(USERNAME_HEADER) {
            None => None,
            Some(value) => {
                let value = value.to_str().map_err(|_| {
                    AppError::BadRequest("X-Username header is not valid text".into())
                })?;
                let trimmed = value.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        };
        Ok(CallerIdentity { username })
    }
}

/// A caller identity that must be present.
///
/// Rejects with 401 when the `X-Username` header is missing or blank.
#[derive(Debug, Clone)]
pub struct RequireCaller(pub String);

impl FromRequestParts<AppState> for RequireCaller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let caller = CallerIdentity::from_request_parts(parts, state).await?;
        caller.username.map(RequireCaller).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Missing X-Username header".into(),
            ))
        })
    }
}
