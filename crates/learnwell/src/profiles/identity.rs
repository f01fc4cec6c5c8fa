use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::domain::UserId;

pub const USER_ID_HEADER: &str = "x-auth0-user-id";
pub const FALLBACK_USER_ID: &str = "default-user-id";

/// The caller's resolved identity. Requires a bearer token; the token itself is verified
/// upstream by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity(pub UserId);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("Bearer "))
            .unwrap_or(false);
        if !bearer {
            let payload = json!({ "error": "authorization header required" });
            return Err((StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response());
        }

        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(FALLBACK_USER_ID);

        Ok(CallerIdentity(UserId(user_id.to_string())))
    }
}
