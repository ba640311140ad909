use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::application::http::server::api_entities::api_error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";
const MAX_USER_ID_LEN: usize = 128;

/// Authenticated user, stored in request extensions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: String,
}

/// Reads the user id the identity gateway put on the request.
pub fn extract_user_id(headers: &HeaderMap) -> Result<String, ApiError> {
    let user_id = headers
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Missing user identity".to_string()))?;

    if user_id.len() > MAX_USER_ID_LEN || user_id.chars().any(char::is_whitespace) {
        return Err(ApiError::Unauthorized("Malformed user identity".to_string()));
    }

    Ok(user_id.to_string())
}

/// Rejects requests without a user identity and exposes it as [`UserContext`].
pub async fn user_context(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let user_id = extract_user_id(req.headers())?;

    req.extensions_mut().insert(UserContext { user_id });

    Ok(next.run(req).await)
}
