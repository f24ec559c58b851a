use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::Arc;

use crate::services::auth_service::AuthService;

/// Extension type carrying the authenticated user id through the request
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: i32,
}

/// Auth middleware that validates the bearer token and adds the user id
/// to request extensions.
///
/// The token is read raw from the `authorization` header, with no scheme
/// prefix.
pub async fn auth_middleware(
    State(auth_service): State<Arc<dyn AuthService>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthGateError> {
    let token = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthGateError::MissingToken)?;

    let user_id = auth_service
        .validate_token(token)
        .await
        .map_err(|_| AuthGateError::InvalidToken)?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}

/// Auth middleware errors
#[derive(Debug)]
pub enum AuthGateError {
    MissingToken,
    InvalidToken,
}

impl IntoResponse for AuthGateError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthGateError::MissingToken => {
                (StatusCode::UNAUTHORIZED, "Authentication token required")
            }
            AuthGateError::InvalidToken => (StatusCode::FORBIDDEN, "Invalid token"),
        };

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}
