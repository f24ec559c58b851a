use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use validator::Validate;

use crate::handlers::{ErrorResponse, validation_error_response};
use crate::models::auth::{LoginRequest, LoginResponse, SignupResponse};
use crate::models::user::CreateUserRequest;
use crate::services::auth_service::{AuthError, AuthService};

/// Convert AuthError to HTTP response
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            AuthError::DuplicateIdentity => (
                StatusCode::CONFLICT,
                "duplicate_identity",
                "Full name or email already exists",
            ),
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Invalid credentials",
            ),
            AuthError::InvalidToken => (StatusCode::FORBIDDEN, "invalid_token", "Invalid token"),
            AuthError::DatabaseError(ref msg) => {
                tracing::error!(error = %msg, "auth operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    msg.as_str(),
                )
            }
        };

        let error_response = ErrorResponse::new(error_type, message);
        (status, Json(error_response)).into_response()
    }
}

/// Handler for user signup
///
/// Creates a new user and returns a token bound to the new identifier.
#[utoipa::path(
    post,
    path = "/signup",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User successfully registered", body = SignupResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Full name or email already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn signup_handler(
    State(auth_service): State<Arc<dyn AuthService>>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), Response> {
    if let Err(validation_errors) = request.validate() {
        return Err(validation_error_response(&validation_errors));
    }

    match auth_service.register(request).await {
        Ok(response) => Ok((StatusCode::CREATED, Json(response))),
        Err(e) => Err(e.into_response()),
    }
}

/// Handler for user login
///
/// Authenticates a user and returns a fresh token.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(auth_service): State<Arc<dyn AuthService>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, Response> {
    match auth_service.login(request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => Err(e.into_response()),
    }
}
