use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::auth::{LoginRequest, LoginResponse, SignupResponse};
use crate::models::user::CreateUserRequest;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::RepositoryError;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user id
    exp: i64,    // expiration timestamp
}

/// Token validity window. Expiry requires a fresh login; there is no
/// refresh mechanism.
const TOKEN_LIFETIME_HOURS: i64 = 1;

/// Authentication service errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Full name or email already exists")]
    DuplicateIdentity,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Trait defining authentication service operations
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user and issue a token bound to the new identifier
    async fn register(&self, request: CreateUserRequest) -> Result<SignupResponse, AuthError>;

    /// Authenticate a user by exact email and password match
    async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthError>;

    /// Validate a token's signature and expiry, yielding the embedded user id
    async fn validate_token(&self, token: &str) -> Result<i32, AuthError>;
}

/// Implementation of AuthService
pub struct AuthServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    jwt_secret: String,
}

impl AuthServiceImpl {
    pub fn new(user_repository: Arc<dyn UserRepository>, jwt_secret: String) -> Self {
        Self {
            user_repository,
            jwt_secret,
        }
    }

    /// Generate a signed JWT for a user
    fn generate_jwt(&self, user_id: i32) -> Result<String, AuthError> {
        let expiration = Utc::now() + Duration::hours(TOKEN_LIFETIME_HOURS);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expiration.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::DatabaseError(format!("Token generation failed: {}", e)))
    }

    /// Decode and validate a JWT, returning the embedded user id
    fn decode_jwt(&self, token: &str) -> Result<i32, AuthError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AuthError::InvalidToken)?;

        token_data
            .claims
            .sub
            .parse::<i32>()
            .map_err(|_| AuthError::InvalidToken)
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn register(&self, request: CreateUserRequest) -> Result<SignupResponse, AuthError> {
        let user = self
            .user_repository
            .create(request)
            .await
            .map_err(|e| match e {
                RepositoryError::ConstraintViolation(_) => AuthError::DuplicateIdentity,
                RepositoryError::DatabaseError(msg) => AuthError::DatabaseError(msg),
                RepositoryError::NotFound => {
                    AuthError::DatabaseError("Unexpected error".to_string())
                }
            })?;

        let token = self.generate_jwt(user.id)?;

        Ok(SignupResponse { token, id: user.id })
    }

    async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        let user = self
            .user_repository
            .find_by_credentials(&request.email, &request.password)
            .await
            .map_err(|e| AuthError::DatabaseError(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        let token = self.generate_jwt(user.id)?;

        Ok(LoginResponse {
            token,
            user_id: user.id,
            fullname: user.fullname,
        })
    }

    async fn validate_token(&self, token: &str) -> Result<i32, AuthError> {
        self.decode_jwt(token)
    }
}
