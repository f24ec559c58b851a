use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// User entity representing a registered user in the system
///
/// The password is stored as provided at signup and compared verbatim at
/// login. It is never serialized back to clients.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub fullname: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Request payload for user signup
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "fullname": "John Doe",
    "email": "john.doe@example.com",
    "password": "securepassword123"
}))]
pub struct CreateUserRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Full name must not be empty"
    ))]
    pub fullname: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}
