use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request payload for user login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "email": "john.doe@example.com",
    "password": "securepassword123"
}))]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response payload for a successful signup
///
/// The identifier field is serialized as `Id`, matching the wire contract
/// consumed by existing clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
    "Id": 1
}))]
pub struct SignupResponse {
    pub token: String,
    #[serde(rename = "Id")]
    pub id: i32,
}

/// Response payload for a successful login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
    "user_id": 1,
    "fullname": "John Doe"
}))]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i32,
    pub fullname: String,
}
