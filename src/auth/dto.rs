use serde::{Deserialize, Serialize};

/// Request body for user registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for the profile update. `name` replaces the stored first name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub name: String,
}

/// Response returned after registration.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub authtoken: String,
    pub email: String,
}

/// Response returned after login.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub authtoken: String,
    pub user_name: String,
    pub user_email: String,
}

/// Response returned after a profile update.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateResponse {
    pub authtoken: String,
}
