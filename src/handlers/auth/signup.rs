// handlers/auth/signup.rs - POST /auth/signup handler

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::api::ApiJson;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
    pub username: String,
}

/// POST /auth/signup - Register a new user
///
/// Expected Input:
/// ```json
/// { "username": "alice", "password": "pw1" }
/// ```
///
/// Expected Output:
/// ```json
/// { "message": "User created successfully", "username": "alice" }
/// ```
///
/// A taken username is a 400 with detail "Username already exists".
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SignupRequest>,
) -> Result<Json<SignupResponse>, ApiError> {
    let user = state
        .accounts
        .signup(&payload.username, &payload.password)
        .await?;

    Ok(Json(SignupResponse {
        message: "User created successfully".to_string(),
        username: user.username,
    }))
}
