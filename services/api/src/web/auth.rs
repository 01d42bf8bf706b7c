//! services/api/src/web/auth.rs
//!
//! Authentication endpoints: admin login and the current-user lookup.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use dairy_cms_core::domain::{User, UserProfile};

use crate::web::state::AppState;
use crate::web::token::Claims;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

// The same generic message for an unknown email and a wrong password, so the
// endpoint cannot be used to enumerate accounts.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/login - Exchange email/password for a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // 1. Look the user up by exact email match
    let user = state
        .engine
        .find::<User, _>(|u| u.email == req.email)
        .await
        .map_err(|e| {
            error!("Failed to read users: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Authentication error".to_string(),
            )
        })?
        .ok_or((StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS.to_string()))?;

    // 2. Verify the password against the stored argon2 hash
    let parsed_hash = PasswordHash::new(&user.password).map_err(|e| {
        error!("Failed to parse password hash: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Authentication error".to_string(),
        )
    })?;

    let valid = Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .is_ok();

    if !valid {
        return Err((StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS.to_string()));
    }

    // 3. Issue a signed token carrying {id, email, role}
    let token = state.tokens.issue(&user).map_err(|e| {
        error!("Failed to sign token: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to issue token".to_string(),
        )
    })?;

    Ok(Json(LoginResponse {
        token,
        user: user.profile(),
    }))
}

/// GET /auth/me - The profile behind the presented token
///
/// Re-resolves the user record by id, so a token for a user deleted
/// out-of-band yields 404 rather than a ghost profile.
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current user profile", body = UserProfile),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User no longer exists")
    ),
    security(("bearer_token" = []))
)]
pub async fn me_handler(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let user = state
        .engine
        .find::<User, _>(|u| u.id == claims.sub)
        .await
        .map_err(|e| {
            error!("Failed to read users: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load user".to_string(),
            )
        })?
        .ok_or((StatusCode::NOT_FOUND, "User not found".to_string()))?;

    Ok(Json(user.profile()))
}
