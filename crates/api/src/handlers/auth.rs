//! Handlers for the `/auth` resource (login, register, me).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use pancheck_core::accounts::{
    required, validate_email, validate_password_strength, MIN_PASSWORD_LENGTH,
};
use pancheck_core::error::CoreError;
use pancheck_core::types::DbId;
use pancheck_store::models::user::{CreateUser, UserInfo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`. Missing fields are reported by the
/// handler, not the extractor.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Returned by login and register.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserInfo,
    pub token: String,
    pub message: &'static str,
}

/// Returned by `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserInfo,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
///
/// Authenticate with email + password. Returns the user and an access token.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<AuthResponse>> {
    let Json(input) = payload?;

    let (Some(email), Some(password)) = (
        required(input.email.as_deref()),
        required(input.password.as_deref()),
    ) else {
        return Err(CoreError::Validation("Email and password are required".into()).into());
    };

    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = state.users.find_by_email(email).await.ok_or_else(invalid)?;

    let password_valid = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid());
    }

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(AuthResponse {
        token: issue_token(&state, user.id)?,
        user: UserInfo::from(&user),
        message: "Login successful",
    }))
}

/// POST /api/auth/register
///
/// Create an account and log it in. Returns 201 with the user and a token.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let Json(input) = payload?;

    let (Some(name), Some(email), Some(password)) = (
        required(input.name.as_deref()),
        required(input.email.as_deref()),
        required(input.password.as_deref()),
    ) else {
        return Err(
            CoreError::Validation("Name, email, and password are required".into()).into(),
        );
    };

    if state.users.find_by_email(email).await.is_some() {
        return Err(CoreError::Conflict("User with this email already exists".into()).into());
    }

    validate_email(email)?;
    validate_password_strength(password, MIN_PASSWORD_LENGTH)?;

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // The store re-checks the email under its write lock.
    let user = state
        .users
        .create(CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
        })
        .await?;

    tracing::info!(user_id = user.id, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token: issue_token(&state, user.id)?,
            user: UserInfo::from(&user),
            message: "Registration successful",
        }),
    ))
}

/// GET /api/auth/me
///
/// Return the user the bearer token belongs to.
pub async fn me(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<Json<MeResponse>> {
    let user = state
        .users
        .find_by_id(auth_user.user_id)
        .await
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    Ok(Json(MeResponse {
        user: UserInfo::from(&user),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn issue_token(state: &AppState, user_id: DbId) -> AppResult<String> {
    generate_access_token(user_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))
}
