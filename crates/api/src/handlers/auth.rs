//! Handlers for the `/auth` resource (signup, signin).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tasklane_core::error::CoreError;
use tasklane_core::roles::{is_valid_role, ROLE_USER};
use tasklane_core::types::DbId;
use tasklane_db::models::user::{CreateUser, User};
use tasklane_db::repositories::UserRepo;
use validator::Validate;

use crate::auth::jwt::{generate_access_token, TokenSubject};
use crate::auth::password::{hash_password, verify_password, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::services::validation_error;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "email format is invalid"))]
    pub email: String,
    #[validate(length(min = 1, max = 50, message = "nickname must be 1-50 characters"))]
    pub nickname: String,
    pub password: String,
    /// `"USER"` or `"ADMIN"`; defaults to `"USER"`.
    pub role: Option<String>,
}

/// Request body for `POST /auth/signin`.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication response returned by signup and signin.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
    pub nickname: String,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Register a new user and sign them in. Duplicate emails map to 409 via
/// the `uq_users_email` constraint.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    input.validate().map_err(validation_error)?;

    if input.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Core(CoreError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        ))));
    }

    let role = input.role.as_deref().unwrap_or(ROLE_USER);
    if !is_valid_role(role) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "unknown role: {role}"
        ))));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email,
            nickname: input.nickname,
            password_hash,
            role: role.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, role = %user.role, "User signed up");

    let response = auth_response(&state, &user)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/signin
///
/// Authenticate with email + password and return an access token.
pub async fn signin(
    State(state): State<AppState>,
    Json(input): Json<SigninRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::warn!(user_id = user.id, "Sign-in rejected: wrong password");
        return Err(invalid_credentials());
    }

    tracing::info!(user_id = user.id, "User signed in");

    Ok(Json(auth_response(&state, &user)?))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
}

fn auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;
    let access_token = generate_access_token(
        TokenSubject {
            user_id: user.id,
            email: &user.email,
            nickname: &user.nickname,
            role: &user.role,
        },
        jwt,
    )
    .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(AuthResponse {
        access_token,
        expires_in: jwt.access_token_expiry_mins * 60,
        user: UserInfo {
            id: user.id,
            email: user.email.clone(),
            nickname: user.nickname.clone(),
            role: user.role.clone(),
        },
    })
}
