//! Handlers for the `/auth` resource (register, login, profile).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use glocal_core::content::require_text;
use glocal_core::error::CoreError;
use glocal_core::roles::Role;
use glocal_db::models::user::{CreateUser, User, UserResponse};
use glocal_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, validate_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Unknown or absent roles fall back to VIEWER.
    pub role: Option<String>,
    pub avatar: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthPayload {
    pub user: UserResponse,
    pub token: String,
}

/// Returned by profile.
#[derive(Debug, Serialize)]
pub struct ProfilePayload {
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account and return it with a token (201).
pub async fn register(
    State(state): State<AppState>,
    AppJson(mut input): AppJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AuthPayload>>)> {
    input.email = normalize_email(&input.email);
    input.validate()?;
    validate_password(&input.password)?;
    let first_name = require_text("first_name", input.first_name.as_deref())?.to_string();
    let last_name = require_text("last_name", input.last_name.as_deref())?.to_string();

    if UserRepo::email_exists(&state.pool, &input.email).await? {
        return Err(AppError::BadRequest("User already exists".into()));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email,
            password_hash,
            first_name,
            last_name,
            role: Role::parse_or_default(input.role.as_deref()),
            avatar: input.avatar.filter(|a| !a.trim().is_empty()),
        },
    )
    .await
    .map_err(|e| {
        // A concurrent registration won the race past the check above.
        let duplicate = matches!(
            &e,
            sqlx::Error::Database(db) if db.constraint() == Some("uq_users_email")
        );
        if duplicate {
            AppError::BadRequest("User already exists".into())
        } else {
            AppError::from(e)
        }
    })?;

    tracing::info!(user_id = user.id, role = %user.role, "User registered");

    let payload = auth_payload(&state, user)?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(payload))))
}

/// POST /api/v1/auth/login
///
/// Exchange email + password for a token. Unknown email and wrong password
/// are indistinguishable to the caller.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<DataResponse<AuthPayload>>> {
    let email = normalize_email(&input.email);

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid_credentials());
    }

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(DataResponse::new(auth_payload(&state, user)?)))
}

/// GET /api/v1/auth/profile
pub async fn profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<ProfilePayload>>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    Ok(Json(DataResponse::new(ProfilePayload { user: user.into() })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()))
}

fn auth_payload(state: &AppState, user: User) -> AppResult<AuthPayload> {
    let token = generate_token(user.id, &user.email, user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    Ok(AuthPayload {
        user: user.into(),
        token,
    })
}
