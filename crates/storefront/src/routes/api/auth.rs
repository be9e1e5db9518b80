//! Authentication API routes.
//!
//! Registration, login, logout, and the session probe the header widget
//! calls on pages without an injected identity block. Registration and login
//! both establish the session (auto-login on register); logout flushes the
//! session record and always reports success.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalAuth, clear_current_user, set_current_user};
use crate::models::{CurrentUser, UserProfile};
use crate::state::AppState;

use super::{ApiResult, Envelope};

/// Registration request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response body for register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

/// Response body for the session probe.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

/// `POST /api/auth/register`
///
/// Duplicate emails, weak passwords, and malformed addresses all surface as
/// a 400 envelope via [`super::ApiError`].
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .auth()
        .register(&req.email, &req.password, req.first_name, req.last_name)
        .await?;

    let current = CurrentUser::from(&user);
    set_current_user(&session, &current)
        .await
        .map_err(|e| crate::error::AppError::Internal(format!("session write failed: {e}")))?;
    set_sentry_user(&user.id, Some(user.email.as_str()));

    tracing::info!(user_id = %user.id, "User registered");

    Ok(Json(AuthResponse {
        success: true,
        message: "Registration successful".to_owned(),
        user: Some(UserProfile::from(&user)),
    }))
}

/// `POST /api/auth/login`
///
/// Unknown accounts and wrong passwords are indistinguishable: both come
/// back as a 401 envelope with the generic message.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(req): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let user = state.auth().login(&req.email, &req.password).await?;

    // A fresh session id for the new authentication level.
    session.cycle_id().await.ok();
    let current = CurrentUser::from(&user);
    set_current_user(&session, &current)
        .await
        .map_err(|e| crate::error::AppError::Internal(format!("session write failed: {e}")))?;
    set_sentry_user(&user.id, Some(user.email.as_str()));

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        success: true,
        message: "Login successful".to_owned(),
        user: Some(UserProfile::from(&user)),
    }))
}

/// `POST /api/auth/logout`
///
/// Always succeeds: an anonymous caller logging out is a no-op, and a
/// session-store hiccup still clears the cookie-side state.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> impl IntoResponse {
    if let Err(e) = clear_current_user(&session).await {
        tracing::warn!("Failed to clear session user on logout: {e}");
    }
    if let Err(e) = session.flush().await {
        tracing::warn!("Failed to flush session on logout: {e}");
    }
    clear_sentry_user();

    Json(Envelope::success("Logout successful"))
}

/// `GET /api/auth/me`
pub async fn me(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    let response = match user {
        Some(current) => MeResponse {
            authenticated: true,
            user: Some(UserProfile {
                id: current.id,
                email: current.email.as_str().to_owned(),
                first_name: current.first_name,
                last_name: current.last_name,
            }),
        },
        None => MeResponse {
            authenticated: false,
            user: None,
        },
    };

    (StatusCode::OK, Json(response))
}
