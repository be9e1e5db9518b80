//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. Page handlers return it directly and get
//! an HTML error page; the JSON API wraps it (see `routes::api::ApiError`) and
//! gets the `{success: false, message}` envelope. Either way the status code
//! and sanitized message come from one place: [`AppError::into_parts`].

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::auth::AuthError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Rendered HTML error page.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
struct ErrorTemplate {
    code: u16,
    message: String,
}

impl AppError {
    /// Resolve the response status and client-safe message.
    ///
    /// Server errors are captured to Sentry here, so both the HTML and JSON
    /// renderings report exactly once. Raw error details never reach the
    /// client; they go to the log and to Sentry.
    pub fn into_parts(self) -> (StatusCode, String) {
        let status = match &self {
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::UserAlreadyExists
                | AuthError::WeakPassword(_)
                | AuthError::InvalidEmail(_) => StatusCode::BAD_REQUEST,
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let message = match self {
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid credentials".to_owned(),
                AuthError::UserAlreadyExists => "Email already registered".to_owned(),
                AuthError::WeakPassword(msg) => msg,
                AuthError::InvalidEmail(_) => "Invalid email address".to_owned(),
                AuthError::Repository(_) | AuthError::PasswordHash => {
                    "Internal server error".to_owned()
                }
            },
            Self::NotFound(_) => "Page not found".to_owned(),
            Self::BadRequest(msg) => msg,
            Self::Internal(_) => "Internal server error".to_owned(),
        };

        (status, message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.into_parts();
        let page = ErrorTemplate {
            code: status.as_u16(),
            message,
        };

        (status, page).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("no-such-page".to_owned());
        assert_eq!(err.to_string(), "Not found: no-such-page");

        let err = AppError::BadRequest("invalid input".to_owned());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_status_codes() {
        fn status_of(err: AppError) -> StatusCode {
            err.into_parts().0
        }

        assert_eq!(
            status_of(AppError::NotFound("x".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::BadRequest("x".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Internal("x".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::UserAlreadyExists)),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_messages_do_not_leak_internals() {
        let (_, message) =
            AppError::Internal("connection refused at 10.0.0.3:5432".to_owned()).into_parts();
        assert_eq!(message, "Internal server error");

        let (_, message) = AppError::Auth(AuthError::InvalidCredentials).into_parts();
        assert_eq!(message, "Invalid credentials");

        let (_, message) = AppError::Auth(AuthError::UserAlreadyExists).into_parts();
        assert_eq!(message, "Email already registered");
    }

    #[tokio::test]
    #[allow(clippy::unwrap_used)]
    async fn test_error_page_body_contains_code_and_message() {
        let response = AppError::NotFound("ghost".to_owned()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("404"));
        assert!(html.contains("Page not found"));
    }
}
