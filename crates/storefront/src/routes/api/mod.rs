//! JSON API routes consumed by the header widget.
//!
//! Every `/api/*` response is a JSON envelope, success and failure alike;
//! page-flavored HTML errors never leak onto this surface.

pub mod auth;
pub mod shop;

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

/// JSON rendering of [`AppError`] for the API surface.
///
/// Any error that can become an `AppError` can be `?`-propagated from an API
/// handler; the status code and sanitized message come from
/// [`AppError::into_parts`], the same place the HTML error page gets them.
pub struct ApiError(AppError);

impl<E: Into<AppError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.0.into_parts();
        (status, Json(Envelope::failure(message))).into_response()
    }
}

/// The `{success, message}` envelope carried by every API response.
#[derive(Debug, Serialize)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
}

impl Envelope {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Result alias for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use axum::http::StatusCode;

    use crate::services::auth::AuthError;

    #[tokio::test]
    async fn api_errors_render_the_json_envelope() {
        let response = ApiError::from(AuthError::InvalidCredentials).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid credentials");
    }

    #[test]
    fn envelope_shapes() {
        let ok = serde_json::to_value(Envelope::success("done")).unwrap();
        assert_eq!(ok["success"], true);

        let bad = serde_json::to_value(Envelope::failure("nope")).unwrap();
        assert_eq!(bad["success"], false);
        assert_eq!(bad["message"], "nope");
    }
}
