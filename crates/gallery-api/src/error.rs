//! HTTP error response conversion and the response envelope.
//!
//! Every response body, success or failure, is a [`ResponseBody`]:
//! `{ "success": bool, "data": <json|null>, "messages": [string] }`.
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>` and let
//! `?` convert `AppError` so failures render consistently (status, envelope, logging).
//!
//! Failure envelopes include `error_type` and `details` for non-sensitive errors.
//! Production routers install [`redact_error_details`] to strip them.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use gallery_core::{AppError, ErrorMetadata, LogLevel};
use serde::Serialize;

/// The response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseBody<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub messages: Vec<String>,
}

impl<T: Serialize> ResponseBody<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            messages: Vec::new(),
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            messages: vec![message.into()],
        }
    }
}

/// Extra detail carried in `data` of a failure envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorData {
    /// Machine-readable error code for programmatic handling
    pub code: &'static str,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from gallery-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error.detailed_message(), error_type = error_type, "Error occurred");
        }
    }
}

/// The failure envelope a response was rendered from, kept in its extensions.
#[derive(Debug, Clone)]
struct RenderedError(ResponseBody<ErrorData>);

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Sensitive details never leave the server.
        let show_details = !app_error.is_sensitive();
        let data = ErrorData {
            code: app_error.error_code(),
            recoverable: app_error.is_recoverable(),
            error_type: show_details.then(|| app_error.error_type()),
            details: show_details.then(|| app_error.detailed_message()),
        };

        let body = ResponseBody {
            success: false,
            data: Some(data),
            messages: app_error.client_messages(),
        };

        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(RenderedError(body));
        response
    }
}

/// Re-render failure envelopes without `error_type` and `details`.
///
/// Status, headers and messages are kept. Responses that did not come from
/// [`HttpAppError`] pass through untouched.
pub async fn redact_error_details(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let Some(RenderedError(mut body)) = response.extensions_mut().remove::<RenderedError>()
    else {
        return response;
    };

    if let Some(data) = body.data.as_mut() {
        data.error_type = None;
        data.details = None;
    }

    let (parts, _) = response.into_parts();
    (parts, Json(body)).into_response()
}
