//! Error types for finboard-api

use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use finboard_core::{CoreError, ErrorCode, ErrorSeverity};
use finboard_utils::escape_html;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String, suggestions: Vec<String> },

    #[error("Bad request: {message}")]
    BadRequest { message: String, suggestions: Vec<String> },
}

/// Tells htmx to reload the whole page instead of swapping the response
pub const HX_REFRESH: &str = "hx-refresh";

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        }
    }

    fn suggestions(&self) -> &[String] {
        match self {
            ApiError::NotFound { suggestions, .. } | ApiError::BadRequest { suggestions, .. } => suggestions.as_slice(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        let details = error.to_details();
        match error.severity() {
            ErrorSeverity::Info => log::debug!("{}", details),
            ErrorSeverity::Warning => log::warn!("{}", details),
        }

        match details.code {
            ErrorCode::ViewNotFound => ApiError::NotFound {
                resource: details.message,
                suggestions: details.suggestions,
            },
            ErrorCode::InvalidFilter => ApiError::BadRequest {
                message: details.message,
                suggestions: details.suggestions,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let hints: String = self
            .suggestions()
            .iter()
            .map(|s| format!("<p class='text-sm text-red-600 mt-1'>{}</p>", escape_html(s)))
            .collect();
        let body = format!(
            r#"<div id='transactions-view' class='bg-red-50 border border-red-200 rounded-lg p-4 mt-8'><p class='font-medium text-red-800'>{}</p>{}</div>"#,
            escape_html(&self.to_string()),
            hints
        );
        let mut response = (self.status(), Html(body)).into_response();
        // The view is gone; reloading the page mounts a fresh one
        if let ApiError::NotFound { .. } = self {
            response.headers_mut().insert(HX_REFRESH, HeaderValue::from_static("true"));
        }
        response
    }
}
