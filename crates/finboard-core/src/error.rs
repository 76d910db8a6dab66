//! Error types for finboard-core

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// View id unknown or already disposed
    ViewNotFound,
    /// Filter value outside all/credit/debit
    InvalidFilter,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::ViewNotFound => write!(f, "VIEW_NOT_FOUND"),
            ErrorCode::InvalidFilter => write!(f, "INVALID_FILTER"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - request rejected
    Warning,
}

/// Detailed error information for responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            suggestions: vec![],
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Main error type for finboard-core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("View not found: {id}")]
    ViewNotFound { id: String },

    #[error("Invalid filter: {value}")]
    InvalidFilter { value: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::ViewNotFound { .. } => ErrorCode::ViewNotFound,
            CoreError::InvalidFilter { .. } => ErrorCode::InvalidFilter,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::ViewNotFound { .. } => ErrorSeverity::Info,
            CoreError::InvalidFilter { .. } => ErrorSeverity::Warning,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::ViewNotFound { .. } => details
                .with_suggestion("The view expired or was closed. Reload the page.".to_string()),
            CoreError::InvalidFilter { .. } => details
                .with_suggestion("Use one of: all, credit, debit.".to_string()),
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;
