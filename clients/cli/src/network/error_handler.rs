//! Centralized error classification

use crate::api::error::ApiError;
use crate::logging::LogLevel;

/// Classify an API error into the level it is logged at.
pub fn classify_error(error: &ApiError) -> LogLevel {
    match error {
        // Rate limiting - nothing retries, so the fetch is lost
        ApiError::Http { status, .. } if *status == 429 => LogLevel::Warn,

        // Server errors - temporary issues
        ApiError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

        // Authentication errors - critical
        ApiError::Http { status, .. } if *status == 401 || *status == 403 => LogLevel::Error,

        // Malformed payloads will not fix themselves
        ApiError::Decode(_) => LogLevel::Error,

        // Network issues - usually temporary
        ApiError::Reqwest(_) => LogLevel::Warn,

        // Other client errors
        ApiError::Http { .. } => LogLevel::Warn,
    }
}

/// Shorten transport errors for the activity panel.
pub fn clean_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Reqwest(e) if e.is_timeout() => "Request timed out".to_string(),
        ApiError::Reqwest(e) if e.is_connect() => "Connection failed".to_string(),
        ApiError::Http { status, .. } => format!("HTTP {}", status),
        other => other.to_string(),
    }
}
