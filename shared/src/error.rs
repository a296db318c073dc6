use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Uniform failure signal for every backend call
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ApiError {
    /// The request never completed (network down, CORS, aborted)
    #[error("Network error: {0}")]
    Transport(String),

    /// Non-2xx response other than 404
    #[error("Server error {status}: {message}")]
    Http { status: u16, message: String },

    /// REST 404 or a GraphQL lookup that found nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// The GraphQL response carried an `errors` list
    #[error("{}", .0.join(", "))]
    GraphQl(Vec<String>),

    /// The response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Map a failed HTTP status and its body text to an error
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = body.trim();
        let message = if message.is_empty() {
            default_status_message(status).to_string()
        } else {
            message.to_string()
        };

        if status == 404 {
            ApiError::NotFound(message)
        } else {
            ApiError::Http { status, message }
        }
    }

    /// Numeric HTTP status, when one is known
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::NotFound(_) => Some(404),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

fn default_status_message(status: u16) -> &'static str {
    match status {
        400 => "Invalid request. Please check your input.",
        401 => "Not authorized. Please sign in.",
        403 => "Access denied.",
        404 => "Resource not found.",
        409 => "Conflicts with an existing entry.",
        422 => "Validation failed. Please check your input.",
        500..=599 => "Server error. Please try again later.",
        _ => "Unknown error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_maps_404_to_not_found() {
        let error = ApiError::from_status(404, "Could not find todo t1");
        assert!(error.is_not_found());
        assert_eq!(error.status(), Some(404));
        assert_eq!(error.to_string(), "Not found: Could not find todo t1");
    }

    #[test]
    fn test_from_status_keeps_code() {
        let error = ApiError::from_status(500, "");
        assert_eq!(error.status(), Some(500));
        assert!(!error.is_not_found());
        assert_eq!(
            error,
            ApiError::Http {
                status: 500,
                message: "Server error. Please try again later.".to_string()
            }
        );
    }

    #[test]
    fn test_graphql_message_joins() {
        let error = ApiError::GraphQl(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(error.to_string(), "a, b");
        assert_eq!(error.status(), None);
    }
}
