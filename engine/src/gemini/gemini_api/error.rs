use serde::Deserialize;
use thiserror::Error;

/// Errors returned by the Gemini (Generative Language) API
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeminiApiError {
    #[error("Invalid argument (400): {message}")]
    InvalidArgument { message: String },

    #[error("Unauthenticated (401): {message}")]
    Unauthenticated { message: String },

    #[error("Permission denied (403): {message}")]
    PermissionDenied { message: String },

    #[error("Not found (404): {message}")]
    NotFound { message: String },

    #[error("Quota or rate limit exhausted (429): {message}")]
    ResourceExhausted { message: String },

    #[error("Internal API error (500): {message}")]
    Internal { message: String },

    #[error("Service unavailable (503): {message}")]
    Unavailable { message: String },

    #[error("Deadline exceeded (504): {message}")]
    DeadlineExceeded { message: String },

    /// Catch-all for statuses we don't map, and for bodies that aren't the
    /// usual error envelope
    #[error("Unexpected API error ({code} {status}): {message}")]
    Unexpected {
        code: u16,
        status: String,
        message: String,
    },
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<u16>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

impl GeminiApiError {
    pub fn from_status(status: &str, code: u16, message: impl Into<String>) -> Self {
        let message = message.into();

        match status {
            "INVALID_ARGUMENT" | "FAILED_PRECONDITION" => Self::InvalidArgument { message },
            "UNAUTHENTICATED" => Self::Unauthenticated { message },
            "PERMISSION_DENIED" => Self::PermissionDenied { message },
            "NOT_FOUND" => Self::NotFound { message },
            "RESOURCE_EXHAUSTED" => Self::ResourceExhausted { message },
            "INTERNAL" => Self::Internal { message },
            "UNAVAILABLE" => Self::Unavailable { message },
            "DEADLINE_EXCEEDED" => Self::DeadlineExceeded { message },
            other => Self::Unexpected {
                code,
                status: other.to_string(),
                message,
            },
        }
    }

    /// Builds the error from an HTTP status code and the raw response body.
    pub fn from_response(http_code: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(ErrorEnvelope { error }) => {
                let code = error.code.unwrap_or(http_code);
                let status = error
                    .status
                    .unwrap_or_else(|| status_for_code(code).to_string());
                Self::from_status(&status, code, error.message)
            }
            Err(_) => Self::from_status(status_for_code(http_code), http_code, body),
        }
    }
}

fn status_for_code(code: u16) -> &'static str {
    match code {
        400 => "INVALID_ARGUMENT",
        401 => "UNAUTHENTICATED",
        403 => "PERMISSION_DENIED",
        404 => "NOT_FOUND",
        429 => "RESOURCE_EXHAUSTED",
        500 => "INTERNAL",
        503 => "UNAVAILABLE",
        504 => "DEADLINE_EXCEEDED",
        _ => "UNKNOWN",
    }
}
