//! Error handling

use axum::response::IntoResponse;
use tracing::info;

use crate::constants::REDACTED;

/// Everything that can stop a mandala from being generated.
///
/// Each variant carries the text shown to the user; the variant only matters
/// for logging and tests, the page shows a single banner regardless.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationError {
    /// A required field was missing, nothing was sent anywhere.
    Validation {
        /// Form field that failed
        field: &'static str,
        /// Message for the user
        message: &'static str,
    },
    /// The provider rejected the credential
    Authentication(String),
    /// The provider's safety system refused the prompt
    ContentPolicy(String),
    /// Couldn't reach the provider, or couldn't download the image
    Network(String),
    /// The provider answered with something we can't use
    Provider(String),
    /// The downloaded bytes weren't an image
    Decode(String),
    /// The decoded image couldn't be turned into a PNG download
    Encode(String),
}

impl GenerationError {
    /// Short name of the error kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Authentication(_) => "authentication",
            Self::ContentPolicy(_) => "content_policy",
            Self::Network(_) => "network",
            Self::Provider(_) => "provider",
            Self::Decode(_) => "decode",
            Self::Encode(_) => "encode",
        }
    }

    /// Text for the error banner.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => (*message).to_string(),
            other => format!("Error generating image: {other}"),
        }
    }

    /// Scrubs the credential out of any message the provider echoed back.
    pub fn redact(self, secret: &str) -> Self {
        let scrub = |message: String| {
            if secret.is_empty() {
                message
            } else {
                message.replace(secret, REDACTED)
            }
        };
        match self {
            Self::Authentication(msg) => Self::Authentication(scrub(msg)),
            Self::ContentPolicy(msg) => Self::ContentPolicy(scrub(msg)),
            Self::Network(msg) => Self::Network(scrub(msg)),
            Self::Provider(msg) => Self::Provider(scrub(msg)),
            Self::Decode(msg) => Self::Decode(scrub(msg)),
            Self::Encode(msg) => Self::Encode(scrub(msg)),
            validation @ Self::Validation { .. } => validation,
        }
    }
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { message, .. } => f.write_str(message),
            Self::Authentication(msg) => write!(f, "Authentication failed: {msg}"),
            Self::ContentPolicy(msg) => write!(f, "Prompt rejected by content policy: {msg}"),
            Self::Network(msg) => write!(f, "Network error: {msg}"),
            Self::Provider(msg) => write!(f, "Provider error: {msg}"),
            Self::Decode(msg) => write!(f, "Could not decode image: {msg}"),
            Self::Encode(msg) => write!(f, "Could not encode image: {msg}"),
        }
    }
}

impl std::error::Error for GenerationError {}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest errors carry the URL, not headers
        GenerationError::Network(err.to_string())
    }
}

impl From<image::ImageError> for GenerationError {
    fn from(err: image::ImageError) -> Self {
        GenerationError::Decode(err.to_string())
    }
}

/// Errors from the web layer
#[derive(Debug)]
pub enum MandalaError {
    /// When you didn't do the right thing
    BadRequest,
    /// Missing or invalid session/CSRF token
    Unauthorized,
    /// When an internal server error occurs
    InternalServerError(String),
}

impl From<tower_sessions::session::Error> for MandalaError {
    fn from(err: tower_sessions::session::Error) -> Self {
        MandalaError::InternalServerError(err.to_string())
    }
}

impl IntoResponse for MandalaError {
    fn into_response(self) -> axum::response::Response {
        match self {
            MandalaError::BadRequest => {
                info!("Bad request received");
                let mut response =
                    axum::response::Response::new(axum::body::Body::from("Bad Request"));
                *response.status_mut() = axum::http::StatusCode::BAD_REQUEST;
                response
            }
            MandalaError::Unauthorized => {
                info!("Unauthorized request received");
                let mut response = axum::response::Response::new(axum::body::Body::from(
                    "Unauthorized: invalid or missing session.",
                ));
                *response.status_mut() = axum::http::StatusCode::UNAUTHORIZED;
                response
            }
            MandalaError::InternalServerError(message) => {
                tracing::error!("Internal server error: {}", message);
                let mut response =
                    axum::response::Response::new(axum::body::Body::from("Internal server error"));
                *response.status_mut() = axum::http::StatusCode::INTERNAL_SERVER_ERROR;
                response
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_scrubs_secret() {
        let err = GenerationError::Authentication(
            "Incorrect API key provided: sk-secret-123".to_string(),
        )
        .redact("sk-secret-123");
        assert_eq!(
            err,
            GenerationError::Authentication("Incorrect API key provided: [redacted]".to_string())
        );
        assert!(!err.user_message().contains("sk-secret-123"));
    }

    #[test]
    fn validation_message_is_shown_as_is() {
        let err = GenerationError::Validation {
            field: "theme",
            message: "Please enter a main theme or inspiration for your mandala.",
        };
        assert_eq!(
            err.user_message(),
            "Please enter a main theme or inspiration for your mandala."
        );
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn pipeline_errors_get_prefixed() {
        let err = GenerationError::Network("connection refused".to_string());
        assert_eq!(
            err.user_message(),
            "Error generating image: Network error: connection refused"
        );
    }

    #[test]
    fn web_errors_map_to_status() {
        assert_eq!(
            MandalaError::Unauthorized.into_response().status(),
            axum::http::StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            MandalaError::BadRequest.into_response().status(),
            axum::http::StatusCode::BAD_REQUEST
        );
    }
}
