//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hrdesk_common::StateError;
use serde_json::json;

/// Authentication error
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("No credential available")]
    MissingCredential,

    #[error("Invalid authorization header format")]
    InvalidAuthorizationFormat,

    /// Wrong segment count, bad encoding, or a missing/ill-typed claim
    #[error("Malformed credential: {0}")]
    MalformedCredential(String),

    #[error("Credential expired at {expired_at}")]
    ExpiredCredential { expired_at: i64 },

    /// Authenticated, but the role requirement is not met
    #[error("Requires roles {required:?}, user has {actual:?}")]
    InsufficientRole {
        required: Vec<String>,
        actual: Vec<String>,
    },

    /// Network confirmation of a stored credential failed or timed out
    #[error("Credential verification failed: {0}")]
    VerificationFailed(String),

    #[error(transparent)]
    Session(#[from] StateError),
}

impl AuthError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AuthError::MissingCredential => (StatusCode::UNAUTHORIZED, "MISSING_CREDENTIAL"),
            AuthError::InvalidAuthorizationFormat => {
                (StatusCode::UNAUTHORIZED, "INVALID_AUTHORIZATION")
            }
            AuthError::MalformedCredential(_) => (StatusCode::UNAUTHORIZED, "MALFORMED_CREDENTIAL"),
            AuthError::ExpiredCredential { .. } => (StatusCode::UNAUTHORIZED, "EXPIRED_CREDENTIAL"),
            AuthError::InsufficientRole { .. } => (StatusCode::FORBIDDEN, "INSUFFICIENT_ROLE"),
            AuthError::VerificationFailed(_) => (StatusCode::UNAUTHORIZED, "VERIFICATION_FAILED"),
            AuthError::Session(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SESSION_ERROR"),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let mut error = json!({
            "code": code,
            "message": self.to_string(),
        });

        if let AuthError::InsufficientRole { required, actual } = &self {
            error["requiredRoles"] = json!(required);
            error["actualRoles"] = json!(actual);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

impl From<AuthError> for hrdesk_common::Error {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InsufficientRole { .. } => Self::Authorization(err.to_string()),
            AuthError::Session(e) => Self::State(e),
            _ => Self::Authentication(err.to_string()),
        }
    }
}
