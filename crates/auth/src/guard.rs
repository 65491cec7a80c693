//! Route guard: what a navigation target renders for the current session

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::roles::AccessRequest;
use crate::session::{SessionPhase, SessionState};

/// Query parameter carrying the originally requested path to the login page
pub const RETURN_TO_PARAM: &str = "returnTo";

/// Outcome consumed by the view layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not resolved yet; render a neutral loading indicator
    Loading,
    /// Send the user to the login page, then back to `return_to`
    Redirect {
        login_path: String,
        return_to: String,
    },
    /// Authenticated but lacking the required roles
    Denied {
        required_roles: Vec<String>,
        actual_roles: Vec<String>,
    },
    Allow,
}

impl GuardDecision {
    /// Login URL with the return path attached, for `Redirect` decisions
    pub fn location(&self) -> Option<String> {
        match self {
            GuardDecision::Redirect {
                login_path,
                return_to,
            } => Some(format!(
                "{}?{}={}",
                login_path,
                RETURN_TO_PARAM,
                urlencoding::encode(return_to)
            )),
            _ => None,
        }
    }
}

impl IntoResponse for GuardDecision {
    fn into_response(self) -> Response {
        match self {
            GuardDecision::Loading => (
                StatusCode::ACCEPTED,
                Json(json!({ "status": "loading" })),
            )
                .into_response(),
            GuardDecision::Redirect { .. } => match self.location() {
                Some(location) => Redirect::to(&location).into_response(),
                None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            },
            GuardDecision::Denied {
                required_roles,
                actual_roles,
            } => AuthError::InsufficientRole {
                required: required_roles,
                actual: actual_roles,
            }
            .into_response(),
            GuardDecision::Allow => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// Role requirement for a navigation target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    required_roles: Vec<String>,
    require_all: bool,
}

impl RouteGuard {
    /// Any authenticated user may enter
    pub fn authenticated() -> Self {
        Self {
            required_roles: Vec::new(),
            require_all: false,
        }
    }

    pub fn any_of<S: AsRef<str>>(roles: &[S]) -> Self {
        Self {
            required_roles: roles.iter().map(|r| r.as_ref().to_string()).collect(),
            require_all: false,
        }
    }

    pub fn all_of<S: AsRef<str>>(roles: &[S]) -> Self {
        Self {
            required_roles: roles.iter().map(|r| r.as_ref().to_string()).collect(),
            require_all: true,
        }
    }

    pub fn required_roles(&self) -> &[String] {
        &self.required_roles
    }

    /// Decide what `requested_path` renders for `session`.
    pub fn decide(
        &self,
        session: &SessionState,
        requested_path: &str,
        config: &AuthConfig,
    ) -> GuardDecision {
        let claims = match (session.phase(), session.current_claims()) {
            (SessionPhase::Unresolved, _) => return GuardDecision::Loading,
            (SessionPhase::Authenticated, Some(claims)) => claims,
            _ => {
                return GuardDecision::Redirect {
                    login_path: config.login_path.clone(),
                    return_to: requested_path.to_string(),
                };
            }
        };

        if self.required_roles.is_empty() {
            return GuardDecision::Allow;
        }

        let request = AccessRequest {
            required_roles: self.required_roles.clone(),
            require_all: self.require_all,
            acting_roles: claims.roles().clone(),
            resource_owner_id: None,
            acting_subject_id: Some(claims.subject_id().to_string()),
        };

        if request.satisfies() {
            GuardDecision::Allow
        } else {
            tracing::debug!(
                subject_id = %claims.subject_id(),
                path = %requested_path,
                required = ?request.required_roles,
                "Route access denied"
            );
            GuardDecision::Denied {
                required_roles: request.required_roles,
                actual_roles: claims.roles().to_vec(),
            }
        }
    }
}

/// Post-login destination read from the login page's query string.
///
/// The value is form-decoded, so `+` reads as a space and `%2B` as `+`.
/// Only same-origin absolute paths are honoured; anything else (missing,
/// external URL, protocol-relative `//host`) falls back to `/`.
pub fn return_to_target(query: Option<&str>) -> String {
    query
        .into_iter()
        .flat_map(|q| q.trim_start_matches('?').split('&'))
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == RETURN_TO_PARAM)
        .and_then(|(_, value)| {
            urlencoding::decode(&value.replace('+', " "))
                .ok()
                .map(|path| path.into_owned())
        })
        .filter(|path| path.starts_with('/') && !path.starts_with("//") && !path.contains('\\'))
        .unwrap_or_else(|| "/".to_string())
}
