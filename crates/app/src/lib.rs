//! HRDesk composition root
//!
//! Builds the access layer from environment configuration and hosts the
//! pieces of the `inspect` tool that are worth testing.

use hrdesk_auth::{AuthConfig, AuthError, AuthSession, CredentialStore, GuardDecision, RouteGuard};
use hrdesk_common::{Config, Error, Result};

/// Session wired to `store` with the access settings from `config`
pub fn create_session<S: CredentialStore>(config: &Config, store: S) -> AuthSession<S> {
    AuthSession::new(store, AuthConfig::from_config(config))
}

/// Command line of `inspect`: `<path> [--all] [ROLE...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectArgs {
    pub path: String,
    pub roles: Vec<String>,
    pub require_all: bool,
}

impl InspectArgs {
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut path = None;
        let mut roles = Vec::new();
        let mut require_all = false;

        for arg in args {
            match arg.as_str() {
                "--all" => require_all = true,
                flag if flag.starts_with("--") => {
                    return Err(Error::Validation(format!("Unknown flag '{}'", flag)));
                }
                _ if path.is_none() => {
                    if !arg.starts_with('/') {
                        return Err(Error::Validation(format!(
                            "Path must be absolute, got '{}'",
                            arg
                        )));
                    }
                    path = Some(arg);
                }
                _ => roles.push(arg),
            }
        }

        Ok(Self {
            path: path.unwrap_or_else(|| "/".to_string()),
            roles,
            require_all,
        })
    }

    pub fn guard(&self) -> RouteGuard {
        match (self.roles.is_empty(), self.require_all) {
            (true, _) => RouteGuard::authenticated(),
            (false, false) => RouteGuard::any_of(&self.roles[..]),
            (false, true) => RouteGuard::all_of(&self.roles[..]),
        }
    }
}

/// One-line report for a decision; a denial is an authorization error.
pub fn describe_decision(decision: GuardDecision, path: &str) -> Result<String> {
    match decision {
        GuardDecision::Allow => Ok(format!("allow {}", path)),
        GuardDecision::Loading => Ok("loading".to_string()),
        GuardDecision::Redirect { .. } => Ok(format!(
            "redirect {}",
            decision.location().unwrap_or_default()
        )),
        GuardDecision::Denied {
            required_roles,
            actual_roles,
        } => Err(AuthError::InsufficientRole {
            required: required_roles,
            actual: actual_roles,
        }
        .into()),
    }
}
