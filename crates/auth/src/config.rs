//! Authentication configuration

use hrdesk_common::Config;

use crate::scoping::AccessPolicy;

/// Authentication configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Where unauthenticated navigation is redirected
    pub login_path: String,
    pub policy: AccessPolicy,
}

impl AuthConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            login_path: config.login_path.clone(),
            policy: AccessPolicy::new(&config.admin_role, &config.owner_role),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            policy: AccessPolicy::default(),
        }
    }
}
