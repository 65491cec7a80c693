//! JWT claims types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::roles::RoleSet;

/// Identity decoded from a bearer credential.
///
/// Immutable once built: fields are private and only readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    subject_id: String,
    email: String,
    given_name: String,
    family_name: String,
    roles: RoleSet,
    issued_at: i64,
    expires_at: i64,
}

impl Claims {
    /// Build claims handed over by an external login flow
    pub fn new(
        subject_id: impl Into<String>,
        email: impl Into<String>,
        roles: RoleSet,
        issued_at: i64,
        expires_at: i64,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            email: email.into(),
            given_name: String::new(),
            family_name: String::new(),
            roles,
            issued_at,
            expires_at,
        }
    }

    /// Sets the name parts.
    pub fn with_name(mut self, given_name: impl Into<String>, family_name: impl Into<String>) -> Self {
        self.given_name = given_name.into();
        self.family_name = family_name.into();
        self
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn given_name(&self) -> &str {
        &self.given_name
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Display name, falling back to the email when no name parts were issued
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.given_name.trim(), self.family_name.trim());
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }

    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    /// Issued at (seconds since epoch)
    pub fn issued_at(&self) -> i64 {
        self.issued_at
    }

    /// Expires at (seconds since epoch)
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.expires_at, 0)
    }
}

/// Role claim as issued upstream: one label or a list of labels
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RoleClaim {
    Single(String),
    Many(Vec<String>),
}

impl From<RoleClaim> for RoleSet {
    fn from(claim: RoleClaim) -> Self {
        match claim {
            RoleClaim::Single(role) => std::iter::once(role).collect(),
            RoleClaim::Many(roles) => roles.into_iter().collect(),
        }
    }
}

/// Wire payload. Accepts both the registered JWT names and the
/// ASP.NET Identity claim URIs the HR API issues.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenPayload {
    #[serde(alias = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier")]
    sub: String,

    #[serde(alias = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress")]
    email: String,

    #[serde(
        default,
        alias = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/givenname"
    )]
    given_name: String,

    #[serde(
        default,
        alias = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/surname"
    )]
    family_name: String,

    #[serde(
        alias = "roles",
        alias = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role"
    )]
    role: RoleClaim,

    #[serde(default)]
    iat: i64,

    exp: i64,
}

impl From<TokenPayload> for Claims {
    fn from(payload: TokenPayload) -> Self {
        Claims::new(
            payload.sub,
            payload.email,
            payload.role.into(),
            payload.iat,
            payload.exp,
        )
        .with_name(payload.given_name, payload.family_name)
    }
}
