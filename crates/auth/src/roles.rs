//! Role evaluation
//!
//! Roles are coarse labels (`ADMIN`, `EMPLOYEE`, ...) compared
//! case-insensitively. They are normalised once into a [`RoleSet`] and every
//! check below works on that canonical form.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Canonical form of a role label: trimmed and upper-cased.
///
/// Returns `None` for blank labels so they can never satisfy a requirement.
pub fn normalize_role(role: &str) -> Option<String> {
    let trimmed = role.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

/// Set of normalised role labels held by a principal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RoleSet(BTreeSet<String>);

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive membership check
    pub fn contains(&self, role: &str) -> bool {
        normalize_role(role).is_some_and(|r| self.0.contains(&r))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Roles in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for RoleSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        RoleSet(
            iter.into_iter()
                .filter_map(|r| normalize_role(r.as_ref()))
                .collect(),
        )
    }
}

impl From<Vec<String>> for RoleSet {
    fn from(roles: Vec<String>) -> Self {
        roles.into_iter().collect()
    }
}

impl From<RoleSet> for Vec<String> {
    fn from(roles: RoleSet) -> Self {
        roles.0.into_iter().collect()
    }
}

/// True iff at least one required role is held.
///
/// An empty requirement is `false`: "no restriction" is expressed by the
/// caller not asking, never by an empty list.
pub fn has_any_role<S: AsRef<str>>(acting_roles: &RoleSet, required_roles: &[S]) -> bool {
    required_roles
        .iter()
        .filter_map(|r| normalize_role(r.as_ref()))
        .any(|r| acting_roles.0.contains(&r))
}

/// True iff every required role is held. An empty requirement is `false`,
/// and so is any requirement naming a blank role (no principal holds one).
pub fn has_all_roles<S: AsRef<str>>(acting_roles: &RoleSet, required_roles: &[S]) -> bool {
    let required: Option<Vec<String>> = required_roles
        .iter()
        .map(|r| normalize_role(r.as_ref()))
        .collect();

    match required {
        Some(required) => {
            !required.is_empty() && required.iter().all(|r| acting_roles.0.contains(r))
        }
        None => false,
    }
}

/// Input to an access decision. Not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequest {
    /// Kept in the caller's order for denial messages
    pub required_roles: Vec<String>,
    /// AND when true, OR when false
    pub require_all: bool,
    pub acting_roles: RoleSet,
    pub resource_owner_id: Option<String>,
    pub acting_subject_id: Option<String>,
}

impl AccessRequest {
    /// Request satisfied by any one of `required_roles`
    pub fn any_of<S: AsRef<str>>(required_roles: &[S], acting_roles: RoleSet) -> Self {
        Self::build(required_roles, false, acting_roles)
    }

    /// Request satisfied only by all of `required_roles`
    pub fn all_of<S: AsRef<str>>(required_roles: &[S], acting_roles: RoleSet) -> Self {
        Self::build(required_roles, true, acting_roles)
    }

    fn build<S: AsRef<str>>(required_roles: &[S], require_all: bool, acting_roles: RoleSet) -> Self {
        Self {
            required_roles: required_roles
                .iter()
                .map(|r| r.as_ref().to_string())
                .collect(),
            require_all,
            acting_roles,
            resource_owner_id: None,
            acting_subject_id: None,
        }
    }

    /// Role requirement check
    pub fn satisfies(&self) -> bool {
        if self.require_all {
            has_all_roles(&self.acting_roles, &self.required_roles)
        } else {
            has_any_role(&self.acting_roles, &self.required_roles)
        }
    }

}
