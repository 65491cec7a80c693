//! Ownership scoping: the administrative role sees everything, the owning
//! principal sees only its own records, everyone else sees nothing.
//!
//! One rule serves every owned record kind (attendance, leave, allowance,
//! deduction, payroll, the employee record itself). Callers must not
//! re-derive it per kind.

use std::sync::LazyLock;

use crate::roles::{normalize_role, RoleSet};
use crate::types::Operation;

static DEFAULT_POLICY: LazyLock<AccessPolicy> = LazyLock::new(AccessPolicy::default);

/// Names of the administrative and owning-principal roles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    admin_role: String,
    owner_role: String,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new("ADMIN", "EMPLOYEE")
    }
}

impl AccessPolicy {
    /// Role names are normalised; blank names fall back to the defaults.
    pub fn new(admin_role: &str, owner_role: &str) -> Self {
        Self {
            admin_role: normalize_role(admin_role).unwrap_or_else(|| "ADMIN".to_string()),
            owner_role: normalize_role(owner_role).unwrap_or_else(|| "EMPLOYEE".to_string()),
        }
    }

    pub fn admin_role(&self) -> &str {
        &self.admin_role
    }

    pub fn owner_role(&self) -> &str {
        &self.owner_role
    }

    pub fn is_admin(&self, acting_roles: &RoleSet) -> bool {
        acting_roles.contains(&self.admin_role)
    }

    pub fn is_owning_principal(&self, acting_roles: &RoleSet) -> bool {
        acting_roles.contains(&self.owner_role)
    }

    /// Admin → allowed; owner role and `acting_subject_id == resource_owner_id` →
    /// allowed; otherwise denied.
    pub fn can_access_owned_resource(
        &self,
        resource_owner_id: Option<&str>,
        acting_roles: &RoleSet,
        acting_subject_id: Option<&str>,
    ) -> bool {
        if self.is_admin(acting_roles) {
            return true;
        }
        self.is_owning_principal(acting_roles) && same_principal(resource_owner_id, acting_subject_id)
    }

    /// Restrict `items` to what the acting principal may see.
    ///
    /// Admin gets `items` back untouched. The owner role gets the
    /// order-preserving subsequence it owns. Any other role gets nothing.
    pub fn filter_owned_collection<T, F>(
        &self,
        items: Vec<T>,
        acting_roles: &RoleSet,
        acting_subject_id: Option<&str>,
        owner_id_of: F,
    ) -> Vec<T>
    where
        F: Fn(&T) -> Option<&str>,
    {
        if self.is_admin(acting_roles) {
            return items;
        }
        if !self.is_owning_principal(acting_roles) {
            return Vec::new();
        }
        items
            .into_iter()
            .filter(|item| same_principal(owner_id_of(item), acting_subject_id))
            .collect()
    }

    /// Admin may do anything. The owner role may read and update its own
    /// record and may never create or delete. Any other role may do nothing.
    pub fn can_perform_operation(
        &self,
        operation: Operation,
        acting_roles: &RoleSet,
        target_owner_id: Option<&str>,
        acting_subject_id: Option<&str>,
    ) -> bool {
        if self.is_admin(acting_roles) {
            return true;
        }
        if !self.is_owning_principal(acting_roles) {
            return false;
        }
        match operation {
            Operation::Read | Operation::Update => {
                same_principal(target_owner_id, acting_subject_id)
            }
            Operation::Create | Operation::Delete => false,
        }
    }
}

/// Absent or blank ids never match anything, including each other.
fn same_principal(owner_id: Option<&str>, subject_id: Option<&str>) -> bool {
    match (owner_id, subject_id) {
        (Some(owner), Some(subject)) => !owner.is_empty() && owner == subject,
        _ => false,
    }
}

/// [`AccessPolicy::can_access_owned_resource`] with the default roles
pub fn can_access_owned_resource(
    resource_owner_id: Option<&str>,
    acting_roles: &RoleSet,
    acting_subject_id: Option<&str>,
) -> bool {
    DEFAULT_POLICY.can_access_owned_resource(resource_owner_id, acting_roles, acting_subject_id)
}

/// [`AccessPolicy::filter_owned_collection`] with the default roles
pub fn filter_owned_collection<T, F>(
    items: Vec<T>,
    acting_roles: &RoleSet,
    acting_subject_id: Option<&str>,
    owner_id_of: F,
) -> Vec<T>
where
    F: Fn(&T) -> Option<&str>,
{
    DEFAULT_POLICY.filter_owned_collection(items, acting_roles, acting_subject_id, owner_id_of)
}

/// [`AccessPolicy::can_perform_operation`] with the default roles
pub fn can_perform_operation(
    operation: Operation,
    acting_roles: &RoleSet,
    target_owner_id: Option<&str>,
    acting_subject_id: Option<&str>,
) -> bool {
    DEFAULT_POLICY.can_perform_operation(operation, acting_roles, target_owner_id, acting_subject_id)
}
