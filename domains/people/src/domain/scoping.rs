//! Scoping of people records to the current session
//!
//! Every owned record kind goes through the same [`AccessPolicy`] rule; this
//! module only says where each kind keeps its owner id.

use hrdesk_auth::{AccessPolicy, Operation, ResourceKind, SessionState};

use super::entities::{
    Allowance, Attendance, Deduction, Employee, LeaveAllocation, LeaveRequest, Payroll,
};

/// A record that belongs to one employee
pub trait OwnedRecord {
    const KIND: ResourceKind;

    /// Employee id of the owner, if the record carries one
    fn owner_id(&self) -> Option<&str>;
}

impl OwnedRecord for Employee {
    const KIND: ResourceKind = ResourceKind::Employee;

    fn owner_id(&self) -> Option<&str> {
        Some(&self.id)
    }
}

macro_rules! owned_by_employee_id {
    ($($record:ty => $kind:ident),* $(,)?) => {
        $(
            impl OwnedRecord for $record {
                const KIND: ResourceKind = ResourceKind::$kind;

                fn owner_id(&self) -> Option<&str> {
                    Some(&self.employee_id)
                }
            }
        )*
    };
}

owned_by_employee_id! {
    Attendance => Attendance,
    LeaveRequest => LeaveRequest,
    LeaveAllocation => LeaveAllocation,
    Allowance => Allowance,
    Deduction => Deduction,
    Payroll => Payroll,
}

/// Restrict a fetched collection to what the session may see.
///
/// A session without claims (loading or signed out) sees nothing.
pub fn scoped<T: OwnedRecord>(
    items: Vec<T>,
    session: &SessionState,
    policy: &AccessPolicy,
) -> Vec<T> {
    let Some(claims) = session.current_claims() else {
        return Vec::new();
    };

    let kind = T::KIND;
    let total = items.len();
    let visible = policy.filter_owned_collection(
        items,
        claims.roles(),
        Some(claims.subject_id()),
        T::owner_id,
    );

    tracing::debug!(
        kind = %kind,
        subject_id = %claims.subject_id(),
        total,
        visible = visible.len(),
        "Scoped collection"
    );

    visible
}

/// Whether the session may perform `operation` on `record`
pub fn can_act_on<T: OwnedRecord>(
    record: &T,
    operation: Operation,
    session: &SessionState,
    policy: &AccessPolicy,
) -> bool {
    session.current_claims().is_some_and(|claims| {
        policy.can_perform_operation(
            operation,
            claims.roles(),
            record.owner_id(),
            Some(claims.subject_id()),
        )
    })
}
