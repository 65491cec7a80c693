//! People domain: HR records fetched from the REST API, ownership scoping of
//! those records, and the client-side joins that stitch them together

pub mod domain;

// Re-export domain types at the crate root for convenience
pub use domain::enrichment::{
    enrich_employees, enrich_leave_requests, enrich_payrolls, EmployeeView, LeaveRequestView,
    PayrollView,
};
pub use domain::entities::*;
pub use domain::scoping::{can_act_on, scoped, OwnedRecord};
pub use domain::state::{LeaveEvent, LeaveStateMachine};
