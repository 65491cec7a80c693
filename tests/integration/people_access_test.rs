//! People listing integration tests
//!
//! A resolved session scopes separately fetched HR records, then the
//! enrichment joins stitch them together for display.

#![allow(dead_code)]

mod common;

use hrdesk_auth::{AuthSession, MemoryCredentialStore, Operation};
use hrdesk_people::{
    can_act_on, enrich_employees, enrich_leave_requests, enrich_payrolls, scoped, Employee,
    LeaveEvent, LeaveStateMachine, LeaveStatus,
};

use crate::common::{
    allowance, departments, employee, job_titles, leave_request, mint_token, payroll,
    session_with, NOW,
};

fn resolved(subject: &str, roles: &[&str]) -> AuthSession<MemoryCredentialStore> {
    let (mut session, _) = session_with(Some(mint_token(subject, roles, 3600)));
    session.resolve(NOW);
    session
}

fn staff() -> Vec<Employee> {
    vec![
        employee("E1", "Ada", "Lovelace"),
        employee("E2", "Alan", "Turing"),
        employee("E3", "Grace", "Hopper"),
    ]
}

#[test_log::test]
fn test_admin_sees_enriched_directory() {
    let session = resolved("E9", &["ADMIN"]);
    let policy = &session.config().policy;

    let visible = scoped(staff(), session.state(), policy);
    let views = enrich_employees(visible, &departments(), &job_titles());

    assert_eq!(views.len(), 3);
    assert!(views
        .iter()
        .all(|v| v.department_name.as_deref() == Some("Operations")));
    assert!(views.iter().all(|v| v.job_title.as_deref() == Some("Analyst")));
}

#[test_log::test]
fn test_employee_sees_only_own_records() {
    let session = resolved("E2", &["EMPLOYEE"]);
    let policy = &session.config().policy;

    let employees = scoped(staff(), session.state(), policy);
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].id, "E2");

    let allowances = scoped(
        vec![
            allowance("A1", "E1", 100),
            allowance("A2", "E2", 200),
            allowance("A3", "E2", 300),
        ],
        session.state(),
        policy,
    );
    let ids: Vec<&str> = allowances.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["A2", "A3"]);

    let payrolls = scoped(
        vec![payroll("P1", "E1", 4000), payroll("P2", "E2", 4200)],
        session.state(),
        policy,
    );
    let views = enrich_payrolls(payrolls, &staff());
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].employee_name.as_deref(), Some("Alan Turing"));
}

#[test_log::test]
fn test_unrecognised_role_sees_nothing() {
    let session = resolved("E1", &["CONTRACTOR"]);
    let policy = &session.config().policy;

    assert!(scoped(staff(), session.state(), policy).is_empty());
    assert!(scoped(
        vec![leave_request("L1", "E1", LeaveStatus::Pending)],
        session.state(),
        policy
    )
    .is_empty());
}

#[test_log::test]
fn test_signed_out_session_sees_nothing() {
    let (mut session, _) = session_with(None);
    session.resolve(NOW);

    assert!(scoped(staff(), session.state(), &session.config().policy).is_empty());
}

#[test_log::test]
fn test_leave_actions_for_owner_and_admin() {
    let owner = resolved("E1", &["EMPLOYEE"]);
    let admin = resolved("E9", &["ADMIN"]);
    let policy = &owner.config().policy;

    let requests = vec![
        leave_request("L1", "E1", LeaveStatus::Pending),
        leave_request("L2", "E2", LeaveStatus::Approved),
    ];

    let mine = scoped(requests.clone(), owner.state(), policy);
    let views = enrich_leave_requests(mine, &staff());
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].days, 5);
    assert_eq!(views[0].employee_name.as_deref(), Some("Ada Lovelace"));

    let own = &requests[0];
    assert!(can_act_on(own, Operation::Update, owner.state(), policy));
    assert!(!can_act_on(own, Operation::Delete, owner.state(), policy));
    assert!(!can_act_on(&requests[1], Operation::Read, owner.state(), policy));
    assert!(can_act_on(&requests[1], Operation::Delete, admin.state(), policy));

    assert_eq!(
        LeaveStateMachine::transition(own.status, &LeaveEvent::Approve),
        Ok(LeaveStatus::Approved)
    );
    assert!(!LeaveStateMachine::can_transition(
        requests[1].status,
        &LeaveEvent::Reject
    ));
}
