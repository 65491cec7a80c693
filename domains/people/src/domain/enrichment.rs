//! Client-side joins between separately fetched records
//!
//! The REST API returns flat records with foreign-key ids. These joins attach
//! display names; a reference that does not resolve leaves the name empty.

use std::collections::HashMap;

use serde::Serialize;

use super::entities::{Department, Employee, JobTitle, LeaveRequest, Payroll};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeView {
    #[serde(flatten)]
    pub employee: Employee,
    pub department_name: Option<String>,
    pub job_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollView {
    #[serde(flatten)]
    pub payroll: Payroll,
    pub employee_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequestView {
    #[serde(flatten)]
    pub request: LeaveRequest,
    pub employee_name: Option<String>,
    pub days: i64,
}

fn index_by<'a, T, F>(items: &'a [T], key: F) -> HashMap<&'a str, &'a T>
where
    F: Fn(&'a T) -> &'a str,
{
    items.iter().map(|item| (key(item), item)).collect()
}

fn lookup<'a, T>(index: &HashMap<&str, &'a T>, id: Option<&str>) -> Option<&'a T> {
    id.and_then(|id| index.get(id).copied())
}

pub fn enrich_employees(
    employees: Vec<Employee>,
    departments: &[Department],
    job_titles: &[JobTitle],
) -> Vec<EmployeeView> {
    let departments = index_by(departments, |d| d.id.as_str());
    let job_titles = index_by(job_titles, |t| t.id.as_str());

    employees
        .into_iter()
        .map(|employee| {
            let department_name = lookup(&departments, employee.department_id.as_deref())
                .map(|d| d.name.clone());
            let job_title = lookup(&job_titles, employee.job_title_id.as_deref())
                .map(|t| t.title.clone());
            EmployeeView {
                employee,
                department_name,
                job_title,
            }
        })
        .collect()
}

pub fn enrich_payrolls(payrolls: Vec<Payroll>, employees: &[Employee]) -> Vec<PayrollView> {
    let employees = index_by(employees, |e| e.id.as_str());

    payrolls
        .into_iter()
        .map(|payroll| {
            let employee_name =
                lookup(&employees, Some(payroll.employee_id.as_str())).map(Employee::full_name);
            PayrollView {
                payroll,
                employee_name,
            }
        })
        .collect()
}

pub fn enrich_leave_requests(
    requests: Vec<LeaveRequest>,
    employees: &[Employee],
) -> Vec<LeaveRequestView> {
    let employees = index_by(employees, |e| e.id.as_str());

    requests
        .into_iter()
        .map(|request| {
            let employee_name =
                lookup(&employees, Some(request.employee_id.as_str())).map(Employee::full_name);
            let days = request.days();
            LeaveRequestView {
                request,
                employee_name,
                days,
            }
        })
        .collect()
}
