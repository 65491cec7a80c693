//! Operation and resource kinds used by access decisions

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// CRUD operation a principal attempts on a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "create"),
            Operation::Read => write!(f, "read"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

impl FromStr for Operation {
    type Err = hrdesk_common::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "create" => Ok(Operation::Create),
            "read" => Ok(Operation::Read),
            "update" => Ok(Operation::Update),
            "delete" => Ok(Operation::Delete),
            other => Err(hrdesk_common::Error::Validation(format!(
                "Unknown operation '{}'",
                other
            ))),
        }
    }
}

/// Owned record kinds. All of them share one ownership rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Employee,
    Attendance,
    LeaveRequest,
    LeaveAllocation,
    Allowance,
    Deduction,
    Payroll,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Employee => write!(f, "employee"),
            ResourceKind::Attendance => write!(f, "attendance"),
            ResourceKind::LeaveRequest => write!(f, "leave_request"),
            ResourceKind::LeaveAllocation => write!(f, "leave_allocation"),
            ResourceKind::Allowance => write!(f, "allowance"),
            ResourceKind::Deduction => write!(f, "deduction"),
            ResourceKind::Payroll => write!(f, "payroll"),
        }
    }
}
