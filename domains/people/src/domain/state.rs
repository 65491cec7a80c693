//! Leave request state machine
//!
//! Approval decisions are made by the server; the console uses this to decide
//! which actions a leave request still offers.

use hrdesk_common::StateError;

use super::entities::LeaveStatus;

impl LeaveStatus {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Cancelled)
    }

    /// Get all valid next states from current state
    pub fn valid_transitions(&self) -> &'static [LeaveStatus] {
        match self {
            Self::Pending => &[Self::Approved, Self::Rejected, Self::Cancelled],
            Self::Approved => &[Self::Cancelled],
            Self::Rejected => &[],
            Self::Cancelled => &[],
        }
    }
}

/// Events that trigger leave request transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaveEvent {
    /// Administrator approves the request
    Approve,
    /// Administrator rejects the request
    Reject,
    /// Requester (or an administrator) withdraws the request
    Cancel,
}

impl std::fmt::Display for LeaveEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approve => write!(f, "approve"),
            Self::Reject => write!(f, "reject"),
            Self::Cancel => write!(f, "cancel"),
        }
    }
}

/// Leave request state machine
pub struct LeaveStateMachine;

impl LeaveStateMachine {
    /// Attempt a state transition
    ///
    /// Returns the new status if the transition is valid, or an error otherwise.
    pub fn transition(current: LeaveStatus, event: &LeaveEvent) -> Result<LeaveStatus, StateError> {
        let next = match (current, event) {
            // From Pending
            (LeaveStatus::Pending, LeaveEvent::Approve) => LeaveStatus::Approved,
            (LeaveStatus::Pending, LeaveEvent::Reject) => LeaveStatus::Rejected,
            (LeaveStatus::Pending, LeaveEvent::Cancel) => LeaveStatus::Cancelled,

            // From Approved
            (LeaveStatus::Approved, LeaveEvent::Cancel) => LeaveStatus::Cancelled,

            _ => {
                return Err(StateError::InvalidTransition {
                    from: current.to_string(),
                    event: event.to_string(),
                });
            }
        };

        Ok(next)
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(current: LeaveStatus, event: &LeaveEvent) -> bool {
        Self::transition(current, event).is_ok()
    }

    /// Events still available from `current`
    pub fn available_events(current: LeaveStatus) -> Vec<LeaveEvent> {
        [LeaveEvent::Approve, LeaveEvent::Reject, LeaveEvent::Cancel]
            .into_iter()
            .filter(|event| Self::can_transition(current, event))
            .collect()
    }
}
