//! Access layer for the HRDesk console
//!
//! Decodes the bearer credential handed over by the login flow, evaluates
//! role requirements, scopes owned HR records to the acting principal, keeps
//! the session lifecycle, and decides what a navigation target renders.
//!
//! # Security
//!
//! Credentials are decoded **without signature verification**. Every
//! decision made here is a UX convenience (hide what the user cannot use,
//! explain why a page is refused). It is never a security boundary: the REST
//! API re-validates the credential and enforces authorization on every
//! request. Do not use this crate to gate anything the server does not also
//! gate.

mod claims;
mod config;
mod error;
mod guard;
mod jwt;
mod roles;
mod scoping;
mod session;
mod store;
mod types;

pub use claims::Claims;
pub use config::AuthConfig;
pub use error::AuthError;
pub use guard::{return_to_target, GuardDecision, RouteGuard, RETURN_TO_PARAM};
pub use jwt::{decode_credential, extract_bearer_token, is_expired, unix_now};
pub use roles::{has_all_roles, has_any_role, normalize_role, AccessRequest, RoleSet};
pub use scoping::{
    can_access_owned_resource, can_perform_operation, filter_owned_collection, AccessPolicy,
};
pub use session::{
    AuthSession, CredentialVerifier, SessionEvent, SessionPhase, SessionState,
    SessionStateMachine,
};
pub use store::{CredentialStore, HeaderCredentialStore, MemoryCredentialStore};
pub use types::{Operation, ResourceKind};
