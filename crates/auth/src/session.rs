//! Session lifecycle
//!
//! A session starts `Unresolved`, resolves exactly once into
//! `Authenticated` or `Unauthenticated`, and afterwards only moves between
//! those two. Decode and expiry failures are absorbed here and become
//! `Unauthenticated`; they never reach rendering code as errors.

use async_trait::async_trait;
use hrdesk_common::StateError;

use crate::claims::Claims;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::guard::{GuardDecision, RouteGuard};
use crate::jwt::{decode_credential, ensure_not_expired, is_expired};
use crate::store::CredentialStore;

// ============================================================================
// Session State Machine
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    /// Initial: still determining whether a credential exists
    Unresolved,
    Authenticated,
    Unauthenticated,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unresolved => write!(f, "unresolved"),
            Self::Authenticated => write!(f, "authenticated"),
            Self::Unauthenticated => write!(f, "unauthenticated"),
        }
    }
}

/// Events that trigger session transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Stored credential found, decoded and not expired
    Resolved(Claims),
    /// No stored credential, or it was malformed, expired or rejected
    ResolutionFailed,
    /// External login flow produced fresh claims
    LoggedIn(Claims),
    LoggedOut,
    /// An access check found the current claims past expiry
    Expired,
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolved(_) => write!(f, "resolved"),
            Self::ResolutionFailed => write!(f, "resolution_failed"),
            Self::LoggedIn(_) => write!(f, "logged_in"),
            Self::LoggedOut => write!(f, "logged_out"),
            Self::Expired => write!(f, "expired"),
        }
    }
}

/// Session state machine
pub struct SessionStateMachine;

impl SessionStateMachine {
    /// Attempt a state transition
    ///
    /// Returns the new phase if the transition is valid, or an error otherwise.
    /// No transition leads back to `Unresolved`.
    pub fn transition(
        current: SessionPhase,
        event: &SessionEvent,
    ) -> Result<SessionPhase, StateError> {
        let next = match (current, event) {
            (SessionPhase::Unresolved, SessionEvent::Resolved(_)) => SessionPhase::Authenticated,
            (SessionPhase::Unresolved, SessionEvent::ResolutionFailed) => {
                SessionPhase::Unauthenticated
            }

            // Login is absorbed from any phase; a late resolution is then rejected
            (_, SessionEvent::LoggedIn(_)) => SessionPhase::Authenticated,

            (_, SessionEvent::LoggedOut) => SessionPhase::Unauthenticated,

            (SessionPhase::Authenticated, SessionEvent::Expired) => SessionPhase::Unauthenticated,

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
    pub fn can_transition(current: SessionPhase, event: &SessionEvent) -> bool {
        Self::transition(current, event).is_ok()
    }
}

// ============================================================================
// Session State
// ============================================================================

/// Authentication state for one application instance.
///
/// Owned by the application root and passed to consumers by reference;
/// construct a fresh one per test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    phase: SessionPhase,
    claims: Option<Claims>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Unresolved,
            claims: None,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// True only before the first resolution
    pub fn is_loading(&self) -> bool {
        self.phase == SessionPhase::Unresolved
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == SessionPhase::Authenticated
    }

    /// Present iff authenticated
    pub fn current_claims(&self) -> Option<&Claims> {
        self.claims.as_ref()
    }

    /// Apply an event. On error the state is left untouched.
    pub fn apply(&mut self, event: SessionEvent) -> Result<SessionPhase, StateError> {
        let next = SessionStateMachine::transition(self.phase, &event)?;

        self.claims = match event {
            SessionEvent::Resolved(claims) | SessionEvent::LoggedIn(claims) => Some(claims),
            SessionEvent::ResolutionFailed | SessionEvent::LoggedOut | SessionEvent::Expired => {
                None
            }
        };
        self.phase = next;

        Ok(next)
    }
}

// ============================================================================
// Auth Session
// ============================================================================

/// Optional network confirmation of a stored credential (e.g. a `/me` call).
///
/// Any error, including a timeout from the network layer, counts as a
/// resolution failure.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, credential: &str, claims: &Claims) -> Result<(), AuthError>;
}

/// Session state bound to its credential store and access settings.
///
/// Driven through `&mut self`, so at most one resolution or login is in
/// flight at a time.
pub struct AuthSession<S> {
    state: SessionState,
    store: S,
    config: AuthConfig,
}

impl<S: CredentialStore> AuthSession<S> {
    pub fn new(store: S, config: AuthConfig) -> Self {
        Self {
            state: SessionState::new(),
            store,
            config,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load_stored(&self, now: i64) -> Result<(String, Claims), AuthError> {
        let credential = self
            .store
            .get_stored_credential()
            .ok_or(AuthError::MissingCredential)?;
        let claims = decode_credential(&credential)?;
        ensure_not_expired(&claims, now)?;
        Ok((credential, claims))
    }

    /// Resolve the session from the stored credential.
    pub fn resolve(&mut self, now: i64) -> &SessionState {
        let outcome = self.load_stored(now).map(|(_, claims)| claims);
        self.finish_resolution(outcome)
    }

    /// Resolve the session, confirming the stored credential through `verifier`.
    ///
    /// Nothing is applied until the verifier completes: dropping this future
    /// (e.g. the view driving it was torn down) leaves the session untouched.
    pub async fn resolve_with<V>(&mut self, verifier: &V, now: i64) -> &SessionState
    where
        V: CredentialVerifier + ?Sized,
    {
        let outcome = match self.load_stored(now) {
            Ok((credential, claims)) => {
                let verified = verifier.verify(&credential, &claims).await;
                verified.map(|()| claims)
            }
            Err(e) => Err(e),
        };
        self.finish_resolution(outcome)
    }

    fn finish_resolution(&mut self, outcome: Result<Claims, AuthError>) -> &SessionState {
        let event = match outcome {
            Ok(claims) => {
                tracing::info!(subject_id = %claims.subject_id(), "Session resolved");
                SessionEvent::Resolved(claims)
            }
            Err(e) => {
                match &e {
                    AuthError::MissingCredential => {
                        tracing::debug!("No stored credential, session unauthenticated");
                    }
                    AuthError::VerificationFailed(_) => {
                        tracing::warn!(error = %e, "Credential verification failed");
                    }
                    _ => {
                        tracing::info!(error = %e, "Discarding unusable stored credential");
                        self.store.clear_stored_credential();
                    }
                }
                SessionEvent::ResolutionFailed
            }
        };

        if let Err(e) = self.state.apply(event) {
            tracing::warn!(error = %e, "Ignoring late session resolution");
        }
        &self.state
    }

    /// Absorb a credential produced by the external login exchange.
    ///
    /// On failure the session is left as it was.
    pub fn login(&mut self, credential: &str, now: i64) -> Result<(), AuthError> {
        let claims = decode_credential(credential)?;
        ensure_not_expired(&claims, now)?;

        self.store.store_credential(credential.trim());
        self.on_authenticated(claims)
    }

    /// Absorb claims from an external login flow that persisted the
    /// credential itself.
    pub fn on_authenticated(&mut self, claims: Claims) -> Result<(), AuthError> {
        let subject_id = claims.subject_id().to_string();
        self.state.apply(SessionEvent::LoggedIn(claims))?;
        tracing::info!(subject_id = %subject_id, "Session authenticated");
        Ok(())
    }

    /// Clear the stored credential and drop the claims.
    pub fn on_logged_out(&mut self) {
        self.store.clear_stored_credential();
        if let Err(e) = self.state.apply(SessionEvent::LoggedOut) {
            tracing::warn!(error = %e, "Ignoring logout");
            return;
        }
        tracing::info!("Session logged out");
    }

    /// Move to `Unauthenticated` if the current claims have expired.
    ///
    /// Returns true when the session was expired by this call.
    pub fn check_expiry(&mut self, now: i64) -> bool {
        let expired = self
            .state
            .current_claims()
            .is_some_and(|claims| is_expired(claims, now));
        if !expired {
            return false;
        }

        self.store.clear_stored_credential();
        match self.state.apply(SessionEvent::Expired) {
            Ok(_) => {
                tracing::info!("Session expired");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring expiry");
                false
            }
        }
    }

    /// Expiry check followed by the guard decision for `requested_path`.
    pub fn guard(&mut self, guard: &RouteGuard, requested_path: &str, now: i64) -> GuardDecision {
        self.check_expiry(now);
        guard.decide(&self.state, requested_path, &self.config)
    }
}

// ============================================================================
// Tests
// ============================================================================
