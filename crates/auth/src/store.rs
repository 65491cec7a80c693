//! Credential storage collaborators
//!
//! The session reads, persists and clears the raw credential through
//! [`CredentialStore`]; how and where it is kept is up to the embedder.

use std::sync::{Arc, Mutex, PoisonError};

use axum::http::HeaderValue;

use crate::error::AuthError;
use crate::jwt::extract_bearer_token;

/// Persistence of the raw bearer credential (e.g. for reload survival)
pub trait CredentialStore {
    fn get_stored_credential(&self) -> Option<String>;
    fn store_credential(&self, credential: &str);
    fn clear_stored_credential(&self);
}

/// In-memory store. Clones share the same slot.
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a credential
    pub fn with_credential(credential: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(credential.into()))),
        }
    }
}

impl std::fmt::Debug for MemoryCredentialStore {
    #[mutants::skip] // Debug output only; never prints the credential
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let present = self
            .slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some();
        f.debug_struct("MemoryCredentialStore")
            .field("credential_present", &present)
            .finish()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get_stored_credential(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store_credential(&self, credential: &str) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(credential.to_string());
    }

    fn clear_stored_credential(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Read-only store backed by a request's `Authorization: Bearer` header,
/// for server-rendered pages where the browser presents the credential on
/// each request. Storing and clearing are no-ops.
#[derive(Debug, Clone, Default)]
pub struct HeaderCredentialStore {
    credential: Option<String>,
}

impl HeaderCredentialStore {
    /// A missing header yields an empty store; a malformed one is an error.
    pub fn from_header(header: Option<&HeaderValue>) -> Result<Self, AuthError> {
        let credential = header.map(extract_bearer_token).transpose()?;
        Ok(Self { credential })
    }
}

impl CredentialStore for HeaderCredentialStore {
    fn get_stored_credential(&self) -> Option<String> {
        self.credential.clone()
    }

    fn store_credential(&self, _credential: &str) {}

    fn clear_stored_credential(&self) {}
}
