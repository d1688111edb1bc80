//! Shared handle to the auth state.
//!
//! The auth module writes through it; the resource module and the HTTP side
//! read it at call time to derive request headers.

use std::sync::{Arc, PoisonError, RwLock};

use quizzify_core::backend::AuthHeaders;
use quizzify_core::session::AuthState;
use quizzify_interaction::derive_auth_headers;

/// Cheap-to-clone handle to the single [`AuthState`] of a store.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<RwLock<AuthState>>,
}

impl SharedSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` against the current state.
    pub fn read<R>(&self, f: impl FnOnce(&AuthState) -> R) -> R {
        let state = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut AuthState) -> R) -> R {
        let mut state = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> AuthState {
        self.read(AuthState::clone)
    }

    /// Headers for an authorized request issued right now.
    pub fn auth_headers(&self) -> AuthHeaders {
        self.read(derive_auth_headers)
    }
}
