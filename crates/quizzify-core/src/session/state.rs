//! Authentication state: token, current profile and account list.

use crate::session::model::{Account, AuthUserInfo, UserProfile};
use crate::versioned::Versioned;

/// State owned by the auth module.
///
/// An empty token means logged out. The struct itself only exposes reads;
/// the `set_*`/`commit_*` methods are the mutation entry points used by the
/// auth module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    token: String,
    user_profile: Versioned<Option<UserProfile>>,
    accounts: Versioned<Vec<Account>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================================================
    // Getters
    // ============================================================================

    pub fn is_logged_in(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user_profile(&self) -> Option<&UserProfile> {
        self.user_profile.get().as_ref()
    }

    pub fn accounts(&self) -> &[Account] {
        self.accounts.get()
    }

    /// Identity for the custom auth header, if a usable profile is loaded.
    pub fn auth_user_info(&self) -> Option<AuthUserInfo> {
        self.user_profile().and_then(UserProfile::auth_user_info)
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = token.into();
    }

    pub fn commit_user_profile(&mut self, version: u64, profile: Option<UserProfile>) -> bool {
        self.user_profile.commit(version, profile)
    }

    pub fn commit_accounts(&mut self, version: u64, accounts: Vec<Account>) -> bool {
        self.accounts.commit(version, accounts)
    }

    /// Clears token and profile. `profile_version` must be freshly issued so
    /// that profile responses requested before the clear are discarded.
    pub fn clear_session(&mut self, profile_version: u64) {
        self.token.clear();
        self.user_profile.commit(profile_version, None);
    }
}
