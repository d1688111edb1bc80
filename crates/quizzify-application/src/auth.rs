//! Auth state module.
//!
//! Owns the session token, the current profile and the account list. Actions
//! call the backend and commit results; getters are plain reads.

use std::sync::Arc;

use chrono::Utc;
use quizzify_core::backend::{LoginRequest, LoginResponse, QuizzifyBackend, RegisterRequest};
use quizzify_core::config::ClientConfig;
use quizzify_core::navigation::{Navigator, Route};
use quizzify_core::session::{Account, UserProfile};
use quizzify_core::token_store::TokenStore;
use quizzify_core::versioned::VersionCounter;
use quizzify_core::{QuizzifyError, Result};
use quizzify_interaction::bearer_headers;
use serde_json::Value;

use crate::session::SharedSession;

pub struct AuthModule {
    session: SharedSession,
    profile_versions: VersionCounter,
    accounts_versions: VersionCounter,
    backend: Arc<dyn QuizzifyBackend>,
    token_store: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    config: ClientConfig,
}

impl AuthModule {
    pub fn new(
        session: SharedSession,
        backend: Arc<dyn QuizzifyBackend>,
        token_store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
        config: ClientConfig,
    ) -> Self {
        Self {
            session,
            profile_versions: VersionCounter::new(),
            accounts_versions: VersionCounter::new(),
            backend,
            token_store,
            navigator,
            config,
        }
    }

    // ============================================================================
    // Getters
    // ============================================================================

    pub fn is_logged_in(&self) -> bool {
        self.session.read(|state| state.is_logged_in())
    }

    pub fn token(&self) -> String {
        self.session.read(|state| state.token().to_string())
    }

    pub fn user_profile(&self) -> Option<UserProfile> {
        self.session.read(|state| state.user_profile().cloned())
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.session.read(|state| state.accounts().to_vec())
    }

    // ============================================================================
    // Actions
    // ============================================================================

    /// Logs in and keeps the returned token in state and in the token store.
    ///
    /// On failure the current token is left as it was.
    pub async fn login(&self, login: &str, password: &str) -> Result<LoginResponse> {
        let request = LoginRequest {
            login: login.to_string(),
            password: password.to_string(),
            app_id: self.config.app_id,
        };
        let response = self.backend.login(&request).await?;

        self.commit_token(&response.token);
        tracing::debug!("login succeeded");
        Ok(response)
    }

    /// Registers a new account and navigates to the login route.
    ///
    /// Registration does not log the user in.
    pub async fn register(&self, login: &str, password: &str, email: &str) -> Result<Value> {
        let request = RegisterRequest {
            login: login.to_string(),
            password: password.to_string(),
            email: email.to_string(),
        };
        let response = self.backend.register(&request).await?;

        self.navigator.push(Route::Login);
        Ok(response)
    }

    /// Clears the session and the persisted token, then navigates to login.
    ///
    /// Makes no backend call. A profile fetch still in flight will not be
    /// committed afterwards.
    pub fn logout(&self) {
        let version = self.profile_versions.issue();
        self.session.write(|state| state.clear_session(version));

        if let Err(e) = self.token_store.remove() {
            tracing::warn!(error = %e, "failed to remove persisted token");
        }
        self.navigator.push(Route::Login);
    }

    /// Restores the session for `token`, or for the persisted token when
    /// `token` is `None` or empty.
    ///
    /// Fails with [`QuizzifyError::NoToken`] before any request when neither
    /// is available.
    pub async fn fetch_user_data(&self, token: Option<&str>) -> Result<UserProfile> {
        let token = match token.filter(|t| !t.is_empty()) {
            Some(token) => token.to_string(),
            None => self
                .token_store
                .load()?
                .filter(|t| !t.is_empty())
                .ok_or(QuizzifyError::NoToken)?,
        };
        self.commit_token(&token);

        let version = self.profile_versions.issue();
        let profile = self
            .backend
            .fetch_account(&token, &bearer_headers(&token))
            .await?;

        let committed = self
            .session
            .write(|state| state.commit_user_profile(version, Some(profile.clone())));
        if committed {
            tracing::debug!(user_id = profile.user_id, "committed user profile");
        } else {
            tracing::warn!(version, "discarding stale user profile response");
        }
        Ok(profile)
    }

    /// Fetches all accounts and replaces the cached list.
    pub async fn accounts_list(&self) -> Result<Vec<Account>> {
        let version = self.accounts_versions.issue();
        let headers = self.session.auth_headers();
        let accounts = self.backend.list_accounts(&headers).await?;

        let committed = self
            .session
            .write(|state| state.commit_accounts(version, accounts.clone()));
        if committed {
            tracing::debug!(count = accounts.len(), "committed accounts");
        } else {
            tracing::warn!(version, "discarding stale accounts response");
        }
        Ok(accounts)
    }

    /// Deletes an account. The cached list is not touched; re-fetch it.
    pub async fn delete_account(&self, id: i64) -> Result<Value> {
        let headers = self.session.auth_headers();
        self.backend.delete_account(id, &headers).await
    }

    fn commit_token(&self, token: &str) {
        self.session.write(|state| state.set_token(token));

        let expires_at = Utc::now() + self.config.token_ttl();
        if let Err(e) = self.token_store.save(token, expires_at) {
            tracing::warn!(error = %e, "failed to persist token");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockBackend, MockTokenStore, RecordingNavigator};
    use quizzify_core::session::PermissionLevel;
    use serde_json::json;
    use tokio::sync::oneshot;

    struct Fixture {
        backend: Arc<MockBackend>,
        token_store: Arc<MockTokenStore>,
        navigator: Arc<RecordingNavigator>,
        auth: AuthModule,
    }

    fn fixture_with(token_store: MockTokenStore) -> Fixture {
        let backend = Arc::new(MockBackend::new());
        let token_store = Arc::new(token_store);
        let navigator = Arc::new(RecordingNavigator::default());
        let auth = AuthModule::new(
            SharedSession::new(),
            backend.clone(),
            token_store.clone(),
            navigator.clone(),
            ClientConfig::default(),
        );
        Fixture {
            backend,
            token_store,
            navigator,
            auth,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(MockTokenStore::new())
    }

    #[tokio::test]
    async fn test_login_commits_and_persists_token() {
        let f = fixture();
        f.backend.respond("login", Ok(json!({"token": "T1"})));

        let response = f.auth.login("alice", "pw1").await.unwrap();
        assert_eq!(response.token, "T1");
        assert_eq!(f.auth.token(), "T1");
        assert!(f.auth.is_logged_in());

        let (stored, expires_at) = f.token_store.stored().unwrap();
        assert_eq!(stored, "T1");
        let ttl = expires_at - Utc::now();
        assert!(ttl > chrono::Duration::days(89) && ttl <= chrono::Duration::days(90));

        let calls = f.backend.calls();
        assert_eq!(
            calls[0].body,
            json!({"login": "alice", "password": "pw1", "app_id": 1})
        );
    }

    #[tokio::test]
    async fn test_login_failure_leaves_token_unchanged() {
        let f = fixture();
        f.backend.respond("login", Ok(json!({"token": "T1"})));
        f.auth.login("alice", "pw1").await.unwrap();

        f.backend
            .respond("login", Err(QuizzifyError::http(401, "invalid credentials")));
        let err = f.auth.login("alice", "wrong").await.unwrap_err();

        assert_eq!(err, QuizzifyError::http(401, "invalid credentials"));
        assert_eq!(f.auth.token(), "T1");
        assert_eq!(f.token_store.stored().unwrap().0, "T1");
    }

    #[tokio::test]
    async fn test_login_survives_token_store_failure() {
        let f = fixture_with(MockTokenStore::failing_writes());
        f.backend.respond("login", Ok(json!({"token": "T1"})));

        f.auth.login("alice", "pw1").await.unwrap();
        assert_eq!(f.auth.token(), "T1");
        assert!(f.token_store.stored().is_none());
    }

    #[tokio::test]
    async fn test_register_navigates_to_login_without_authenticating() {
        let f = fixture();
        f.backend.respond("register", Ok(json!({"id": 12})));

        let response = f.auth.register("bob", "pw2", "bob@example.com").await.unwrap();
        assert_eq!(response, json!({"id": 12}));
        assert!(!f.auth.is_logged_in());
        assert_eq!(f.navigator.routes(), vec![Route::Login]);
        assert!(f.token_store.stored().is_none());
    }

    #[tokio::test]
    async fn test_register_failure_does_not_navigate() {
        let f = fixture();
        f.backend
            .respond("register", Err(QuizzifyError::http(409, "login taken")));

        assert!(f.auth.register("bob", "pw2", "bob@example.com").await.is_err());
        assert!(f.navigator.routes().is_empty());
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let f = fixture();
        f.backend.respond("fetch_account", Ok(json!({"userId": 7, "permissions": [1]})));
        f.auth.fetch_user_data(Some("T1")).await.unwrap();
        assert!(f.auth.user_profile().is_some());

        f.auth.logout();

        assert!(!f.auth.is_logged_in());
        assert_eq!(f.auth.token(), "");
        assert!(f.auth.user_profile().is_none());
        assert!(f.token_store.stored().is_none());
        assert_eq!(f.navigator.routes(), vec![Route::Login]);
        assert_eq!(f.backend.call_names(), vec!["fetch_account"]);
    }

    #[test]
    fn test_logout_when_logged_out() {
        let f = fixture();
        f.auth.logout();
        assert!(!f.auth.is_logged_in());
        assert_eq!(f.navigator.routes(), vec![Route::Login]);
    }

    #[test]
    fn test_logout_tolerates_token_store_failure() {
        let f = fixture_with(MockTokenStore::failing_writes());
        f.auth.logout();
        assert_eq!(f.navigator.routes(), vec![Route::Login]);
    }

    #[tokio::test]
    async fn test_fetch_user_data_without_token_makes_no_call() {
        let f = fixture();

        let err = f.auth.fetch_user_data(None).await.unwrap_err();
        assert!(err.is_no_token());
        assert_eq!(f.token_store.loads(), 1);
        assert!(f.backend.calls().is_empty());
        assert!(!f.auth.is_logged_in());
    }

    #[tokio::test]
    async fn test_fetch_user_data_restores_persisted_token() {
        let f = fixture_with(MockTokenStore::with_token("T9"));
        f.backend
            .respond("fetch_account", Ok(json!({"userId": "7", "permissions": [1, 3]})));

        let profile = f.auth.fetch_user_data(Some("")).await.unwrap();
        assert_eq!(profile.user_id, 7);
        assert!(profile.has_permission(PermissionLevel::Admin));
        assert_eq!(f.auth.token(), "T9");

        let call = &f.backend.calls()[0];
        assert_eq!(call.body, json!({"token": "T9"}));
        assert_eq!(call.headers.get("Authorization"), Some("Bearer T9"));
    }

    #[tokio::test]
    async fn test_fetch_user_data_with_explicit_token_skips_store() {
        let f = fixture_with(MockTokenStore::with_token("OLD"));
        f.backend.respond("fetch_account", Ok(json!({"userId": 7, "permissions": []})));

        f.auth.fetch_user_data(Some("T1")).await.unwrap();
        assert_eq!(f.token_store.loads(), 0);
        assert_eq!(f.auth.token(), "T1");
        assert_eq!(f.auth.user_profile().unwrap().user_id, 7);
    }

    #[tokio::test]
    async fn test_fetch_user_data_commits_token_before_profile() {
        let f = fixture();
        f.backend
            .respond("fetch_account", Err(QuizzifyError::http(401, "expired")));

        let err = f.auth.fetch_user_data(Some("T1")).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(f.auth.token(), "T1");
        assert!(f.auth.user_profile().is_none());
    }

    #[tokio::test]
    async fn test_profile_fetch_in_flight_during_logout_is_discarded() {
        let f = fixture();
        let (release, gate) = oneshot::channel();
        f.backend.respond_when(
            "fetch_account",
            gate,
            Ok(json!({"userId": 7, "permissions": [1]})),
        );

        let fetch = f.auth.fetch_user_data(Some("T1"));
        let logout = async {
            f.auth.logout();
            release.send(()).unwrap();
        };
        let (fetched, ()) = tokio::join!(fetch, logout);

        assert_eq!(fetched.unwrap().user_id, 7);
        assert!(f.auth.user_profile().is_none());
        assert!(!f.auth.is_logged_in());
    }

    #[tokio::test]
    async fn test_accounts_list_replaces_and_sends_auth_header() {
        let f = fixture();
        f.backend.respond("fetch_account", Ok(json!({"userId": 7, "permissions": [3]})));
        f.auth.fetch_user_data(Some("T1")).await.unwrap();

        f.backend
            .respond("list_accounts", Ok(json!([{"id": 1}, {"id": 2}])));
        f.backend.respond("list_accounts", Ok(json!([{"id": 3}])));

        f.auth.accounts_list().await.unwrap();
        let accounts = f.auth.accounts_list().await.unwrap();
        assert_eq!(accounts.len(), 1);

        let ids: Vec<i64> = f.auth.accounts().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3]);
        assert!(f.backend.calls()[1].headers.get("Auth-User-Info").is_some());
    }

    #[tokio::test]
    async fn test_delete_account_leaves_cached_list() {
        let f = fixture();
        f.backend.respond("list_accounts", Ok(json!([{"id": 1}, {"id": 2}])));
        f.auth.accounts_list().await.unwrap();

        f.backend.respond("delete_account", Ok(json!(null)));
        f.auth.delete_account(2).await.unwrap();

        assert_eq!(f.auth.accounts().len(), 2);
        assert_eq!(f.backend.calls()[1].body, json!({"id": 2}));
    }
}
