//! Root container composing the auth and resource modules.

use std::sync::Arc;

use quizzify_core::Result;
use quizzify_core::backend::{AuthHeaders, QuizzifyBackend};
use quizzify_core::config::ClientConfig;
use quizzify_core::navigation::Navigator;
use quizzify_core::notification::Notifier;
use quizzify_core::session::AuthState;
use quizzify_core::token_store::TokenStore;
use quizzify_interaction::ApiClient;

use crate::auth::AuthModule;
use crate::resource::ResourceModule;
use crate::session::SharedSession;

/// One per running client. Both modules share the same session.
pub struct Store {
    session: SharedSession,
    auth: AuthModule,
    resources: ResourceModule,
}

impl Store {
    pub fn new(
        backend: Arc<dyn QuizzifyBackend>,
        token_store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
        config: ClientConfig,
    ) -> Self {
        let session = SharedSession::new();
        let auth = AuthModule::new(
            session.clone(),
            backend.clone(),
            token_store,
            navigator,
            config,
        );
        let resources = ResourceModule::new(session.clone(), backend, notifier);
        Self {
            session,
            auth,
            resources,
        }
    }

    /// Builds a store talking HTTP to the backend named in `config`.
    pub fn connect(
        config: ClientConfig,
        token_store: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let client = ApiClient::from_config(&config)?;
        tracing::debug!(base_url = client.base_url(), "connecting store");
        Ok(Self::new(
            Arc::new(client),
            token_store,
            navigator,
            notifier,
            config,
        ))
    }

    pub fn auth(&self) -> &AuthModule {
        &self.auth
    }

    pub fn resources(&self) -> &ResourceModule {
        &self.resources
    }

    /// Handle for code outside the modules that needs the live session.
    pub fn session(&self) -> SharedSession {
        self.session.clone()
    }

    pub fn snapshot(&self) -> AuthState {
        self.session.snapshot()
    }

    pub fn auth_headers(&self) -> AuthHeaders {
        self.session.auth_headers()
    }
}
