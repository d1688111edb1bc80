pub mod auth;
pub mod config;

use anyhow::{Result, bail};
use quizzify_application::Store;
use quizzify_core::session::UserProfile;

/// Loads the profile for the persisted token.
pub async fn restore_session(store: &Store) -> Result<UserProfile> {
    match store.auth().fetch_user_data(None).await {
        Ok(profile) => Ok(profile),
        Err(e) if e.is_no_token() => bail!("Not logged in. Run `quizzify login` first."),
        Err(e) if e.is_unauthorized() => {
            bail!("Session expired or rejected ({}). Run `quizzify login` again.", e)
        }
        Err(e) => Err(e.into()),
    }
}
