//! Per-request authorization headers derived from session state.

use quizzify_core::backend::AuthHeaders;
use quizzify_core::session::{AuthState, AuthUserInfo};

/// Header carrying the serialized `{id, permissions}` of the acting user.
pub const AUTH_USER_INFO_HEADER: &str = "Auth-User-Info";

/// Derives the custom auth header from the session as it is right now.
///
/// Returns no headers when no profile with a usable id is loaded. Call this at
/// request time; never cache the result across requests.
pub fn derive_auth_headers(session: &AuthState) -> AuthHeaders {
    match session.auth_user_info() {
        Some(info) => auth_user_info_headers(&info),
        None => AuthHeaders::none(),
    }
}

/// Serializes `info` into the `Auth-User-Info` header.
pub fn auth_user_info_headers(info: &AuthUserInfo) -> AuthHeaders {
    // A struct of an integer and an integer list always serializes.
    let value = serde_json::to_string(info).unwrap_or_default();
    AuthHeaders::none().with(AUTH_USER_INFO_HEADER, value)
}

/// `Authorization: Bearer <token>`, used when fetching the profile for a token.
pub fn bearer_headers(token: &str) -> AuthHeaders {
    AuthHeaders::none().with("Authorization", format!("Bearer {}", token))
}
