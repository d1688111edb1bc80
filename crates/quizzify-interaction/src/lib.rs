//! HTTP side of the Quizzify client.
//!
//! [`create_client`] binds a reqwest client to one backend host; the resulting
//! [`ApiClient`] implements [`quizzify_core::backend::QuizzifyBackend`].

pub mod api_client;
pub mod auth_headers;
pub mod endpoint;
pub mod response;

pub use api_client::{ApiClient, create_client};
pub use auth_headers::{AUTH_USER_INFO_HEADER, auth_user_info_headers, bearer_headers, derive_auth_headers};
pub use endpoint::Endpoint;
