//! Application layer for Quizzify.
//!
//! [`Store`] owns the auth and resource state modules. Views dispatch actions
//! through it and read state through the modules' getters.

pub mod auth;
pub mod resource;
pub mod session;
pub mod store;

#[cfg(test)]
mod test_support;

pub use auth::AuthModule;
pub use resource::ResourceModule;
pub use session::SharedSession;
pub use store::Store;
