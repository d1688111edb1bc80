//! Session domain: who is logged in and what they may do.

pub mod model;
pub mod state;

pub use model::{Account, AuthUserInfo, PermissionLevel, UserProfile};
pub use state::AuthState;
