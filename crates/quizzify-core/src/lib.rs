//! Domain layer for the Quizzify client.
//!
//! Holds the state containers and their mutation entry points, the wire
//! models, and the ports (backend, token store, navigator, notifier) that the
//! application layer drives.

pub mod backend;
pub mod config;
pub mod error;
pub mod navigation;
pub mod notification;
pub mod quiz;
pub mod session;
pub mod token_store;
pub mod versioned;

// Re-export common error type
pub use error::{QuizzifyError, Result};
