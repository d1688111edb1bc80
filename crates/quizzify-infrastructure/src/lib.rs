//! Infrastructure for the Quizzify client: on-disk paths, the persisted
//! token cookie jar and config file loading.

pub mod config_service;
pub mod paths;
pub mod storage;
pub mod token_store;

pub use crate::config_service::ConfigService;
pub use crate::paths::QuizzifyPaths;
pub use crate::token_store::{FileTokenStore, MemoryTokenStore};
