pub mod config;
pub mod error;
pub mod export;
pub mod store;
pub mod types;

pub use config::{Config, USER_AGENT};
pub use error::LeadGenError;
pub use store::{KeyValueStore, MemoryStore};
pub use types::*;
