pub mod config;
pub mod draw;
pub mod error;
pub mod logging;
pub mod pool;
pub mod store;

pub use draw::DrawEngine;
pub use error::StoreError;
pub use store::{FileBackend, MemoryBackend, SessionStore, StorageBackend, StoredSession};
