//! Client-side state that outlives a single view: the persisted session and
//! the client configuration.

pub mod config;
pub mod session;
pub mod storage;

mod memory;
pub use memory::MemoryStorage;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStorage;

pub use config::{ClientConfig, ConfigError};
pub use session::{Credentials, Role, Session, SessionStore};
pub use storage::KeyValueStorage;
