// Utils compartidos

pub mod constants;
pub mod storage;

pub use constants::*;
pub use storage::{MemoryStorage, TokenStorage};
#[cfg(target_arch = "wasm32")]
pub use storage::BrowserStorage;
