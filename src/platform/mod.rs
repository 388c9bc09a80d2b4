//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time
//! - Storage (LocalStorage on web, files natively)
//! - Logger initialisation

pub mod storage;
pub mod time;

pub use storage::{FileStorage, MemoryStorage, Storage};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;

/// Install the platform logger. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Install the platform logger. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::try_init();
}
