//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing
//! - Storage (LocalStorage on web, a JSON file on native)

pub mod clock;
pub mod storage;

pub use clock::FrameClock;
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStore;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageStore;
