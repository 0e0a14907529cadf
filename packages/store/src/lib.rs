//! # Client-side persistence for reciPal
//!
//! Everything the client keeps between page loads goes through the
//! [`KeyValueStore`] trait. The only thing persisted today is the bearer token,
//! owned by [`Session`].
//!
//! | Backend | Platform |
//! |---------|----------|
//! | [`MemoryStore`] | tests, and wasm builds without the `web` feature |
//! | [`FileStore`] | desktop / native: a TOML file under the platform data dir |
//! | [`LocalStorageStore`] | browser `localStorage` (wasm32 + `web` feature) |

pub mod error;
pub mod kv;
pub mod session;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local_storage;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local_storage::LocalStorageStore;

pub use error::StoreError;
pub use kv::KeyValueStore;
pub use session::{decode_token_user, CurrentUser, Session, TOKEN_KEY};
