//! Vault module — safes and their encrypted storage.
//!
//! This module provides:
//! - The encrypted per-secret record (`entry`)
//! - The in-memory plaintext `Safe` (`safe`)
//! - The JSON/base64 file codec and `Backend` trait (`backend`)
//! - The `Vault` that loads and saves whole safes (`store`)

pub mod backend;
pub mod entry;
pub mod safe;
pub mod store;

// Re-export the most commonly used items.
pub use backend::{Backend, Entries, JsonBackend};
pub use entry::Entry;
pub use safe::Safe;
pub use store::Vault;
