//! Keychain operations backed by the macOS `security` tool
//!
//! This module provides functionality for:
//! - Decoding CMS-wrapped signing files (provisioning profiles)
//! - Importing certificates and private keys, skipping ones already present
//! - Creating, unlocking and locking keychains

mod controller;
mod import;
mod lifecycle;
mod probe;

#[cfg(test)]
pub(crate) mod fake;

pub use controller::SecurityController;
pub use lifecycle::{DUPLICATE_KEYCHAIN_MESSAGE, is_duplicate_keychain_error};
