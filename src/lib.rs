//! Keychain provisioning for code signing on macOS
//!
//! Wraps the system `security` tool to decode signing files, import
//! certificates and manage keychains. All keychain semantics belong to the
//! tool; this crate fixes the argument vectors and interprets exit status.

pub mod certificate;
pub mod config;
pub mod error;
pub mod keychain;
pub mod runner;

#[macro_use]
pub mod output;

// Re-export common types
pub use certificate::Certificate;
pub use config::SecurityConfig;
pub use error::{KeychainError, Result};
pub use keychain::{SecurityController, is_duplicate_keychain_error};
pub use runner::{CommandRunner, SystemRunner};
