//! Keychain creation, unlocking and locking

use super::controller::{SecurityController, path_arg};
use crate::error::{KeychainError, Result};
use crate::runner::CommandRunner;
use std::path::Path;

/// Text `security create-keychain` prints when the target already exists.
///
/// This is English tool output and may differ across macOS releases or
/// locales; [`is_duplicate_keychain_error`] is the only place it is matched.
pub const DUPLICATE_KEYCHAIN_MESSAGE: &str = "A keychain with the same name already exists.";

/// Whether `error` is `create-keychain` refusing an existing keychain.
#[must_use]
pub fn is_duplicate_keychain_error(error: &KeychainError) -> bool {
    error
        .execution_message()
        .is_some_and(|message| message.contains(DUPLICATE_KEYCHAIN_MESSAGE))
}

impl<R: CommandRunner> SecurityController<R> {
    /// Create a keychain at `path`, treating an existing one as success.
    pub async fn create_keychain(&self, path: &Path, password: &str) -> Result<()> {
        let keychain = path_arg(path)?;
        match self
            .run(&["create-keychain", "-p", password, keychain])
            .await
        {
            Ok(()) => {
                tracing::debug!(path = keychain, "created keychain");
                Ok(())
            }
            Err(e) if is_duplicate_keychain_error(&e) => {
                tracing::debug!(path = keychain, "keychain already exists");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub async fn unlock_keychain(&self, path: &Path, password: &str) -> Result<()> {
        let keychain = path_arg(path)?;
        self.run(&["unlock-keychain", "-p", password, keychain])
            .await?;
        tracing::debug!(path = keychain, "unlocked keychain");
        Ok(())
    }

    pub async fn lock_keychain(&self, path: &Path, password: &str) -> Result<()> {
        let keychain = path_arg(path)?;
        self.run(&["lock-keychain", "-p", password, keychain])
            .await?;
        tracing::debug!(path = keychain, "locked keychain");
        Ok(())
    }
}
