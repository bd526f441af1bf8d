//! Existence probes against the keychain search list

use super::controller::{SecurityController, path_arg};
use crate::error::Result;
use crate::runner::CommandRunner;
use std::path::Path;

impl<R: CommandRunner> SecurityController<R> {
    /// Whether `security find-certificate` locates the certificate at `path`.
    pub(super) async fn certificate_exists(&self, path: &Path) -> Result<bool> {
        let path = path_arg(path)?;
        Ok(self
            .probe_succeeds(&["find-certificate", path, "-P", ""])
            .await)
    }

    /// Whether `security find-key` locates the key at `path`.
    pub(super) async fn key_exists(&self, path: &Path) -> Result<bool> {
        let path = path_arg(path)?;
        Ok(self.probe_succeeds(&["find-key", path, "-P", ""]).await)
    }

    /// Run a read-only probe and collapse its outcome to found / not found.
    ///
    /// Every failure reads as "not found", including a missing `security`
    /// binary. The reason is only kept in the debug log; a broken tool
    /// surfaces on the import that follows.
    async fn probe_succeeds(&self, args: &[&str]) -> bool {
        match self.run(args).await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(probe = args[0], error = %e, "treating probe failure as absent");
                false
            }
        }
    }
}
