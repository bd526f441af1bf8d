//! Certificate import into a keychain

use super::controller::{SecurityController, path_arg};
use crate::certificate::Certificate;
use crate::error::Result;
use crate::runner::CommandRunner;
use std::path::Path;

impl<R: CommandRunner> SecurityController<R> {
    /// Import a certificate's public and private key into `keychain_path`
    ///
    /// Each artifact is probed first and only imported when the probe fails,
    /// so re-importing an installed certificate spawns no `import` at all.
    ///
    /// # Returns
    /// * `Ok(())` - Both artifacts are present (imported now or before)
    /// * `Err(KeychainError::Execution)` - An `import` invocation failed;
    ///   anything imported earlier in this call stays in the keychain
    pub async fn import_certificate(
        &self,
        certificate: &Certificate,
        keychain_path: &Path,
    ) -> Result<()> {
        if !self.certificate_exists(certificate.public_key()).await? {
            self.import_to_keychain(certificate.public_key(), keychain_path)
                .await?;
        }
        if !self.key_exists(certificate.private_key()).await? {
            self.import_to_keychain(certificate.private_key(), keychain_path)
                .await?;
        }

        tracing::debug!(
            path = %certificate.public_key().display(),
            "imported certificate"
        );
        Ok(())
    }

    async fn import_to_keychain(&self, path: &Path, keychain_path: &Path) -> Result<()> {
        let path = path_arg(path)?;
        let keychain = path_arg(keychain_path)?;
        self.run(&["import", path, "-P", "", "-k", keychain]).await
    }
}
