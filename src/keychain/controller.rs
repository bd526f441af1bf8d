//! Gateway to the `security` command line tool

use crate::config::SecurityConfig;
use crate::error::{KeychainError, Result};
use crate::runner::{CommandRunner, SystemRunner};
use std::path::{Path, PathBuf};

/// Runs keychain and signing-file operations through `security`.
///
/// Every call awaits the spawned process to completion. Nothing is retried
/// and nothing is rolled back when a later step of a caller's sequence fails.
#[derive(Debug, Clone)]
pub struct SecurityController<R = SystemRunner> {
    runner: R,
    security_path: PathBuf,
}

impl SecurityController<SystemRunner> {
    /// Controller spawning real processes for the configured `security` path
    #[must_use]
    pub fn new(config: &SecurityConfig) -> Self {
        Self::with_runner(SystemRunner, config.security_path.clone())
    }
}

impl<R: CommandRunner> SecurityController<R> {
    pub fn with_runner(runner: R, security_path: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            security_path: security_path.into(),
        }
    }

    #[must_use]
    pub fn security_path(&self) -> &Path {
        &self.security_path
    }

    #[must_use]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Decode a CMS-signed file (e.g. a `.mobileprovision`) and return the
    /// tool's standard output verbatim.
    pub async fn decode_file(&self, path: &Path) -> Result<String> {
        let path = path_arg(path)?;
        let decoded = self
            .runner
            .capture(&self.security_path, &["cms", "-D", "-i", path])
            .await?;
        tracing::debug!(path, bytes = decoded.len(), "decoded file");
        Ok(decoded)
    }

    /// Run a `security` subcommand that reports only through its exit status.
    pub(super) async fn run(&self, args: &[&str]) -> Result<()> {
        self.runner.run(&self.security_path, args).await
    }
}

/// Borrow a path as the UTF-8 argument the tool expects.
pub(super) fn path_arg(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| KeychainError::InvalidPath(path.display().to_string()))
}
