//! Signing certificate artifacts on disk.

use std::path::{Path, PathBuf};

/// A public certificate and its private key, referenced by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    public_key: PathBuf,
    private_key: PathBuf,
}

impl Certificate {
    pub fn new(public_key: impl Into<PathBuf>, private_key: impl Into<PathBuf>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    /// Path to the public certificate file (e.g. `.cer`)
    #[must_use]
    pub fn public_key(&self) -> &Path {
        &self.public_key
    }

    /// Path to the private key file (e.g. `.p12`)
    #[must_use]
    pub fn private_key(&self) -> &Path {
        &self.private_key
    }
}
