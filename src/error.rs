//! Error types for keychain and signing-file operations.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, KeychainError>;

#[derive(Debug, Error)]
pub enum KeychainError {
    /// The `security` tool exited non-zero or could not be launched.
    #[error("Command execution failed: {command} ({}): {message}", describe_status(.code))]
    Execution {
        /// Rendered command line with password arguments masked
        command: String,
        /// Exit code, `None` when the process never ran or was killed by a signal
        code: Option<i32>,
        /// Captured error text (stderr, falling back to stdout)
        message: String,
    },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl KeychainError {
    /// Error text reported by the external tool, if this is an execution failure.
    #[must_use]
    pub fn execution_message(&self) -> Option<&str> {
        match self {
            Self::Execution { message, .. } => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Execution { .. })
    }
}

fn describe_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_display_includes_command_and_code() {
        let err = KeychainError::Execution {
            command: "security lock-keychain -p *** /tmp/a.keychain".to_string(),
            code: Some(51),
            message: "The specified keychain could not be found.".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("security lock-keychain -p *** /tmp/a.keychain"));
        assert!(text.contains("exit code 51"));
        assert!(text.contains("could not be found"));
        assert_eq!(
            err.execution_message(),
            Some("The specified keychain could not be found.")
        );
    }

    #[test]
    fn non_execution_errors_have_no_tool_message() {
        let err = KeychainError::InvalidPath("bad".to_string());
        assert!(!err.is_execution());
        assert_eq!(err.execution_message(), None);
    }
}
