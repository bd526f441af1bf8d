//! Process execution for external tools
//!
//! The keychain controller never spawns processes directly; it goes through
//! [`CommandRunner`] so tests can substitute a recording fake.

use crate::error::{KeychainError, Result};
use std::future::Future;
use std::path::Path;
use std::process::Output;

/// Executes an external program to completion.
pub trait CommandRunner {
    /// Run `program` with `args`, succeeding only on a zero exit status.
    fn run(&self, program: &Path, args: &[&str]) -> impl Future<Output = Result<()>> + Send;

    /// Run `program` with `args` and return its standard output untouched.
    fn capture(&self, program: &Path, args: &[&str])
    -> impl Future<Output = Result<String>> + Send;
}

/// [`CommandRunner`] backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, program: &Path, args: &[&str]) -> Result<()> {
        execute(program, args).await.map(|_| ())
    }

    async fn capture(&self, program: &Path, args: &[&str]) -> Result<String> {
        let output = execute(program, args).await?;
        String::from_utf8(output.stdout).map_err(|e| KeychainError::Execution {
            command: render_command(program, args),
            code: output.status.code(),
            message: format!("output is not valid UTF-8: {e}"),
        })
    }
}

async fn execute(program: &Path, args: &[&str]) -> Result<Output> {
    let command = render_command(program, args);
    tracing::trace!(%command, "spawning");

    let output = tokio::process::Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|e| KeychainError::Execution {
            command: command.clone(),
            code: None,
            message: if e.kind() == std::io::ErrorKind::NotFound {
                format!("{} not found. This tool requires macOS.", program.display())
            } else {
                format!("Failed to launch {}: {e}", program.display())
            },
        })?;

    if !output.status.success() {
        return Err(KeychainError::Execution {
            command,
            code: output.status.code(),
            message: error_text(&output),
        });
    }

    Ok(output)
}

/// Error text for a failed process: stderr, or stdout when stderr is blank.
fn error_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        stderr.trim().to_string()
    }
}

/// Render a command line for logs and errors, masking the value after `-p`.
#[must_use]
pub fn render_command(program: &Path, args: &[&str]) -> String {
    let mut rendered = program.display().to_string();
    let mut mask_next = false;

    for arg in args {
        rendered.push(' ');
        if mask_next {
            rendered.push_str("***");
            mask_next = false;
            continue;
        }
        if *arg == "-p" {
            mask_next = true;
        }
        if arg.is_empty() {
            rendered.push_str("\"\"");
        } else {
            rendered.push_str(arg);
        }
    }

    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_masks_keychain_password() {
        let rendered = render_command(
            Path::new("/usr/bin/security"),
            &["unlock-keychain", "-p", "hunter2", "/tmp/ci.keychain"],
        );
        assert_eq!(rendered, "/usr/bin/security unlock-keychain -p *** /tmp/ci.keychain");
    }

    #[test]
    fn render_shows_empty_passphrase_argument() {
        let rendered = render_command(
            Path::new("security"),
            &["import", "/tmp/cert.p12", "-P", "", "-k", "/tmp/ci.keychain"],
        );
        assert_eq!(rendered, "security import /tmp/cert.p12 -P \"\" -k /tmp/ci.keychain");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn missing_program_is_an_execution_error() {
        let err = SystemRunner
            .run(Path::new("/nonexistent/kodegen/security"), &["help"])
            .await
            .expect_err("spawn should fail");
        assert!(err.is_execution());
        match err {
            KeychainError::Execution { code, .. } => assert_eq!(code, None),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn capture_returns_stdout_and_run_reports_stderr() {
        let out = SystemRunner
            .capture(Path::new("/bin/sh"), &["-c", "printf 'a\\n b '"])
            .await
            .expect("sh should run");
        assert_eq!(out, "a\n b ");

        let err = SystemRunner
            .run(Path::new("/bin/sh"), &["-c", "echo boom >&2; exit 3"])
            .await
            .expect_err("non-zero exit");
        match err {
            KeychainError::Execution { code, message, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(message, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
