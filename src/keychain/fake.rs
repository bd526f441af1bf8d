//! Recording stand-in for [`CommandRunner`] used by unit tests.

use crate::error::{KeychainError, Result};
use crate::runner::CommandRunner;
use std::path::Path;
use std::sync::Mutex;

type Responder = Box<dyn Fn(&[&str]) -> Result<String> + Send + Sync>;

pub(crate) struct FakeRunner {
    calls: Mutex<Vec<Vec<String>>>,
    respond: Responder,
}

impl FakeRunner {
    pub(crate) fn new(respond: impl Fn(&[&str]) -> Result<String> + Send + Sync + 'static) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        }
    }

    /// Execution failure carrying `message` as the tool's error text.
    pub(crate) fn failure(message: &str) -> KeychainError {
        KeychainError::Execution {
            command: "security".to_string(),
            code: Some(1),
            message: message.to_string(),
        }
    }

    /// Argument vectors of every invocation so far, in order.
    pub(crate) fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Invocations whose first argument is `subcommand`.
    pub(crate) fn calls_to(&self, subcommand: &str) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|call| call.first().map(String::as_str) == Some(subcommand))
            .collect()
    }

    fn invoke(&self, args: &[&str]) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push(args.iter().map(|arg| (*arg).to_string()).collect());
        (self.respond)(args)
    }
}

impl CommandRunner for FakeRunner {
    async fn run(&self, _program: &Path, args: &[&str]) -> Result<()> {
        self.invoke(args).map(|_| ())
    }

    async fn capture(&self, _program: &Path, args: &[&str]) -> Result<String> {
        self.invoke(args)
    }
}
