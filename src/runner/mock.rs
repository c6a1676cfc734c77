use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{display_invocation, CommandError, CommandRunner};

/// Scripted outcome for one argument vector.
#[derive(Debug, Clone, PartialEq)]
pub enum MockResponse {
    /// Process exits 0 with this stdout (trimmed on the way out).
    Output(String),
    /// Process exits with this non-zero code.
    Failed(i32),
}

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

/// Mock runner for testing without spawning processes
///
/// Responses are keyed by the space-joined argument vector. Arguments with no
/// scripted response behave as if no candidate executable were installed.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: HashMap<String, MockResponse>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockRunner {
    /// Create a runner where every command is missing
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful run
    pub fn with_output(mut self, args: &[&str], stdout: impl Into<String>) -> Self {
        self.responses
            .insert(args.join(" "), MockResponse::Output(stdout.into()));
        self
    }

    /// Script a run that exits non-zero
    pub fn with_failure(mut self, args: &[&str], code: i32) -> Self {
        self.responses
            .insert(args.join(" "), MockResponse::Failed(code));
        self
    }

    /// Every invocation so far, including ones that found no command
    pub fn calls(&self) -> Vec<MockCall> {
        self.lock_calls().clone()
    }

    /// Invocations that reached a scripted process
    pub fn spawn_count(&self) -> usize {
        self.lock_calls()
            .iter()
            .filter(|call| self.responses.contains_key(&call.args.join(" ")))
            .count()
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<MockCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, commands: &[String], args: &[&str], cwd: &Path) -> Result<String, CommandError> {
        self.lock_calls().push(MockCall {
            args: args.iter().map(|a| a.to_string()).collect(),
            cwd: cwd.to_path_buf(),
        });

        let command = commands.first().map(String::as_str).unwrap_or_default();

        match self.responses.get(&args.join(" ")) {
            Some(MockResponse::Output(stdout)) => Ok(stdout.trim().to_string()),
            Some(MockResponse::Failed(code)) => Err(CommandError::Failed {
                command: display_invocation(command, args),
                status: format!("exit status: {}", code),
            }),
            None => Err(CommandError::NotFound {
                tried: commands.to_vec(),
            }),
        }
    }
}
