//! External command execution
//!
//! The live-repository resolver talks to the version-control tool through the
//! [CommandRunner] trait so it can be exercised without a real VCS installed.
//!
//! - [process::ProcessRunner]: spawns real processes via `std::process`
//! - [mock::MockRunner]: scripted responses with call recording for tests
//!
//! A runner walks an ordered list of candidate executable names. A candidate
//! that does not exist is skipped; a candidate that exists but cannot start,
//! fails while its output is drained, or exits non-zero ends the whole call.

pub mod mock;
pub mod process;

pub use mock::{MockCall, MockResponse, MockRunner};
pub use process::ProcessRunner;

use std::path::Path;
use thiserror::Error;

/// Why a command produced no usable output.
#[derive(Error, Debug)]
pub enum CommandError {
    /// None of the candidate executables exists.
    #[error("unable to find command, tried {tried:?}")]
    NotFound { tried: Vec<String> },

    /// The executable exists but could not be started.
    #[error("unable to run {command}: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran and exited unsuccessfully.
    #[error("unable to run {command} (error, {status})")]
    Failed { command: String, status: String },

    /// Waiting on the process or reading its output failed.
    #[error("unable to read output of {command}: {source}")]
    Output {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl CommandError {
    /// True when no candidate was present at all.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CommandError::NotFound { .. })
    }
}

/// Common command execution trait
///
/// Implementations must be `Send + Sync`; a runner carries no per-call state
/// that would make two resolutions interfere with each other.
pub trait CommandRunner: Send + Sync {
    /// Run the first available candidate with `args` inside `cwd`.
    ///
    /// # Arguments
    /// * `commands` - Candidate executable names, tried in order
    /// * `args` - Argument vector passed unchanged to the executable
    /// * `cwd` - Working directory of the child process
    ///
    /// # Returns
    /// * `Ok(String)` - Standard output, trimmed, when the process exits with status 0
    /// * `Err(CommandError)` - Every other outcome
    fn run(&self, commands: &[String], args: &[&str], cwd: &Path) -> Result<String, CommandError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, commands: &[String], args: &[&str], cwd: &Path) -> Result<String, CommandError> {
        (**self).run(commands, args, cwd)
    }
}

/// Human-readable form of one invocation, used in error messages.
pub(crate) fn display_invocation(command: &str, args: &[&str]) -> String {
    if args.is_empty() {
        command.to_string()
    } else {
        format!("{} {}", command, args.join(" "))
    }
}
