use std::io::ErrorKind;
use std::path::Path;
use std::process::{Child, Command, Stdio};

use super::{display_invocation, CommandError, CommandRunner};

/// Runs candidates as real child processes.
///
/// The child is always waited on and its stdout drained before `run` returns.
/// There is no timeout: a hung command blocks the caller.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    hide_stderr: bool,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipe and discard the child's stderr instead of inheriting it.
    pub fn hide_stderr(mut self, hide: bool) -> Self {
        self.hide_stderr = hide;
        self
    }

    fn spawn(&self, command: &str, args: &[&str], cwd: &Path) -> std::io::Result<Child> {
        let stderr = if self.hide_stderr {
            Stdio::piped()
        } else {
            Stdio::inherit()
        };

        Command::new(command)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(stderr)
            .spawn()
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, commands: &[String], args: &[&str], cwd: &Path) -> Result<String, CommandError> {
        let mut launched = None;

        for command in commands {
            match self.spawn(command, args, cwd) {
                Ok(child) => {
                    launched = Some((command, child));
                    break;
                }
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(source) => {
                    return Err(CommandError::Launch {
                        command: display_invocation(command, args),
                        source,
                    })
                }
            }
        }

        let Some((command, child)) = launched else {
            return Err(CommandError::NotFound {
                tried: commands.to_vec(),
            });
        };

        let output = child
            .wait_with_output()
            .map_err(|source| CommandError::Output {
                command: display_invocation(command, args),
                source,
            })?;

        if !output.status.success() {
            return Err(CommandError::Failed {
                command: display_invocation(command, args),
                status: output.status.to_string(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| CommandError::Output {
            command: display_invocation(command, args),
            source: std::io::Error::new(ErrorKind::InvalidData, e),
        })?;

        Ok(stdout.trim().to_string())
    }
}
