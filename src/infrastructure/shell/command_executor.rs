//! Command executor for running external scaffolding tools
//!
//! Solution and project strategies shell out to tools such as `dotnet new`;
//! this module is the only place that actually starts processes.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Mutex;
use tokio::process::Command;

/// Arguments made only of these characters pass through the shell unchanged
static PLAIN_ARGUMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_./:=@+,%-]+$").expect("valid regex"));

/// Quote one argument of a command line for the shell used by
/// [`ShellCommandExecutor`]. Plain arguments are returned as they are.
///
/// # Examples
/// ```
/// use strategen::infrastructure::shell::quote_argument;
///
/// assert_eq!(quote_argument("/out/Shop/Shop.Api"), "/out/Shop/Shop.Api");
/// ```
pub fn quote_argument(argument: &str) -> Cow<'_, str> {
    if PLAIN_ARGUMENT.is_match(argument) {
        return Cow::Borrowed(argument);
    }
    if cfg!(windows) {
        Cow::Owned(format!("\"{}\"", argument.replace('"', "\"\"")))
    } else {
        Cow::Owned(format!("'{}'", argument.replace('\'', r"'\''")))
    }
}

/// [`quote_argument`] for a path
pub fn quote_path(path: &Path) -> String {
    quote_argument(&path.to_string_lossy()).into_owned()
}

/// Trait for executing shell commands
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Execute a shell command in the given working directory and wait for it
    async fn execute(&self, command: &str, working_dir: &Path) -> io::Result<CommandResult>;

    /// Start a shell command without waiting for it to finish
    async fn spawn(&self, command: &str, working_dir: &Path) -> io::Result<()>;
}

/// Result of command execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    /// Check if the command was successful
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Default command executor using tokio::process
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellCommandExecutor;

impl ShellCommandExecutor {
    pub fn new() -> Self {
        Self
    }

    #[cfg(windows)]
    fn command(command: &str, working_dir: &Path) -> Command {
        // cmd reparses the raw command line itself
        let mut process = Command::new("cmd");
        process.arg("/C").raw_arg(command).current_dir(working_dir);
        process
    }

    #[cfg(not(windows))]
    fn command(command: &str, working_dir: &Path) -> Command {
        let mut process = Command::new("sh");
        process.arg("-c").arg(command).current_dir(working_dir);
        process
    }
}

#[async_trait]
impl CommandExecutor for ShellCommandExecutor {
    async fn execute(&self, command: &str, working_dir: &Path) -> io::Result<CommandResult> {
        let output = Self::command(command, working_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        Ok(CommandResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    async fn spawn(&self, command: &str, working_dir: &Path) -> io::Result<()> {
        Self::command(command, working_dir)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_child| ())
    }
}

/// Executor that records commands instead of running them; backs `--dry-run`
#[derive(Debug, Default)]
pub struct DryRunCommandExecutor {
    commands: Mutex<Vec<(String, PathBuf)>>,
}

impl DryRunCommandExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded `(command, working directory)` pairs in call order
    pub fn commands(&self) -> Vec<(String, PathBuf)> {
        self.commands
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    fn record(&self, command: &str, working_dir: &Path) {
        if let Ok(mut guard) = self.commands.lock() {
            guard.push((command.to_string(), working_dir.to_path_buf()));
        }
    }
}

#[async_trait]
impl CommandExecutor for DryRunCommandExecutor {
    async fn execute(&self, command: &str, working_dir: &Path) -> io::Result<CommandResult> {
        self.record(command, working_dir);
        Ok(CommandResult::default())
    }

    async fn spawn(&self, command: &str, working_dir: &Path) -> io::Result<()> {
        self.record(command, working_dir);
        Ok(())
    }
}
