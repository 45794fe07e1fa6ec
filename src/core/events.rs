//! Request-scoped generation events
//!
//! Subscribers are handed to the artifact generator when it is built and are
//! invoked synchronously, in registration order, for every event of that run.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::generation::StrategyKind;

/// Something observable that happened during a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationEvent {
    /// A strategy was selected for a model
    StrategyResolved {
        kind: StrategyKind,
        model_type: String,
        strategy: String,
    },
    /// A directory was created (or already existed)
    DirectoryCreated(PathBuf),
    /// A file was written
    FileWritten(PathBuf),
    /// An external command was run or spawned
    CommandExecuted {
        command: String,
        working_directory: PathBuf,
    },
}

impl fmt::Display for GenerationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationEvent::StrategyResolved {
                kind,
                model_type,
                strategy,
            } => write!(f, "{kind} {model_type} -> {strategy}"),
            GenerationEvent::DirectoryCreated(path) => write!(f, "mkdir {}", path.display()),
            GenerationEvent::FileWritten(path) => write!(f, "write {}", path.display()),
            GenerationEvent::CommandExecuted {
                command,
                working_directory,
            } => write!(f, "run `{command}` in {}", working_directory.display()),
        }
    }
}

/// Callback receiving generation events
pub type EventSubscriber = Arc<dyn Fn(&GenerationEvent) + Send + Sync>;
