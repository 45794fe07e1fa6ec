//! Error types for the generation engine

use std::fmt;

use thiserror::Error;

use crate::infrastructure::templates::TemplateError;

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Which dispatcher a strategy belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    Artifact,
    Syntax,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Artifact => write!(f, "artifact"),
            StrategyKind::Syntax => write!(f, "syntax"),
        }
    }
}

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("No {kind} strategy registered for model type `{model_type}`")]
    StrategyNotFound {
        kind: StrategyKind,
        model_type: String,
    },

    #[error(
        "Ambiguous {kind} strategies for model type `{model_type}` at priority {priority}: {}",
        .strategies.join(", ")
    )]
    AmbiguousStrategy {
        kind: StrategyKind,
        model_type: String,
        priority: i32,
        strategies: Vec<String>,
    },

    #[error("Failed to generate {model}: {source}")]
    ArtifactGeneration {
        model: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Generation cancelled")]
    Cancelled,
}

impl GenerationError {
    /// Wrap a collaborator failure with the identifying fields of the model
    /// that was being generated
    pub fn artifact<E>(model: impl Into<String>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::ArtifactGeneration {
            model: model.into(),
            source: source.into(),
        }
    }

    pub fn invalid_model<S: Into<String>>(msg: S) -> Self {
        Self::InvalidModel(msg.into())
    }
}
