//! Generation domain module - strategy dispatch over artifact and syntax models
//!
//! Two layers share one resolution mechanism: a model's exact runtime type
//! selects the highest priority strategy registered for it. Artifact
//! strategies produce files, directories and commands; syntax strategies
//! produce text. Composite strategies recurse through their dispatcher.

pub mod artifacts;
pub mod errors;
pub mod registry;
pub mod syntax;

pub use artifacts::{
    ArtifactGenerationStrategy, ArtifactGenerator, ArtifactModel, ArtifactStrategyRegistration,
    ArtifactStrategyRegistry, artifact_strategy,
};
pub use errors::*;
pub use registry::{AsAny, DEFAULT_PRIORITY, StrategyRegistration, StrategyRegistry};
pub use syntax::{
    SyntaxGenerationStrategy, SyntaxGenerator, SyntaxModel, SyntaxStrategyRegistration,
    SyntaxStrategyRegistry, syntax_strategy,
};
