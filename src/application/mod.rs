//! Application layer - builds the engine and runs the use cases

pub mod dto;
pub mod engine;
pub mod errors;
pub mod generate_aggregate;
pub mod generate_solution;
pub mod template_management;

pub use dto::*;
pub use engine::{EngineBuilder, GenerationEngine};
pub use errors::*;
pub use generate_aggregate::GenerateAggregateUseCase;
pub use generate_solution::GenerateSolutionUseCase;
pub use template_management::*;
