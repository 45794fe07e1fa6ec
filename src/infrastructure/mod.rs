//! Infrastructure layer - concrete implementations of the engine's collaborators

pub mod filesystem;
pub mod shell;
pub mod templates;

pub use filesystem::*;
pub use shell::*;
pub use templates::*;
