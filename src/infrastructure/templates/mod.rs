//! Template collaborators: named template lookup and token substitution

pub mod errors;
pub mod locator;
pub mod processor;
pub mod tokens;

pub use errors::*;
pub use locator::*;
pub use processor::*;
pub use tokens::*;
