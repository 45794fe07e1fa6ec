//! Ambient building blocks shared by the engine and the CLI: settings,
//! naming conventions and generation events.

pub mod config;
pub mod error;
pub mod events;
pub mod naming;

pub use config::{IdFormat, IdPropertyStyle, Settings};
pub use error::Error;
pub use events::{EventSubscriber, GenerationEvent};
pub use naming::NamingConventionConverter;
