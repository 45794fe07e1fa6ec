//! strategen - scaffold solutions, projects and aggregates by dispatching
//! models to the highest priority strategy registered for their type.
#![deny(unsafe_code)]

pub mod application;
pub mod core;
pub mod generation;
pub mod infrastructure;
