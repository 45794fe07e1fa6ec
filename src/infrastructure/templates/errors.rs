//! Error types for the template infrastructure layer

use thiserror::Error;

/// Errors that can occur while locating or processing templates
#[derive(Error, Debug)]
pub enum TemplateError {
    /// No embedded or override template matches the requested name
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Template text could not be parsed or rendered
    #[error("Failed to render template '{name}': {message}")]
    Render { name: String, message: String },

    /// IO error while reading an override template
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl TemplateError {
    /// Create a new template not found error with the requested name
    pub fn not_found<S: Into<String>>(name: S) -> Self {
        Self::TemplateNotFound(name.into())
    }

    /// Create a new render error
    pub fn render<S: Into<String>, M: Into<String>>(name: S, message: M) -> Self {
        Self::Render {
            name: name.into(),
            message: message.into(),
        }
    }
}
