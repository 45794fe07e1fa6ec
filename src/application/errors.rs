//! Application layer error types

use thiserror::Error;

/// Application layer errors
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Generation error: {0}")]
    GenerationError(#[from] crate::generation::GenerationError),

    #[error("Settings error: {0}")]
    SettingsError(#[from] crate::core::Error),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Validation errors for requests
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Invalid name '{0}': use letters, digits, '.' and '_' and start with a letter")]
    InvalidName(String),

    #[error("Invalid property '{0}': expected Name:type or Name:type?")]
    InvalidProperty(String),

    #[error("Duplicate property '{0}'")]
    DuplicateProperty(String),

    #[error("Property '{property}' collides with the generated identifier '{id_property}'")]
    ReservedProperty {
        property: String,
        id_property: String,
    },

    #[error("Unknown layout '{0}': expected single or microservice")]
    UnknownLayout(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::GenerationError;

    #[test]
    fn test_errors_wrap_sources() {
        let error: ApplicationError = ValidationError::EmptyName.into();
        assert_eq!(error.to_string(), "Validation error: Name cannot be empty");

        let error: ApplicationError = GenerationError::Cancelled.into();
        assert!(matches!(error, ApplicationError::GenerationError(GenerationError::Cancelled)));

        let error: ApplicationError = crate::core::Error::config("bad").into();
        assert!(error.to_string().starts_with("Settings error:"));
    }
}
