//! Data Transfer Objects for application layer

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::application::ValidationError;
use crate::core::{GenerationEvent, NamingConventionConverter, Settings};
use crate::generation::artifacts::AggregatePropertyModel;
use crate::generation::syntax::TypeModel;

static NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)*$").expect("valid regex")
});

static PROPERTY_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"));

static TYPE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*(<[A-Za-z0-9_., <>]+>)?$").expect("valid regex")
});

/// Types from `System` that are not keywords
const SYSTEM_TYPES: [&str; 5] = ["Guid", "DateTime", "DateTimeOffset", "DateOnly", "TimeSpan"];

/// Shape of a generated solution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolutionLayout {
    /// One web API project
    #[default]
    Single,
    /// `src/` with API, domain and infrastructure projects plus `tests/`
    Microservice,
}

impl FromStr for SolutionLayout {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" => Ok(SolutionLayout::Single),
            "microservice" => Ok(SolutionLayout::Microservice),
            _ => Err(ValidationError::UnknownLayout(s.to_string())),
        }
    }
}

impl fmt::Display for SolutionLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionLayout::Single => write!(f, "single"),
            SolutionLayout::Microservice => write!(f, "microservice"),
        }
    }
}

/// Request to generate a solution
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateSolutionRequest {
    pub name: String,
    pub layout: SolutionLayout,
    pub output_dir: PathBuf,
}

impl GenerateSolutionRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }
}

/// Response from solution generation
#[derive(Debug, Clone)]
pub struct GenerateSolutionResponse {
    pub solution_file: PathBuf,
    pub projects: Vec<String>,
    pub report: GenerationReport,
}

/// One `Name:type` property of an aggregate; a trailing `?` marks it nullable
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PropertyDefinition {
    pub name: String,
    pub type_name: String,
    #[serde(default)]
    pub nullable: bool,
}

impl PropertyDefinition {
    pub fn to_model(&self) -> AggregatePropertyModel {
        let mut type_model = TypeModel::new(&self.type_name);
        if SYSTEM_TYPES.contains(&self.type_name.as_str()) {
            type_model = type_model.in_namespace("System");
        }
        if self.nullable {
            type_model = type_model.nullable();
        }
        AggregatePropertyModel::new(&self.name, type_model)
    }
}

impl FromStr for PropertyDefinition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidProperty(s.to_string());

        let (name, type_name) = s.split_once(':').ok_or_else(invalid)?;
        let (name, type_name) = (name.trim(), type_name.trim());
        let (type_name, nullable) = match type_name.strip_suffix('?') {
            Some(stripped) => (stripped.trim_end(), true),
            None => (type_name, false),
        };

        if !PROPERTY_NAME.is_match(name) || !TYPE_NAME.is_match(type_name) {
            return Err(invalid());
        }

        Ok(Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            nullable,
        })
    }
}

/// Request to generate an aggregate
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateAggregateRequest {
    pub name: String,
    /// Namespace below the root namespace; defaults to the plural name
    pub namespace: Option<String>,
    pub properties: Vec<PropertyDefinition>,
    pub output_dir: PathBuf,
}

impl GenerateAggregateRequest {
    /// Properties are compared by the member name they generate, so
    /// `customer_name` and `CustomerName` collide, and none may take the
    /// identifier's name from `settings`.
    pub fn validate(&self, settings: &Settings) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        if let Some(namespace) = &self.namespace {
            validate_name(namespace)?;
        }

        let naming = NamingConventionConverter::new();
        let id_property = settings.id_property_name(&naming.to_pascal_case(&self.name));

        let mut seen = HashSet::new();
        for property in &self.properties {
            let member = naming.to_pascal_case(&property.name);
            if member.eq_ignore_ascii_case(&id_property) {
                return Err(ValidationError::ReservedProperty {
                    property: property.name.clone(),
                    id_property,
                });
            }
            if !seen.insert(member.to_lowercase()) {
                return Err(ValidationError::DuplicateProperty(property.name.clone()));
            }
        }
        Ok(())
    }
}

/// Response from aggregate generation
#[derive(Debug, Clone)]
pub struct GenerateAggregateResponse {
    pub folder: PathBuf,
    pub report: GenerationReport,
}

/// Everything a generation run did, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub events: Vec<GenerationEvent>,
}

impl GenerationReport {
    pub fn files_written(&self) -> Vec<&PathBuf> {
        self.events
            .iter()
            .filter_map(|event| match event {
                GenerationEvent::FileWritten(path) => Some(path),
                _ => None,
            })
            .collect()
    }

    pub fn directories_created(&self) -> Vec<&PathBuf> {
        self.events
            .iter()
            .filter_map(|event| match event {
                GenerationEvent::DirectoryCreated(path) => Some(path),
                _ => None,
            })
            .collect()
    }

    pub fn commands(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                GenerationEvent::CommandExecuted { command, .. } => Some(command.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Events with a visible effect, skipping strategy resolution
    pub fn effects(&self) -> impl Iterator<Item = &GenerationEvent> {
        self.events
            .iter()
            .filter(|event| !matches!(event, GenerationEvent::StrategyResolved { .. }))
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !NAME.is_match(name) {
        return Err(ValidationError::InvalidName(name.to_string()));
    }
    Ok(())
}
