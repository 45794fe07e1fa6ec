//! Generation settings
//!
//! Settings describe the naming conventions threaded through the strategies:
//! root namespace, identifier format, target framework. They are read once per
//! request and never mutated by the engine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{Error, Result};

/// File names probed, in order, inside an output directory.
pub const SETTINGS_FILE_NAMES: [&str; 3] = ["strategen.yaml", "strategen.yml", "strategen.toml"];

/// Generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Prefix of every generated namespace, e.g. `Contoso.Ordering`
    pub root_namespace: String,
    /// Solution name used when a request does not name one
    pub solution_name: Option<String>,
    /// Type of aggregate identifiers
    pub id_format: IdFormat,
    /// Naming style of the identifier property
    pub id_property: IdPropertyStyle,
    /// Target framework moniker written to `Directory.Build.props`
    pub target_framework: String,
    /// Whether nullable reference types are enabled for generated projects
    pub nullable: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root_namespace: "App".to_string(),
            solution_name: None,
            id_format: IdFormat::default(),
            id_property: IdPropertyStyle::default(),
            target_framework: "net8.0".to_string(),
            nullable: true,
        }
    }
}

/// Identifier type of generated aggregates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdFormat {
    #[default]
    Guid,
    Int,
    Long,
    String,
}

impl IdFormat {
    /// Type name as written in generated code
    pub fn type_name(&self) -> &'static str {
        match self {
            IdFormat::Guid => "Guid",
            IdFormat::Int => "int",
            IdFormat::Long => "long",
            IdFormat::String => "string",
        }
    }

    /// Namespace the identifier type lives in, if it needs an import
    pub fn namespace(&self) -> Option<&'static str> {
        match self {
            IdFormat::Guid => Some("System"),
            _ => None,
        }
    }
}

/// How the identifier property of an aggregate is named
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdPropertyStyle {
    /// `Id`
    Short,
    /// `{Aggregate}Id`, e.g. `OrderId`
    #[default]
    Prefixed,
}

impl Settings {
    /// Load settings from a YAML, TOML or JSON file, chosen by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();

        let settings: Settings = match extension.as_str() {
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            "toml" => toml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            other => {
                return Err(Error::config(format!(
                    "Unsupported settings format '{other}' for {}",
                    path.display()
                )));
            }
        };

        settings.validate()?;
        debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Find settings for a generation run.
    ///
    /// An explicit path wins; otherwise the output directory is probed for
    /// [`SETTINGS_FILE_NAMES`], then the user configuration directory for
    /// `strategen/settings.yaml`. Falls back to defaults.
    pub fn discover(explicit: Option<&Path>, output_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidates = SETTINGS_FILE_NAMES
            .iter()
            .map(|name| output_dir.join(name))
            .chain(user_settings_path());

        for candidate in candidates {
            if candidate.is_file() {
                return Self::load(&candidate);
            }
        }

        debug!("No settings file found, using defaults");
        Ok(Self::default())
    }

    /// Reject settings no strategy can work with
    pub fn validate(&self) -> Result<()> {
        if self.root_namespace.split('.').any(|part| part.trim().is_empty()) {
            return Err(Error::config(format!(
                "root_namespace '{}' must be a dotted identifier",
                self.root_namespace
            )));
        }
        if self.target_framework.trim().is_empty() {
            return Err(Error::config("target_framework must not be empty"));
        }
        Ok(())
    }

    /// Name of the identifier property of an aggregate, e.g. `OrderId`
    pub fn id_property_name(&self, aggregate: &str) -> String {
        match self.id_property {
            IdPropertyStyle::Short => "Id".to_string(),
            IdPropertyStyle::Prefixed => format!("{aggregate}Id"),
        }
    }

    /// `{root_namespace}.{suffix}`, skipping empty parts
    pub fn namespace_for(&self, suffix: &str) -> String {
        [self.root_namespace.as_str(), suffix]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(".")
    }
}

fn user_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("strategen").join("settings.yaml"))
}
