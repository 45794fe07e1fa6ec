//! Template lookup by name
//!
//! A template name is a slash separated path without the `.tera` suffix, for
//! example `methods/create` or `solution/Directory.Build.props`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rust_embed::RustEmbed;
use tracing::debug;

use crate::infrastructure::templates::TemplateError;

/// Suffix of template files, both embedded and on disk
pub const TEMPLATE_EXTENSION: &str = "tera";

/// Built-in templates compiled into the binary
#[derive(RustEmbed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

/// Finds the text of a named template
pub trait TemplateLocator: Send + Sync {
    /// Return the lines of the template called `name`; joined with `\n` they
    /// give back the source text, trailing newline included
    fn locate(&self, name: &str) -> Result<Vec<String>, TemplateError>;
}

/// Locator serving the templates embedded at compile time
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedTemplateLocator;

impl EmbeddedTemplateLocator {
    pub fn new() -> Self {
        Self
    }

    /// Names of all embedded templates, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = EmbeddedTemplates::iter()
            .map(|path| template_name(&path))
            .collect();
        names.sort();
        names
    }

    /// Write every embedded template below `output_dir`, returning the count
    pub fn export(&self, output_dir: &Path) -> std::io::Result<usize> {
        let mut count = 0;
        for path in EmbeddedTemplates::iter() {
            if let Some(file) = EmbeddedTemplates::get(&path) {
                let target = output_dir.join(&*path);
                if let Some(parent) = target.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&target, &file.data[..])?;
                count += 1;
            }
        }
        Ok(count)
    }
}

impl TemplateLocator for EmbeddedTemplateLocator {
    fn locate(&self, name: &str) -> Result<Vec<String>, TemplateError> {
        let file = EmbeddedTemplates::get(&format!("{name}.{TEMPLATE_EXTENSION}"))
            .or_else(|| EmbeddedTemplates::get(name))
            .ok_or_else(|| TemplateError::not_found(name))?;

        let text = std::str::from_utf8(&file.data[..])
            .map_err(|e| TemplateError::render(name, format!("template is not UTF-8: {e}")))?;
        Ok(split_lines(text))
    }
}

/// Locator reading templates from a user directory, falling back to another
/// locator (usually the embedded one) for names the directory does not have.
pub struct FileSystemTemplateLocator {
    root: PathBuf,
    fallback: Option<Arc<dyn TemplateLocator>>,
}

impl FileSystemTemplateLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn TemplateLocator>) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

impl TemplateLocator for FileSystemTemplateLocator {
    fn locate(&self, name: &str) -> Result<Vec<String>, TemplateError> {
        let candidates = [
            self.root.join(format!("{name}.{TEMPLATE_EXTENSION}")),
            self.root.join(name),
        ];

        for candidate in &candidates {
            if candidate.is_file() {
                debug!(template = name, path = %candidate.display(), "Using override template");
                let text = std::fs::read_to_string(candidate)?;
                return Ok(split_lines(&text));
            }
        }

        match &self.fallback {
            Some(fallback) => fallback.locate(name),
            None => Err(TemplateError::not_found(name)),
        }
    }
}

fn template_name(path: &str) -> String {
    path.strip_suffix(&format!(".{TEMPLATE_EXTENSION}"))
        .unwrap_or(path)
        .to_string()
}

fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}
