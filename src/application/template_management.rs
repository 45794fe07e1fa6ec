//! Template management use cases

use std::path::Path;

use crate::application::ApplicationError;
use crate::infrastructure::templates::EmbeddedTemplateLocator;

/// Use case for listing the embedded templates
pub struct ListTemplatesUseCase {
    locator: EmbeddedTemplateLocator,
}

impl ListTemplatesUseCase {
    pub fn new(locator: EmbeddedTemplateLocator) -> Self {
        Self { locator }
    }

    pub fn execute(&self) -> String {
        let mut output = String::from("Embedded templates:\n");
        for name in self.locator.names() {
            output.push_str(&format!("  {name}\n"));
        }
        output.push_str(
            "\nExport them with 'strategen templates export <dir>' \
             and pass --template-dir to override",
        );
        output
    }
}

/// Use case for copying the embedded templates to a directory for editing
pub struct ExportTemplatesUseCase {
    locator: EmbeddedTemplateLocator,
}

impl ExportTemplatesUseCase {
    pub fn new(locator: EmbeddedTemplateLocator) -> Self {
        Self { locator }
    }

    pub fn execute(&self, output_dir: &Path) -> Result<usize, ApplicationError> {
        Ok(self.locator.export(output_dir)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_list_templates() {
        let output = ListTemplatesUseCase::new(EmbeddedTemplateLocator::new()).execute();
        assert!(output.contains("  methods/create\n"));
        assert!(output.contains("  solution/README.md\n"));
    }

    #[test]
    fn test_export_templates() {
        let temp_dir = TempDir::new().unwrap();
        let count = ExportTemplatesUseCase::new(EmbeddedTemplateLocator::new())
            .execute(temp_dir.path())
            .unwrap();

        assert_eq!(count, EmbeddedTemplateLocator::new().names().len());
        assert!(temp_dir.path().join("methods/delete.tera").exists());
    }
}
