use std::sync::Arc;

use async_trait::async_trait;

use crate::core::GenerationEvent;
use crate::generation::artifacts::{
    ArtifactGenerationStrategy, ArtifactGenerator, ArtifactModel, FileContent, FileModel,
};
use crate::generation::syntax::SyntaxGenerator;
use crate::generation::{GenerationError, Result};
use crate::infrastructure::FileSystem;
use crate::infrastructure::templates::TemplateRenderer;

/// Renders a file's content and writes it, replacing any existing file.
/// The parent directory is expected to exist.
pub struct FileArtifactStrategy {
    filesystem: Arc<dyn FileSystem>,
    syntax: SyntaxGenerator,
    templates: TemplateRenderer,
}

impl FileArtifactStrategy {
    pub fn new(
        filesystem: Arc<dyn FileSystem>,
        syntax: SyntaxGenerator,
        templates: TemplateRenderer,
    ) -> Self {
        Self {
            filesystem,
            syntax,
            templates,
        }
    }

    fn render(&self, content: &FileContent) -> Result<String> {
        match content {
            FileContent::Text(text) => Ok(text.clone()),
            FileContent::Syntax(model) => self.syntax.generate(model.as_ref()),
            FileContent::Template { name, tokens } => Ok(self.templates.render(name, tokens)?),
        }
    }
}

#[async_trait]
impl ArtifactGenerationStrategy<FileModel> for FileArtifactStrategy {
    async fn generate(&self, generator: &ArtifactGenerator, model: &FileModel) -> Result<()> {
        let text = self.render(&model.content)?;
        let path = model.path();

        self.filesystem
            .write_file(&path, &text)
            .await
            .map_err(|e| GenerationError::artifact(model.describe(), e))?;

        generator.publish(GenerationEvent::FileWritten(path));
        Ok(())
    }
}
