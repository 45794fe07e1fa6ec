//! Namespace and document strategies

use crate::generation::Result;
use crate::generation::syntax::{
    DocumentModel, NamespaceModel, SyntaxGenerationStrategy, SyntaxGenerator, SyntaxModel, block,
    collect_usings,
};

/// Block-scoped `namespace X { ... }` with members separated by blank lines
pub struct NamespaceSyntaxStrategy;

impl SyntaxGenerationStrategy<NamespaceModel> for NamespaceSyntaxStrategy {
    fn generate(&self, generator: &SyntaxGenerator, model: &NamespaceModel) -> Result<String> {
        let members = generator.generate_all(
            model.members.iter().map(|m| m.as_ref() as &dyn SyntaxModel),
            "\n\n",
        )?;
        Ok(format!("namespace {}\n{}", model.name, block(&members)))
    }
}

/// A whole source file.
///
/// Layout: one `using` line per distinct import of the document and all its
/// descendants (first-seen order), a blank line when there were any, the
/// file-scoped namespace line and a blank line, then every code model
/// followed by a blank line.
pub struct DocumentSyntaxStrategy;

impl SyntaxGenerationStrategy<DocumentModel> for DocumentSyntaxStrategy {
    fn generate(&self, generator: &SyntaxGenerator, model: &DocumentModel) -> Result<String> {
        let mut text = String::new();

        let usings = collect_usings(model);
        for using in &usings {
            text.push_str(&generator.generate(using)?);
            text.push('\n');
        }
        if !usings.is_empty() {
            text.push('\n');
        }

        let namespace = model.full_namespace();
        if !namespace.is_empty() {
            text.push_str(&format!("namespace {namespace};\n\n"));
        }

        for code in &model.code {
            text.push_str(&generator.generate(code.as_ref())?);
            text.push_str("\n\n");
        }
        Ok(text)
    }
}
