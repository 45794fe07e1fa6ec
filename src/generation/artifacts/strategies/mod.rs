//! Built-in artifact strategies

pub mod aggregate;
pub mod command;
pub mod file;
pub mod folder;
pub mod project;
pub mod solution;

use std::collections::HashSet;
use std::sync::Arc;

use crate::core::{NamingConventionConverter, Settings};
use crate::generation::artifacts::*;
use crate::generation::syntax::SyntaxGenerator;
use crate::generation::{GenerationError, Result};
use crate::infrastructure::shell::CommandExecutor;
use crate::infrastructure::templates::TemplateRenderer;
use crate::infrastructure::FileSystem;

pub use aggregate::*;
pub use command::*;
pub use file::*;
pub use folder::*;
pub use project::*;
pub use solution::*;

/// Collaborators the built-in artifact strategies are built with
#[derive(Clone)]
pub struct ArtifactServices {
    pub filesystem: Arc<dyn FileSystem>,
    pub commands: Arc<dyn CommandExecutor>,
    pub syntax: SyntaxGenerator,
    pub templates: TemplateRenderer,
    pub settings: Arc<Settings>,
    pub naming: NamingConventionConverter,
}

/// Registrations for every built-in artifact model type
pub fn strategies(services: &ArtifactServices) -> Vec<ArtifactStrategyRegistration> {
    vec![
        artifact_strategy::<FileModel, _>(FileArtifactStrategy::new(
            services.filesystem.clone(),
            services.syntax.clone(),
            services.templates.clone(),
        )),
        artifact_strategy::<FolderModel, _>(FolderArtifactStrategy::new(
            services.filesystem.clone(),
        )),
        artifact_strategy::<ProjectModel, _>(ProjectArtifactStrategy),
        artifact_strategy::<SolutionModel, _>(SolutionArtifactStrategy),
        artifact_strategy::<ShellCommandModel, _>(ShellCommandArtifactStrategy::new(
            services.commands.clone(),
        )),
        artifact_strategy::<AggregateModel, _>(AggregateArtifactStrategy::new(
            services.settings.clone(),
            services.naming,
        )),
    ]
}

/// Sibling files must resolve to distinct paths; checked before anything of
/// `owner` is generated
pub(crate) fn reject_duplicate_files(owner: &dyn ArtifactModel, files: &[FileModel]) -> Result<()> {
    let mut seen = HashSet::new();
    for file in files {
        let path = file.path();
        if !seen.insert(path.clone()) {
            return Err(GenerationError::invalid_model(format!(
                "{} contains {} more than once",
                owner.describe(),
                path.display()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::generation::StrategyKind;
    use crate::generation::syntax::SyntaxStrategyRegistry;
    use crate::infrastructure::{
        DryRunCommandExecutor, EmbeddedTemplateLocator, MemoryFileSystem, TeraTemplateProcessor,
    };

    /// Built-in strategies over an in-memory filesystem and a recording
    /// command executor
    pub(crate) struct Harness {
        pub filesystem: Arc<MemoryFileSystem>,
        pub commands: Arc<DryRunCommandExecutor>,
        pub generator: ArtifactGenerator,
    }

    pub(crate) fn harness() -> Harness {
        let commands = Arc::new(DryRunCommandExecutor::new());
        let filesystem = Arc::new(MemoryFileSystem::new());
        let settings = Arc::new(Settings::default());
        let naming = NamingConventionConverter::new();
        let templates = TemplateRenderer::new(
            Arc::new(EmbeddedTemplateLocator::new()),
            Arc::new(TeraTemplateProcessor::new()),
        );

        let mut syntax = SyntaxStrategyRegistry::new(StrategyKind::Syntax);
        syntax.extend(crate::generation::syntax::strategies::strategies(
            templates.clone(),
            settings.clone(),
            naming,
        ));

        let services = ArtifactServices {
            filesystem: filesystem.clone(),
            commands: commands.clone(),
            syntax: SyntaxGenerator::new(Arc::new(syntax)),
            templates,
            settings,
            naming,
        };
        let mut registry = ArtifactStrategyRegistry::new(StrategyKind::Artifact);
        registry.extend(strategies(&services));

        Harness {
            filesystem,
            commands,
            generator: ArtifactGenerator::new(Arc::new(registry)),
        }
    }

    #[test]
    fn test_builtin_registry_is_unambiguous() {
        let harness = harness();
        assert!(harness.generator.registry().validate().is_ok());
        assert_eq!(harness.generator.registry().len(), 6);
    }
}
