//! Composition root: builds both strategy registries and the dispatchers
//! from the built-in strategy lists plus any extra registrations

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::application::{ApplicationError, GenerationReport};
use crate::core::{EventSubscriber, GenerationEvent, NamingConventionConverter, Settings};
use crate::generation::artifacts::strategies::{self as artifact_strategies, ArtifactServices};
use crate::generation::syntax::strategies as syntax_strategies;
use crate::generation::{
    ArtifactGenerator, ArtifactModel, ArtifactStrategyRegistration, ArtifactStrategyRegistry,
    StrategyKind, SyntaxGenerator, SyntaxStrategyRegistration, SyntaxStrategyRegistry,
};
use crate::infrastructure::shell::{CommandExecutor, ShellCommandExecutor};
use crate::infrastructure::templates::{
    EmbeddedTemplateLocator, FileSystemTemplateLocator, TemplateLocator, TemplateRenderer,
    TeraTemplateProcessor,
};
use crate::infrastructure::{FileSystem, LocalFileSystem};

/// Configures a [`GenerationEngine`]
pub struct EngineBuilder {
    settings: Settings,
    filesystem: Arc<dyn FileSystem>,
    commands: Arc<dyn CommandExecutor>,
    template_dir: Option<PathBuf>,
    subscribers: Vec<EventSubscriber>,
    cancellation: CancellationToken,
    extra_syntax: Vec<SyntaxStrategyRegistration>,
    extra_artifacts: Vec<ArtifactStrategyRegistration>,
}

impl EngineBuilder {
    /// Local filesystem, real shell, embedded templates
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            filesystem: Arc::new(LocalFileSystem::new()),
            commands: Arc::new(ShellCommandExecutor::new()),
            template_dir: None,
            subscribers: Vec::new(),
            cancellation: CancellationToken::new(),
            extra_syntax: Vec::new(),
            extra_artifacts: Vec::new(),
        }
    }

    pub fn filesystem(mut self, filesystem: Arc<dyn FileSystem>) -> Self {
        self.filesystem = filesystem;
        self
    }

    pub fn commands(mut self, commands: Arc<dyn CommandExecutor>) -> Self {
        self.commands = commands;
        self
    }

    /// Directory whose templates override the embedded ones
    pub fn template_dir(mut self, template_dir: Option<PathBuf>) -> Self {
        self.template_dir = template_dir;
        self
    }

    pub fn subscriber(mut self, subscriber: EventSubscriber) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Register a syntax strategy next to the built-in ones
    pub fn syntax_strategy(mut self, registration: SyntaxStrategyRegistration) -> Self {
        self.extra_syntax.push(registration);
        self
    }

    /// Register an artifact strategy next to the built-in ones
    pub fn artifact_strategy(mut self, registration: ArtifactStrategyRegistration) -> Self {
        self.extra_artifacts.push(registration);
        self
    }

    /// Build the registries and fail on any ambiguous registration
    pub fn build(self) -> Result<GenerationEngine, ApplicationError> {
        self.settings.validate()?;
        let settings = Arc::new(self.settings);
        let naming = NamingConventionConverter::new();

        let embedded: Arc<dyn TemplateLocator> = Arc::new(EmbeddedTemplateLocator::new());
        let locator: Arc<dyn TemplateLocator> = match self.template_dir {
            Some(dir) => {
                debug!(dir = %dir.display(), "Using template overrides");
                Arc::new(FileSystemTemplateLocator::new(dir).with_fallback(embedded))
            }
            None => embedded,
        };
        let templates = TemplateRenderer::new(locator, Arc::new(TeraTemplateProcessor::new()));

        let mut syntax_registry = SyntaxStrategyRegistry::new(StrategyKind::Syntax);
        syntax_registry.extend(syntax_strategies::strategies(
            templates.clone(),
            settings.clone(),
            naming,
        ));
        syntax_registry.extend(self.extra_syntax);
        syntax_registry.validate()?;
        let syntax = SyntaxGenerator::new(Arc::new(syntax_registry));

        let services = ArtifactServices {
            filesystem: self.filesystem.clone(),
            commands: self.commands,
            syntax: syntax.clone(),
            templates,
            settings: settings.clone(),
            naming,
        };
        let mut artifact_registry = ArtifactStrategyRegistry::new(StrategyKind::Artifact);
        artifact_registry.extend(artifact_strategies::strategies(&services));
        artifact_registry.extend(self.extra_artifacts);
        artifact_registry.validate()?;

        debug!(
            syntax = syntax.registry().len(),
            artifact = artifact_registry.len(),
            "Strategy registries built"
        );

        let mut artifacts = ArtifactGenerator::new(Arc::new(artifact_registry))
            .with_cancellation(self.cancellation);
        for subscriber in self.subscribers {
            artifacts = artifacts.with_subscriber(subscriber);
        }

        Ok(GenerationEngine {
            settings,
            naming,
            filesystem: self.filesystem,
            artifacts,
            syntax,
        })
    }
}

/// Built engine shared by the use cases
pub struct GenerationEngine {
    settings: Arc<Settings>,
    naming: NamingConventionConverter,
    filesystem: Arc<dyn FileSystem>,
    artifacts: ArtifactGenerator,
    syntax: SyntaxGenerator,
}

impl GenerationEngine {
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn naming(&self) -> &NamingConventionConverter {
        &self.naming
    }

    pub fn filesystem(&self) -> &Arc<dyn FileSystem> {
        &self.filesystem
    }

    pub fn artifacts(&self) -> &ArtifactGenerator {
        &self.artifacts
    }

    pub fn syntax(&self) -> &SyntaxGenerator {
        &self.syntax
    }

    /// Generate one top-level model, recording every event of the run
    pub async fn generate(
        &self,
        model: &dyn ArtifactModel,
    ) -> Result<GenerationReport, ApplicationError> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let generator = self
            .artifacts
            .clone()
            .with_subscriber(Arc::new(move |event: &GenerationEvent| {
                if let Ok(mut events) = sink.lock() {
                    events.push(event.clone());
                }
            }));

        generator.generate(model).await?;

        let events = events.lock().map(|guard| guard.clone()).unwrap_or_default();
        Ok(GenerationReport { events })
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use async_trait::async_trait;

    use super::*;
    use crate::generation::artifacts::{FileContent, FileModel, artifact_strategy};
    use crate::generation::{ArtifactGenerationStrategy, GenerationError, Result};
    use crate::infrastructure::{DryRunCommandExecutor, MemoryFileSystem};

    struct SkipFiles;

    #[async_trait]
    impl ArtifactGenerationStrategy<FileModel> for SkipFiles {
        fn priority(&self) -> i32 {
            10
        }

        async fn generate(&self, _generator: &ArtifactGenerator, _model: &FileModel) -> Result<()> {
            Ok(())
        }
    }

    struct AlsoFiles;

    #[async_trait]
    impl ArtifactGenerationStrategy<FileModel> for AlsoFiles {
        async fn generate(&self, _generator: &ArtifactGenerator, _model: &FileModel) -> Result<()> {
            Ok(())
        }
    }

    fn builder(filesystem: Arc<MemoryFileSystem>) -> EngineBuilder {
        EngineBuilder::new(Settings::default())
            .filesystem(filesystem)
            .commands(Arc::new(DryRunCommandExecutor::new()))
    }

    #[tokio::test]
    async fn test_report_records_effects() {
        let filesystem = Arc::new(MemoryFileSystem::new());
        let engine = builder(filesystem.clone()).build().unwrap();

        let file = FileModel::new("Foo", "/out", "cs", FileContent::text("class Foo {}"));
        let report = engine.generate(&file).await.unwrap();

        assert_eq!(report.files_written(), vec![&PathBuf::from("/out/Foo.cs")]);
        assert_eq!(report.effects().count(), 1);
        assert_eq!(
            filesystem.read(Path::new("/out/Foo.cs")).as_deref(),
            Some("class Foo {}")
        );
    }

    #[tokio::test]
    async fn test_higher_priority_extension_replaces_builtin() {
        let filesystem = Arc::new(MemoryFileSystem::new());
        let engine = builder(filesystem.clone())
            .artifact_strategy(artifact_strategy::<FileModel, _>(SkipFiles))
            .build()
            .unwrap();

        let file = FileModel::new("Foo", "/out", "cs", FileContent::text(""));
        engine.generate(&file).await.unwrap();

        assert!(filesystem.operations().is_empty());
    }

    #[test]
    fn test_equal_priority_extension_fails_at_build() {
        let result = builder(Arc::new(MemoryFileSystem::new()))
            .artifact_strategy(artifact_strategy::<FileModel, _>(AlsoFiles))
            .build();

        match result {
            Err(ApplicationError::GenerationError(GenerationError::AmbiguousStrategy {
                model_type,
                strategies,
                ..
            })) => {
                assert_eq!(model_type, "FileModel");
                assert!(strategies.contains(&"AlsoFiles".to_string()));
                assert!(strategies.contains(&"FileArtifactStrategy".to_string()));
            }
            Err(other) => panic!("expected ambiguity, got {other:?}"),
            Ok(_) => panic!("expected ambiguity"),
        }
    }

    #[test]
    fn test_invalid_settings_fail_at_build() {
        let settings = Settings {
            root_namespace: "App..Broken".to_string(),
            ..Settings::default()
        };
        let result = EngineBuilder::new(settings).build();
        assert!(matches!(result, Err(ApplicationError::SettingsError(_))));
    }

    #[tokio::test]
    async fn test_cancelled_engine_generates_nothing() {
        let filesystem = Arc::new(MemoryFileSystem::new());
        let token = CancellationToken::new();
        token.cancel();
        let engine = builder(filesystem.clone()).cancellation(token).build().unwrap();

        let file = FileModel::new("Foo", "/out", "cs", FileContent::text(""));
        let err = engine.generate(&file).await.unwrap_err();

        assert!(matches!(
            err,
            ApplicationError::GenerationError(GenerationError::Cancelled)
        ));
        assert!(filesystem.operations().is_empty());
    }
}
