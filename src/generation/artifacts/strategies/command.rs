use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::core::GenerationEvent;
use crate::generation::artifacts::{
    ArtifactGenerationStrategy, ArtifactGenerator, ArtifactModel, CommandMode, ShellCommandModel,
};
use crate::generation::{GenerationError, Result};
use crate::infrastructure::shell::CommandExecutor;

/// Runs external commands through the [`CommandExecutor`]
pub struct ShellCommandArtifactStrategy {
    commands: Arc<dyn CommandExecutor>,
}

impl ShellCommandArtifactStrategy {
    pub fn new(commands: Arc<dyn CommandExecutor>) -> Self {
        Self { commands }
    }
}

#[async_trait]
impl ArtifactGenerationStrategy<ShellCommandModel> for ShellCommandArtifactStrategy {
    async fn generate(
        &self,
        generator: &ArtifactGenerator,
        model: &ShellCommandModel,
    ) -> Result<()> {
        info!(
            command = %model.command,
            dir = %model.working_directory.display(),
            "Running command"
        );

        match model.mode {
            CommandMode::Wait => {
                let result = self
                    .commands
                    .execute(&model.command, &model.working_directory)
                    .await
                    .map_err(|e| GenerationError::artifact(model.describe(), e))?;

                if !result.is_success() {
                    return Err(GenerationError::artifact(
                        model.describe(),
                        format!(
                            "exited with code {}: {}",
                            result.exit_code,
                            result.stderr.trim()
                        ),
                    ));
                }
            }
            CommandMode::Detached => {
                self.commands
                    .spawn(&model.command, &model.working_directory)
                    .await
                    .map_err(|e| GenerationError::artifact(model.describe(), e))?;
            }
        }

        generator.publish(GenerationEvent::CommandExecuted {
            command: model.command.clone(),
            working_directory: model.working_directory.clone(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use async_trait::async_trait;
    use tracing_test::traced_test;

    use super::*;
    use crate::generation::StrategyKind;
    use crate::generation::artifacts::strategies::tests::harness;
    use crate::generation::artifacts::{ArtifactStrategyRegistry, artifact_strategy};
    use crate::infrastructure::shell::CommandResult;

    struct FailingExecutor;

    #[async_trait]
    impl CommandExecutor for FailingExecutor {
        async fn execute(&self, _command: &str, _working_dir: &Path) -> io::Result<CommandResult> {
            Ok(CommandResult {
                exit_code: 2,
                stdout: String::new(),
                stderr: "template not installed\n".to_string(),
            })
        }

        async fn spawn(&self, _command: &str, _working_dir: &Path) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no such program"))
        }
    }

    fn failing_generator() -> ArtifactGenerator {
        let mut registry = ArtifactStrategyRegistry::new(StrategyKind::Artifact);
        registry.register(artifact_strategy::<ShellCommandModel, _>(
            ShellCommandArtifactStrategy::new(Arc::new(FailingExecutor)),
        ));
        ArtifactGenerator::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn test_wait_and_detached_commands_are_executed() {
        let harness = harness();
        harness
            .generator
            .generate(&ShellCommandModel::new("dotnet new sln -n Shop -o Shop", "/out"))
            .await
            .unwrap();
        harness
            .generator
            .generate(&ShellCommandModel::new("dotnet watch run", "/out/Shop").detached())
            .await
            .unwrap();

        assert_eq!(
            harness.commands.commands(),
            vec![
                ("dotnet new sln -n Shop -o Shop".to_string(), PathBuf::from("/out")),
                ("dotnet watch run".to_string(), PathBuf::from("/out/Shop")),
            ]
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn test_commands_are_logged() {
        let harness = harness();
        harness
            .generator
            .generate(&ShellCommandModel::new("dotnet build", "/out/Shop"))
            .await
            .unwrap();

        assert!(logs_contain("Running command"));
        assert!(logs_contain("dotnet build"));
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_artifact_error() {
        let model = ShellCommandModel::new("dotnet new nope", "/out");
        let err = failing_generator().generate(&model).await.unwrap_err();

        match &err {
            GenerationError::ArtifactGeneration { model, .. } => {
                assert_eq!(model, "command `dotnet new nope` in /out");
            }
            other => panic!("expected artifact error, got {other:?}"),
        }
        assert!(err.to_string().contains("exited with code 2: template not installed"));
    }

    #[tokio::test]
    async fn test_spawn_failure_keeps_io_source() {
        let model = ShellCommandModel::new("ng serve", "/out/web").detached();
        let err = failing_generator().generate(&model).await.unwrap_err();

        let source = std::error::Error::source(&err).unwrap();
        let io_error = source.downcast_ref::<io::Error>().unwrap();
        assert_eq!(io_error.kind(), io::ErrorKind::NotFound);
    }
}
