use async_trait::async_trait;

use crate::generation::Result;
use crate::generation::artifacts::strategies::reject_duplicate_files;
use crate::generation::artifacts::{
    ArtifactGenerationStrategy, ArtifactGenerator, PackageModel, ProjectModel, ShellCommandModel,
    by_priority,
};
use crate::infrastructure::shell::{quote_argument, quote_path};

/// Scaffolds the project with `dotnet new`, adds its packages, then generates
/// its files and folders (by priority)
pub struct ProjectArtifactStrategy;

impl ProjectArtifactStrategy {
    /// `dotnet new webapi -n Shop.Api -o /out/Shop/Shop.Api`
    pub fn new_project_command(model: &ProjectModel) -> ShellCommandModel {
        ShellCommandModel::new(
            format!(
                "dotnet new {} -n {} -o {}",
                model.project_type.template_name(),
                quote_argument(&model.name),
                quote_path(&model.path())
            ),
            &model.directory,
        )
    }

    /// `dotnet add /out/Shop/Shop.Api/Shop.Api.csproj package Serilog --version 3.1.1`
    pub fn add_package_command(model: &ProjectModel, package: &PackageModel) -> ShellCommandModel {
        let mut command = format!(
            "dotnet add {} package {}",
            quote_path(&model.project_file()),
            quote_argument(&package.name)
        );
        if let Some(version) = &package.version {
            command.push_str(" --version ");
            command.push_str(&quote_argument(version));
        }
        ShellCommandModel::new(command, &model.directory)
    }
}

#[async_trait]
impl ArtifactGenerationStrategy<ProjectModel> for ProjectArtifactStrategy {
    async fn generate(&self, generator: &ArtifactGenerator, model: &ProjectModel) -> Result<()> {
        reject_duplicate_files(model, &model.files)?;

        generator
            .generate(&Self::new_project_command(model))
            .await?;

        for package in &model.packages {
            generator
                .generate(&Self::add_package_command(model, package))
                .await?;
        }
        for file in &model.files {
            generator.generate(file).await?;
        }
        for folder in by_priority(&model.folders) {
            generator.generate(folder).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::generation::GenerationError;
    use crate::generation::artifacts::strategies::tests::harness;
    use crate::generation::artifacts::*;
    use crate::infrastructure::FileOperation;

    #[tokio::test]
    async fn test_project_commands_then_content() {
        let harness = harness();
        let mut project = ProjectModel::new("Shop.Api", "/out/Shop", ProjectType::WebApi);
        project
            .add_package("Swashbuckle.AspNetCore", Some("6.5.0".to_string()))
            .add_package("Serilog", None)
            .add_file("appsettings", "json", FileContent::text("{}"));
        project
            .add_folder("Controllers", 0)
            .add_file("HomeController", "cs", FileContent::text(""));

        harness.generator.generate(&project).await.unwrap();

        let commands: Vec<_> = harness
            .commands
            .commands()
            .into_iter()
            .map(|(command, dir)| {
                assert_eq!(dir, PathBuf::from("/out/Shop"));
                command
            })
            .collect();
        assert_eq!(
            commands,
            vec![
                "dotnet new webapi -n Shop.Api -o /out/Shop/Shop.Api",
                "dotnet add /out/Shop/Shop.Api/Shop.Api.csproj package Swashbuckle.AspNetCore \
                 --version 6.5.0",
                "dotnet add /out/Shop/Shop.Api/Shop.Api.csproj package Serilog",
            ]
        );
        assert_eq!(
            harness.filesystem.operations(),
            vec![
                FileOperation::WriteFile(PathBuf::from("/out/Shop/Shop.Api/appsettings.json")),
                FileOperation::CreateDir(PathBuf::from("/out/Shop/Shop.Api/Controllers")),
                FileOperation::WriteFile(PathBuf::from(
                    "/out/Shop/Shop.Api/Controllers/HomeController.cs"
                )),
            ]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_paths_with_spaces_are_quoted() {
        let harness = harness();
        let mut project = ProjectModel::new("Shop.Api", "/tmp/my dir", ProjectType::WebApi);
        project.add_package("Serilog", None);

        harness.generator.generate(&project).await.unwrap();

        let commands: Vec<_> = harness
            .commands
            .commands()
            .into_iter()
            .map(|(command, _)| command)
            .collect();
        assert_eq!(
            commands,
            vec![
                "dotnet new webapi -n Shop.Api -o '/tmp/my dir/Shop.Api'",
                "dotnet add '/tmp/my dir/Shop.Api/Shop.Api.csproj' package Serilog",
            ]
        );
    }

    #[tokio::test]
    async fn test_duplicate_project_files_rejected_before_scaffolding() {
        let harness = harness();
        let mut project = ProjectModel::new("Shop.Api", "/out/Shop", ProjectType::WebApi);
        project
            .add_file("Startup", "cs", FileContent::text("one"))
            .add_file("Startup", ".cs", FileContent::text("two"));

        let err = harness.generator.generate(&project).await.unwrap_err();

        assert!(matches!(
            err,
            GenerationError::InvalidModel(ref msg) if msg.contains("Startup.cs")
        ));
        assert!(harness.commands.commands().is_empty());
        assert!(harness.filesystem.operations().is_empty());
    }
}
