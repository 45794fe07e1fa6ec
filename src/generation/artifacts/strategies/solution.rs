use async_trait::async_trait;

use crate::generation::Result;
use crate::generation::artifacts::strategies::reject_duplicate_files;
use crate::generation::artifacts::{
    ArtifactGenerationStrategy, ArtifactGenerator, ShellCommandModel, SolutionModel, by_priority,
};
use crate::infrastructure::shell::{quote_argument, quote_path};

/// Creates the solution with `dotnet new sln`, generates its files, folders
/// and projects, then adds every project of the tree to the solution file
pub struct SolutionArtifactStrategy;

#[async_trait]
impl ArtifactGenerationStrategy<SolutionModel> for SolutionArtifactStrategy {
    async fn generate(&self, generator: &ArtifactGenerator, model: &SolutionModel) -> Result<()> {
        reject_duplicate_files(model, &model.files)?;

        let name = quote_argument(&model.name);
        let create = ShellCommandModel::new(
            format!("dotnet new sln -n {name} -o {name}"),
            &model.directory,
        );
        generator.generate(&create).await?;

        for file in &model.files {
            generator.generate(file).await?;
        }
        for folder in by_priority(&model.folders) {
            generator.generate(folder).await?;
        }
        for project in &model.projects {
            generator.generate(project).await?;
        }

        let solution_file = model.solution_file();
        for project in model.all_projects() {
            let add = ShellCommandModel::new(
                format!(
                    "dotnet sln {} add {}",
                    quote_path(&solution_file),
                    quote_path(&project.project_file())
                ),
                model.solution_directory(),
            );
            generator.generate(&add).await?;
        }
        Ok(())
    }
}
