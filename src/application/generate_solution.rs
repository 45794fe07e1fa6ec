//! Use case for generating a solution skeleton

use std::sync::Arc;

use tracing::info;

use crate::application::{
    ApplicationError, GenerateSolutionRequest, GenerateSolutionResponse, GenerationEngine,
    SolutionLayout,
};
use crate::core::Settings;
use crate::generation::artifacts::{FileContent, ProjectType, SolutionModel};
use crate::infrastructure::templates::TokenMap;

const SWAGGER_PACKAGE: &str = "Swashbuckle.AspNetCore";

/// Use case for generating a solution with its projects and shared build files
pub struct GenerateSolutionUseCase {
    engine: Arc<GenerationEngine>,
}

impl GenerateSolutionUseCase {
    pub fn new(engine: Arc<GenerationEngine>) -> Self {
        Self { engine }
    }

    pub async fn execute(
        &self,
        request: GenerateSolutionRequest,
    ) -> Result<GenerateSolutionResponse, ApplicationError> {
        request.validate()?;

        let model = solution_model(&request, self.engine.settings());
        info!(
            solution = %request.name,
            layout = %request.layout,
            directory = %request.output_dir.display(),
            "Generating solution"
        );

        // The solution directory itself is created by `dotnet new sln`
        self.engine
            .filesystem()
            .create_dir_all(&request.output_dir)
            .await?;

        let report = self.engine.generate(&model).await?;

        let projects = model
            .all_projects()
            .iter()
            .map(|project| project.name.clone())
            .collect();

        info!(
            files = report.files_written().len(),
            commands = report.commands().len(),
            "Solution generated"
        );

        Ok(GenerateSolutionResponse {
            solution_file: model.solution_file(),
            projects,
            report,
        })
    }
}

/// Build the solution model for a request without touching anything
pub fn solution_model(request: &GenerateSolutionRequest, settings: &Settings) -> SolutionModel {
    let name = &request.name;
    let mut solution = SolutionModel::new(name, &request.output_dir);

    let build_tokens = TokenMap::new()
        .with("targetFramework", &settings.target_framework)
        .with("nullable", if settings.nullable { "enable" } else { "disable" })
        .with("rootNamespace", &settings.root_namespace);
    solution.add_file(
        "Directory.Build",
        "props",
        FileContent::template("solution/Directory.Build.props", build_tokens),
    );

    let api = format!("{name}.Api");
    match request.layout {
        SolutionLayout::Single => {
            solution.add_project(&api, ProjectType::WebApi);
        }
        SolutionLayout::Microservice => {
            let src = solution.add_folder("src", 1);
            src.add_project(&api, ProjectType::WebApi)
                .add_package(SWAGGER_PACKAGE, None);
            src.add_project(format!("{name}.Domain"), ProjectType::ClassLib);
            src.add_project(format!("{name}.Infrastructure"), ProjectType::ClassLib);

            solution
                .add_folder("tests", 2)
                .add_project(format!("{name}.Tests"), ProjectType::XUnit);
        }
    }

    let layout = solution
        .all_projects()
        .iter()
        .map(|project| {
            let relative = project
                .path()
                .strip_prefix(solution.solution_directory())
                .map(|path| path.display().to_string())
                .unwrap_or_else(|_| project.name.clone());
            format!("- `{relative}` ({})", project.project_type.template_name())
        })
        .collect::<Vec<_>>()
        .join("\n");
    let readme_tokens = TokenMap::new()
        .with("solutionName", name)
        .with("layout", layout);
    solution.add_file(
        "README",
        "md",
        FileContent::template("solution/README.md", readme_tokens),
    );

    solution
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::application::EngineBuilder;
    use crate::infrastructure::{DryRunCommandExecutor, MemoryFileSystem};

    fn request(layout: SolutionLayout) -> GenerateSolutionRequest {
        GenerateSolutionRequest {
            name: "Shop".to_string(),
            layout,
            output_dir: PathBuf::from("/out"),
        }
    }

    #[test]
    fn test_single_layout_model() {
        let model = solution_model(&request(SolutionLayout::Single), &Settings::default());

        let projects: Vec<_> = model.all_projects().iter().map(|p| p.name.clone()).collect();
        assert_eq!(projects, vec!["Shop.Api"]);
        assert_eq!(model.files.len(), 2);
        assert!(model.folders.is_empty());
    }

    #[test]
    fn test_microservice_layout_model() {
        let model = solution_model(&request(SolutionLayout::Microservice), &Settings::default());

        let projects: Vec<_> = model.all_projects().iter().map(|p| p.name.clone()).collect();
        assert_eq!(
            projects,
            vec!["Shop.Api", "Shop.Domain", "Shop.Infrastructure", "Shop.Tests"]
        );
        let api = model.all_projects()[0];
        assert_eq!(api.path(), PathBuf::from("/out/Shop/src/Shop.Api"));
        assert_eq!(api.packages[0].name, SWAGGER_PACKAGE);
    }

    #[tokio::test]
    async fn test_execute_runs_dotnet_and_writes_build_files() {
        let filesystem = Arc::new(MemoryFileSystem::new());
        let commands = Arc::new(DryRunCommandExecutor::new());
        let engine = EngineBuilder::new(Settings::default())
            .filesystem(filesystem.clone())
            .commands(commands.clone())
            .build()
            .unwrap();
        let use_case = GenerateSolutionUseCase::new(Arc::new(engine));

        let response = use_case
            .execute(request(SolutionLayout::Microservice))
            .await
            .unwrap();

        assert_eq!(response.solution_file, PathBuf::from("/out/Shop/Shop.sln"));
        assert_eq!(response.projects.len(), 4);

        let props = filesystem
            .read(Path::new("/out/Shop/Directory.Build.props"))
            .unwrap();
        assert!(props.contains("<TargetFramework>net8.0</TargetFramework>"));
        assert!(props.contains("<Nullable>enable</Nullable>"));
        assert!(props.ends_with("</Project>\n"));

        let readme = filesystem.read(Path::new("/out/Shop/README.md")).unwrap();
        assert!(readme.contains("- `src/Shop.Api` (webapi)"));
        assert!(readme.contains("- `tests/Shop.Tests` (xunit)"));
        assert!(readme.ends_with("```\n"));

        let recorded: Vec<String> = commands.commands().into_iter().map(|(c, _)| c).collect();
        assert_eq!(recorded[0], "dotnet new sln -n Shop -o Shop");
        assert!(recorded.contains(&format!(
            "dotnet add {} package {SWAGGER_PACKAGE}",
            Path::new("/out/Shop/src/Shop.Api/Shop.Api.csproj").display()
        )));
        assert_eq!(
            recorded.iter().filter(|c| c.starts_with("dotnet sln")).count(),
            4
        );
        assert_eq!(response.report.commands().len(), recorded.len());
    }

    #[tokio::test]
    async fn test_invalid_name_is_rejected_before_generation() {
        let filesystem = Arc::new(MemoryFileSystem::new());
        let engine = EngineBuilder::new(Settings::default())
            .filesystem(filesystem.clone())
            .commands(Arc::new(DryRunCommandExecutor::new()))
            .build()
            .unwrap();
        let use_case = GenerateSolutionUseCase::new(Arc::new(engine));

        let mut invalid = request(SolutionLayout::Single);
        invalid.name = "my shop".to_string();
        let err = use_case.execute(invalid).await.unwrap_err();

        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert!(filesystem.operations().is_empty());
    }
}
