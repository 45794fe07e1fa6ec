//! Artifact models: files, folders, projects, solutions and the commands that
//! scaffold them
//!
//! Paths are always derived from a name and the parent directory. The
//! `add_*` helpers fill in the child's directory from the parent's path.

use std::path::PathBuf;

use crate::generation::artifacts::ArtifactModel;
use crate::generation::syntax::{SyntaxModel, TypeModel};
use crate::infrastructure::templates::TokenMap;

/// What ends up inside a generated file
#[derive(Debug)]
pub enum FileContent {
    /// Literal text
    Text(String),
    /// A syntax tree rendered by the syntax generator
    Syntax(Box<dyn SyntaxModel>),
    /// A named template rendered with the given tokens
    Template { name: String, tokens: TokenMap },
}

impl FileContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn syntax(model: impl SyntaxModel) -> Self {
        Self::Syntax(Box::new(model))
    }

    pub fn template(name: impl Into<String>, tokens: TokenMap) -> Self {
        Self::Template {
            name: name.into(),
            tokens,
        }
    }
}

#[derive(Debug)]
pub struct FileModel {
    pub name: String,
    pub directory: PathBuf,
    /// With or without the leading dot; empty for extensionless files
    pub extension: String,
    pub content: FileContent,
}

impl FileModel {
    pub fn new(
        name: impl Into<String>,
        directory: impl Into<PathBuf>,
        extension: impl Into<String>,
        content: FileContent,
    ) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
            extension: extension.into(),
            content,
        }
    }

    /// `directory/name.extension`
    pub fn path(&self) -> PathBuf {
        if self.extension.is_empty() {
            return self.directory.join(&self.name);
        }
        let extension = self.extension.trim_start_matches('.');
        self.directory.join(format!("{}.{extension}", self.name))
    }
}

impl ArtifactModel for FileModel {
    fn describe(&self) -> String {
        format!("file {}", self.path().display())
    }
}

/// A directory with files, nested folders and projects
#[derive(Debug)]
pub struct FolderModel {
    pub name: String,
    pub directory: PathBuf,
    /// Lower priorities are generated first among siblings
    pub priority: i32,
    pub files: Vec<FileModel>,
    pub sub_folders: Vec<FolderModel>,
    pub projects: Vec<ProjectModel>,
}

impl FolderModel {
    pub fn new(name: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
            priority: 0,
            files: Vec::new(),
            sub_folders: Vec::new(),
            projects: Vec::new(),
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.name)
    }

    pub fn add_file(
        &mut self,
        name: impl Into<String>,
        extension: impl Into<String>,
        content: FileContent,
    ) -> &mut Self {
        let file = FileModel::new(name, self.path(), extension, content);
        self.files.push(file);
        self
    }

    /// Add an empty sub folder and return it for filling
    pub fn add_sub_folder(&mut self, name: impl Into<String>, priority: i32) -> &mut FolderModel {
        let folder = FolderModel::new(name, self.path()).with_priority(priority);
        push_last(&mut self.sub_folders, folder)
    }

    /// Add a project below this folder and return it for filling
    pub fn add_project(
        &mut self,
        name: impl Into<String>,
        project_type: ProjectType,
    ) -> &mut ProjectModel {
        let project = ProjectModel::new(name, self.path(), project_type);
        push_last(&mut self.projects, project)
    }

    fn collect_projects<'a>(&'a self, out: &mut Vec<&'a ProjectModel>) {
        for folder in by_priority(&self.sub_folders) {
            folder.collect_projects(out);
        }
        out.extend(&self.projects);
    }
}

impl ArtifactModel for FolderModel {
    fn describe(&self) -> String {
        format!("folder {}", self.path().display())
    }
}

/// `dotnet new` template of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    ClassLib,
    WebApi,
    Console,
    Worker,
    XUnit,
}

impl ProjectType {
    pub fn template_name(&self) -> &'static str {
        match self {
            ProjectType::ClassLib => "classlib",
            ProjectType::WebApi => "webapi",
            ProjectType::Console => "console",
            ProjectType::Worker => "worker",
            ProjectType::XUnit => "xunit",
        }
    }
}

/// Package reference added with `dotnet add package`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageModel {
    pub name: String,
    pub version: Option<String>,
}

#[derive(Debug)]
pub struct ProjectModel {
    pub name: String,
    pub directory: PathBuf,
    pub project_type: ProjectType,
    pub files: Vec<FileModel>,
    pub folders: Vec<FolderModel>,
    pub packages: Vec<PackageModel>,
}

impl ProjectModel {
    pub fn new(
        name: impl Into<String>,
        directory: impl Into<PathBuf>,
        project_type: ProjectType,
    ) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
            project_type,
            files: Vec::new(),
            folders: Vec::new(),
            packages: Vec::new(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.name)
    }

    /// `path/name.csproj`
    pub fn project_file(&self) -> PathBuf {
        self.path().join(format!("{}.csproj", self.name))
    }

    pub fn add_file(
        &mut self,
        name: impl Into<String>,
        extension: impl Into<String>,
        content: FileContent,
    ) -> &mut Self {
        let file = FileModel::new(name, self.path(), extension, content);
        self.files.push(file);
        self
    }

    pub fn add_folder(&mut self, name: impl Into<String>, priority: i32) -> &mut FolderModel {
        let folder = FolderModel::new(name, self.path()).with_priority(priority);
        push_last(&mut self.folders, folder)
    }

    pub fn add_package(&mut self, name: impl Into<String>, version: Option<String>) -> &mut Self {
        self.packages.push(PackageModel {
            name: name.into(),
            version,
        });
        self
    }
}

impl ArtifactModel for ProjectModel {
    fn describe(&self) -> String {
        format!(
            "{} project {}",
            self.project_type.template_name(),
            self.path().display()
        )
    }
}

#[derive(Debug)]
pub struct SolutionModel {
    pub name: String,
    /// Directory the solution directory is created in
    pub directory: PathBuf,
    pub files: Vec<FileModel>,
    pub folders: Vec<FolderModel>,
    pub projects: Vec<ProjectModel>,
}

impl SolutionModel {
    pub fn new(name: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
            files: Vec::new(),
            folders: Vec::new(),
            projects: Vec::new(),
        }
    }

    /// `directory/name`
    pub fn solution_directory(&self) -> PathBuf {
        self.directory.join(&self.name)
    }

    /// `directory/name/name.sln`
    pub fn solution_file(&self) -> PathBuf {
        self.solution_directory().join(format!("{}.sln", self.name))
    }

    pub fn add_file(
        &mut self,
        name: impl Into<String>,
        extension: impl Into<String>,
        content: FileContent,
    ) -> &mut Self {
        let file = FileModel::new(name, self.solution_directory(), extension, content);
        self.files.push(file);
        self
    }

    pub fn add_folder(&mut self, name: impl Into<String>, priority: i32) -> &mut FolderModel {
        let folder = FolderModel::new(name, self.solution_directory()).with_priority(priority);
        push_last(&mut self.folders, folder)
    }

    pub fn add_project(
        &mut self,
        name: impl Into<String>,
        project_type: ProjectType,
    ) -> &mut ProjectModel {
        let project = ProjectModel::new(name, self.solution_directory(), project_type);
        push_last(&mut self.projects, project)
    }

    /// Every project of the solution, in generation order
    pub fn all_projects(&self) -> Vec<&ProjectModel> {
        let mut projects = Vec::new();
        for folder in by_priority(&self.folders) {
            folder.collect_projects(&mut projects);
        }
        projects.extend(&self.projects);
        projects
    }
}

impl ArtifactModel for SolutionModel {
    fn describe(&self) -> String {
        format!("solution {}", self.solution_file().display())
    }
}

/// Whether to wait for a shell command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommandMode {
    /// Run to completion; a non-zero exit code fails the generation
    #[default]
    Wait,
    /// Start and move on
    Detached,
}

/// An external command run as part of a generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommandModel {
    pub command: String,
    pub working_directory: PathBuf,
    pub mode: CommandMode,
}

impl ShellCommandModel {
    pub fn new(command: impl Into<String>, working_directory: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            working_directory: working_directory.into(),
            mode: CommandMode::Wait,
        }
    }

    pub fn detached(mut self) -> Self {
        self.mode = CommandMode::Detached;
        self
    }
}

impl ArtifactModel for ShellCommandModel {
    fn describe(&self) -> String {
        format!(
            "command `{}` in {}",
            self.command,
            self.working_directory.display()
        )
    }
}

/// One property of an aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatePropertyModel {
    pub name: String,
    pub type_model: TypeModel,
}

impl AggregatePropertyModel {
    pub fn new(name: impl Into<String>, type_model: TypeModel) -> Self {
        Self {
            name: name.into(),
            type_model,
        }
    }
}

/// A domain aggregate, expanded into entity, DTO, repository and controller
/// files inside a folder named after the plural of the aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateModel {
    pub name: String,
    pub directory: PathBuf,
    /// Namespace below the root namespace, e.g. `Orders`
    pub namespace: String,
    pub properties: Vec<AggregatePropertyModel>,
}

impl AggregateModel {
    pub fn new(
        name: impl Into<String>,
        directory: impl Into<PathBuf>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
            namespace: namespace.into(),
            properties: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, type_model: TypeModel) -> Self {
        self.properties.push(AggregatePropertyModel::new(name, type_model));
        self
    }
}

impl ArtifactModel for AggregateModel {
    fn describe(&self) -> String {
        format!("aggregate {} in {}", self.name, self.directory.display())
    }
}

/// Folders sorted by priority; equal priorities keep their list order
pub fn by_priority(folders: &[FolderModel]) -> Vec<&FolderModel> {
    let mut sorted: Vec<&FolderModel> = folders.iter().collect();
    sorted.sort_by_key(|folder| folder.priority);
    sorted
}

fn push_last<T>(items: &mut Vec<T>, item: T) -> &mut T {
    items.push(item);
    let last = items.len() - 1;
    &mut items[last]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_path_adds_missing_dot() {
        let with_dot = FileModel::new("Foo", "/out", ".cs", FileContent::text(""));
        let without_dot = FileModel::new("Foo", "/out", "cs", FileContent::text(""));
        let none = FileModel::new("Dockerfile", "/out", "", FileContent::text(""));

        assert_eq!(with_dot.path(), PathBuf::from("/out/Foo.cs"));
        assert_eq!(without_dot.path(), PathBuf::from("/out/Foo.cs"));
        assert_eq!(none.path(), PathBuf::from("/out/Dockerfile"));
    }

    #[test]
    fn test_children_derive_directories() {
        let mut solution = SolutionModel::new("Shop", "/out");
        let project = solution.add_project("Shop.Api", ProjectType::WebApi);
        project
            .add_folder("Controllers", 0)
            .add_file("HomeController", "cs", FileContent::text(""));

        let project = &solution.projects[0];
        assert_eq!(project.path(), PathBuf::from("/out/Shop/Shop.Api"));
        assert_eq!(
            project.project_file(),
            PathBuf::from("/out/Shop/Shop.Api/Shop.Api.csproj")
        );
        assert_eq!(
            project.folders[0].files[0].path(),
            PathBuf::from("/out/Shop/Shop.Api/Controllers/HomeController.cs")
        );
        assert_eq!(solution.solution_file(), PathBuf::from("/out/Shop/Shop.sln"));
    }

    #[test]
    fn test_all_projects_follows_generation_order() {
        let mut solution = SolutionModel::new("Shop", "/out");
        solution.add_project("Shop.Tests", ProjectType::XUnit);
        solution
            .add_folder("services", 2)
            .add_project("Shop.Billing", ProjectType::WebApi);
        solution
            .add_folder("src", 1)
            .add_project("Shop.Api", ProjectType::WebApi);

        let names: Vec<_> = solution
            .all_projects()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Shop.Api", "Shop.Billing", "Shop.Tests"]);
    }

    #[test]
    fn test_by_priority_is_stable() {
        let folders = vec![
            FolderModel::new("b", "/").with_priority(1),
            FolderModel::new("a", "/").with_priority(0),
            FolderModel::new("c", "/").with_priority(1),
        ];
        let names: Vec<_> = by_priority(&folders)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
