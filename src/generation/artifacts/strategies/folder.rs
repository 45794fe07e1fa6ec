use std::sync::Arc;

use async_trait::async_trait;

use crate::core::GenerationEvent;
use crate::generation::artifacts::strategies::reject_duplicate_files;
use crate::generation::artifacts::{
    ArtifactGenerationStrategy, ArtifactGenerator, ArtifactModel, FolderModel, by_priority,
};
use crate::generation::{GenerationError, Result};
use crate::infrastructure::FileSystem;

/// Creates the folder, then generates its files, its sub folders (by
/// priority) and finally its projects. The first failing child aborts the
/// remaining siblings; nothing already written is rolled back.
pub struct FolderArtifactStrategy {
    filesystem: Arc<dyn FileSystem>,
}

impl FolderArtifactStrategy {
    pub fn new(filesystem: Arc<dyn FileSystem>) -> Self {
        Self { filesystem }
    }
}

#[async_trait]
impl ArtifactGenerationStrategy<FolderModel> for FolderArtifactStrategy {
    async fn generate(&self, generator: &ArtifactGenerator, model: &FolderModel) -> Result<()> {
        reject_duplicate_files(model, &model.files)?;

        let path = model.path();
        self.filesystem
            .create_dir_all(&path)
            .await
            .map_err(|e| GenerationError::artifact(model.describe(), e))?;
        generator.publish(GenerationEvent::DirectoryCreated(path));

        for file in &model.files {
            generator.generate(file).await?;
        }
        for folder in by_priority(&model.sub_folders) {
            generator.generate(folder).await?;
        }
        for project in &model.projects {
            generator.generate(project).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use tokio_util::sync::CancellationToken;

    use crate::core::GenerationEvent;
    use crate::generation::artifacts::strategies::tests::harness;
    use crate::generation::artifacts::strategies::{FileArtifactStrategy, FolderArtifactStrategy};
    use crate::generation::artifacts::*;
    use crate::generation::syntax::strategies::tests::generator as syntax_generator;
    use crate::generation::{GenerationError, StrategyKind};
    use crate::infrastructure::templates::{
        EmbeddedTemplateLocator, TemplateRenderer, TeraTemplateProcessor,
    };
    use crate::infrastructure::{FileOperation, LocalFileSystem};

    fn sample_folder() -> FolderModel {
        let mut folder = FolderModel::new("Orders", "/out");
        folder
            .add_file("Order", "cs", FileContent::text("class Order {}"))
            .add_file("OrderDto", "cs", FileContent::text("record OrderDto;"));
        folder
            .add_sub_folder("Events", 0)
            .add_file("OrderPlaced", "cs", FileContent::text("record OrderPlaced;"));
        folder
    }

    #[tokio::test]
    async fn test_files_before_sub_folders() {
        let harness = harness();
        harness.generator.generate(&sample_folder()).await.unwrap();

        assert_eq!(
            harness.filesystem.operations(),
            vec![
                FileOperation::CreateDir(PathBuf::from("/out/Orders")),
                FileOperation::WriteFile(PathBuf::from("/out/Orders/Order.cs")),
                FileOperation::WriteFile(PathBuf::from("/out/Orders/OrderDto.cs")),
                FileOperation::CreateDir(PathBuf::from("/out/Orders/Events")),
                FileOperation::WriteFile(PathBuf::from("/out/Orders/Events/OrderPlaced.cs")),
            ]
        );
    }

    #[tokio::test]
    async fn test_generating_twice_gives_same_structure() {
        let harness = harness();
        let folder = sample_folder();

        harness.generator.generate(&folder).await.unwrap();
        let files_once = harness.filesystem.files();
        let directories_once = harness.filesystem.directories();

        harness.generator.generate(&folder).await.unwrap();
        assert_eq!(harness.filesystem.files(), files_once);
        assert_eq!(harness.filesystem.directories(), directories_once);
        assert_eq!(files_once.len(), 3);
    }

    #[tokio::test]
    async fn test_idempotent_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let filesystem = Arc::new(LocalFileSystem::new());
        let templates = TemplateRenderer::new(
            Arc::new(EmbeddedTemplateLocator::new()),
            Arc::new(TeraTemplateProcessor::new()),
        );

        let mut registry = ArtifactStrategyRegistry::new(StrategyKind::Artifact);
        registry.register(artifact_strategy::<FolderModel, _>(
            FolderArtifactStrategy::new(filesystem.clone()),
        ));
        registry.register(artifact_strategy::<FileModel, _>(FileArtifactStrategy::new(
            filesystem,
            syntax_generator(),
            templates,
        )));
        let generator = ArtifactGenerator::new(Arc::new(registry));

        let mut folder = FolderModel::new("Orders", dir.path());
        folder.add_file("Order", "cs", FileContent::text("class Order {}"));

        generator.generate(&folder).await.unwrap();
        generator.generate(&folder).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path().join("Orders"))
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("Orders/Order.cs")).unwrap(),
            "class Order {}"
        );
    }

    #[tokio::test]
    async fn test_sub_folders_in_priority_order() {
        let harness = harness();
        let mut parent = FolderModel::new("src", "/out");
        parent
            .add_sub_folder("Second", 2)
            .add_file("B", "cs", FileContent::text(""));
        parent
            .add_sub_folder("First", 1)
            .add_file("A", "cs", FileContent::text(""));

        harness.generator.generate(&parent).await.unwrap();

        let writes: Vec<_> = harness
            .filesystem
            .operations()
            .into_iter()
            .filter_map(|op| match op {
                FileOperation::WriteFile(path) => Some(path),
                FileOperation::CreateDir(_) => None,
            })
            .collect();
        assert_eq!(
            writes,
            vec![
                PathBuf::from("/out/src/First/A.cs"),
                PathBuf::from("/out/src/Second/B.cs"),
            ]
        );
    }

    #[tokio::test]
    async fn test_duplicate_sibling_paths_rejected_before_writing() {
        let harness = harness();
        let mut folder = FolderModel::new("Orders", "/out");
        folder
            .add_file("Order", "cs", FileContent::text("one"))
            .add_file("Order", ".cs", FileContent::text("two"));

        let err = harness.generator.generate(&folder).await.unwrap_err();

        assert!(matches!(err, GenerationError::InvalidModel(_)));
        assert!(harness.filesystem.operations().is_empty());
    }

    #[tokio::test]
    async fn test_cancellation_stops_between_siblings() {
        let token = CancellationToken::new();
        let trigger = token.clone();
        let harness = harness();
        let generator = harness
            .generator
            .with_cancellation(token)
            .with_subscriber(Arc::new(move |event: &GenerationEvent| {
                if matches!(event, GenerationEvent::FileWritten(_)) {
                    trigger.cancel();
                }
            }));

        let err = generator.generate(&sample_folder()).await.unwrap_err();

        assert!(matches!(err, GenerationError::Cancelled));
        // the first file completed; nothing after it started
        assert_eq!(harness.filesystem.files().len(), 1);
    }

    #[tokio::test]
    async fn test_records_generation_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let harness = harness();
        let generator = harness
            .generator
            .with_subscriber(Arc::new(move |event: &GenerationEvent| {
                if let GenerationEvent::DirectoryCreated(path) = event {
                    sink.lock().unwrap().push(path.clone());
                }
            }));

        let mut parent = FolderModel::new("src", "/out");
        parent.add_sub_folder("Low", 2);
        parent.add_sub_folder("High", 1);
        parent.add_sub_folder("AlsoLow", 2);
        generator.generate(&parent).await.unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec![
                PathBuf::from("/out/src"),
                PathBuf::from("/out/src/High"),
                PathBuf::from("/out/src/Low"),
                PathBuf::from("/out/src/AlsoLow"),
            ]
        );
    }
}
