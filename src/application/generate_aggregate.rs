//! Use case for generating an aggregate's source files

use std::sync::Arc;

use tracing::info;

use crate::application::{
    ApplicationError, GenerateAggregateRequest, GenerateAggregateResponse, GenerationEngine,
};
use crate::generation::artifacts::AggregateModel;

/// Use case for generating entity, DTO, repository and controller files
pub struct GenerateAggregateUseCase {
    engine: Arc<GenerationEngine>,
}

impl GenerateAggregateUseCase {
    pub fn new(engine: Arc<GenerationEngine>) -> Self {
        Self { engine }
    }

    pub async fn execute(
        &self,
        request: GenerateAggregateRequest,
    ) -> Result<GenerateAggregateResponse, ApplicationError> {
        request.validate(self.engine.settings())?;

        let naming = self.engine.naming();
        let plural = naming.to_plural(&naming.to_pascal_case(&request.name));
        let namespace = request.namespace.clone().unwrap_or_else(|| plural.clone());

        let mut model = AggregateModel::new(&request.name, &request.output_dir, &namespace);
        model.properties = request
            .properties
            .iter()
            .map(|property| property.to_model())
            .collect();

        info!(
            aggregate = %request.name,
            namespace = %self.engine.settings().namespace_for(&namespace),
            properties = model.properties.len(),
            "Generating aggregate"
        );

        self.engine
            .filesystem()
            .create_dir_all(&request.output_dir)
            .await?;

        let report = self.engine.generate(&model).await?;

        Ok(GenerateAggregateResponse {
            folder: request.output_dir.join(plural),
            report,
        })
    }
}
