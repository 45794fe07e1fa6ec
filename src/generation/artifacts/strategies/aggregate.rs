//! Expands an aggregate into its entity, DTO, repository interface and
//! controller, all inside a folder named after the plural aggregate name

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::core::{NamingConventionConverter, Settings};
use crate::generation::artifacts::{
    AggregateModel, ArtifactGenerationStrategy, ArtifactGenerator, ArtifactModel, FileContent,
    FolderModel,
};
use crate::generation::syntax::*;
use crate::generation::{GenerationError, Result};

const MVC_NAMESPACE: &str = "Microsoft.AspNetCore.Mvc";

pub struct AggregateArtifactStrategy {
    settings: Arc<Settings>,
    naming: NamingConventionConverter,
}

/// Names derived once per aggregate
struct AggregateNames {
    entity: String,
    plural: String,
    dto: String,
    repository: String,
    controller: String,
    id_property: String,
}

impl AggregateArtifactStrategy {
    pub fn new(settings: Arc<Settings>, naming: NamingConventionConverter) -> Self {
        Self { settings, naming }
    }

    fn names(&self, model: &AggregateModel) -> AggregateNames {
        let entity = self.naming.to_pascal_case(&model.name);
        let plural = self.naming.to_plural(&entity);
        AggregateNames {
            dto: format!("{entity}Dto"),
            repository: format!("I{entity}Repository"),
            controller: format!("{plural}Controller"),
            id_property: self.settings.id_property_name(&entity),
            entity,
            plural,
        }
    }

    fn id_type(&self) -> TypeModel {
        let id_format = self.settings.id_format;
        let id_type = TypeModel::new(id_format.type_name());
        match id_format.namespace() {
            Some(namespace) => id_type.in_namespace(namespace),
            None => id_type,
        }
    }

    /// Every generated member name must be unique, the identifier included
    fn reject_colliding_properties(
        &self,
        model: &AggregateModel,
        names: &AggregateNames,
    ) -> Result<()> {
        let mut seen = HashSet::from([names.id_property.to_lowercase()]);
        for property in &model.properties {
            let member = self.naming.to_pascal_case(&property.name);
            if !seen.insert(member.to_lowercase()) {
                return Err(GenerationError::invalid_model(format!(
                    "{} declares property {member} more than once",
                    model.describe()
                )));
            }
        }
        Ok(())
    }

    /// The identifier followed by the declared properties
    fn properties(&self, model: &AggregateModel, names: &AggregateNames) -> Vec<PropertyModel> {
        let mut properties = vec![PropertyModel::new(&names.id_property, self.id_type())];
        for property in &model.properties {
            let mut generated = PropertyModel::new(
                self.naming.to_pascal_case(&property.name),
                property.type_model.clone(),
            );
            if property.type_model.name == "string" && !property.type_model.nullable {
                generated = generated.with_initializer("string.Empty");
            }
            properties.push(generated);
        }
        properties
    }

    fn document(&self, model: &AggregateModel, code: impl SyntaxModel) -> DocumentModel {
        DocumentModel::new("", &self.settings.root_namespace, &model.namespace).with_code(code)
    }

    fn entity(&self, model: &AggregateModel, names: &AggregateNames) -> ClassModel {
        let properties = self.properties(model, names);
        let assignments = |source: &str| -> Vec<ExpressionModel> {
            properties
                .iter()
                .map(|p| ExpressionModel::text(format!("    {} = {source}{},", p.name, p.name)))
                .collect()
        };

        let mut from_dto = vec![
            ExpressionModel::text(format!("return new {}", names.entity)),
            ExpressionModel::text("{"),
        ];
        from_dto.extend(assignments("dto."));
        from_dto.push(ExpressionModel::text("};"));

        let mut to_dto = vec![
            ExpressionModel::text(format!("return new {}", names.dto)),
            ExpressionModel::text("{"),
        ];
        to_dto.extend(assignments(""));
        to_dto.push(ExpressionModel::text("};"));

        let mut class = ClassModel::new(&names.entity);
        class.methods.push(
            MethodModel::new("FromDto")
                .static_method()
                .with_return_type(TypeModel::new(&names.entity))
                .with_param(ParamModel::new("dto", TypeModel::new(&names.dto)))
                .with_body(ExpressionModel::Block(from_dto)),
        );
        class.methods.push(
            MethodModel::new("ToDto")
                .with_return_type(TypeModel::new(&names.dto))
                .with_body(ExpressionModel::Block(to_dto)),
        );
        class.properties = properties;
        class
    }

    fn dto(&self, model: &AggregateModel, names: &AggregateNames) -> RecordModel {
        let mut record = RecordModel::new(&names.dto);
        record.properties = self
            .properties(model, names)
            .into_iter()
            .map(|p| p.with_accessors(PropertyAccessors::GetInit))
            .collect();
        record
    }

    fn repository(&self, names: &AggregateNames) -> InterfaceModel {
        let entity = TypeModel::new(&names.entity);
        let task = || TypeModel::new("Task").in_namespace("System.Threading.Tasks");

        let mut interface = InterfaceModel::new(&names.repository);
        interface.methods = vec![
            MethodModel::interface("GetByIdAsync")
                .with_return_type(TypeModel::task_of(entity.clone().nullable()))
                .with_param(ParamModel::new("id", self.id_type())),
            MethodModel::interface("GetAllAsync")
                .with_return_type(TypeModel::task_of(TypeModel::list_of(entity.clone()))),
            MethodModel::interface("AddAsync")
                .with_return_type(task())
                .with_param(ParamModel::new("entity", entity.clone())),
            MethodModel::interface("UpdateAsync")
                .with_return_type(task())
                .with_param(ParamModel::new("entity", entity)),
            MethodModel::interface("DeleteAsync")
                .with_return_type(task())
                .with_param(ParamModel::new("id", self.id_type())),
        ];
        interface
    }

    fn controller(&self, names: &AggregateNames) -> ClassModel {
        let action_result = || {
            TypeModel::task_of(TypeModel::new("IActionResult").in_namespace(MVC_NAMESPACE))
        };
        let http = |verb: &str, route: bool| {
            let attribute = AttributeModel::new(verb).in_namespace(MVC_NAMESPACE);
            if route {
                attribute.with_argument("\"{id}\"")
            } else {
                attribute
            }
        };
        let id_param = || ParamModel::new("id", self.id_type());
        let dto_param = || {
            ParamModel::new("dto", TypeModel::new(&names.dto))
                .with_attribute(AttributeModel::new("FromBody").in_namespace(MVC_NAMESPACE))
        };
        let action = |name: &str, kind: MethodKind| {
            MethodModel::templated(name, kind, &names.entity)
                .asynchronous()
                .with_return_type(action_result())
        };

        let mut class = ClassModel::new(&names.controller);
        class.attributes = vec![
            AttributeModel::new("ApiController").in_namespace(MVC_NAMESPACE),
            AttributeModel::new("Route").with_argument("\"api/[controller]\""),
        ];
        class.base_class = Some(TypeModel::new("ControllerBase").in_namespace(MVC_NAMESPACE));
        class.fields.push(FieldModel::private_readonly(
            "_repository",
            TypeModel::new(&names.repository),
        ));
        class.methods = vec![
            MethodModel::constructor(&names.controller)
                .with_param(ParamModel::new("repository", TypeModel::new(&names.repository)))
                .with_body(ExpressionModel::text("_repository = repository;")),
            action("Create", MethodKind::Create)
                .with_attribute(http("HttpPost", false))
                .with_param(dto_param()),
            action("GetById", MethodKind::GetById)
                .with_attribute(http("HttpGet", true))
                .with_param(id_param()),
            action("GetAll", MethodKind::GetAll)
                .with_attribute(http("HttpGet", false))
                .with_using("System.Linq"),
            action("Update", MethodKind::Update)
                .with_attribute(http("HttpPut", true))
                .with_param(id_param())
                .with_param(dto_param()),
            action("Delete", MethodKind::Delete)
                .with_attribute(http("HttpDelete", true))
                .with_param(id_param()),
        ];
        class
    }

    /// The folder the aggregate expands to
    pub fn folder(&self, model: &AggregateModel) -> Result<FolderModel> {
        if model.name.trim().is_empty() {
            return Err(GenerationError::invalid_model("aggregate name must not be empty"));
        }
        let names = self.names(model);
        self.reject_colliding_properties(model, &names)?;

        let mut folder = FolderModel::new(&names.plural, &model.directory);
        folder
            .add_file(
                &names.entity,
                "cs",
                FileContent::syntax(self.document(model, self.entity(model, &names))),
            )
            .add_file(
                &names.dto,
                "cs",
                FileContent::syntax(self.document(model, self.dto(model, &names))),
            )
            .add_file(
                &names.repository,
                "cs",
                FileContent::syntax(self.document(model, self.repository(&names))),
            )
            .add_file(
                &names.controller,
                "cs",
                FileContent::syntax(self.document(model, self.controller(&names))),
            );
        Ok(folder)
    }
}

#[async_trait]
impl ArtifactGenerationStrategy<AggregateModel> for AggregateArtifactStrategy {
    async fn generate(&self, generator: &ArtifactGenerator, model: &AggregateModel) -> Result<()> {
        let folder = self.folder(model)?;
        generator.generate(&folder).await
    }
}
