//! Field, property and method strategies

use std::sync::Arc;

use crate::core::{NamingConventionConverter, Settings};
use crate::generation::syntax::{
    FieldModel, MethodKind, MethodModel, PropertyModel, SyntaxGenerationStrategy, SyntaxGenerator,
    block,
};
use crate::generation::{GenerationError, Result};
use crate::infrastructure::templates::{TemplateRenderer, TokenMap};

/// `private static readonly ILogger _logger = null!;`
pub struct FieldSyntaxStrategy;

impl SyntaxGenerationStrategy<FieldModel> for FieldSyntaxStrategy {
    fn generate(&self, generator: &SyntaxGenerator, model: &FieldModel) -> Result<String> {
        let mut text = model.access.to_string();
        if model.is_static {
            text.push_str(" static");
        }
        if model.is_readonly {
            text.push_str(" readonly");
        }
        text.push(' ');
        text.push_str(&generator.generate(&model.type_model)?);
        text.push(' ');
        text.push_str(&model.name);
        if let Some(initializer) = &model.initializer {
            text.push_str(" = ");
            text.push_str(initializer);
        }
        text.push(';');
        Ok(text)
    }
}

/// Attributes on their own lines, then
/// `public required string Name { get; set; } = string.Empty;`
pub struct PropertySyntaxStrategy;

impl SyntaxGenerationStrategy<PropertyModel> for PropertySyntaxStrategy {
    fn generate(&self, generator: &SyntaxGenerator, model: &PropertyModel) -> Result<String> {
        let mut lines = model
            .attributes
            .iter()
            .map(|attribute| generator.generate(attribute))
            .collect::<Result<Vec<_>>>()?;

        let mut declaration = String::new();
        if !model.is_interface {
            declaration.push_str(&model.access.to_string());
            declaration.push(' ');
        }
        if model.is_required {
            declaration.push_str("required ");
        }
        declaration.push_str(&generator.generate(&model.type_model)?);
        declaration.push(' ');
        declaration.push_str(&model.name);
        declaration.push(' ');
        declaration.push_str(&model.accessors.to_string());
        if let Some(initializer) = &model.initializer {
            declaration.push_str(" = ");
            declaration.push_str(initializer);
            declaration.push(';');
        }

        lines.push(declaration);
        Ok(lines.join("\n"))
    }
}

/// Every [`MethodKind`] goes through this strategy. Templated kinds take their
/// body from the kind's template unless the model carries an explicit one.
pub struct MethodSyntaxStrategy {
    templates: TemplateRenderer,
    settings: Arc<Settings>,
    naming: NamingConventionConverter,
}

impl MethodSyntaxStrategy {
    pub fn new(
        templates: TemplateRenderer,
        settings: Arc<Settings>,
        naming: NamingConventionConverter,
    ) -> Self {
        Self {
            templates,
            settings,
            naming,
        }
    }

    fn signature(&self, generator: &SyntaxGenerator, model: &MethodModel) -> Result<String> {
        let mut modifiers = Vec::new();
        if !model.is_interface {
            modifiers.push(model.access.to_string());
        }
        if model.is_static {
            modifiers.push("static".to_string());
        }
        if model.is_override {
            modifiers.push("override".to_string());
        }
        if model.is_async && !model.is_interface {
            modifiers.push("async".to_string());
        }

        if model.kind != MethodKind::Constructor {
            let return_type = match &model.return_type {
                Some(return_type) => generator.generate(return_type)?,
                None if model.is_async => "Task".to_string(),
                None => "void".to_string(),
            };
            modifiers.push(return_type);
        }

        let params = model
            .params
            .iter()
            .map(|param| generator.generate(param))
            .collect::<Result<Vec<_>>>()?;

        modifiers.push(format!("{}({})", model.name, params.join(", ")));
        Ok(modifiers.join(" "))
    }

    fn body(&self, generator: &SyntaxGenerator, model: &MethodModel) -> Result<Option<String>> {
        if let Some(body) = &model.body {
            return generator.generate(body).map(Some);
        }

        let Some(template) = model.kind.template_name() else {
            return Ok(None);
        };
        let entity = model.entity.as_deref().ok_or_else(|| {
            GenerationError::invalid_model(format!(
                "method `{}` of kind {:?} needs an entity",
                model.name, model.kind
            ))
        })?;

        let pascal = self.naming.to_pascal_case(entity);
        let tokens = TokenMap::new()
            .with_name("entityName", entity, &self.naming)
            .with("idPropertyName", self.settings.id_property_name(&pascal))
            .with("idType", self.settings.id_format.type_name());

        let body = self.templates.render(template, &tokens)?;
        Ok(Some(body.trim_end().to_string()))
    }
}

impl SyntaxGenerationStrategy<MethodModel> for MethodSyntaxStrategy {
    fn generate(&self, generator: &SyntaxGenerator, model: &MethodModel) -> Result<String> {
        let mut lines = model
            .attributes
            .iter()
            .map(|attribute| generator.generate(attribute))
            .collect::<Result<Vec<_>>>()?;

        let signature = self.signature(generator, model)?;
        match self.body(generator, model)? {
            Some(body) => {
                lines.push(signature);
                lines.push(block(&body));
            }
            None if model.is_interface => lines.push(format!("{signature};")),
            None => {
                lines.push(signature);
                lines.push(block(""));
            }
        }
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use crate::generation::GenerationError;
    use crate::generation::syntax::strategies::tests::generator;
    use crate::generation::syntax::*;

    #[test]
    fn test_private_readonly_field() {
        let field = FieldModel::private_readonly("_repository", TypeModel::new("IOrderRepository"));
        assert_eq!(
            generator().generate(&field).unwrap(),
            "private readonly IOrderRepository _repository;"
        );
    }

    #[test]
    fn test_property_with_attribute_and_initializer() {
        let property = PropertyModel::new("Name", TypeModel::new("string"))
            .with_attribute(AttributeModel::new("Required"))
            .with_initializer("string.Empty")
            .required();

        assert_eq!(
            generator().generate(&property).unwrap(),
            "[Required]\npublic required string Name { get; set; } = string.Empty;"
        );
    }

    #[test]
    fn test_interface_property_has_no_access_modifier() {
        let mut property = PropertyModel::new("Id", TypeModel::new("Guid"))
            .with_accessors(PropertyAccessors::GetOnly);
        property.is_interface = true;

        assert_eq!(generator().generate(&property).unwrap(), "Guid Id { get; }");
    }

    #[test]
    fn test_async_method_without_return_type_returns_task() {
        let method = MethodModel::new("SaveAsync")
            .asynchronous()
            .with_body(ExpressionModel::text("await Task.CompletedTask;"));

        assert_eq!(
            generator().generate(&method).unwrap(),
            "public async Task SaveAsync()\n{\n    await Task.CompletedTask;\n}"
        );
    }

    #[test]
    fn test_constructor_has_no_return_type() {
        let constructor = MethodModel::constructor("OrdersController")
            .with_param(ParamModel::new("repository", TypeModel::new("IOrderRepository")))
            .with_body(ExpressionModel::text("_repository = repository;"));

        assert_eq!(
            generator().generate(&constructor).unwrap(),
            "public OrdersController(IOrderRepository repository)\n\
             {\n    _repository = repository;\n}"
        );
    }

    #[test]
    fn test_interface_method_ends_with_semicolon() {
        let method = MethodModel::interface("GetByIdAsync")
            .asynchronous()
            .with_return_type(TypeModel::task_of(TypeModel::new("Order").nullable()))
            .with_param(ParamModel::new("id", TypeModel::new("Guid")));

        assert_eq!(
            generator().generate(&method).unwrap(),
            "Task<Order?> GetByIdAsync(Guid id);"
        );
    }

    #[test]
    fn test_empty_body_renders_braces() {
        let method = MethodModel::new("Noop").static_method();
        assert_eq!(
            generator().generate(&method).unwrap(),
            "public static void Noop()\n{\n}"
        );
    }

    #[test]
    fn test_templated_kinds_render_their_template() {
        let cases = [
            (MethodKind::Create, "_repository.AddAsync(order)"),
            (MethodKind::GetById, "_repository.GetByIdAsync(id)"),
            (MethodKind::GetAll, "_repository.GetAllAsync()"),
            (MethodKind::Update, "dto.OrderId"),
            (MethodKind::Delete, "_repository.DeleteAsync(id)"),
        ];

        let generator = generator();
        for (kind, expected) in cases {
            let method = MethodModel::templated("Handle", kind, "Order")
                .asynchronous()
                .with_attribute(AttributeModel::new("HttpPost"));
            let text = generator.generate(&method).unwrap();

            assert!(text.starts_with("[HttpPost]\npublic async Task Handle()\n{\n"), "{text}");
            assert!(text.contains(expected), "{kind:?}: {text}");
            assert!(!text.contains("{{"), "{kind:?} left a placeholder: {text}");
        }
    }

    #[test]
    fn test_explicit_body_overrides_template() {
        let method = MethodModel::templated("Delete", MethodKind::Delete, "Order")
            .with_body(ExpressionModel::text("throw new NotSupportedException();"));

        let text = generator().generate(&method).unwrap();
        assert!(text.contains("throw new NotSupportedException();"));
        assert!(!text.contains("DeleteAsync"));
    }

    #[test]
    fn test_templated_kind_without_entity_is_invalid() {
        let mut method = MethodModel::new("Create");
        method.kind = MethodKind::Create;

        let err = generator().generate(&method).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidModel(_)));
    }
}
