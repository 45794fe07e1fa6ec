//! Strategies for syntax models without composite structure

use crate::generation::Result;
use crate::generation::syntax::{
    AttributeModel, ExpressionModel, ParamModel, SyntaxGenerationStrategy, SyntaxGenerator,
    TypeModel, UsingModel,
};
use crate::infrastructure::templates::TemplateRenderer;

/// `Name<T1, T2>?`
pub struct TypeSyntaxStrategy;

impl SyntaxGenerationStrategy<TypeModel> for TypeSyntaxStrategy {
    fn generate(&self, generator: &SyntaxGenerator, model: &TypeModel) -> Result<String> {
        let mut text = model.name.clone();
        if !model.generic_types.is_empty() {
            let generics = model
                .generic_types
                .iter()
                .map(|generic| generator.generate(generic))
                .collect::<Result<Vec<_>>>()?;
            text.push('<');
            text.push_str(&generics.join(", "));
            text.push('>');
        }
        if model.nullable {
            text.push('?');
        }
        Ok(text)
    }
}

pub struct UsingSyntaxStrategy;

impl SyntaxGenerationStrategy<UsingModel> for UsingSyntaxStrategy {
    fn generate(&self, _generator: &SyntaxGenerator, model: &UsingModel) -> Result<String> {
        Ok(format!("using {};", model.name))
    }
}

/// `[Name]` or `[Name(arg1, arg2)]`
pub struct AttributeSyntaxStrategy;

impl SyntaxGenerationStrategy<AttributeModel> for AttributeSyntaxStrategy {
    fn generate(&self, _generator: &SyntaxGenerator, model: &AttributeModel) -> Result<String> {
        if model.arguments.is_empty() {
            Ok(format!("[{}]", model.name))
        } else {
            Ok(format!("[{}({})]", model.name, model.arguments.join(", ")))
        }
    }
}

/// `[FromBody] OrderDto dto = default`
pub struct ParamSyntaxStrategy;

impl SyntaxGenerationStrategy<ParamModel> for ParamSyntaxStrategy {
    fn generate(&self, generator: &SyntaxGenerator, model: &ParamModel) -> Result<String> {
        let mut text = String::new();
        if let Some(attribute) = &model.attribute {
            text.push_str(&generator.generate(attribute)?);
            text.push(' ');
        }
        text.push_str(&generator.generate(&model.type_model)?);
        text.push(' ');
        text.push_str(&model.name);
        if let Some(default_value) = &model.default_value {
            text.push_str(" = ");
            text.push_str(default_value);
        }
        Ok(text)
    }
}

/// Expressions are emitted verbatim, one statement per line for blocks and
/// through the template renderer for templated ones
pub struct ExpressionSyntaxStrategy {
    templates: TemplateRenderer,
}

impl ExpressionSyntaxStrategy {
    pub fn new(templates: TemplateRenderer) -> Self {
        Self { templates }
    }
}

impl SyntaxGenerationStrategy<ExpressionModel> for ExpressionSyntaxStrategy {
    fn generate(&self, generator: &SyntaxGenerator, model: &ExpressionModel) -> Result<String> {
        match model {
            ExpressionModel::Text(text) => Ok(text.clone()),
            ExpressionModel::Block(statements) => {
                let lines = statements
                    .iter()
                    .map(|statement| generator.generate(statement))
                    .collect::<Result<Vec<_>>>()?;
                Ok(lines.join("\n"))
            }
            ExpressionModel::Template { name, tokens } => {
                let text = self.templates.render(name, tokens)?;
                Ok(text.trim_end().to_string())
            }
        }
    }
}
