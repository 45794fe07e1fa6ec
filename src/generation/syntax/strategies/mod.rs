//! Built-in syntax strategies

pub mod document;
pub mod leaf;
pub mod members;
pub mod types;

use std::sync::Arc;

use crate::core::{NamingConventionConverter, Settings};
use crate::generation::syntax::*;
use crate::infrastructure::templates::TemplateRenderer;

pub use document::*;
pub use leaf::*;
pub use members::*;
pub use types::*;

/// Registrations for every built-in syntax model type
pub fn strategies(
    templates: TemplateRenderer,
    settings: Arc<Settings>,
    naming: NamingConventionConverter,
) -> Vec<SyntaxStrategyRegistration> {
    vec![
        syntax_strategy::<TypeModel, _>(TypeSyntaxStrategy),
        syntax_strategy::<UsingModel, _>(UsingSyntaxStrategy),
        syntax_strategy::<AttributeModel, _>(AttributeSyntaxStrategy),
        syntax_strategy::<ParamModel, _>(ParamSyntaxStrategy),
        syntax_strategy::<ExpressionModel, _>(ExpressionSyntaxStrategy::new(templates.clone())),
        syntax_strategy::<FieldModel, _>(FieldSyntaxStrategy),
        syntax_strategy::<PropertyModel, _>(PropertySyntaxStrategy),
        syntax_strategy::<MethodModel, _>(MethodSyntaxStrategy::new(templates, settings, naming)),
        syntax_strategy::<ClassModel, _>(ClassSyntaxStrategy),
        syntax_strategy::<InterfaceModel, _>(InterfaceSyntaxStrategy),
        syntax_strategy::<RecordModel, _>(RecordSyntaxStrategy),
        syntax_strategy::<NamespaceModel, _>(NamespaceSyntaxStrategy),
        syntax_strategy::<DocumentModel, _>(DocumentSyntaxStrategy),
    ]
}
