//! Syntax generation layer
//!
//! Syntax models describe code constructs; syntax strategies turn them into
//! text. Composite strategies call back into the [`SyntaxGenerator`] for every
//! nested model, so a whole document is produced from small leaf strategies.

pub mod models;
pub mod strategies;

pub use models::*;

use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::trace;

use crate::generation::registry::{
    AsAny, DEFAULT_PRIORITY, StrategyRegistration, StrategyRegistry, short_type_name,
};
use crate::generation::{Result, StrategyKind};

/// A code construct that can be rendered to text
pub trait SyntaxModel: Any + AsAny + Send + Sync + fmt::Debug {
    /// Nested models, in generation order
    fn children(&self) -> Vec<&dyn SyntaxModel> {
        Vec::new()
    }

    /// Imports this model needs by itself (not counting children)
    fn usings(&self) -> Vec<UsingModel> {
        Vec::new()
    }
}

/// Renders one concrete syntax model type
pub trait SyntaxGenerationStrategy<T: SyntaxModel>: Send + Sync {
    fn priority(&self) -> i32 {
        DEFAULT_PRIORITY
    }

    fn generate(&self, generator: &SyntaxGenerator, model: &T) -> Result<String>;
}

/// Type-erased [`SyntaxGenerationStrategy`] as stored in the registry
pub trait DynSyntaxStrategy: Send + Sync {
    fn generate_dyn(&self, generator: &SyntaxGenerator, model: &dyn SyntaxModel) -> Result<String>;
}

struct TypedSyntaxStrategy<T, S> {
    inner: S,
    _model: PhantomData<fn(&T)>,
}

impl<T, S> DynSyntaxStrategy for TypedSyntaxStrategy<T, S>
where
    T: SyntaxModel,
    S: SyntaxGenerationStrategy<T>,
{
    fn generate_dyn(&self, generator: &SyntaxGenerator, model: &dyn SyntaxModel) -> Result<String> {
        let model = model.as_any().downcast_ref::<T>().ok_or_else(|| {
            crate::generation::GenerationError::StrategyNotFound {
                kind: StrategyKind::Syntax,
                model_type: model.model_type_name().to_string(),
            }
        })?;
        self.inner.generate(generator, model)
    }
}

pub type SyntaxStrategyRegistration = StrategyRegistration<dyn DynSyntaxStrategy>;
pub type SyntaxStrategyRegistry = StrategyRegistry<dyn DynSyntaxStrategy>;

/// Register `strategy` for syntax model type `T` at the priority it declares
pub fn syntax_strategy<T, S>(strategy: S) -> SyntaxStrategyRegistration
where
    T: SyntaxModel,
    S: SyntaxGenerationStrategy<T> + 'static,
{
    let priority = strategy.priority();
    let erased: Arc<dyn DynSyntaxStrategy> = Arc::new(TypedSyntaxStrategy {
        inner: strategy,
        _model: PhantomData,
    });
    StrategyRegistration::new::<T>(short_type_name::<S>(), priority, erased)
}

/// Dispatches syntax models to their registered strategy
#[derive(Clone)]
pub struct SyntaxGenerator {
    registry: Arc<SyntaxStrategyRegistry>,
}

impl SyntaxGenerator {
    pub fn new(registry: Arc<SyntaxStrategyRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &SyntaxStrategyRegistry {
        &self.registry
    }

    /// Render `model` with the strategy registered for its runtime type
    pub fn generate(&self, model: &dyn SyntaxModel) -> Result<String> {
        let registration = self
            .registry
            .resolve(model.as_any().type_id(), model.model_type_name())?;
        trace!(
            model_type = model.model_type_name(),
            strategy = registration.strategy_name(),
            "Generating syntax"
        );
        registration.strategy().generate_dyn(self, model)
    }

    /// Render every model and join the results with `separator`
    pub fn generate_all<'a, I>(&self, models: I, separator: &str) -> Result<String>
    where
        I: IntoIterator<Item = &'a dyn SyntaxModel>,
    {
        let parts = models
            .into_iter()
            .map(|model| self.generate(model))
            .collect::<Result<Vec<_>>>()?;
        Ok(parts.join(separator))
    }
}

/// Every distinct import needed by `model` and its descendants, depth-first,
/// in first-seen order
pub fn collect_usings(model: &dyn SyntaxModel) -> Vec<UsingModel> {
    let mut seen = HashSet::new();
    let mut usings = Vec::new();
    visit_usings(model, &mut seen, &mut usings);
    usings
}

fn visit_usings(model: &dyn SyntaxModel, seen: &mut HashSet<String>, out: &mut Vec<UsingModel>) {
    for using in model.usings() {
        if seen.insert(using.name.clone()) {
            out.push(using);
        }
    }
    for child in model.children() {
        visit_usings(child, seen, out);
    }
}

/// Indent every non-empty line by four spaces
pub fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("    {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `{`, indented body, `}`; an empty body renders as `{\n}`
pub fn block(body: &str) -> String {
    if body.trim().is_empty() {
        "{\n}".to_string()
    } else {
        format!("{{\n{}\n}}", indent(body))
    }
}
