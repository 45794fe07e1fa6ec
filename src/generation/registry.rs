//! Strategy registry shared by the artifact and syntax dispatchers
//!
//! Strategies are registered under the exact [`TypeId`] of the model they
//! handle. Resolution picks the highest priority registration for a model's
//! runtime type; there is no fallback to a "base" model type.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crate::generation::{GenerationError, Result, StrategyKind};

/// Priority of a strategy that does not ask for one
pub const DEFAULT_PRIORITY: i32 = 1;

/// Gives trait objects access to their concrete type
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;

    /// Unqualified name of the concrete type, e.g. `ClassModel`
    fn model_type_name(&self) -> &'static str;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn model_type_name(&self) -> &'static str {
        short_type_name::<T>()
    }
}

/// `strategen::generation::syntax::ClassModel` → `ClassModel`
pub fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    // generic arguments may contain `::` themselves
    let base = full.split('<').next().unwrap_or(full);
    let start = base.rfind("::").map(|i| i + 2).unwrap_or(0);
    &full[start..]
}

/// One registered strategy: the model type it handles, its priority and the
/// type-erased strategy itself
pub struct StrategyRegistration<S: ?Sized> {
    model_type: TypeId,
    model_type_name: &'static str,
    strategy_name: &'static str,
    priority: i32,
    strategy: Arc<S>,
}

impl<S: ?Sized> StrategyRegistration<S> {
    /// Register `strategy` for model type `M`
    pub fn new<M: Any>(strategy_name: &'static str, priority: i32, strategy: Arc<S>) -> Self {
        Self {
            model_type: TypeId::of::<M>(),
            model_type_name: short_type_name::<M>(),
            strategy_name,
            priority,
            strategy,
        }
    }

    /// Override the priority the strategy declared
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn model_type(&self) -> TypeId {
        self.model_type
    }

    pub fn model_type_name(&self) -> &'static str {
        self.model_type_name
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy_name
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn strategy(&self) -> &Arc<S> {
        &self.strategy
    }
}

/// All strategies of one [`StrategyKind`], indexed by handled model type
pub struct StrategyRegistry<S: ?Sized> {
    kind: StrategyKind,
    entries: HashMap<TypeId, Vec<StrategyRegistration<S>>>,
}

impl<S: ?Sized> StrategyRegistry<S> {
    pub fn new(kind: StrategyKind) -> Self {
        Self {
            kind,
            entries: HashMap::new(),
        }
    }

    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    /// Record a strategy under its model type
    pub fn register(&mut self, registration: StrategyRegistration<S>) {
        self.entries
            .entry(registration.model_type)
            .or_default()
            .push(registration);
    }

    /// Register a module's strategy list
    pub fn extend(&mut self, registrations: impl IntoIterator<Item = StrategyRegistration<S>>) {
        for registration in registrations {
            self.register(registration);
        }
    }

    /// Find the single registration for a model's exact runtime type
    pub fn resolve(
        &self,
        model_type: TypeId,
        model_type_name: &str,
    ) -> Result<&StrategyRegistration<S>> {
        let candidates = self
            .entries
            .get(&model_type)
            .filter(|candidates| !candidates.is_empty())
            .ok_or_else(|| GenerationError::StrategyNotFound {
                kind: self.kind,
                model_type: model_type_name.to_string(),
            })?;

        let top = top_priority(candidates);
        if top.len() > 1 {
            return Err(self.ambiguous(model_type_name, &top));
        }

        Ok(top[0])
    }

    /// Report the first model type whose top priority is shared by more than
    /// one strategy. Meant to run once, right after the registry is built.
    pub fn validate(&self) -> Result<()> {
        let mut types: Vec<_> = self.entries.values().collect();
        // deterministic error for the same registry
        types.sort_by_key(|candidates| candidates.first().map(|r| r.model_type_name));

        for candidates in types {
            let top = top_priority(candidates);
            if top.len() > 1 {
                return Err(self.ambiguous(top[0].model_type_name, &top));
            }
        }
        Ok(())
    }

    /// Every registration, sorted by model type name then priority (highest
    /// first)
    pub fn registrations(&self) -> Vec<&StrategyRegistration<S>> {
        let mut all: Vec<_> = self.entries.values().flatten().collect();
        all.sort_by(|a, b| {
            a.model_type_name
                .cmp(b.model_type_name)
                .then(b.priority.cmp(&a.priority))
        });
        all
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ambiguous(
        &self,
        model_type_name: &str,
        top: &[&StrategyRegistration<S>],
    ) -> GenerationError {
        GenerationError::AmbiguousStrategy {
            kind: self.kind,
            model_type: model_type_name.to_string(),
            priority: top[0].priority,
            strategies: top.iter().map(|r| r.strategy_name.to_string()).collect(),
        }
    }
}

fn top_priority<S: ?Sized>(
    candidates: &[StrategyRegistration<S>],
) -> Vec<&StrategyRegistration<S>> {
    let Some(max) = candidates.iter().map(|r| r.priority).max() else {
        return Vec::new();
    };
    candidates.iter().filter(|r| r.priority == max).collect()
}
