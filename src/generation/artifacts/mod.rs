//! Artifact generation layer
//!
//! Artifact strategies turn models into filesystem changes and external
//! commands. The [`ArtifactGenerator`] only resolves and invokes strategies;
//! every side effect goes through the collaborators a strategy was built with.

pub mod models;
pub mod strategies;

pub use models::*;

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::core::{EventSubscriber, GenerationEvent};
use crate::generation::registry::{
    AsAny, DEFAULT_PRIORITY, StrategyRegistration, StrategyRegistry, short_type_name,
};
use crate::generation::{GenerationError, Result, StrategyKind};

/// A filesystem-level output
pub trait ArtifactModel: Any + AsAny + Send + Sync + fmt::Debug {
    /// Identifying fields, used in errors and logs
    fn describe(&self) -> String;
}

/// Generates one concrete artifact model type
#[async_trait]
pub trait ArtifactGenerationStrategy<T: ArtifactModel>: Send + Sync {
    fn priority(&self) -> i32 {
        DEFAULT_PRIORITY
    }

    async fn generate(&self, generator: &ArtifactGenerator, model: &T) -> Result<()>;
}

/// Type-erased [`ArtifactGenerationStrategy`] as stored in the registry
#[async_trait]
pub trait DynArtifactStrategy: Send + Sync {
    async fn generate_dyn(
        &self,
        generator: &ArtifactGenerator,
        model: &dyn ArtifactModel,
    ) -> Result<()>;
}

struct TypedArtifactStrategy<T, S> {
    inner: S,
    _model: PhantomData<fn(&T)>,
}

#[async_trait]
impl<T, S> DynArtifactStrategy for TypedArtifactStrategy<T, S>
where
    T: ArtifactModel,
    S: ArtifactGenerationStrategy<T>,
{
    async fn generate_dyn(
        &self,
        generator: &ArtifactGenerator,
        model: &dyn ArtifactModel,
    ) -> Result<()> {
        let typed = model.as_any().downcast_ref::<T>().ok_or_else(|| {
            GenerationError::StrategyNotFound {
                kind: StrategyKind::Artifact,
                model_type: model.model_type_name().to_string(),
            }
        })?;
        self.inner.generate(generator, typed).await
    }
}

pub type ArtifactStrategyRegistration = StrategyRegistration<dyn DynArtifactStrategy>;
pub type ArtifactStrategyRegistry = StrategyRegistry<dyn DynArtifactStrategy>;

/// Register `strategy` for artifact model type `T` at the priority it declares
pub fn artifact_strategy<T, S>(strategy: S) -> ArtifactStrategyRegistration
where
    T: ArtifactModel,
    S: ArtifactGenerationStrategy<T> + 'static,
{
    let priority = strategy.priority();
    let erased: Arc<dyn DynArtifactStrategy> = Arc::new(TypedArtifactStrategy {
        inner: strategy,
        _model: PhantomData,
    });
    StrategyRegistration::new::<T>(short_type_name::<S>(), priority, erased)
}

/// Dispatches artifact models to their registered strategy.
///
/// One generator serves one request: it carries that request's event
/// subscribers and cancellation token.
#[derive(Clone)]
pub struct ArtifactGenerator {
    registry: Arc<ArtifactStrategyRegistry>,
    subscribers: Vec<EventSubscriber>,
    cancellation: CancellationToken,
}

impl ArtifactGenerator {
    pub fn new(registry: Arc<ArtifactStrategyRegistry>) -> Self {
        Self {
            registry,
            subscribers: Vec::new(),
            cancellation: CancellationToken::new(),
        }
    }

    /// Receive every event of this generator's runs
    pub fn with_subscriber(mut self, subscriber: EventSubscriber) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Stop dispatching once `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    pub fn registry(&self) -> &ArtifactStrategyRegistry {
        &self.registry
    }

    /// Generate `model` with the strategy registered for its runtime type
    pub async fn generate(&self, model: &dyn ArtifactModel) -> Result<()> {
        self.ensure_active()?;

        let registration = self
            .registry
            .resolve(model.as_any().type_id(), model.model_type_name())?;

        debug!(
            model = %model.describe(),
            strategy = registration.strategy_name(),
            "Generating artifact"
        );
        self.publish(GenerationEvent::StrategyResolved {
            kind: StrategyKind::Artifact,
            model_type: model.model_type_name().to_string(),
            strategy: registration.strategy_name().to_string(),
        });

        registration.strategy().generate_dyn(self, model).await
    }

    /// Hand `event` to every subscriber, in registration order
    pub fn publish(&self, event: GenerationEvent) {
        for subscriber in &self.subscribers {
            subscriber(&event);
        }
    }

    /// Fail with [`GenerationError::Cancelled`] once the run was cancelled
    pub fn ensure_active(&self) -> Result<()> {
        if self.cancellation.is_cancelled() {
            return Err(GenerationError::Cancelled);
        }
        Ok(())
    }
}
