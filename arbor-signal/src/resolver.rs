//! The handler instantiation boundary.

use std::collections::HashMap;
use std::fmt;

use crate::slot::{SlotFactory, SlotHandle, SlotId};

/// Turns a handler identity into a live instance.
///
/// Supplied by the host; implementations may construct a fresh handler per
/// call or hand out a shared one, and may inject whatever dependencies the
/// handler's constructor needs. Returning `None` means "no instance", which
/// the signaler reports distinctly from a capability mismatch.
pub trait SlotResolver: Send + Sync {
    /// Resolve an identity to an instance, or `None` when unavailable.
    fn resolve(&self, id: &SlotId) -> Option<SlotHandle>;
}

/// Closure-factory resolver: the default service locator.
///
/// Factories capture their dependencies (typically `Arc`s) at registration
/// time, which is constructor injection without a container.
#[derive(Default)]
pub struct FactoryResolver {
    factories: HashMap<SlotId, SlotFactory>,
}

impl fmt::Debug for FactoryResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryResolver")
            .field("factories", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FactoryResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for handler type `H`.
    pub fn register<H: 'static>(
        &mut self,
        factory: impl Fn() -> SlotHandle + Send + Sync + 'static,
    ) {
        self.register_factory(SlotId::of::<H>(), Box::new(factory));
    }

    /// Register a pre-boxed factory under an explicit identity.
    pub fn register_factory(&mut self, id: SlotId, factory: SlotFactory) {
        self.factories.insert(id, factory);
    }
}

impl SlotResolver for FactoryResolver {
    fn resolve(&self, id: &SlotId) -> Option<SlotHandle> {
        self.factories.get(id).map(|factory| factory())
    }
}
