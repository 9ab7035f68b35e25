//! The immutable name → handler-identity table.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::RegistryError;
use crate::resolver::FactoryResolver;
use crate::slot::{SlotFactory, SlotHandle, SlotId};

/// Immutable-after-construction table mapping each dispatch name to the
/// identity of the handler that claimed it.
///
/// Built through [`SignalRegistry::builder`]; every validation happens at
/// build time, lookups cannot fail with configuration errors.
#[derive(Debug)]
pub struct SignalRegistry {
    names: HashMap<String, SlotId>,
}

impl SignalRegistry {
    /// Start declaring handlers.
    pub fn builder() -> SignalRegistryBuilder {
        SignalRegistryBuilder::default()
    }

    /// The handler identity claimed under `name`, if any. Absence is not an
    /// error at this layer; the caller decides how to react.
    pub fn lookup(&self, name: &str) -> Option<SlotId> {
        self.names.get(name).copied()
    }

    /// All registered dispatch names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Collects handler declarations and validates them into a
/// [`SignalRegistry`].
#[derive(Default)]
pub struct SignalRegistryBuilder {
    declared: Vec<(SlotId, Vec<String>)>,
}

impl SignalRegistryBuilder {
    /// Declare the dispatch names a handler identity claims. A handler may
    /// claim any number of names; validation happens in
    /// [`SignalRegistryBuilder::build`].
    pub fn declare(mut self, id: SlotId, names: impl IntoIterator<Item: Into<String>>) -> Self {
        self.declared
            .push((id, names.into_iter().map(Into::into).collect()));
        self
    }

    /// Validate and freeze the table.
    ///
    /// Fails with [`RegistryError::EmptyName`] when a declared name is
    /// empty, and [`RegistryError::NameTaken`] when two declarations claim
    /// the same name.
    pub fn build(self) -> Result<SignalRegistry, RegistryError> {
        let mut names = HashMap::new();
        for (id, declared) in self.declared {
            for name in declared {
                if name.is_empty() {
                    return Err(RegistryError::EmptyName {
                        slot: id.type_name(),
                    });
                }
                match names.entry(name) {
                    Entry::Occupied(taken) => {
                        let first: &SlotId = taken.get();
                        return Err(RegistryError::NameTaken {
                            name: taken.key().clone(),
                            first: first.type_name(),
                            second: id.type_name(),
                        });
                    }
                    Entry::Vacant(free) => {
                        free.insert(id);
                    }
                }
            }
        }
        Ok(SignalRegistry { names })
    }
}

/// One independent unit's startup contribution: a handler identity, the
/// names it claims, and the factory that instantiates it.
///
/// This is the registration-source boundary: units self-register instead of
/// being discovered, and [`assemble`] folds their contributions into a
/// registry and a resolver in one validated step.
pub struct SlotRegistration {
    /// The handler's identity.
    pub id: SlotId,
    /// The dispatch names the handler claims.
    pub names: Vec<String>,
    /// Instantiates the handler on demand.
    pub factory: SlotFactory,
}

impl SlotRegistration {
    /// Declare handler type `H` under the given names.
    pub fn of<H: 'static>(
        names: impl IntoIterator<Item: Into<String>>,
        factory: impl Fn() -> SlotHandle + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: SlotId::of::<H>(),
            names: names.into_iter().map(Into::into).collect(),
            factory: Box::new(factory),
        }
    }
}

/// Build a registry and a matching resolver from a set of self-registered
/// contributions.
pub fn assemble(
    registrations: impl IntoIterator<Item = SlotRegistration>,
) -> Result<(SignalRegistry, FactoryResolver), RegistryError> {
    let mut builder = SignalRegistry::builder();
    let mut resolver = FactoryResolver::new();
    for registration in registrations {
        builder = builder.declare(registration.id, registration.names);
        resolver.register_factory(registration.id, registration.factory);
    }
    Ok((builder.build()?, resolver))
}
