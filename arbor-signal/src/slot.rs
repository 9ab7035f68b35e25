//! Handler identities and entry-point traits.
//!
//! A handler is addressed in two hops: the registry maps a dispatch name to
//! a [`SlotId`] (the handler's type identity), and a resolver turns that
//! identity into a live instance packaged as a [`SlotHandle`]. The handle
//! carries whichever of the two entry points the handler implements; the
//! signaler probes it for the one its dispatch mode needs.

use std::any::{TypeId, type_name};
use std::fmt;
use std::sync::Arc;

use arbor_graph::{NodeGraph, NodeId};
use async_trait::async_trait;

use crate::error::SignalError;
use crate::signaler::Signaler;

/// Opaque identity of a handler type.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    type_id: TypeId,
    type_name: &'static str,
}

impl SlotId {
    /// The identity of handler type `H`.
    pub fn of<H: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<H>(),
            type_name: type_name::<H>(),
        }
    }

    /// The handler's type name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SlotId").field(&self.type_name).finish()
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

/// Synchronous handler entry point.
///
/// The handler receives the signaler driving the current call chain (for
/// recursive dispatch and scoped-frame access) and the argument subtree,
/// which it mutates in place as its result.
pub trait Slot: Send + Sync {
    /// Handle one signal.
    fn invoke(
        &self,
        signaler: &mut Signaler,
        graph: &mut NodeGraph,
        args: NodeId,
    ) -> Result<(), SignalError>;
}

/// Asynchronous handler entry point.
///
/// Same contract as [`Slot`]; suspension happens only where the handler
/// itself awaits.
#[async_trait]
pub trait SlotAsync: Send + Sync {
    /// Handle one signal asynchronously.
    async fn invoke_async(
        &self,
        signaler: &mut Signaler,
        graph: &mut NodeGraph,
        args: NodeId,
    ) -> Result<(), SignalError>;
}

/// A resolved handler instance, carrying the entry points it implements.
#[derive(Clone)]
pub struct SlotHandle {
    sync: Option<Arc<dyn Slot>>,
    asynchronous: Option<Arc<dyn SlotAsync>>,
}

impl SlotHandle {
    /// A handler implementing only the synchronous entry point.
    pub fn sync(slot: impl Slot + 'static) -> Self {
        Self {
            sync: Some(Arc::new(slot)),
            asynchronous: None,
        }
    }

    /// A handler implementing only the asynchronous entry point.
    pub fn asynchronous(slot: impl SlotAsync + 'static) -> Self {
        Self {
            sync: None,
            asynchronous: Some(Arc::new(slot)),
        }
    }

    /// A handler implementing both entry points; both probes reach the same
    /// instance.
    pub fn both<H>(slot: H) -> Self
    where
        H: Slot + SlotAsync + 'static,
    {
        let shared = Arc::new(slot);
        Self {
            sync: Some(shared.clone()),
            asynchronous: Some(shared),
        }
    }

    /// Probe for the synchronous entry point.
    pub fn as_sync(&self) -> Option<&dyn Slot> {
        self.sync.as_deref()
    }

    /// Probe for the asynchronous entry point.
    pub fn as_async(&self) -> Option<&dyn SlotAsync> {
        self.asynchronous.as_deref()
    }

    pub(crate) fn available(&self) -> &'static str {
        match (&self.sync, &self.asynchronous) {
            (Some(_), Some(_)) => "sync and async",
            (Some(_), None) => "sync",
            (None, Some(_)) => "async",
            (None, None) => "none",
        }
    }
}

/// Produces a fresh or shared [`SlotHandle`] on demand.
pub type SlotFactory = Box<dyn Fn() -> SlotHandle + Send + Sync>;
