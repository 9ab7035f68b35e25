//! The dispatcher driving one logical call chain.

use std::any::Any;
use std::sync::Arc;

use arbor_graph::{NodeGraph, NodeId};
use futures::future::BoxFuture;

use crate::error::SignalError;
use crate::registry::SignalRegistry;
use crate::resolver::SlotResolver;
use crate::slot::SlotHandle;

struct Frame {
    name: String,
    value: Box<dyn Any + Send>,
}

/// Resolves names to handlers, invokes them, and carries the call-scoped
/// value stack.
///
/// One signaler per logical unit of work: the stack is instance state, and
/// concurrent unrelated call chains must each use their own instance so they
/// never observe each other's frames. The registry and resolver are shared
/// through `Arc`s; the signaler itself is `Send` but deliberately not
/// cloneable, since a clone would fork the stack.
pub struct Signaler {
    registry: Arc<SignalRegistry>,
    resolver: Arc<dyn SlotResolver>,
    stack: Vec<Frame>,
}

impl Signaler {
    /// Create a signaler over a registry and a resolver.
    pub fn new(registry: Arc<SignalRegistry>, resolver: Arc<dyn SlotResolver>) -> Self {
        Self {
            registry,
            resolver,
            stack: Vec::new(),
        }
    }

    /// The registry this signaler dispatches through.
    pub fn registry(&self) -> &SignalRegistry {
        &self.registry
    }

    /// Current scoped-frame stack depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn resolve(&self, name: &str) -> Result<SlotHandle, SignalError> {
        let id = self
            .registry
            .lookup(name)
            .ok_or_else(|| SignalError::Unknown(name.to_owned()))?;
        self.resolver
            .resolve(&id)
            .ok_or_else(|| SignalError::Unresolved {
                name: name.to_owned(),
                slot: id.type_name(),
            })
    }

    /// Dispatch a signal through the synchronous entry point.
    ///
    /// The handler mutates `args` in place as its result and may dispatch
    /// further signals through the signaler it receives. Fails with
    /// [`SignalError::Unknown`] for an unregistered name,
    /// [`SignalError::Unresolved`] when no instance could be produced, and
    /// [`SignalError::CapabilityMismatch`] when the handler only implements
    /// the asynchronous entry point.
    pub fn dispatch(
        &mut self,
        name: &str,
        graph: &mut NodeGraph,
        args: NodeId,
    ) -> Result<(), SignalError> {
        tracing::debug!(name, depth = self.stack.len(), "dispatching signal");
        let handle = self.resolve(name)?;
        let slot = match handle.as_sync() {
            Some(slot) => slot,
            None => {
                return Err(SignalError::CapabilityMismatch {
                    name: name.to_owned(),
                    expected: "sync",
                    available: handle.available(),
                });
            }
        };
        slot.invoke(self, graph, args)
    }

    /// Dispatch a signal through the asynchronous entry point.
    ///
    /// Same lookup, resolution, and capability rules as
    /// [`Signaler::dispatch`]. The signaler adds no timeout, cancellation,
    /// or buffering of its own; it suspends exactly where the handler does.
    pub async fn dispatch_async(
        &mut self,
        name: &str,
        graph: &mut NodeGraph,
        args: NodeId,
    ) -> Result<(), SignalError> {
        tracing::debug!(name, depth = self.stack.len(), "dispatching async signal");
        let handle = self.resolve(name)?;
        let slot = match handle.as_async() {
            Some(slot) => slot,
            None => {
                return Err(SignalError::CapabilityMismatch {
                    name: name.to_owned(),
                    expected: "async",
                    available: handle.available(),
                });
            }
        };
        slot.invoke_async(self, graph, args).await
    }

    /// Run `body` with `(name, value)` pushed on the scoped stack.
    ///
    /// The frame is popped on every exit path: `body`'s output, success or
    /// error value alike, passes through unchanged, and the popped value is
    /// dropped as part of the pop, so a `Drop` implementation on the value
    /// is the scope-exit cleanup hook.
    pub fn scope<V, R>(
        &mut self,
        name: impl Into<String>,
        value: V,
        body: impl FnOnce(&mut Self) -> R,
    ) -> R
    where
        V: Any + Send,
    {
        let name = name.into();
        tracing::debug!(name = %name, depth = self.stack.len(), "pushing scoped frame");
        self.stack.push(Frame {
            name,
            value: Box::new(value),
        });
        let out = body(self);
        self.stack.pop();
        out
    }

    /// Asynchronous form of [`Signaler::scope`]; the pop and drop still run
    /// after the awaited body completes or fails.
    pub async fn scope_async<V, R>(
        &mut self,
        name: impl Into<String>,
        value: V,
        body: impl for<'a> FnOnce(&'a mut Self) -> BoxFuture<'a, R>,
    ) -> R
    where
        V: Any + Send,
    {
        let name = name.into();
        tracing::debug!(name = %name, depth = self.stack.len(), "pushing scoped frame");
        self.stack.push(Frame {
            name,
            value: Box::new(value),
        });
        let out = body(self).await;
        self.stack.pop();
        out
    }

    /// Read the most recently pushed, still-on-stack frame named `name`.
    ///
    /// Searches the whole stack, not just the top; shadowed frames become
    /// visible again when the shadowing scope exits. Fails with
    /// [`SignalError::NoFrame`] when no frame under that name exists and
    /// [`SignalError::FrameType`] when the frame holds a different type.
    pub fn peek<T: Any>(&self, name: &str) -> Result<&T, SignalError> {
        let frame = self
            .stack
            .iter()
            .rev()
            .find(|frame| frame.name == name)
            .ok_or_else(|| SignalError::NoFrame(name.to_owned()))?;
        frame
            .value
            .downcast_ref::<T>()
            .ok_or_else(|| SignalError::FrameType {
                name: name.to_owned(),
                expected: std::any::type_name::<T>(),
            })
    }
}
