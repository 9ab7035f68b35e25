#![deny(missing_docs)]
//! # arbor — umbrella crate
//!
//! Single import surface for the arbor workspace. Re-exports the member
//! crates behind feature flags, plus a `prelude` for the happy path.

#[cfg(feature = "graph")]
pub use arbor_graph;
#[cfg(feature = "signal")]
pub use arbor_signal;
#[cfg(feature = "text")]
pub use arbor_text;

/// Happy-path imports for composing arbor systems.
pub mod prelude {
    #[cfg(feature = "graph")]
    pub use arbor_graph::{
        Expression, FromValue, GraphError, NodeGraph, NodeId, Step, Value,
    };

    #[cfg(feature = "signal")]
    pub use arbor_signal::{
        FactoryResolver, RegistryError, SignalError, SignalRegistry, Signaler, Slot, SlotAsync,
        SlotHandle, SlotId, SlotRegistration, SlotResolver, assemble,
    };

    #[cfg(feature = "text")]
    pub use arbor_text::{TextError, from_json, parse, print, to_json};
}
