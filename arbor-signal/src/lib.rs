#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub mod error;
pub mod registry;
pub mod resolver;
pub mod signaler;
pub mod slot;

pub use error::{RegistryError, SignalError};
pub use registry::{SignalRegistry, SignalRegistryBuilder, SlotRegistration, assemble};
pub use resolver::{FactoryResolver, SlotResolver};
pub use signaler::Signaler;
pub use slot::{Slot, SlotAsync, SlotFactory, SlotHandle, SlotId};
