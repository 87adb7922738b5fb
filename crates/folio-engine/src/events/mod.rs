//! Event listener bookkeeping.
//!
//! The host owns an [`EventRegistry`] and only delivers an event kind while at
//! least one [`Subscription`] for it is alive. Engines keep their
//! subscriptions as fields, so unmounting or dropping an engine releases them
//! on every exit path.

mod registry;

pub use registry::{EventKind, EventRegistry, Subscription};
