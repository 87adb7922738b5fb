//! Folio engine crate.
//!
//! This crate owns the platform-agnostic runtime pieces used by higher layers:
//! time and scheduling, geometry, colors, listener bookkeeping and the narrow
//! environment capabilities (storage, motion preference, viewport geometry).

pub mod coords;
pub mod env;
pub mod events;
pub mod logging;
pub mod paint;
pub mod time;
