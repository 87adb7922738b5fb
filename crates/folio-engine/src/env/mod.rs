//! Environment capabilities.
//!
//! Engines never reach for globals. Persistence, the reduced-motion signal and
//! viewport geometry are injected through the small traits defined here, each
//! with an in-process implementation usable by hosts and tests alike.

mod error;
mod geometry;
mod motion;
mod storage;

pub use error::StorageError;
pub use geometry::{FixedGeometry, GeometryProvider};
pub use motion::{MotionPreference, SharedMotion, StaticMotion};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
