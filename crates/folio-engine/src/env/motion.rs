use std::cell::Cell;
use std::rc::Rc;

/// The environment's "prefers reduced motion" signal.
pub trait MotionPreference {
    fn prefers_reduced_motion(&self) -> bool;
}

/// A preference fixed for the lifetime of the value.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct StaticMotion(pub bool);

impl MotionPreference for StaticMotion {
    fn prefers_reduced_motion(&self) -> bool {
        self.0
    }
}

/// A preference that can change at runtime.
///
/// Clones share the flag; the host flips it when the media query changes and
/// engines observe the new value on their next read.
#[derive(Debug, Clone, Default)]
pub struct SharedMotion(Rc<Cell<bool>>);

impl SharedMotion {
    pub fn new(reduced: bool) -> Self {
        Self(Rc::new(Cell::new(reduced)))
    }

    pub fn set(&self, reduced: bool) {
        self.0.set(reduced);
    }
}

impl MotionPreference for SharedMotion {
    fn prefers_reduced_motion(&self) -> bool {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_motion_updates_all_handles() {
        let host = SharedMotion::new(false);
        let engine_side = host.clone();
        assert!(!engine_side.prefers_reduced_motion());
        host.set(true);
        assert!(engine_side.prefers_reduced_motion());
    }

    #[test]
    fn static_motion_reports_its_value() {
        assert!(StaticMotion(true).prefers_reduced_motion());
        assert!(!StaticMotion::default().prefers_reduced_motion());
    }
}
