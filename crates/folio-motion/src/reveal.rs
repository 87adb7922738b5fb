//! Entrance reveal timings for page sections.
//!
//! The collaborator asks for a [`RevealSample`] every frame and maps it onto
//! opacity and a vertical offset. Entrances never animate while a theme
//! transition is in flight; they resolve straight to their final state.

use folio_engine::coords::{Rect, Viewport};

use crate::easing::{lerp, linear_progress, EASE_OUT};

/// Seconds between consecutive children of a [`Stagger`].
pub const STAGGER_STEP: f64 = 0.08;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RevealKind {
    /// Plays on mount.
    FadeIn,
    /// Plays once the element is a quarter visible.
    FadeInView,
    /// Child of a [`Stagger`] group.
    StaggerItem,
}

impl RevealKind {
    fn offset(self) -> f32 {
        match self {
            RevealKind::FadeIn => 10.0,
            RevealKind::FadeInView => 14.0,
            RevealKind::StaggerItem => 12.0,
        }
    }

    fn duration(self) -> f64 {
        match self {
            RevealKind::FadeInView => 0.6,
            RevealKind::FadeIn | RevealKind::StaggerItem => 0.55,
        }
    }
}

/// Resolved timing of one reveal.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RevealTiming {
    /// Starting offset in px (content rises into place).
    pub offset_y: f32,
    pub duration: f64,
    pub delay: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RevealSample {
    pub opacity: f32,
    pub offset_y: f32,
}

impl RevealSample {
    pub const SETTLED: RevealSample = RevealSample { opacity: 1.0, offset_y: 0.0 };
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Reveal {
    kind: RevealKind,
    delay: f64,
}

impl Reveal {
    pub fn fade_in(delay: f64) -> Self {
        Self { kind: RevealKind::FadeIn, delay }
    }

    pub fn fade_in_view(delay: f64) -> Self {
        Self { kind: RevealKind::FadeInView, delay }
    }

    /// The `index`-th child of `group`.
    pub fn stagger_item(group: &Stagger, index: usize, reduced_motion: bool) -> Self {
        Self { kind: RevealKind::StaggerItem, delay: group.child_delay(index, reduced_motion) }
    }

    pub fn kind(&self) -> RevealKind {
        self.kind
    }

    /// Offset and duration collapse to zero under reduced motion; the delay
    /// is kept.
    pub fn timing(&self, reduced_motion: bool) -> RevealTiming {
        if reduced_motion {
            RevealTiming { offset_y: 0.0, duration: 0.0, delay: self.delay }
        } else {
            RevealTiming { offset_y: self.kind.offset(), duration: self.kind.duration(), delay: self.delay }
        }
    }

    /// State `elapsed` seconds after the reveal was triggered.
    pub fn sample(&self, elapsed: f64, reduced_motion: bool, theme_transitioning: bool) -> RevealSample {
        if theme_transitioning {
            return RevealSample::SETTLED;
        }
        let timing = self.timing(reduced_motion);
        let k = EASE_OUT.apply(linear_progress(elapsed, timing.delay, timing.duration));
        RevealSample {
            opacity: k as f32,
            offset_y: lerp(timing.offset_y as f64, 0.0, k) as f32,
        }
    }
}

/// A group whose children reveal one after another.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stagger {
    pub delay: f64,
}

impl Stagger {
    pub fn new(delay: f64) -> Self {
        Self { delay }
    }

    pub fn child_delay(&self, index: usize, reduced_motion: bool) -> f64 {
        let step = if reduced_motion { 0.0 } else { STAGGER_STEP };
        self.delay + step * index as f64
    }
}

/// Fraction of `rect` inside the viewport, in [0, 1].
pub fn visible_fraction(rect: Rect, viewport: Viewport) -> f32 {
    if rect.is_empty() {
        return 0.0;
    }
    let x0 = rect.origin.x.max(0.0);
    let y0 = rect.origin.y.max(0.0);
    let x1 = (rect.origin.x + rect.size.x).min(viewport.width);
    let y1 = rect.bottom().min(viewport.height);
    let (w, h) = (x1 - x0, y1 - y0);
    if w <= 0.0 || h <= 0.0 {
        return 0.0;
    }
    ((w * h) / (rect.size.x * rect.size.y)).clamp(0.0, 1.0)
}

/// One-shot "in view" trigger for [`RevealKind::FadeInView`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InViewTrigger {
    amount: f32,
    fired: bool,
}

impl Default for InViewTrigger {
    fn default() -> Self {
        Self { amount: 0.25, fired: false }
    }
}

impl InViewTrigger {
    pub fn with_amount(amount: f32) -> Self {
        Self { amount: amount.clamp(0.0, 1.0), fired: false }
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Returns `true` exactly once: the first time enough of `rect` is visible.
    pub fn update(&mut self, rect: Rect, viewport: Viewport) -> bool {
        if self.fired {
            return false;
        }
        if visible_fraction(rect, viewport) >= self.amount {
            self.fired = true;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_in_starts_hidden_and_lowered() {
        let s = Reveal::fade_in(0.1).sample(0.0, false, false);
        assert_eq!(s.opacity, 0.0);
        assert_eq!(s.offset_y, 10.0);
    }

    #[test]
    fn fade_in_settles_after_delay_plus_duration() {
        let s = Reveal::fade_in(0.1).sample(0.7, false, false);
        assert_eq!(s, RevealSample { opacity: 1.0, offset_y: 0.0 });
    }

    #[test]
    fn reduced_motion_has_no_offset_and_snaps() {
        let r = Reveal::fade_in_view(0.2);
        assert_eq!(r.timing(true), RevealTiming { offset_y: 0.0, duration: 0.0, delay: 0.2 });
        assert_eq!(r.sample(0.1, true, false).opacity, 0.0);
        assert_eq!(r.sample(0.2, true, false).opacity, 1.0);
    }

    #[test]
    fn theme_transition_resolves_to_final_state() {
        let s = Reveal::fade_in(0.5).sample(0.0, false, true);
        assert_eq!(s, RevealSample::SETTLED);
    }

    #[test]
    fn stagger_spaces_children() {
        let group = Stagger::new(0.1);
        assert!((group.child_delay(3, false) - 0.34).abs() < 1e-12);
        assert_eq!(group.child_delay(3, true), 0.1);
        let item = Reveal::stagger_item(&group, 2, false);
        assert_eq!(item.kind(), RevealKind::StaggerItem);
        assert_eq!(item.timing(false).offset_y, 12.0);
    }

    // ── in-view ───────────────────────────────────────────────────────────

    #[test]
    fn visible_fraction_of_partly_scrolled_rect() {
        let vp = Viewport::new(1000.0, 800.0);
        assert_eq!(visible_fraction(Rect::new(0.0, 600.0, 1000.0, 400.0), vp), 0.5);
        assert_eq!(visible_fraction(Rect::new(0.0, 900.0, 1000.0, 400.0), vp), 0.0);
        assert_eq!(visible_fraction(Rect::new(0.0, 100.0, 1000.0, 400.0), vp), 1.0);
    }

    #[test]
    fn in_view_trigger_fires_once() {
        let vp = Viewport::new(1000.0, 800.0);
        let mut trigger = InViewTrigger::default();
        assert!(!trigger.update(Rect::new(0.0, 750.0, 1000.0, 400.0), vp));
        assert!(trigger.update(Rect::new(0.0, 690.0, 1000.0, 400.0), vp));
        assert!(trigger.has_fired());
        assert!(!trigger.update(Rect::new(0.0, 0.0, 1000.0, 400.0), vp));
    }
}
