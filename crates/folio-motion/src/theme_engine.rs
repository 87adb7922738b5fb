use std::time::Duration;

use folio_engine::coords::Viewport;
use folio_engine::env::{KeyValueStore, MotionPreference};
use folio_engine::events::{EventKind, EventRegistry, Subscription};
use folio_engine::time::{Clock, TimerQueue};

use crate::burst::{BurstFrame, TransitionBurst};
use crate::config::MotionConfig;
use crate::theme::{load_persisted_theme, Theme};

/// Logical state of the theme switcher.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ThemeState {
    Idle(Theme),
    /// A burst is playing. `current` flips to `target` at the commit step,
    /// before the burst ends.
    Transitioning { current: Theme, target: Theme },
}

/// Notifications for the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeEvent {
    /// The surface must now show this theme.
    Applied(Theme),
    /// Set the transitioning flag and start drawing the burst of `generation`.
    TransitionStarted { generation: u64, target: Theme },
    /// Stop drawing the burst of `generation`; a newer transition replaced it.
    TransitionSuperseded { generation: u64 },
    /// Remove the burst of `generation` and clear the transitioning flag.
    TransitionEnded { generation: u64 },
    SelectorToggled { open: bool },
}

/// Row of the theme selector menu.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub theme: Theme,
    pub label: &'static str,
    pub subtitle: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum ThemeTimer {
    Commit { generation: u64 },
    Cleanup { generation: u64 },
}

impl ThemeTimer {
    fn generation(self) -> u64 {
        match self {
            ThemeTimer::Commit { generation } | ThemeTimer::Cleanup { generation } => generation,
        }
    }
}

#[derive(Debug)]
struct Transition {
    target: Theme,
    burst: TransitionBurst,
    committed: bool,
}

/// Owns the theme preference and drives transitions between the two themes.
///
/// Single-threaded and cooperative: timers only fire from [`tick`](Self::tick),
/// which the host calls every frame (or whenever
/// [`next_deadline`](Self::next_deadline) has passed).
///
/// Every request gets a fresh generation number. Callbacks scheduled for an
/// older generation stay queued but do nothing when they fire, so a rapid
/// second request can never be overwritten by the first one's commit.
///
/// ```rust
/// use folio_engine::env::{MemoryStore, StaticMotion};
/// use folio_engine::time::ManualClock;
/// use folio_motion::prelude::*;
///
/// let clock = ManualClock::new();
/// let store = MemoryStore::new();
/// let mut engine = ThemeEngine::new(store.clone(), StaticMotion(false), clock.clone(), MotionConfig::default());
///
/// engine.request_theme(Theme::Spotify);
/// clock.advance_ms(950);
/// engine.tick();
///
/// assert_eq!(engine.state(), ThemeState::Idle(Theme::Spotify));
/// assert_eq!(store.peek("theme").as_deref(), Some("spotify"));
/// ```
pub struct ThemeEngine {
    store: Box<dyn KeyValueStore>,
    motion: Box<dyn MotionPreference>,
    clock: Box<dyn Clock>,
    config: MotionConfig,
    viewport: Viewport,
    current: Theme,
    transition: Option<Transition>,
    generation: u64,
    timers: TimerQueue<ThemeTimer>,
    selector_open: bool,
    registry: Option<EventRegistry>,
    selector_listeners: Vec<Subscription>,
    on_change: Option<Box<dyn FnMut(&ThemeEvent)>>,
    torn_down: bool,
}

impl ThemeEngine {
    /// Creates the engine in `Idle` with the persisted theme (or the default).
    pub fn new(
        store: impl KeyValueStore + 'static,
        motion: impl MotionPreference + 'static,
        clock: impl Clock + 'static,
        config: MotionConfig,
    ) -> Self {
        let current = load_persisted_theme(&store, &config.storage_key);
        log::info!("theme loaded: {current}");
        Self {
            store: Box::new(store),
            motion: Box::new(motion),
            clock: Box::new(clock),
            config,
            viewport: Viewport::new(1280.0, 720.0),
            current,
            transition: None,
            generation: 0,
            timers: TimerQueue::new(),
            selector_open: false,
            registry: None,
            selector_listeners: Vec::new(),
            on_change: None,
            torn_down: false,
        }
    }

    /// Initial viewport size; keep it current with [`set_viewport`](Self::set_viewport).
    pub fn viewport(mut self, v: Viewport) -> Self {
        self.viewport = v;
        self
    }

    /// Registry used for the selector's Escape / outside-click listeners.
    pub fn registry(mut self, registry: EventRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn on_change(mut self, f: impl FnMut(&ThemeEvent) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    // ── queries ───────────────────────────────────────────────────────────

    pub fn state(&self) -> ThemeState {
        match &self.transition {
            None => ThemeState::Idle(self.current),
            Some(t) => ThemeState::Transitioning { current: self.current, target: t.target },
        }
    }

    /// Theme currently applied to the surface.
    pub fn current(&self) -> Theme {
        self.current
    }

    /// The surface-wide "theme is transitioning" flag.
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Burst of the current generation. Superseded bursts are never returned.
    pub fn visible_burst(&self) -> Option<&TransitionBurst> {
        self.transition.as_ref().map(|t| &t.burst)
    }

    /// Samples the visible burst at the current clock time.
    pub fn burst_frame(&self) -> Option<BurstFrame> {
        self.visible_burst().map(|b| b.sample(self.clock.now()))
    }

    /// Earliest pending timer deadline, including stale ones.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    // ── transitions ───────────────────────────────────────────────────────

    /// Resizes the viewport. A burst already playing keeps its origin.
    pub fn set_viewport(&mut self, v: Viewport) {
        self.viewport = v;
    }

    /// Requests a switch to `next`.
    ///
    /// Selecting the theme that is already current (or already the pending
    /// target) only closes the selector. Under reduced motion the switch is
    /// committed immediately without a burst.
    pub fn request_theme(&mut self, next: Theme) {
        if self.torn_down {
            log::debug!("theme request after teardown ignored");
            return;
        }
        self.close_selector();

        let pending = self.transition.as_ref().map_or(self.current, |t| t.target);
        if next == pending {
            log::debug!("theme {next} already selected");
            return;
        }

        let reduced = self.motion.prefers_reduced_motion();
        if let Some(old) = self.transition.take() {
            let generation = old.burst.generation();
            log::debug!("transition #{generation} superseded by request for {next}");
            if reduced {
                self.emit(ThemeEvent::TransitionEnded { generation });
            } else {
                self.emit(ThemeEvent::TransitionSuperseded { generation });
            }
        }

        self.generation += 1;
        let generation = self.generation;

        if reduced {
            log::debug!("reduced motion: switching to {next} without transition");
            self.commit(next);
            return;
        }

        let now = self.clock.now();
        let timings = self.config.timings;
        let burst = TransitionBurst::new(
            generation,
            self.clock.epoch_millis(),
            self.viewport.center(),
            next,
            now,
            self.config.burst,
        );

        self.timers.schedule(now + timings.commit_delay, ThemeTimer::Commit { generation });
        // Cleanup never precedes commit, even with odd custom timings.
        let cleanup_at = now + timings.cleanup_delay.max(timings.commit_delay);
        self.timers.schedule(cleanup_at, ThemeTimer::Cleanup { generation });

        log::info!("theme transition #{generation}: {} -> {next} (seed {})", self.current, burst.seed());
        self.transition = Some(Transition { target: next, burst, committed: false });
        self.emit(ThemeEvent::TransitionStarted { generation, target: next });
    }

    /// Fires every timer due at the current clock time. Returns how many fired.
    pub fn tick(&mut self) -> usize {
        if self.torn_down {
            return 0;
        }
        let now = self.clock.now();
        let mut fired = 0;
        while let Some((_, timer)) = self.timers.pop_due(now) {
            self.fire(timer);
            fired += 1;
        }
        fired
    }

    fn fire(&mut self, timer: ThemeTimer) {
        let generation = timer.generation();
        let (target, committed) = match &self.transition {
            Some(t) if t.burst.generation() == generation => (t.target, t.committed),
            _ => {
                log::debug!("stale {timer:?} ignored");
                return;
            }
        };

        match timer {
            ThemeTimer::Commit { .. } => {
                if !committed {
                    self.mark_committed();
                    self.commit(target);
                }
            }
            ThemeTimer::Cleanup { .. } => {
                if !committed {
                    self.commit(target);
                }
                self.transition = None;
                log::debug!("transition #{generation} finished");
                self.emit(ThemeEvent::TransitionEnded { generation });
            }
        }
    }

    fn mark_committed(&mut self) {
        if let Some(t) = self.transition.as_mut() {
            t.committed = true;
        }
    }

    /// Sets, persists (best effort) and applies `theme`.
    fn commit(&mut self, theme: Theme) {
        self.current = theme;
        if let Err(e) = self.store.set(&self.config.storage_key, theme.id()) {
            log::warn!("theme {theme} applied but not persisted: {e}");
        }
        log::info!("theme applied: {theme}");
        self.emit(ThemeEvent::Applied(theme));
    }

    /// Cancels all pending work. The engine ignores further requests.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.timers.clear();
        self.transition = None;
        self.selector_open = false;
        self.selector_listeners.clear();
        log::debug!("theme engine torn down");
    }

    // ── selector ──────────────────────────────────────────────────────────

    pub fn is_selector_open(&self) -> bool {
        self.selector_open
    }

    pub fn toggle_selector(&mut self) {
        if self.selector_open {
            self.close_selector();
        } else {
            self.open_selector();
        }
    }

    pub fn open_selector(&mut self) {
        if self.selector_open || self.torn_down {
            return;
        }
        self.selector_open = true;
        if let Some(registry) = &self.registry {
            self.selector_listeners = vec![
                registry.subscribe(EventKind::KeyDown),
                registry.subscribe(EventKind::PointerDown),
            ];
        }
        self.emit(ThemeEvent::SelectorToggled { open: true });
    }

    pub fn close_selector(&mut self) {
        if !self.selector_open {
            return;
        }
        self.selector_open = false;
        self.selector_listeners.clear();
        self.emit(ThemeEvent::SelectorToggled { open: false });
    }

    /// Key handler; Escape closes the selector.
    pub fn on_key_down(&mut self, key: &str) {
        if key == "Escape" {
            self.close_selector();
        }
    }

    /// Pointer-down handler; a press outside the selector closes it.
    pub fn on_pointer_down(&mut self, inside_selector: bool) {
        if !inside_selector {
            self.close_selector();
        }
    }

    /// Button caption, e.g. `"Theme: Apple"`.
    pub fn selector_label(&self) -> String {
        format!("Theme: {}", self.current.meta().label)
    }

    pub fn menu_items(&self) -> [MenuItem; 2] {
        Theme::ALL.map(|theme| {
            let meta = theme.meta();
            MenuItem {
                theme,
                label: meta.label,
                subtitle: meta.subtitle,
                icon: meta.icon,
                active: theme == self.current,
            }
        })
    }

    fn emit(&mut self, event: ThemeEvent) {
        if let Some(f) = self.on_change.as_mut() {
            f(&event);
        }
    }
}
