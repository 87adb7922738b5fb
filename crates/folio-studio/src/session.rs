use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use folio_engine::coords::Viewport;
use folio_engine::env::{FixedGeometry, KeyValueStore, SharedMotion};
use folio_engine::events::{EventKind, EventRegistry};
use folio_engine::time::{Clock, FrameClock, ManualClock};
use folio_motion::prelude::*;

use crate::script::Command;

/// Frame interval used when simulating time passing.
const FRAME: Duration = Duration::from_millis(16);

/// Both engines wired to a manual clock, a host-driven layout and one store.
pub struct Session {
    clock: ManualClock,
    motion: SharedMotion,
    geometry: FixedGeometry,
    registry: EventRegistry,
    frames: FrameClock,
    themes: ThemeEngine,
    hero: ScrollProgressEngine,
    events: Rc<RefCell<Vec<ThemeEvent>>>,
    viewport: Viewport,
}

impl Session {
    pub fn new(store: impl KeyValueStore + 'static, reduced_motion: bool, config: MotionConfig) -> Self {
        // Fixed epoch: the same script always produces the same burst seeds.
        let clock = ManualClock::with_epoch(1_700_000_000_000);
        let motion = SharedMotion::new(reduced_motion);
        let viewport = Viewport::new(1280.0, 800.0);
        let geometry = FixedGeometry::new(viewport);
        let registry = EventRegistry::new();

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        let themes = ThemeEngine::new(store, motion.clone(), clock.clone(), config.clone())
            .viewport(viewport)
            .registry(registry.clone())
            .on_change(move |e| {
                log::info!("surface <- {e:?}");
                sink.borrow_mut().push(e.clone());
            });

        let mut hero = ScrollProgressEngine::new(geometry.clone(), motion.clone(), registry.clone(), config.scroll);
        let outcome = hero.mount();
        log::info!("hero mount: {outcome:?}");

        Self {
            clock,
            motion,
            geometry,
            registry,
            frames: FrameClock::new(),
            themes,
            hero,
            events,
            viewport,
        }
    }

    pub fn themes(&self) -> &ThemeEngine {
        &self.themes
    }

    pub fn hero(&self) -> &ScrollProgressEngine {
        &self.hero
    }

    /// Events emitted by the theme engine so far.
    pub fn events(&self) -> Vec<ThemeEvent> {
        self.events.borrow().clone()
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn run(&mut self, commands: &[Command]) {
        for cmd in commands {
            self.apply(cmd);
        }
    }

    pub fn apply(&mut self, cmd: &Command) {
        log::debug!("t={}ms {cmd:?}", self.clock.now().as_millis());
        match *cmd {
            Command::Wait(ms) => self.wait(Duration::from_millis(ms)),
            Command::Theme(theme) => self.themes.request_theme(theme),
            Command::Open => self.themes.toggle_selector(),
            Command::Escape => {
                if self.registry.has_listeners(EventKind::KeyDown) {
                    self.themes.on_key_down("Escape");
                }
            }
            Command::ClickOutside => {
                if self.registry.has_listeners(EventKind::PointerDown) {
                    self.themes.on_pointer_down(false);
                }
            }
            Command::Scroll(top) => {
                self.geometry.set_region_top(top);
                if self.registry.has_listeners(EventKind::Scroll) {
                    self.hero.on_scroll();
                }
            }
            Command::Resize(height) => {
                self.viewport = Viewport::new(self.viewport.width, height);
                self.geometry.set_viewport(self.viewport);
                self.themes.set_viewport(self.viewport);
                if self.registry.has_listeners(EventKind::Resize) {
                    self.hero.on_resize();
                }
            }
            Command::Frame => self.present_frame(),
            Command::Reduced(on) => {
                self.motion.set(on);
                let outcome = self.hero.on_motion_change();
                log::info!("reduced motion {}: hero {outcome:?}", if on { "on" } else { "off" });
            }
            Command::Status => println!("{}", self.status_line()),
        }
    }

    /// Advances time in frame-sized steps, presenting a frame after each.
    fn wait(&mut self, total: Duration) {
        let target = self.clock.now() + total;
        while self.clock.now() < target {
            let step = FRAME.min(target - self.clock.now());
            self.clock.advance(step);
            self.present_frame();
        }
        // Zero-length waits still flush due timers.
        self.themes.tick();
    }

    fn present_frame(&mut self) {
        let ft = self.frames.tick(self.clock.now());
        self.themes.tick();
        self.hero.on_frame(&ft);
        if let Some(frame) = self.themes.burst_frame() {
            let live = frame.particles.iter().filter(|p| p.opacity > 0.0).count();
            log::debug!(
                "frame {}: burst tint {:.3}, {live} particles visible",
                ft.frame_index,
                frame.tint.opacity
            );
        }
    }

    pub fn status_line(&self) -> String {
        let state = match self.themes.state() {
            ThemeState::Idle(t) => format!("idle({t})"),
            ThemeState::Transitioning { current, target } => format!("transitioning({current} -> {target})"),
        };
        let burst = self
            .themes
            .visible_burst()
            .map_or_else(|| "none".to_string(), |b| format!("#{}", b.generation()));
        let hero = self.hero.hero_params();
        format!(
            "[t={:>5}ms] {state:<32} burst={burst:<5} selector={:<6} | hero p={:.3} scale={:.3} opacity={:.3} y={:.1}px blur={:.2}px",
            self.clock.now().as_millis(),
            if self.themes.is_selector_open() { "open" } else { "closed" },
            hero.progress,
            hero.scale,
            hero.opacity,
            hero.translate_y,
            hero.blur,
        )
    }
}
