use std::fmt;
use std::str::FromStr;

use folio_engine::env::KeyValueStore;
use folio_engine::paint::{Color, ColorStop, Paint, RadialGradient};

/// The two site themes.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Theme {
    #[default]
    Apple,
    Spotify,
}

/// Static presentation data of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeMeta {
    pub label: &'static str,
    pub icon: &'static str,
    pub subtitle: &'static str,
    /// Burst accent as the CSS literal the stylesheet uses.
    pub accent_css: &'static str,
}

const APPLE: ThemeMeta = ThemeMeta {
    label: "Apple",
    icon: "/icons/Apple.png",
    subtitle: "Light · Clean · Minimal",
    accent_css: "rgba(255,255,255,0.85)",
};

const SPOTIFY: ThemeMeta = ThemeMeta {
    label: "Spotify",
    icon: "/icons/Spotify.png",
    subtitle: "Dark · Green Accent",
    accent_css: "#1DB954",
};

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Apple, Theme::Spotify];

    /// Persisted identifier.
    pub fn id(self) -> &'static str {
        match self {
            Theme::Apple => "apple",
            Theme::Spotify => "spotify",
        }
    }

    pub fn from_id(id: &str) -> Option<Theme> {
        Theme::ALL.into_iter().find(|t| t.id() == id)
    }

    pub fn meta(self) -> &'static ThemeMeta {
        match self {
            Theme::Apple => &APPLE,
            Theme::Spotify => &SPOTIFY,
        }
    }

    /// Accent tint used by a burst transitioning *to* this theme.
    pub fn accent(self) -> Color {
        match self {
            Theme::Apple => Color::from_straight(1.0, 1.0, 1.0, 0.85),
            Theme::Spotify => Color::from_srgb_u8(0x1D, 0xB9, 0x54, 0xFF),
        }
    }

    /// Fill of the burst droplets: the solid accent for Spotify, a soft
    /// white-to-grey radial gradient for Apple.
    pub fn particle_paint(self) -> Paint {
        match self {
            Theme::Spotify => Paint::Solid(self.accent()),
            Theme::Apple => Paint::RadialGradient(RadialGradient::new(vec![
                ColorStop::new(0.0, Color::from_straight(1.0, 1.0, 1.0, 0.9)),
                ColorStop::new(1.0, Color::from_srgb_u8(210, 210, 210, 153)),
            ])),
        }
    }

    /// Value of the `data-theme` attribute on the document root; `None` means
    /// the attribute is removed and the default stylesheet applies.
    pub fn surface_attribute(self) -> Option<&'static str> {
        match self {
            Theme::Apple => None,
            Theme::Spotify => Some("spotify"),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Unrecognized theme identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme {:?} (expected \"apple\" or \"spotify\")", self.0)
    }
}

impl std::error::Error for UnknownTheme {}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::from_id(s.trim()).ok_or_else(|| UnknownTheme(s.to_string()))
    }
}

/// Reads the persisted preference, falling back to [`Theme::Apple`] when the
/// entry is missing, unreadable or not a known id.
pub fn load_persisted_theme(store: &dyn KeyValueStore, key: &str) -> Theme {
    match store.get(key) {
        Ok(Some(raw)) => Theme::from_id(&raw).unwrap_or_else(|| {
            log::warn!("ignoring unknown persisted theme {raw:?}");
            Theme::default()
        }),
        Ok(None) => Theme::default(),
        Err(e) => {
            log::warn!("theme preference unreadable, using default: {e}");
            Theme::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_engine::env::MemoryStore;

    #[test]
    fn ids_round_trip() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_id(theme.id()), Some(theme));
            assert_eq!(theme.to_string().parse::<Theme>(), Ok(theme));
        }
        assert!("dark".parse::<Theme>().is_err());
    }

    #[test]
    fn accent_matches_css_literal() {
        for theme in Theme::ALL {
            let parsed = Color::parse_css(theme.meta().accent_css).unwrap();
            let (a, b) = (parsed.to_straight(), theme.accent().to_straight());
            assert!((a.0 - b.0).abs() < 1e-4 && (a.1 - b.1).abs() < 1e-4);
            assert!((a.2 - b.2).abs() < 1e-4 && (a.3 - b.3).abs() < 1e-4);
        }
    }

    #[test]
    fn surface_attribute_only_for_spotify() {
        assert_eq!(Theme::Apple.surface_attribute(), None);
        assert_eq!(Theme::Spotify.surface_attribute(), Some("spotify"));
    }

    #[test]
    fn particle_paint_per_theme() {
        assert!(matches!(Theme::Spotify.particle_paint(), Paint::Solid(_)));
        match Theme::Apple.particle_paint() {
            Paint::RadialGradient(g) => assert!(g.is_valid()),
            other => panic!("expected gradient, got {other:?}"),
        }
    }

    // ── load_persisted_theme ──────────────────────────────────────────────

    #[test]
    fn load_defaults_when_absent() {
        assert_eq!(load_persisted_theme(&MemoryStore::new(), "theme"), Theme::Apple);
    }

    #[test]
    fn load_reads_valid_entry() {
        let store = MemoryStore::new().with_entry("theme", "spotify");
        assert_eq!(load_persisted_theme(&store, "theme"), Theme::Spotify);
    }

    #[test]
    fn load_defaults_on_corrupt_value() {
        let store = MemoryStore::new().with_entry("theme", "neon");
        assert_eq!(load_persisted_theme(&store, "theme"), Theme::Apple);
    }

    #[test]
    fn load_defaults_when_storage_unavailable() {
        let store = MemoryStore::new().with_entry("theme", "spotify");
        store.set_unavailable(true);
        assert_eq!(load_persisted_theme(&store, "theme"), Theme::Apple);
    }
}
