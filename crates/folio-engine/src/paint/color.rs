use std::fmt;

/// Premultiplied RGBA color, channels in [0, 1].
///
/// Invariant:
/// - `rgb` components are multiplied by `a` (premultiplied alpha).
///
/// Use [`to_straight`](Self::to_straight) or [`to_css`](Self::to_css) when
/// handing the color to a consumer that expects straight alpha.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    /// Creates a premultiplied color from straight sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Returns a straight-alpha representation.
    ///
    /// For `a == 0`, RGB is returned as 0.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    /// Same hue with the straight alpha multiplied by `factor`.
    #[inline]
    pub fn fade(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self { r: self.r * f, g: self.g * f, b: self.b * f, a: self.a * f }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Parses the CSS color forms used by theme tokens:
    /// `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
    pub fn parse_css(src: &str) -> Result<Self, ColorParseError> {
        let s = src.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::new(src, "bad hex digits"));
        }
        let (body, has_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
            (rest, true)
        } else if let Some(rest) = s.strip_prefix("rgb(") {
            (rest, false)
        } else {
            return Err(ColorParseError::new(src, "unknown color syntax"));
        };
        let body = body
            .strip_suffix(')')
            .ok_or_else(|| ColorParseError::new(src, "missing ')'"))?;

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(ColorParseError::new(src, "wrong number of components"));
        }

        let mut rgb = [0.0f32; 3];
        for (slot, part) in rgb.iter_mut().zip(&parts) {
            let v: f32 = part
                .parse()
                .map_err(|_| ColorParseError::new(src, "bad channel value"))?;
            *slot = v / 255.0;
        }
        let a = if has_alpha {
            parts[3]
                .parse()
                .map_err(|_| ColorParseError::new(src, "bad alpha value"))?
        } else {
            1.0
        };

        Ok(Self::from_straight(rgb[0], rgb[1], rgb[2], a))
    }

    /// Formats as a CSS `rgba(...)` string with straight alpha.
    pub fn to_css(self) -> String {
        let (r, g, b, a) = self.to_straight();
        let byte = |c: f32| (c * 255.0).round() as u8;
        format!("rgba({},{},{},{})", byte(r), byte(g), byte(b), (a * 1000.0).round() / 1000.0)
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    match hex.len() {
        3 => Some(Color::from_srgb_u8(nibble(0)?, nibble(1)?, nibble(2)?, 255)),
        6 => Some(Color::from_srgb_u8(byte(0)?, byte(2)?, byte(4)?, 255)),
        8 => Some(Color::from_srgb_u8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

/// A CSS color string that [`Color::parse_css`] could not read.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorParseError {
    pub input: String,
    pub reason: &'static str,
}

impl ColorParseError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self { input: input.to_string(), reason }
    }
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color {:?}: {}", self.input, self.reason)
    }
}

impl std::error::Error for ColorParseError {}
