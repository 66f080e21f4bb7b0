use serde::{Deserialize, Serialize};

/// 8-bit sRGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Construct from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation per channel, rounded.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        fn ch(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }
        let t = t.clamp(0.0, 1.0);
        Self {
            r: ch(self.r, other.r, t),
            g: ch(self.g, other.g, t),
            b: ch(self.b, other.b, t),
        }
    }
}

/// HSV color with hue in degrees `[0, 360)` and saturation/value in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation in `[0, 1]`.
    pub s: f64,
    /// Value in `[0, 1]`.
    pub v: f64,
}

/// HSV as shown by picker controls: saturation and value as integer percentages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HsvPercent {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation in `[0, 100]`.
    pub s: u8,
    /// Value in `[0, 100]`.
    pub v: u8,
}

impl Hsv {
    /// Convert to the picker's percentage scale.
    pub fn to_percent(self) -> HsvPercent {
        HsvPercent {
            h: normalize_hue(self.h),
            s: (self.s.clamp(0.0, 1.0) * 100.0).round() as u8,
            v: (self.v.clamp(0.0, 1.0) * 100.0).round() as u8,
        }
    }

    /// Convert from the picker's percentage scale.
    pub fn from_percent(p: HsvPercent) -> Self {
        Self {
            h: normalize_hue(p.h),
            s: f64::from(p.s.min(100)) / 100.0,
            v: f64::from(p.v.min(100)) / 100.0,
        }
    }
}

fn normalize_hue(h: f64) -> f64 {
    if !h.is_finite() {
        return 0.0;
    }
    let h = h % 360.0;
    if h < 0.0 { h + 360.0 } else { h }
}

/// Return `true` for exactly six hex digits with an optional leading `#`.
///
/// Live-typing inputs gate state writes behind this check so partial edits are ignored.
pub fn is_strict_hex(s: &str) -> bool {
    let digits = s.strip_prefix('#').unwrap_or(s);
    digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Parse `#RRGGBB` (leading `#` optional). Malformed input yields black.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    let s = hex.trim();
    if !is_strict_hex(s) {
        return Rgb::default();
    }
    let digits = s.strip_prefix('#').unwrap_or(s);
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0);
    Rgb::new(byte(0), byte(2), byte(4))
}

/// Format as uppercase `#RRGGBB`.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b)
}

pub fn rgb_to_hsv(rgb: Rgb) -> Hsv {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let s = if max == 0.0 { 0.0 } else { delta / max };

    Hsv {
        h: normalize_hue(h),
        s,
        v: max,
    }
}

pub fn hsv_to_rgb(hsv: Hsv) -> Rgb {
    let h = normalize_hue(hsv.h);
    let s = hsv.s.clamp(0.0, 1.0);
    let v = hsv.v.clamp(0.0, 1.0);

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_u8 = |ch: f64| ((ch + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb::new(to_u8(r), to_u8(g), to_u8(b))
}

/// Normalized color value holding RGB as the canonical projection.
///
/// The hex and HSV projections are derived on demand, so all three agree up to rounding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ColorValue {
    rgb: Rgb,
}

impl ColorValue {
    pub const BLACK: Self = Self::from_rgb(Rgb::new(0, 0, 0));
    pub const WHITE: Self = Self::from_rgb(Rgb::new(255, 255, 255));

    pub const fn from_rgb(rgb: Rgb) -> Self {
        Self { rgb }
    }

    /// Strict construction: `None` unless `hex` passes [`is_strict_hex`].
    pub fn from_hex(hex: &str) -> Option<Self> {
        is_strict_hex(hex.trim()).then(|| Self::from_rgb(hex_to_rgb(hex)))
    }

    pub fn from_hsv(hsv: Hsv) -> Self {
        Self::from_rgb(hsv_to_rgb(hsv))
    }

    pub fn rgb(self) -> Rgb {
        self.rgb
    }

    pub fn hex(self) -> String {
        rgb_to_hex(self.rgb)
    }

    pub fn hsv(self) -> Hsv {
        rgb_to_hsv(self.rgb)
    }

    /// Replace the color from hex text. Malformed text leaves the value untouched and returns
    /// `false`.
    pub fn set_hex(&mut self, hex: &str) -> bool {
        match Self::from_hex(hex) {
            Some(c) => {
                *self = c;
                true
            }
            None => {
                tracing::trace!(input = hex, "rejected partial hex input");
                false
            }
        }
    }

    pub fn set_rgb(&mut self, rgb: Rgb) {
        self.rgb = rgb;
    }

    pub fn set_hsv(&mut self, hsv: Hsv) {
        self.rgb = hsv_to_rgb(hsv);
    }

    /// `rgba(r,g,b,a)` with `opacity_pct` mapped to alpha.
    pub fn to_css_rgba(self, opacity_pct: u8) -> String {
        format!(
            "rgba({},{},{},{})",
            self.rgb.r,
            self.rgb.g,
            self.rgb.b,
            crate::foundation::core::fmt_num(f64::from(opacity_pct.min(100)) / 100.0, 2)
        )
    }
}

impl From<ColorValue> for String {
    fn from(c: ColorValue) -> Self {
        c.hex()
    }
}

impl TryFrom<String> for ColorValue {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s).ok_or_else(|| format!("color must be #RRGGBB, got \"{s}\""))
    }
}

impl std::fmt::Display for ColorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hex())
    }
}

/// A color parsed from CSS text together with its alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CssColor {
    pub rgb: Rgb,
    pub alpha: f64,
}

/// Parse the CSS color forms that computed styles and gradient arguments produce:
/// `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgb(..)`, `rgba(..)` and `transparent`.
pub fn parse_css_color(s: &str) -> Option<CssColor> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("transparent") {
        return Some(CssColor {
            rgb: Rgb::default(),
            alpha: 0.0,
        });
    }
    if let Some(digits) = s.strip_prefix('#') {
        return parse_hex_forms(digits);
    }

    let lower = s.to_ascii_lowercase();
    let args = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))?
        .strip_suffix(')')?;

    // Both the legacy comma form and the space form with an optional `/ alpha`.
    let normalized = args.replace('/', " ").replace(',', " ");
    let parts: Vec<&str> = normalized.split_whitespace().collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let channel = |p: &str| -> Option<u8> {
        if let Some(pct) = p.strip_suffix('%') {
            let v: f64 = pct.parse().ok()?;
            return Some((v.clamp(0.0, 100.0) * 2.55).round() as u8);
        }
        let v: f64 = p.parse().ok()?;
        Some(v.round().clamp(0.0, 255.0) as u8)
    };
    let alpha = match parts.get(3) {
        None => 1.0,
        Some(p) => {
            let v = match p.strip_suffix('%') {
                Some(pct) => pct.parse::<f64>().ok()? / 100.0,
                None => p.parse::<f64>().ok()?,
            };
            if !v.is_finite() {
                return None;
            }
            v.clamp(0.0, 1.0)
        }
    };

    Some(CssColor {
        rgb: Rgb::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?),
        alpha,
    })
}

fn parse_hex_forms(digits: &str) -> Option<CssColor> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok().map(|n| n * 17);
    match digits.len() {
        3 => Some(CssColor {
            rgb: Rgb::new(nibble(0)?, nibble(1)?, nibble(2)?),
            alpha: 1.0,
        }),
        6 => Some(CssColor {
            rgb: Rgb::new(byte(0)?, byte(2)?, byte(4)?),
            alpha: 1.0,
        }),
        8 => Some(CssColor {
            rgb: Rgb::new(byte(0)?, byte(2)?, byte(4)?),
            alpha: f64::from(byte(6)?) / 255.0,
        }),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/convert.rs"]
mod tests;
