use serde::{Deserialize, Serialize};

use crate::color::convert::{ColorValue, Rgb, parse_css_color};
use crate::foundation::core::clamp_percent;

/// Gradient geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradientKind {
    /// `linear-gradient(to right, ..)`.
    #[default]
    Linear,
    /// `radial-gradient(circle, ..)`.
    Radial,
}

impl GradientKind {
    /// Attribute spelling (`Linear`/`Radial`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::Radial => "Radial",
        }
    }

    /// Parse the attribute spelling, case-insensitively.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Some(Self::Linear),
            "radial" => Some(Self::Radial),
            _ => None,
        }
    }

    fn function_name(self) -> &'static str {
        match self {
            Self::Linear => "linear-gradient",
            Self::Radial => "radial-gradient",
        }
    }

    fn leading_argument(self) -> &'static str {
        match self {
            Self::Linear => "to right",
            Self::Radial => "circle",
        }
    }
}

/// One color sample within a gradient. Offset and opacity stay within `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "StopRepr")]
pub struct GradientStop {
    /// Stop color.
    pub color: ColorValue,
    offset: u8,
    opacity: u8,
}

#[derive(Deserialize)]
struct StopRepr {
    color: ColorValue,
    offset: u8,
    opacity: u8,
}

impl From<StopRepr> for GradientStop {
    fn from(r: StopRepr) -> Self {
        Self::new(r.color, r.offset, r.opacity)
    }
}

impl GradientStop {
    pub fn new(color: ColorValue, offset: u8, opacity: u8) -> Self {
        Self {
            color,
            offset: offset.min(100),
            opacity: opacity.min(100),
        }
    }

    /// Position along the gradient in percent.
    pub fn offset(&self) -> u8 {
        self.offset
    }

    /// Stop opacity in percent.
    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    /// Set the opacity from any percent value, clamped.
    pub fn set_opacity(&mut self, pct: f64) {
        self.opacity = clamp_percent(pct);
    }
}

/// Multi-stop gradient. Always holds at least two stops.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GradientRepr")]
pub struct Gradient {
    pub kind: GradientKind,
    stops: Vec<GradientStop>,
}

#[derive(Deserialize)]
struct GradientRepr {
    #[serde(default)]
    kind: GradientKind,
    stops: Vec<GradientStop>,
}

impl TryFrom<GradientRepr> for Gradient {
    type Error = String;

    fn try_from(r: GradientRepr) -> Result<Self, Self::Error> {
        let count = r.stops.len();
        Self::new(r.kind, r.stops)
            .ok_or_else(|| format!("gradient needs at least two stops, got {count}"))
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self::two_stop(
            GradientKind::Linear,
            ColorValue::from_rgb(Rgb::new(0x63, 0x66, 0xF1)),
            ColorValue::from_rgb(Rgb::new(0xA8, 0x55, 0xF7)),
        )
    }
}

impl Gradient {
    /// Build a gradient from explicit stops; `None` when fewer than two are given.
    pub fn new(kind: GradientKind, stops: Vec<GradientStop>) -> Option<Self> {
        (stops.len() >= 2).then_some(Self { kind, stops })
    }

    /// Fully opaque `from` at 0% to `to` at 100%.
    pub fn two_stop(kind: GradientKind, from: ColorValue, to: ColorValue) -> Self {
        Self {
            kind,
            stops: vec![
                GradientStop::new(from, 0, 100),
                GradientStop::new(to, 100, 100),
            ],
        }
    }

    /// Stops in insertion order.
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Stops ordered left-to-right by offset. Equal offsets keep insertion order.
    pub fn sorted_stops(&self) -> Vec<GradientStop> {
        let mut out = self.stops.clone();
        out.sort_by_key(|s| s.offset);
        out
    }

    /// Mutable access to a single stop (color and opacity edits).
    pub fn stop_mut(&mut self, index: usize) -> Option<&mut GradientStop> {
        self.stops.get_mut(index)
    }

    /// Insert a stop at `offset`, colored by interpolating its neighbours. Returns the new index.
    pub fn add_stop(&mut self, offset: u8) -> usize {
        let offset = offset.min(100);
        let sorted = self.sorted_stops();
        let left = sorted.iter().rev().find(|s| s.offset <= offset);
        let right = sorted.iter().find(|s| s.offset >= offset);

        let (color, opacity) = match (left, right) {
            (Some(l), Some(r)) if r.offset > l.offset => {
                let t = f64::from(offset - l.offset) / f64::from(r.offset - l.offset);
                let rgb = l.color.rgb().lerp(r.color.rgb(), t);
                let op = f64::from(l.opacity) + (f64::from(r.opacity) - f64::from(l.opacity)) * t;
                (ColorValue::from_rgb(rgb), clamp_percent(op))
            }
            (Some(s), _) | (None, Some(s)) => (s.color, s.opacity),
            (None, None) => (ColorValue::BLACK, 100),
        };

        self.stops.push(GradientStop::new(color, offset, opacity));
        self.stops.len() - 1
    }

    /// Remove a stop. Refused (returns `false`) when it would leave fewer than two stops.
    pub fn remove_stop(&mut self, index: usize) -> bool {
        if self.stops.len() <= 2 || index >= self.stops.len() {
            return false;
        }
        self.stops.remove(index);
        true
    }

    /// Move a stop to a new offset (clamped to `[0, 100]`).
    pub fn move_stop(&mut self, index: usize, offset: f64) -> bool {
        match self.stops.get_mut(index) {
            Some(stop) => {
                stop.offset = clamp_percent(offset);
                true
            }
            None => false,
        }
    }

    /// Copy of this gradient with every stop opacity multiplied by `pct / 100`.
    pub fn with_opacity_scale(&self, pct: u8) -> Self {
        let scale = f64::from(pct.min(100)) / 100.0;
        let stops = self
            .stops
            .iter()
            .map(|s| GradientStop {
                opacity: clamp_percent(f64::from(s.opacity) * scale),
                ..*s
            })
            .collect();
        Self {
            kind: self.kind,
            stops,
        }
    }

    /// Parse `linear-gradient(..)` / `radial-gradient(..)` style text.
    ///
    /// Returns `None` when the text is not a recognized gradient function or yields fewer than two
    /// color stops; callers fall back to a solid color.
    pub fn parse(style: &str) -> Option<Self> {
        let style = style.trim();
        let lower = style.to_ascii_lowercase();
        let (kind, name_len) = [GradientKind::Linear, GradientKind::Radial]
            .into_iter()
            .find_map(|k| {
                let name = k.function_name();
                lower
                    .starts_with(name)
                    .then_some((k, name.len()))
            })?;

        let rest = style[name_len..].trim_start();
        let body = function_body(rest)?;

        let colors: Vec<(CssStop, Option<f64>)> = split_top_level(body, ',')
            .into_iter()
            .filter_map(|arg| {
                let (color_part, offset) = split_offset(arg);
                parse_css_color(color_part).map(|c| (CssStop(c.rgb, c.alpha), offset))
            })
            .collect();

        if colors.len() < 2 {
            tracing::debug!(input = style, "gradient has fewer than two color stops");
            return None;
        }

        let last = colors.len() - 1;
        let stops = colors
            .into_iter()
            .enumerate()
            .map(|(i, (CssStop(rgb, alpha), offset))| {
                let offset = offset.unwrap_or_else(|| inferred_offset(i, last));
                GradientStop {
                    color: ColorValue::from_rgb(rgb),
                    offset: clamp_percent(offset),
                    opacity: clamp_percent(alpha * 100.0),
                }
            })
            .collect();

        Some(Self { kind, stops })
    }

    /// Serialize back into gradient function text, one `rgba(..) offset%` token per stop.
    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(32 + self.stops.len() * 28);
        out.push_str(self.kind.function_name());
        out.push('(');
        out.push_str(self.kind.leading_argument());
        for stop in &self.stops {
            out.push_str(", ");
            out.push_str(&stop.color.to_css_rgba(stop.opacity));
            out.push(' ');
            out.push_str(&stop.offset.to_string());
            out.push('%');
        }
        out.push(')');
        out
    }
}

struct CssStop(Rgb, f64);

/// First stop 0%, last stop 100%, the rest evenly spaced by index.
fn inferred_offset(index: usize, last: usize) -> f64 {
    if index == 0 || last == 0 {
        return 0.0;
    }
    if index == last {
        return 100.0;
    }
    (index as f64) * 100.0 / (last as f64)
}

/// Return the text between the opening `(` at the start of `s` and its matching `)`.
fn function_body(s: &str) -> Option<&str> {
    let inner = s.strip_prefix('(')?;
    let mut depth = 1usize;
    for (i, c) in inner.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&inner[..i]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split on `sep` only when not nested inside parentheses.
fn split_top_level(s: &str, sep: char) -> Vec<&str> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                out.push(s[start..i].trim());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    let tail = s[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

/// Split `"<color> <n>%"` into the color text and its offset, when the trailing top-level token is
/// a percentage.
fn split_offset(arg: &str) -> (&str, Option<f64>) {
    let mut depth = 0usize;
    let mut last_space = None;
    for (i, c) in arg.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => last_space = Some(i),
            _ => {}
        }
    }

    let Some(split) = last_space else {
        return (arg, None);
    };
    let (color, tail) = arg.split_at(split);
    let pct = tail
        .trim()
        .strip_suffix('%')
        .and_then(|n| n.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite());
    match pct {
        Some(v) => (color.trim_end(), Some(v)),
        None => (arg, None),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/gradient.rs"]
mod tests;
