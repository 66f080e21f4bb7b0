use serde::{Deserialize, Serialize};

use crate::color::convert::ColorValue;
use crate::color::gradient::{Gradient, GradientKind};
use crate::foundation::core::clamp_percent;

/// Solid or gradient paint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FillKind {
    #[default]
    Solid,
    Gradient,
}

impl FillKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Gradient => "gradient",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solid" => Some(Self::Solid),
            "gradient" => Some(Self::Gradient),
            _ => None,
        }
    }
}

/// What a fill or stroke is painted with.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Paint {
    /// Not painted (`data-*-color="none"`).
    None,
    Solid(ColorValue),
    Gradient(Gradient),
}

impl Paint {
    pub fn kind(&self) -> FillKind {
        match self {
            Self::Gradient(_) => FillKind::Gradient,
            Self::None | Self::Solid(_) => FillKind::Solid,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn gradient(&self) -> Option<&Gradient> {
        match self {
            Self::Gradient(g) => Some(g),
            _ => None,
        }
    }
}

/// Solid or dashed outline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrokeType {
    #[default]
    Solid,
    Dashed,
}

impl StrokeType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solid" => Some(Self::Solid),
            "dashed" => Some(Self::Dashed),
            _ => None,
        }
    }
}

/// Where the outline sits relative to the glyph edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrokePosition {
    #[default]
    Outside,
    Center,
    Inside,
}

impl StrokePosition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outside => "outside",
            Self::Center => "center",
            Self::Inside => "inside",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "outside" => Some(Self::Outside),
            "center" => Some(Self::Center),
            "inside" => Some(Self::Inside),
            _ => None,
        }
    }

    /// Painted outline width for a requested thickness.
    ///
    /// Outlines are centered on the glyph edge, so only half of the painted width lands outside
    /// (or inside) the glyph: those positions paint at twice the thickness.
    pub fn painted_width(self, thickness_px: f64) -> f64 {
        match self {
            Self::Outside | Self::Inside => thickness_px * 2.0,
            Self::Center => thickness_px,
        }
    }
}

/// Dash pattern of a dashed outline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashPattern {
    pub length: f64,
    pub gap: f64,
    pub round_caps: bool,
}

impl Default for DashPattern {
    fn default() -> Self {
        Self {
            length: 4.0,
            gap: 4.0,
            round_caps: false,
        }
    }
}

/// Text fill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FillStyle {
    pub paint: Paint,
    /// Opacity in percent.
    pub opacity: u8,
}

impl Default for FillStyle {
    fn default() -> Self {
        Self {
            paint: Paint::Solid(ColorValue::BLACK),
            opacity: 100,
        }
    }
}

/// Text outline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub paint: Paint,
    /// Opacity in percent.
    pub opacity: u8,
    pub line: StrokeType,
    pub position: StrokePosition,
    pub thickness_px: f64,
    pub dash: DashPattern,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            paint: Paint::Solid(ColorValue::BLACK),
            opacity: 100,
            line: StrokeType::Solid,
            position: StrokePosition::Outside,
            thickness_px: 0.0,
            dash: DashPattern::default(),
        }
    }
}

impl StrokeStyle {
    /// A stroke that actually paints something.
    pub fn is_visible(&self) -> bool {
        self.thickness_px > 0.0 && !self.paint.is_none() && self.opacity > 0
    }

    pub fn fill_kind(&self) -> FillKind {
        self.paint.kind()
    }
}

/// Whether a [`StyleEdit`] addresses the fill or the stroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaintTarget {
    Fill,
    Stroke,
}

/// One control edit.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleEdit {
    /// Hex text from the color input; ignored unless it is a complete `#RRGGBB`.
    ColorHex(PaintTarget, String),
    Color(PaintTarget, ColorValue),
    ClearPaint(PaintTarget),
    /// Opacity in percent; out-of-range input is clamped.
    Opacity(PaintTarget, f64),
    FillKind(PaintTarget, FillKind),
    Gradient(PaintTarget, Gradient),
    GradientKind(PaintTarget, GradientKind),
    /// Recolor one gradient stop (by insertion index).
    StopColor(PaintTarget, usize, ColorValue),
    /// Stop opacity in percent; clamped.
    StopOpacity(PaintTarget, usize, f64),
    StrokeType(StrokeType),
    StrokePosition(StrokePosition),
    Thickness(f64),
    DashLength(f64),
    DashGap(f64),
    RoundCaps(bool),
}

/// Full style applied to one text-bearing element.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementStyleState {
    pub fill: FillStyle,
    pub stroke: StrokeStyle,
}

impl ElementStyleState {
    fn paint_mut(&mut self, target: PaintTarget) -> (&mut Paint, &mut u8) {
        match target {
            PaintTarget::Fill => (&mut self.fill.paint, &mut self.fill.opacity),
            PaintTarget::Stroke => (&mut self.stroke.paint, &mut self.stroke.opacity),
        }
    }

    /// Compute the state after `edit` without mutating `self`.
    pub fn with_edit(&self, edit: &StyleEdit) -> Self {
        let mut next = self.clone();
        next.apply(edit);
        next
    }

    /// Apply `edit` in place. Returns whether anything changed; rejected input changes nothing.
    pub fn apply(&mut self, edit: &StyleEdit) -> bool {
        let before = self.clone();
        match edit {
            StyleEdit::ColorHex(target, hex) => {
                let Some(color) = ColorValue::from_hex(hex) else {
                    tracing::trace!(input = %hex, "ignoring incomplete hex input");
                    return false;
                };
                self.set_color(*target, color);
            }
            StyleEdit::Color(target, color) => self.set_color(*target, *color),
            StyleEdit::ClearPaint(target) => *self.paint_mut(*target).0 = Paint::None,
            StyleEdit::Opacity(target, v) => *self.paint_mut(*target).1 = clamp_percent(*v),
            StyleEdit::FillKind(target, kind) => {
                let (paint, _) = self.paint_mut(*target);
                *paint = match (kind, &*paint) {
                    (FillKind::Gradient, Paint::Gradient(_))
                    | (FillKind::Solid, Paint::Solid(_) | Paint::None) => paint.clone(),
                    (FillKind::Gradient, Paint::Solid(c)) => {
                        Paint::Gradient(Gradient::two_stop(GradientKind::Linear, *c, ColorValue::WHITE))
                    }
                    (FillKind::Gradient, Paint::None) => Paint::Gradient(Gradient::default()),
                    (FillKind::Solid, Paint::Gradient(g)) => Paint::Solid(
                        g.sorted_stops()
                            .first()
                            .map_or(ColorValue::BLACK, |s| s.color),
                    ),
                };
            }
            StyleEdit::Gradient(target, g) => *self.paint_mut(*target).0 = Paint::Gradient(g.clone()),
            StyleEdit::GradientKind(target, kind) => {
                if let Paint::Gradient(g) = self.paint_mut(*target).0 {
                    g.kind = *kind;
                }
            }
            StyleEdit::StopColor(target, index, color) => {
                if let Paint::Gradient(g) = self.paint_mut(*target).0 {
                    if let Some(stop) = g.stop_mut(*index) {
                        stop.color = *color;
                    }
                }
            }
            StyleEdit::StopOpacity(target, index, v) => {
                if let Paint::Gradient(g) = self.paint_mut(*target).0 {
                    if let Some(stop) = g.stop_mut(*index) {
                        stop.set_opacity(*v);
                    }
                }
            }
            StyleEdit::StrokeType(t) => self.stroke.line = *t,
            StyleEdit::StrokePosition(p) => self.stroke.position = *p,
            StyleEdit::Thickness(v) => self.stroke.thickness_px = non_negative(*v),
            StyleEdit::DashLength(v) => self.stroke.dash.length = non_negative(*v),
            StyleEdit::DashGap(v) => self.stroke.dash.gap = non_negative(*v),
            StyleEdit::RoundCaps(b) => self.stroke.dash.round_caps = *b,
        }
        *self != before
    }

    fn set_color(&mut self, target: PaintTarget, color: ColorValue) {
        *self.paint_mut(target).0 = Paint::Solid(color);
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/style/state.rs"]
mod tests;
