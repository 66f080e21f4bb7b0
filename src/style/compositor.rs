use std::collections::{BTreeMap, BTreeSet};

use crate::foundation::core::{ElementId, Insets, Size, fmt_num};
use crate::host::element::{Element, TextAlign};
use crate::style::state::{ElementStyleState, Paint, StrokePosition, StrokeType};
use crate::style::svg::{SvgLine, SvgPaint, SvgStroke, SvgTextDocument, TextAnchor, svg_data_uri};
use crate::text::measure::{FontDescriptor, TextMeasurer};
use crate::text::wrap::WrapRequest;

/// Inline properties owned by the compositor. Every patch either sets or removes each of these,
/// so switching modes never leaves the other mode's residue behind.
pub const COMPOSITOR_PROPERTIES: [&str; 9] = [
    "color",
    "background-image",
    "background-size",
    "background-repeat",
    "background-clip",
    "-webkit-background-clip",
    "-webkit-text-fill-color",
    "-webkit-text-stroke",
    "paint-order",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Direct text color / outline properties.
    Native,
    /// A generated SVG installed as the element background.
    Synthesized,
}

/// Pick the rendering strategy for `state`.
///
/// Dashed outlines and gradient outlines have no native equivalent. A gradient fill is painted
/// natively through background clipping, which cannot coexist with a visible outline.
pub fn choose_mode(state: &ElementStyleState) -> RenderMode {
    let stroke = &state.stroke;
    let synthesized = stroke.line == StrokeType::Dashed
        || matches!(stroke.paint, Paint::Gradient(_))
        || (matches!(state.fill.paint, Paint::Gradient(_)) && stroke.is_visible());
    if synthesized {
        RenderMode::Synthesized
    } else {
        RenderMode::Native
    }
}

/// Layout inputs read from the live element at composition time.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutSnapshot {
    pub element: ElementId,
    pub size: Size,
    pub padding: Insets,
    pub font: FontDescriptor,
    pub align: TextAlign,
    pub line_height_px: f32,
    pub text: String,
}

impl LayoutSnapshot {
    pub fn from_element(element: &Element) -> Self {
        let c = &element.computed;
        let mut font = FontDescriptor::new(c.primary_family(), c.font_weight, c.font_size_px);
        font.letter_spacing_px = c.letter_spacing_px;
        Self {
            element: element.id,
            size: c.size,
            padding: c.padding,
            font,
            align: c.text_align,
            line_height_px: c.line_height_px(),
            text: element.text.clone(),
        }
    }

    /// False until the host has given the element a non-empty box.
    pub fn is_laid_out(&self) -> bool {
        self.size.width > 0.0 && self.size.height > 0.0
    }

    /// Width available to text: outer width minus horizontal padding.
    pub fn interior_width(&self) -> f64 {
        (self.size.width - self.padding.x0 - self.padding.x1).max(0.0)
    }

    fn anchor(&self) -> (TextAnchor, f64) {
        match self.align {
            TextAlign::Start | TextAlign::Left | TextAlign::Justify => {
                (TextAnchor::Start, self.padding.x0)
            }
            TextAlign::Center => (
                TextAnchor::Middle,
                self.padding.x0 + self.interior_width() / 2.0,
            ),
            TextAlign::Right | TextAlign::End => {
                (TextAnchor::End, self.size.width - self.padding.x1)
            }
        }
    }
}

/// One atomic change to an element's inline style.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StylePatch {
    set: BTreeMap<String, String>,
    remove: BTreeSet<String>,
}

impl StylePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, prop: &str, value: impl Into<String>) -> &mut Self {
        self.remove.remove(prop);
        self.set.insert(prop.to_owned(), value.into());
        self
    }

    pub fn remove(&mut self, prop: &str) -> &mut Self {
        self.set.remove(prop);
        self.remove.insert(prop.to_owned());
        self
    }

    pub fn get(&self, prop: &str) -> Option<&str> {
        self.set.get(prop).map(String::as_str)
    }

    /// Properties set by this patch, in name order.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.set.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn removes(&self, prop: &str) -> bool {
        self.remove.contains(prop)
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.remove.is_empty()
    }

    /// Remove every compositor-owned property this patch does not set.
    fn clear_unset(&mut self) {
        for prop in COMPOSITOR_PROPERTIES {
            if !self.set.contains_key(prop) {
                self.remove.insert(prop.to_owned());
            }
        }
    }

    /// Commit the patch. Removals run first so a patch never observes its own partial state.
    pub fn apply_to(&self, element: &mut Element) {
        for prop in &self.remove {
            element.remove_style(prop);
        }
        for (prop, value) in &self.set {
            element.set_style(prop.clone(), value.clone());
        }
    }
}

/// Outcome of one composition pass.
#[derive(Clone, Debug, PartialEq)]
pub enum Composition {
    Native(StylePatch),
    Synthesized { svg: String, patch: StylePatch },
    /// Not laid out yet; retry on the next layout change.
    Deferred,
}

impl Composition {
    pub fn patch(&self) -> Option<&StylePatch> {
        match self {
            Self::Native(patch) | Self::Synthesized { patch, .. } => Some(patch),
            Self::Deferred => None,
        }
    }
}

/// Turns an [`ElementStyleState`] into inline style, generating unique SVG ids per pass.
#[derive(Debug, Default)]
pub struct Compositor {
    seq: u64,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    #[tracing::instrument(level = "debug", skip_all, fields(element = %layout.element))]
    pub fn compose(
        &mut self,
        state: &ElementStyleState,
        layout: &LayoutSnapshot,
        measurer: Option<&mut dyn TextMeasurer>,
    ) -> Composition {
        match choose_mode(state) {
            RenderMode::Native => Composition::Native(native_patch(state)),
            RenderMode::Synthesized => self.synthesize(state, layout, measurer),
        }
    }

    /// Render `state` as a synthesized document regardless of [`choose_mode`].
    pub fn synthesize(
        &mut self,
        state: &ElementStyleState,
        layout: &LayoutSnapshot,
        measurer: Option<&mut dyn TextMeasurer>,
    ) -> Composition {
        if !layout.is_laid_out() {
            tracing::debug!(
                width = layout.size.width,
                height = layout.size.height,
                "element has no box yet, deferring composition"
            );
            return Composition::Deferred;
        }
        let Some(measurer) = measurer else {
            tracing::debug!("no text measurer available, falling back to native styles");
            return Composition::Native(native_patch(state));
        };

        let wrapped = match WrapRequest::new(
            &layout.text,
            &layout.font,
            layout.interior_width() as f32,
        )
        .collect(measurer)
        {
            Ok(lines) => lines,
            Err(err) => {
                tracing::warn!(%err, "text measurement failed, falling back to native styles");
                return Composition::Native(native_patch(state));
            }
        };

        self.seq += 1;
        let prefix = format!("fs-{}-{}", layout.element, self.seq);
        let (anchor, x) = layout.anchor();
        let line_height = f64::from(layout.line_height_px);
        let lines = wrapped
            .into_iter()
            .enumerate()
            .map(|(i, line)| SvgLine {
                x,
                y: layout.padding.y0 + line_height * (i as f64 + 0.5),
                text: line.text,
            })
            .collect();

        let stroke = &state.stroke;
        let svg_stroke = stroke.is_visible().then(|| SvgStroke {
            paint: svg_paint(&stroke.paint, stroke.opacity, format!("{prefix}-stroke")),
            width: stroke.position.painted_width(stroke.thickness_px),
            position: stroke.position,
            dash: (stroke.line == StrokeType::Dashed)
                .then_some((stroke.dash.length, stroke.dash.gap)),
            round_caps: stroke.dash.round_caps,
        });

        let doc = SvgTextDocument {
            width: layout.size.width,
            height: layout.size.height,
            font: layout.font.clone(),
            anchor,
            lines,
            fill: svg_paint(&state.fill.paint, state.fill.opacity, format!("{prefix}-fill")),
            stroke: svg_stroke,
            id_prefix: prefix,
        };
        let svg = doc.render();

        let mut patch = StylePatch::new();
        patch
            .set("background-image", format!("url(\"{}\")", svg_data_uri(&svg)))
            .set("background-size", "100% 100%")
            .set("background-repeat", "no-repeat")
            .set("color", "transparent")
            .set("-webkit-text-fill-color", "transparent")
            .set("-webkit-text-stroke", "0px transparent");
        patch.clear_unset();
        Composition::Synthesized { svg, patch }
    }
}

fn svg_paint(paint: &Paint, opacity: u8, id: String) -> SvgPaint {
    match paint {
        Paint::None => SvgPaint::None,
        Paint::Solid(color) => SvgPaint::Color {
            color: *color,
            opacity,
        },
        Paint::Gradient(g) => SvgPaint::Gradient {
            id,
            gradient: g.with_opacity_scale(opacity),
        },
    }
}

/// Native rendering: text color (or clipped background gradient) plus `-webkit-text-stroke`.
fn native_patch(state: &ElementStyleState) -> StylePatch {
    let mut patch = StylePatch::new();
    let fill = &state.fill;
    match &fill.paint {
        Paint::None => {
            patch.set("color", "transparent");
        }
        Paint::Solid(color) => {
            patch.set("color", color.to_css_rgba(fill.opacity));
        }
        Paint::Gradient(g) => {
            patch
                .set("background-image", g.with_opacity_scale(fill.opacity).serialize())
                .set("background-clip", "text")
                .set("-webkit-background-clip", "text")
                .set("-webkit-text-fill-color", "transparent")
                .set("color", "transparent");
        }
    }

    let stroke = &state.stroke;
    if stroke.is_visible() {
        if let Paint::Solid(color) = &stroke.paint {
            let width = stroke.position.painted_width(stroke.thickness_px);
            patch.set(
                "-webkit-text-stroke",
                format!("{}px {}", fmt_num(width, 2), color.to_css_rgba(stroke.opacity)),
            );
            patch.set(
                "paint-order",
                match stroke.position {
                    StrokePosition::Outside => "stroke fill",
                    StrokePosition::Center | StrokePosition::Inside => "fill stroke",
                },
            );
        }
    }
    patch.clear_unset();
    patch
}

#[cfg(test)]
#[path = "../../tests/unit/style/compositor.rs"]
mod tests;
