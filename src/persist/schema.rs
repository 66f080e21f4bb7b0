//! Attribute schema mirroring style and animation state onto an element.
//!
//! Every value is stored as a string. Reading never fails: malformed or missing values are
//! treated as absent and resolved from the element's computed style.

use crate::animation::ease::Easing;
use crate::animation::settings::{
    AnimationBundle, AnimationEdit, AnimationSettings, AnimationTrigger, InteractAction,
    TriggerContext,
};
use crate::color::convert::{ColorValue, parse_css_color};
use crate::color::gradient::{Gradient, GradientKind};
use crate::foundation::core::{clamp_percent, fmt_num};
use crate::host::element::{ComputedStyle, Element};
use crate::style::state::{
    DashPattern, ElementStyleState, FillKind, FillStyle, Paint, StrokePosition, StrokeStyle,
    StrokeType,
};

pub const FILL_COLOR: &str = "data-fill-color";
pub const FILL_OPACITY: &str = "data-fill-opacity";
pub const FILL_TYPE: &str = "data-fill-type";
pub const FILL_GRADIENT: &str = "data-fill-gradient";
pub const FILL_GRADIENT_TYPE: &str = "data-fill-gradient-type";
pub const STROKE_COLOR: &str = "data-stroke-color";
pub const STROKE_OPACITY: &str = "data-stroke-opacity";
pub const STROKE_FILL_TYPE: &str = "data-stroke-fill-type";
pub const STROKE_GRADIENT: &str = "data-stroke-gradient";
pub const STROKE_GRADIENT_TYPE: &str = "data-stroke-gradient-type";
pub const STROKE_TYPE: &str = "data-stroke-type";
pub const STROKE_POSITION: &str = "data-stroke-position";
pub const BORDER_THICKNESS: &str = "data-border-thickness";
pub const DASH_LENGTH: &str = "data-dash-length";
pub const DASH_GAP: &str = "data-dash-gap";
pub const ROUND_CORNERS: &str = "data-round-corners";
pub const ANIMATION_TRIGGER: &str = "data-animation-trigger";
pub const ANIMATION_ACTION: &str = "data-animation-action";

const NONE_COLOR: &str = "none";

/// Per-context animation fields, in key order.
pub const ANIMATION_FIELDS: [&str; 9] = [
    "type",
    "delay",
    "duration",
    "speed",
    "easing",
    "every-visit",
    "fade-start",
    "fade-end",
    "fade-start-end",
];

/// `data-animation-{context}-{field}`.
pub fn animation_key(ctx: TriggerContext, field: &str) -> String {
    format!("data-animation-{}-{field}", ctx.segment())
}

/// Stored value of a `data-*-color` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoredColor {
    None,
    Color(ColorValue),
}

/// Style attributes as found on an element. `None` means absent or malformed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleSnapshot {
    pub fill_color: Option<StoredColor>,
    pub fill_opacity: Option<u8>,
    pub fill_type: Option<FillKind>,
    pub fill_gradient: Option<Gradient>,
    pub fill_gradient_type: Option<GradientKind>,
    pub stroke_color: Option<StoredColor>,
    pub stroke_opacity: Option<u8>,
    pub stroke_fill_type: Option<FillKind>,
    pub stroke_gradient: Option<Gradient>,
    pub stroke_gradient_type: Option<GradientKind>,
    pub stroke_type: Option<StrokeType>,
    pub stroke_position: Option<StrokePosition>,
    pub border_thickness: Option<f64>,
    pub dash_length: Option<f64>,
    pub dash_gap: Option<f64>,
    pub round_corners: Option<bool>,
}

impl StyleSnapshot {
    pub fn read(element: &Element) -> Self {
        let attr = |key: &'static str| element.attr(key).map(|v| (key, v));
        Self {
            fill_color: attr(FILL_COLOR).and_then(parse_stored_color),
            fill_opacity: attr(FILL_OPACITY).and_then(parse_percent),
            fill_type: attr(FILL_TYPE).and_then(|(k, v)| logged(k, v, FillKind::from_name(v))),
            fill_gradient: attr(FILL_GRADIENT).and_then(|(k, v)| logged(k, v, Gradient::parse(v))),
            fill_gradient_type: attr(FILL_GRADIENT_TYPE)
                .and_then(|(k, v)| logged(k, v, GradientKind::from_name(v))),
            stroke_color: attr(STROKE_COLOR).and_then(parse_stored_color),
            stroke_opacity: attr(STROKE_OPACITY).and_then(parse_percent),
            stroke_fill_type: attr(STROKE_FILL_TYPE)
                .and_then(|(k, v)| logged(k, v, FillKind::from_name(v))),
            stroke_gradient: attr(STROKE_GRADIENT)
                .and_then(|(k, v)| logged(k, v, Gradient::parse(v))),
            stroke_gradient_type: attr(STROKE_GRADIENT_TYPE)
                .and_then(|(k, v)| logged(k, v, GradientKind::from_name(v))),
            stroke_type: attr(STROKE_TYPE)
                .and_then(|(k, v)| logged(k, v, StrokeType::from_name(v))),
            stroke_position: attr(STROKE_POSITION)
                .and_then(|(k, v)| logged(k, v, StrokePosition::from_name(v))),
            border_thickness: attr(BORDER_THICKNESS).and_then(parse_length),
            dash_length: attr(DASH_LENGTH).and_then(parse_length),
            dash_gap: attr(DASH_GAP).and_then(parse_length),
            round_corners: attr(ROUND_CORNERS).and_then(|(k, v)| parse_bool(k, v)),
        }
    }

    /// True when the element carries no style attribute at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Build the in-memory state, inferring every absent field from `computed`.
    pub fn resolve(&self, computed: &ComputedStyle) -> ElementStyleState {
        let inferred = InferredStyle::from_computed(computed);

        let fill_kind = self
            .fill_type
            .or(self.fill_gradient.as_ref().map(|_| FillKind::Gradient))
            .unwrap_or(inferred.fill.kind());
        let fill = FillStyle {
            paint: resolve_paint(
                fill_kind,
                self.fill_color,
                self.fill_gradient.as_ref(),
                self.fill_gradient_type,
                &inferred.fill,
            ),
            opacity: self.fill_opacity.unwrap_or(inferred.fill_opacity),
        };

        let position = self.stroke_position.unwrap_or_default();
        let stroke_kind = self
            .stroke_fill_type
            .or(self.stroke_gradient.as_ref().map(|_| FillKind::Gradient))
            .unwrap_or(FillKind::Solid);
        let defaults = DashPattern::default();
        let stroke = StrokeStyle {
            paint: resolve_paint(
                stroke_kind,
                self.stroke_color,
                self.stroke_gradient.as_ref(),
                self.stroke_gradient_type,
                &inferred.stroke,
            ),
            opacity: self.stroke_opacity.unwrap_or(inferred.stroke_opacity),
            line: self.stroke_type.unwrap_or_default(),
            position,
            // Native outlines paint at a multiple of the stored thickness.
            thickness_px: self
                .border_thickness
                .unwrap_or_else(|| inferred.stroke_width_px / position.painted_width(1.0)),
            dash: DashPattern {
                length: self.dash_length.unwrap_or(defaults.length),
                gap: self.dash_gap.unwrap_or(defaults.gap),
                round_caps: self.round_corners.unwrap_or(defaults.round_caps),
            },
        };
        ElementStyleState { fill, stroke }
    }
}

/// Style derived from a computed style alone.
struct InferredStyle {
    fill: Paint,
    fill_opacity: u8,
    stroke: Paint,
    stroke_opacity: u8,
    stroke_width_px: f64,
}

impl InferredStyle {
    fn from_computed(c: &ComputedStyle) -> Self {
        let (fill, fill_opacity) = match Gradient::parse(&c.background_image) {
            Some(g) => (Paint::Gradient(g), 100),
            None => solid_from_css(&c.color),
        };
        let (stroke, stroke_opacity) = solid_from_css(&c.text_stroke_color);
        let stroke_width_px = if c.text_stroke_width_px.is_finite() {
            c.text_stroke_width_px.max(0.0)
        } else {
            0.0
        };
        Self {
            fill,
            fill_opacity,
            stroke,
            stroke_opacity,
            stroke_width_px,
        }
    }
}

fn solid_from_css(css: &str) -> (Paint, u8) {
    match parse_css_color(css) {
        Some(c) => (
            Paint::Solid(ColorValue::from_rgb(c.rgb)),
            clamp_percent(c.alpha * 100.0),
        ),
        None => {
            tracing::debug!(value = css, "computed color not understood, using black");
            (Paint::Solid(ColorValue::BLACK), 100)
        }
    }
}

fn resolve_paint(
    kind: FillKind,
    color: Option<StoredColor>,
    gradient: Option<&Gradient>,
    gradient_kind: Option<GradientKind>,
    inferred: &Paint,
) -> Paint {
    match kind {
        FillKind::Solid => match color {
            Some(StoredColor::None) => Paint::None,
            Some(StoredColor::Color(c)) => Paint::Solid(c),
            None => match inferred {
                Paint::Gradient(g) => Paint::Solid(
                    g.sorted_stops()
                        .first()
                        .map_or(ColorValue::BLACK, |s| s.color),
                ),
                other => other.clone(),
            },
        },
        FillKind::Gradient => {
            let mut g = gradient
                .cloned()
                .or_else(|| inferred.gradient().cloned())
                .unwrap_or_else(|| match color {
                    Some(StoredColor::Color(c)) => {
                        Gradient::two_stop(GradientKind::Linear, c, ColorValue::WHITE)
                    }
                    _ => Gradient::default(),
                });
            if let Some(k) = gradient_kind {
                g.kind = k;
            }
            Paint::Gradient(g)
        }
    }
}

/// Mirror `state` onto `element`.
pub fn write_style(state: &ElementStyleState, element: &mut Element) {
    write_paint(
        element,
        &state.fill.paint,
        state.fill.opacity,
        [FILL_COLOR, FILL_OPACITY, FILL_TYPE, FILL_GRADIENT, FILL_GRADIENT_TYPE],
    );
    let stroke = &state.stroke;
    write_paint(
        element,
        &stroke.paint,
        stroke.opacity,
        [
            STROKE_COLOR,
            STROKE_OPACITY,
            STROKE_FILL_TYPE,
            STROKE_GRADIENT,
            STROKE_GRADIENT_TYPE,
        ],
    );
    element.set_attr(STROKE_TYPE, stroke.line.as_str());
    element.set_attr(STROKE_POSITION, stroke.position.as_str());
    element.set_attr(BORDER_THICKNESS, fmt_num(stroke.thickness_px, 2));
    element.set_attr(DASH_LENGTH, fmt_num(stroke.dash.length, 2));
    element.set_attr(DASH_GAP, fmt_num(stroke.dash.gap, 2));
    element.set_attr(ROUND_CORNERS, flag(stroke.dash.round_caps));
}

/// Keys: color, opacity, kind, gradient, gradient kind.
fn write_paint(element: &mut Element, paint: &Paint, opacity: u8, keys: [&str; 5]) {
    let [color, op, kind, grad, grad_kind] = keys;
    element.set_attr(op, opacity.to_string());
    element.set_attr(kind, paint.kind().as_str());
    match paint {
        Paint::None => {
            element.set_attr(color, NONE_COLOR);
            element.remove_attr(grad);
            element.remove_attr(grad_kind);
        }
        Paint::Solid(c) => {
            element.set_attr(color, c.hex());
            element.remove_attr(grad);
            element.remove_attr(grad_kind);
        }
        Paint::Gradient(g) => {
            // Solid fallback for readers that predate the gradient keys.
            if let Some(first) = g.sorted_stops().first() {
                element.set_attr(color, first.color.hex());
            }
            element.set_attr(grad, g.serialize());
            element.set_attr(grad_kind, g.kind.as_str());
        }
    }
}

/// Animation attributes as found on an element; absent fields stay at their defaults.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimationSnapshot {
    pub context: Option<TriggerContext>,
    pub action: Option<InteractAction>,
    pub bundle: AnimationBundle,
}

impl AnimationSnapshot {
    pub fn read(element: &Element) -> Self {
        let context = element.attr(ANIMATION_TRIGGER).and_then(|v| {
            let ctx = AnimationTrigger::from_name(v)
                .map(AnimationTrigger::context)
                .or_else(|| TriggerContext::from_selector(v));
            logged(ANIMATION_TRIGGER, v, ctx)
        });
        let action = element
            .attr(ANIMATION_ACTION)
            .and_then(|v| logged(ANIMATION_ACTION, v, InteractAction::from_name(v)));

        let mut bundle = AnimationBundle::default();
        for ctx in TriggerContext::ALL {
            read_settings(element, ctx, bundle.get_mut(ctx));
        }
        Self {
            context,
            action,
            bundle,
        }
    }
}

fn read_settings(element: &Element, ctx: TriggerContext, settings: &mut AnimationSettings) {
    for field in ANIMATION_FIELDS {
        let key = animation_key(ctx, field);
        let Some(v) = element.attr(&key) else {
            continue;
        };
        let edit = match field {
            "type" => Some(AnimationEdit::Effect(v.to_owned())),
            "delay" => parse_number(&key, v).map(AnimationEdit::Delay),
            "duration" => parse_number(&key, v).map(AnimationEdit::Duration),
            "speed" => parse_number(&key, v).map(AnimationEdit::Speed),
            "easing" => Some(AnimationEdit::Easing(Easing::from_name(v))),
            "every-visit" => parse_bool(&key, v).map(AnimationEdit::EveryVisit),
            "fade-start" => parse_bool(&key, v).map(AnimationEdit::FadeStart),
            "fade-end" => parse_bool(&key, v).map(AnimationEdit::FadeEnd),
            "fade-start-end" => parse_bool(&key, v).map(AnimationEdit::FadeStartEnd),
            _ => None,
        };
        if let Some(edit) = edit {
            settings.apply(&edit);
        }
    }
}

/// Mirror the animation controls onto `element`.
pub fn write_animation(
    context: TriggerContext,
    action: InteractAction,
    bundle: &AnimationBundle,
    element: &mut Element,
) {
    element.set_attr(ANIMATION_TRIGGER, context.trigger().as_str());
    element.set_attr(ANIMATION_ACTION, action.as_str());
    for ctx in TriggerContext::ALL {
        let s = bundle.get(ctx);
        let values = [
            s.effect.clone(),
            fmt_num(s.delay_s, 3),
            fmt_num(s.duration_s, 3),
            fmt_num(s.speed, 3),
            s.easing.as_str().to_owned(),
            flag(s.every_visit).to_owned(),
            flag(s.fade_start).to_owned(),
            flag(s.fade_end).to_owned(),
            flag(s.fade_start_end).to_owned(),
        ];
        for (field, value) in ANIMATION_FIELDS.into_iter().zip(values) {
            element.set_attr(animation_key(ctx, field), value);
        }
    }
}

fn flag(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

fn logged<T>(key: &str, value: &str, parsed: Option<T>) -> Option<T> {
    if parsed.is_none() {
        tracing::debug!(key, value, "ignoring malformed attribute");
    }
    parsed
}

fn parse_stored_color((key, v): (&str, &str)) -> Option<StoredColor> {
    if v.trim().eq_ignore_ascii_case(NONE_COLOR) {
        return Some(StoredColor::None);
    }
    logged(key, v, ColorValue::from_hex(v).map(StoredColor::Color))
}

fn parse_number(key: &str, v: &str) -> Option<f64> {
    let n = v
        .trim()
        .trim_end_matches(['%', 's'])
        .trim_end_matches("px")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite());
    logged(key, v, n)
}

fn parse_percent((key, v): (&str, &str)) -> Option<u8> {
    parse_number(key, v).map(clamp_percent)
}

fn parse_length((key, v): (&str, &str)) -> Option<f64> {
    parse_number(key, v).map(|n| n.max(0.0))
}

fn parse_bool(key: &str, v: &str) -> Option<bool> {
    let b = match v.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    };
    logged(key, v, b)
}

#[cfg(test)]
#[path = "../../tests/unit/persist/schema.rs"]
mod tests;
