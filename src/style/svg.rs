use std::borrow::Cow;
use std::fmt::Write as _;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;

use crate::color::convert::ColorValue;
use crate::color::gradient::{Gradient, GradientKind};
use crate::foundation::core::fmt_num;
use crate::style::state::StrokePosition;
use crate::text::measure::FontDescriptor;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Escape `& < > " '` for use inside markup attributes and text nodes.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Base64 `data:` URI for an SVG document.
pub fn svg_data_uri(svg: &str) -> String {
    format!(
        "data:image/svg+xml;base64,{}",
        BASE64_STANDARD.encode(svg.as_bytes())
    )
}

/// `text-anchor` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Paint reference inside the synthesized document.
#[derive(Clone, Debug, PartialEq)]
pub enum SvgPaint {
    None,
    Color { color: ColorValue, opacity: u8 },
    /// Gradient defined in `<defs>` under `id`. Stop opacities already include the layer opacity.
    Gradient { id: String, gradient: Gradient },
}

impl SvgPaint {
    fn reference(&self) -> String {
        match self {
            Self::None => "none".to_owned(),
            Self::Color { color, .. } => color.hex(),
            Self::Gradient { id, .. } => format!("url(#{})", escape(id)),
        }
    }

    fn opacity(&self) -> Option<String> {
        match self {
            Self::Color { opacity, .. } if *opacity < 100 => {
                Some(fmt_num(f64::from(*opacity) / 100.0, 2))
            }
            _ => None,
        }
    }
}

/// Outline parameters in painted units.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgStroke {
    pub paint: SvgPaint,
    /// Painted width (already doubled for outside/inside placement).
    pub width: f64,
    pub position: StrokePosition,
    /// `(length, gap)` for dashed outlines.
    pub dash: Option<(f64, f64)>,
    pub round_caps: bool,
}

/// One positioned line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgLine {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Everything needed to emit a self-contained text document.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgTextDocument {
    pub width: f64,
    pub height: f64,
    pub font: FontDescriptor,
    pub anchor: TextAnchor,
    pub lines: Vec<SvgLine>,
    pub fill: SvgPaint,
    pub stroke: Option<SvgStroke>,
    /// Prefix for generated ids (clip paths).
    pub id_prefix: String,
}

impl SvgTextDocument {
    /// Render the markup.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(512 + self.lines.len() * 96);
        let w = fmt_num(self.width, 2);
        let h = fmt_num(self.height, 2);
        // Font settings sit on the root so the glyph clip in <defs> inherits them too.
        let _ = write!(
            out,
            r#"<svg xmlns="{SVG_NS}" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{}" font-size="{}" font-weight="{}" letter-spacing="{}" text-anchor="{}">"#,
            escape(&self.font.family),
            fmt_num(f64::from(self.font.size_px), 2),
            fmt_num(f64::from(self.font.weight), 0),
            fmt_num(f64::from(self.font.letter_spacing_px), 2),
            self.anchor.as_str(),
        );

        let clip_id = format!("{}-clip", self.id_prefix);
        let inside_stroke = self
            .stroke
            .as_ref()
            .filter(|s| s.position == StrokePosition::Inside);

        out.push_str("<defs>");
        for paint in [Some(&self.fill), self.stroke.as_ref().map(|s| &s.paint)]
            .into_iter()
            .flatten()
        {
            if let SvgPaint::Gradient { id, gradient } = paint {
                push_gradient_def(&mut out, id, gradient, self.width, self.height);
            }
        }
        if inside_stroke.is_some() {
            let _ = write!(out, r#"<clipPath id="{}">"#, escape(&clip_id));
            self.push_lines(&mut out, "");
            out.push_str("</clipPath>");
        }
        out.push_str("</defs>");

        let fill_attrs = paint_attrs("fill", &self.fill);
        match (&self.stroke, inside_stroke) {
            (Some(stroke), Some(_)) => {
                // Fill first, then the outline clipped to the glyph interior.
                self.push_lines(&mut out, &format!("{fill_attrs} stroke=\"none\""));
                let _ = write!(out, r#"<g clip-path="url(#{})">"#, escape(&clip_id));
                self.push_lines(&mut out, &format!("fill=\"none\" {}", stroke_attrs(stroke)));
                out.push_str("</g>");
            }
            (Some(stroke), None) => {
                let order = match stroke.position {
                    StrokePosition::Outside => " paint-order=\"stroke\"",
                    StrokePosition::Center | StrokePosition::Inside => "",
                };
                self.push_lines(
                    &mut out,
                    &format!("{fill_attrs} {}{order}", stroke_attrs(stroke)),
                );
            }
            (None, _) => self.push_lines(&mut out, &format!("{fill_attrs} stroke=\"none\"")),
        }

        out.push_str("</svg>");
        out
    }

    fn push_lines(&self, out: &mut String, attrs: &str) {
        for line in &self.lines {
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" dominant-baseline="central"{}{}>{}</text>"#,
                fmt_num(line.x, 2),
                fmt_num(line.y, 2),
                if attrs.is_empty() { "" } else { " " },
                attrs,
                escape(&line.text)
            );
        }
    }
}

fn paint_attrs(prop: &str, paint: &SvgPaint) -> String {
    let mut s = format!("{prop}=\"{}\"", paint.reference());
    if let Some(op) = paint.opacity() {
        let _ = write!(s, " {prop}-opacity=\"{op}\"");
    }
    s
}

fn stroke_attrs(stroke: &SvgStroke) -> String {
    let mut s = paint_attrs("stroke", &stroke.paint);
    let _ = write!(s, " stroke-width=\"{}\"", fmt_num(stroke.width, 2));
    if let Some((len, gap)) = stroke.dash {
        let _ = write!(
            s,
            " stroke-dasharray=\"{},{}\"",
            fmt_num(len, 2),
            fmt_num(gap, 2)
        );
    }
    if stroke.round_caps {
        s.push_str(" stroke-linecap=\"round\" stroke-linejoin=\"round\"");
    } else {
        s.push_str(" stroke-linejoin=\"miter\"");
    }
    s
}

/// Gradient definition in user space spanning the element box, stops ordered by offset.
fn push_gradient_def(out: &mut String, id: &str, gradient: &Gradient, width: f64, height: f64) {
    let id = escape(id);
    let (open, close) = match gradient.kind {
        GradientKind::Linear => (
            format!(
                r#"<linearGradient id="{id}" gradientUnits="userSpaceOnUse" x1="0" y1="0" x2="{}" y2="0">"#,
                fmt_num(width, 2)
            ),
            "</linearGradient>",
        ),
        GradientKind::Radial => (
            format!(
                r#"<radialGradient id="{id}" gradientUnits="userSpaceOnUse" cx="{}" cy="{}" r="{}">"#,
                fmt_num(width / 2.0, 2),
                fmt_num(height / 2.0, 2),
                fmt_num(width.max(height) / 2.0, 2)
            ),
            "</radialGradient>",
        ),
    };
    out.push_str(&open);
    for stop in gradient.sorted_stops() {
        let _ = write!(
            out,
            r#"<stop offset="{}%" stop-color="{}" stop-opacity="{}"/>"#,
            stop.offset(),
            stop.color.hex(),
            fmt_num(f64::from(stop.opacity()) / 100.0, 2)
        );
    }
    out.push_str(close);
}

#[cfg(test)]
#[path = "../../tests/unit/style/svg.rs"]
mod tests;
