use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{StyleError, StyleResult};

/// Font description matching the element's live computed style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    /// Primary family name (first entry of the computed family list).
    pub family: String,
    /// Numeric weight (`400` normal, `700` bold).
    pub weight: f32,
    /// Font size in pixels.
    pub size_px: f32,
    /// Extra advance added after every character, in pixels.
    #[serde(default)]
    pub letter_spacing_px: f32,
}

impl FontDescriptor {
    pub fn new(family: impl Into<String>, weight: f32, size_px: f32) -> Self {
        Self {
            family: family.into(),
            weight,
            size_px,
            letter_spacing_px: 0.0,
        }
    }

    fn validate(&self) -> StyleResult<()> {
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(StyleError::measurement("font size must be finite and > 0"));
        }
        Ok(())
    }
}

/// Measures the advance width of a single-line glyph run.
///
/// Implementations must use the same metrics as the renderer that paints the wrapped output,
/// otherwise wrap points drift from the live layout.
pub trait TextMeasurer {
    /// Width in pixels of `text` rendered on one line with `font`.
    fn measure(&mut self, text: &str, font: &FontDescriptor) -> StyleResult<f32>;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &mut M {
    fn measure(&mut self, text: &str, font: &FontDescriptor) -> StyleResult<f32> {
        (**self).measure(text, font)
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for Box<M> {
    fn measure(&mut self, text: &str, font: &FontDescriptor) -> StyleResult<f32> {
        (**self).measure(text, font)
    }
}

/// Fixed-advance measurer: every character advances `advance_em * size_px` plus letter spacing.
///
/// Deterministic, font-free; used for headless runs and tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasurer {
    pub advance_em: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self { advance_em: 0.6 }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&mut self, text: &str, font: &FontDescriptor) -> StyleResult<f32> {
        font.validate()?;
        let n = text.chars().count() as f32;
        Ok(n * (self.advance_em * font.size_px + font.letter_spacing_px))
    }
}

/// Parley-backed measurer over registered font bytes.
///
/// Families that were never registered resolve to the first registered family, the way a browser
/// falls back to its default face. With no fonts registered at all, measurement is unavailable.
pub struct ParleyMeasurer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    families: Vec<String>,
}

impl Default for ParleyMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl ParleyMeasurer {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: Vec::new(),
        }
    }

    /// Register font bytes and return the family name they provide.
    pub fn register_font(&mut self, font_bytes: Vec<u8>) -> StyleResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            StyleError::validation("no font families registered from font bytes")
        })?;
        let name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| StyleError::validation("registered font family has no name"))?
            .to_string();

        if !self.families.iter().any(|f| f.eq_ignore_ascii_case(&name)) {
            tracing::debug!(family = %name, "registered measurement font");
            self.families.push(name.clone());
        }
        Ok(name)
    }

    /// Families available for measurement, in registration order.
    pub fn families(&self) -> &[String] {
        &self.families
    }

    fn resolve_family(&self, requested: &str) -> StyleResult<String> {
        let requested = requested.trim().trim_matches(['"', '\'']);
        if let Some(f) = self
            .families
            .iter()
            .find(|f| f.eq_ignore_ascii_case(requested))
        {
            return Ok(f.clone());
        }
        let fallback = self
            .families
            .first()
            .ok_or_else(|| StyleError::measurement("no fonts registered for text measurement"))?;
        tracing::trace!(requested, fallback = %fallback, "falling back to default family");
        Ok(fallback.clone())
    }
}

impl TextMeasurer for ParleyMeasurer {
    fn measure(&mut self, text: &str, font: &FontDescriptor) -> StyleResult<f32> {
        font.validate()?;
        let family = self.resolve_family(&font.family)?;
        if text.is_empty() {
            return Ok(0.0);
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(font.weight),
        ));
        builder.push_default(parley::style::StyleProperty::LetterSpacing(
            font.letter_spacing_px,
        ));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout.width())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/measure.rs"]
mod tests;
