use std::sync::Arc;

use crate::foundation::error::{StyleError, StyleResult};

/// Largest raster edge accepted by [`rasterize_svg`].
const MAX_DIM: u32 = 16_384;

/// Premultiplied RGBA8 pixels of a rasterized document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Un-premultiply into an `image` buffer for encoding.
    pub fn to_rgba_image(&self) -> StyleResult<image::RgbaImage> {
        let mut straight = self.data.clone();
        for px in straight.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| StyleError::render("pixel buffer does not match raster size"))
    }
}

/// Font database for SVG text: registered font bytes plus, optionally, the system fonts.
pub fn font_database(fonts: &[Vec<u8>], system_fonts: bool) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    if system_fonts {
        db.load_system_fonts();
    }
    for bytes in fonts {
        db.load_font_data(bytes.clone());
    }
    Arc::new(db)
}

/// Parse a synthesized document, rejecting references to anything outside the document.
pub fn parse_svg(svg: &str, fontdb: Arc<usvg::fontdb::Database>) -> StyleResult<usvg::Tree> {
    if let Some(href) = external_reference(svg) {
        return Err(StyleError::render(format!(
            "svg is not self-contained: references '{href}'"
        )));
    }
    let opts = usvg::Options {
        fontdb,
        ..Default::default()
    };
    usvg::Tree::from_str(svg, &opts).map_err(|e| StyleError::render(format!("parse svg: {e}")))
}

fn external_reference(svg: &str) -> Option<&str> {
    svg.split("href=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .find(|v| !v.starts_with('#') && !v.starts_with("data:"))
}

/// Rasterize `svg` at its intrinsic size.
pub fn rasterize_svg(svg: &str, fontdb: Arc<usvg::fontdb::Database>) -> StyleResult<RasterImage> {
    let tree = parse_svg(svg, fontdb)?;
    let size = tree.size();
    let to_px = |v: f32| -> StyleResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(StyleError::render("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    };
    let width = to_px(size.width())?;
    let height = to_px(size.height())?;
    if width > MAX_DIM || height > MAX_DIM {
        return Err(StyleError::render(format!(
            "svg raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| StyleError::render("failed to allocate svg pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );
    tracing::debug!(width, height, "rasterized svg");
    Ok(RasterImage {
        width,
        height,
        data: pixmap.data().to_vec(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/style/raster.rs"]
mod tests;
