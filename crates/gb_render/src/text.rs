//! Text rasterization for label pre-rendering. Runs once at startup; the
//! result is uploaded as a regular sprite texture and blitted with alpha
//! modulation like any other entity.
//!
//! Glyph coverage becomes the alpha channel over white pixels, so a
//! multiplicative alpha at draw time fades the whole label uniformly.

use std::path::Path;

use ab_glyph::{point, Font, FontVec, Glyph, GlyphId, PxScale, ScaleFont};

pub struct RasterizedText {
    /// RGBA8, row-major, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

pub fn load_font(path: &Path) -> Result<FontVec, String> {
    let bytes = std::fs::read(path)
        .map_err(|e| format!("Failed to read font '{}': {e}", path.display()))?;
    FontVec::try_from_vec(bytes)
        .map_err(|e| format!("Failed to parse font '{}': {e}", path.display()))
}

/// Render a single line of white text at `size_px`.
pub fn render_line(font: &FontVec, size_px: f32, text: &str) -> Result<RasterizedText, String> {
    let scaled = font.as_scaled(PxScale::from(size_px));
    let ascent = scaled.ascent();
    let height = (ascent - scaled.descent()).ceil() as u32;

    // Lay out every glyph along the baseline first, then rasterize.
    let mut glyphs: Vec<Glyph> = Vec::with_capacity(text.len());
    let mut caret = 0.0f32;
    let mut prev: Option<GlyphId> = None;
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = prev {
            caret += scaled.kern(prev, id);
        }
        glyphs.push(id.with_scale_and_position(scaled.scale(), point(caret, ascent)));
        caret += scaled.h_advance(id);
        prev = Some(id);
    }
    let width = caret.ceil() as u32;
    if width == 0 || height == 0 {
        return Err(format!("Text '{text}' rasterized to an empty image"));
    }

    let mut pixels = vec![0u8; (width * height * 4) as usize];
    for glyph in glyphs {
        let Some(outlined) = scaled.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            let x = gx as i32 + bounds.min.x as i32;
            let y = gy as i32 + bounds.min.y as i32;
            if x < 0 || y < 0 || x >= width as i32 || y >= height as i32 {
                return;
            }
            let idx = ((y as u32 * width + x as u32) * 4) as usize;
            let alpha = (coverage * 255.0) as u8;
            pixels[idx] = 255;
            pixels[idx + 1] = 255;
            pixels[idx + 2] = 255;
            pixels[idx + 3] = pixels[idx + 3].max(alpha);
        });
    }

    Ok(RasterizedText {
        pixels,
        width,
        height,
    })
}
