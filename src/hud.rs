//! Status overlay drawn onto snapshot frames: percentage, remaining
//! time and fill rate bottom-centered, optional title at the top.

use std::sync::OnceLock;

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

/// Candidate monospace fonts, first match wins.
const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationMono-Regular.ttf",
    "/System/Library/Fonts/Menlo.ttc",
];

/// Bytes of the first system monospace font found, cached per process.
fn monospace_font() -> Option<&'static [u8]> {
    static FONT: OnceLock<Option<Vec<u8>>> = OnceLock::new();
    FONT.get_or_init(|| {
        for path in FONT_PATHS {
            if let Ok(bytes) = std::fs::read(path) {
                tracing::debug!(path, "monospace font loaded");
                return Some(bytes);
            }
        }
        tracing::warn!("no monospace font found, status overlay disabled");
        None
    })
    .as_deref()
}

fn text_width(font: &FontRef<'_>, scale: PxScale, text: &str) -> f32 {
    let scaled = font.as_scaled(scale);
    text.chars()
        .map(|c| scaled.h_advance(font.glyph_id(c)))
        .sum()
}

/// Draw status lines bottom-centered. Silently skipped when no font is
/// available.
pub fn draw_status(surface: &mut RgbaImage, lines: &[&str], color: Rgba<u8>) {
    let Some(bytes) = monospace_font() else {
        return;
    };
    let Ok(font) = FontRef::try_from_slice(bytes) else {
        return;
    };

    let width = surface.width();
    let scale = PxScale::from((surface.height() as f32 * 0.08).clamp(12.0, 28.0));
    let line_height = font.as_scaled(scale).height();
    let base_y =
        (surface.height() as f32 - line_height * lines.len() as f32 - 6.0).max(0.0);

    for (i, line) in lines.iter().enumerate() {
        let x = ((width as f32 - text_width(&font, scale, line)) / 2.0).max(0.0) as i32;
        let y = (base_y + line_height * i as f32) as i32;
        draw_text_mut(surface, color, x, y, scale, &font, line);
    }
}

/// Draw a title top-centered.
pub fn draw_title(surface: &mut RgbaImage, title: &str, color: Rgba<u8>) {
    let Some(bytes) = monospace_font() else {
        return;
    };
    let Ok(font) = FontRef::try_from_slice(bytes) else {
        return;
    };

    let scale = PxScale::from((surface.height() as f32 * 0.1).clamp(14.0, 36.0));
    let x = ((surface.width() as f32 - text_width(&font, scale, title)) / 2.0).max(0.0) as i32;
    draw_text_mut(surface, color, x, 4, scale, &font, title);
}
