use image::imageops::replace;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use super::colour::WHITE;
use super::glyphs::{GLYPH_HEIGHT, GLYPH_WIDTH, glyph_pattern};

const BORDER_WIDTH: i32 = 20;
const INNER_BORDER_INSET: i32 = 10;
const INNER_BORDER_RADIUS: i32 = 30;

/// Where a text position sits relative to the rendered text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    Centre,
}

/// Top-left corner at which a `width`×`height` image is placed so that its
/// centre lands on `centre`. Odd sizes truncate towards the top-left.
pub fn centred_origin(width: u32, height: u32, centre: (i32, i32)) -> (i64, i64) {
    let (cx, cy) = centre;
    (
        cx as i64 - (width / 2) as i64,
        cy as i64 - (height / 2) as i64,
    )
}

/// Copy `source` onto `canvas` centred on `centre`, clipping at the edges.
pub fn paste_centred(canvas: &mut RgbImage, source: &RgbImage, centre: (i32, i32)) {
    let (x, y) = centred_origin(source.width(), source.height(), centre);
    replace(canvas, source, x, y);
}

/// Glyph magnification used for a nominal font size in pixels.
pub fn glyph_scale(font_size: u32) -> u32 {
    (font_size / 12).max(1)
}

/// Size of the ink box `text` occupies at `font_size`.
pub fn text_extent(text: &str, font_size: u32) -> (u32, u32) {
    let scale = glyph_scale(font_size);
    let chars = text.chars().count() as u32;
    if chars == 0 {
        return (0, 0);
    }
    let advance = (GLYPH_WIDTH as u32 + 1) * scale;
    (chars * advance - scale, GLYPH_HEIGHT as u32 * scale)
}

/// Draw `text` with the bitmap font. Glyphs falling off the canvas are clipped.
pub fn draw_text(
    canvas: &mut RgbImage,
    text: &str,
    at: (i32, i32),
    font_size: u32,
    colour: Rgb<u8>,
    anchor: Anchor,
) {
    let scale = glyph_scale(font_size);
    let (x, y) = match anchor {
        Anchor::TopLeft => at,
        Anchor::Centre => {
            let (w, h) = text_extent(text, font_size);
            (at.0 - (w / 2) as i32, at.1 - (h / 2) as i32)
        }
    };
    let advance = ((GLYPH_WIDTH + 1) as u32 * scale) as i32;
    for (idx, ch) in text.chars().enumerate() {
        draw_glyph(canvas, x + idx as i32 * advance, y, ch, colour, scale);
    }
}

fn draw_glyph(canvas: &mut RgbImage, x: i32, y: i32, ch: char, colour: Rgb<u8>, scale: u32) {
    let pattern = glyph_pattern(ch);
    for (row, bits) in pattern.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                let px = x + (col as i32 * scale as i32);
                let py = y + (row as i32 * scale as i32);
                draw_filled_rect_mut(canvas, Rect::at(px, py).of_size(scale, scale), colour);
            }
        }
    }
}

/// Rectangle with inclusive corners and circular corner arcs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundedRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub radius: i32,
}

impl RoundedRect {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        if x < self.left || x > self.right || y < self.top || y > self.bottom {
            return false;
        }
        let r = self.radius;
        if r <= 0 {
            return true;
        }
        let cx = x.clamp(self.left + r, (self.right - r).max(self.left + r));
        let cy = y.clamp(self.top + r, (self.bottom - r).max(self.top + r));
        let dx = x - cx;
        let dy = y - cy;
        dx * dx + dy * dy <= r * r
    }

    /// The same shape shrunk by `by` pixels on every side.
    pub fn inset(&self, by: i32) -> Self {
        Self {
            left: self.left + by,
            top: self.top + by,
            right: self.right - by,
            bottom: self.bottom - by,
            radius: (self.radius - by).max(0),
        }
    }
}

/// Paint the band between `shape` and `shape.inset(width)`.
pub fn draw_rounded_outline(
    canvas: &mut RgbImage,
    shape: RoundedRect,
    width: i32,
    colour: Rgb<u8>,
) {
    let hole = shape.inset(width);
    let x_end = (shape.right + 1).clamp(0, canvas.width() as i32);
    let y_end = (shape.bottom + 1).clamp(0, canvas.height() as i32);
    for y in shape.top.max(0)..y_end {
        for x in shape.left.max(0)..x_end {
            if shape.contains(x, y) && !hole.contains(x, y) {
                canvas.put_pixel(x as u32, y as u32, colour);
            }
        }
    }
}

/// Two-tone frame: a square outer band in `colour` flush with the canvas
/// edges, then a rounded white band inset by 10px.
pub fn draw_border(canvas: &mut RgbImage, colour: Rgb<u8>) {
    let (w, h) = (canvas.width() as i32, canvas.height() as i32);
    let outer = RoundedRect {
        left: 0,
        top: 0,
        right: w,
        bottom: h,
        radius: 0,
    };
    draw_rounded_outline(canvas, outer, BORDER_WIDTH, colour);

    let inner = RoundedRect {
        left: INNER_BORDER_INSET,
        top: INNER_BORDER_INSET,
        right: w - INNER_BORDER_INSET,
        bottom: h - INNER_BORDER_INSET,
        radius: INNER_BORDER_RADIUS,
    };
    draw_rounded_outline(canvas, inner, BORDER_WIDTH, WHITE);
}
