//! Raster primitives used to paint dive cards: centred pastes, bitmap
//! lettering, rounded borders and colour parsing.

pub mod colour;
pub mod glyphs;
mod paint;

pub use paint::{
    Anchor, RoundedRect, centred_origin, draw_border, draw_rounded_outline, draw_text,
    glyph_scale, paste_centred, text_extent,
};
