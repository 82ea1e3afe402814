//! Layout engine and batch pipeline for illustrated competitive-diving cards.

mod assets;
mod batch;
mod compose;
mod error;
pub mod graphics;
mod layout;
pub mod logging;
mod record;
mod writer;

pub use assets::{Icon, IconLibrary};
pub use batch::{RenderedCard, compose_all, generate_dive_cards};
pub use compose::{compose_card, paint_layout};
pub use error::{CardError, Result};
pub use layout::{
    CARD_HEIGHT, CARD_WIDTH, CardLayout, CardVariant, Mark, RowEntry, describe_row,
    format_count, format_difficulty, interpose, slot_centres,
};
pub use record::{DiveRecord, DiveSheet};
pub use writer::{
    CardWriter, DEFAULT_PREFIX, JPEG_QUALITY, Manifest, ManifestEntry, WriteFailure,
    WriteReport, WrittenCard, encode_jpeg,
};
