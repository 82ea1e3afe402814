//! Card layout planning.
//!
//! A [`CardLayout`] is the complete, ordered list of paint operations for one
//! dive. Planning is pure: it looks only at the record and the variant, never
//! at pixels, so the same inputs always produce the same plan.

use std::fmt;

use image::Rgb;

use crate::assets::Icon;
use crate::error::{CardError, Result};
use crate::graphics::Anchor;
use crate::graphics::colour::hex;
use crate::record::DiveRecord;

pub const CARD_WIDTH: u32 = 515;
pub const CARD_HEIGHT: u32 = 800;

const GROUP_AT: (i32, i32) = (20, 20);
const SUB_GROUP_AT: (i32, i32) = (100, 80);
const FREE_NOTE_AT: (i32, i32) = (300, 20);
const ROTATION_Y: i32 = 250;
const CONNECTIVE_Y: i32 = 400;
const BORDERED_POSITION_Y: i32 = 550;
const PLAIN_POSITION_Y: i32 = 500;
const DIFFICULTY_OFFSET_Y: i32 = 150;

const GROUP_SIZE: u32 = 52;
const SUB_GROUP_SIZE: u32 = 42;
const CONNECTIVE_SIZE: u32 = 52;
const COUNT_SIZE: u32 = 52;
const FREE_NOTE_SIZE: u32 = 42;
const DIFFICULTY_SIZE: u32 = 58;

const GROUP_COLOUR: Rgb<u8> = hex(0x0146FF);
const SUB_GROUP_COLOUR: Rgb<u8> = hex(0xFF0000);
const CONNECTIVE_COLOUR: Rgb<u8> = hex(0x00DDFF);
const SOM_COLOUR: Rgb<u8> = hex(0xFF7C00);
const TWIST_COLOUR: Rgb<u8> = hex(0xCE00FF);
const DIFFICULTY_COLOUR: Rgb<u8> = hex(0x05AF00);

/// Which of the two card designs to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardVariant {
    /// No frame; free dives drop empty positions.
    Plain,
    /// Coloured frame, "(Free dive)" note, and free dives keep every position.
    Bordered { colour: Rgb<u8> },
}

impl CardVariant {
    fn position_y(&self) -> i32 {
        match self {
            CardVariant::Plain => PLAIN_POSITION_Y,
            CardVariant::Bordered { .. } => BORDERED_POSITION_Y,
        }
    }
}

/// One icon in a row together with the text drawn for it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowEntry {
    pub icon: Icon,
    pub label: Option<String>,
}

impl RowEntry {
    pub fn new(icon: Icon, label: Option<String>) -> Self {
        Self { icon, label }
    }

    fn separator(icon: Icon) -> Self {
        Self { icon, label: None }
    }
}

impl fmt::Display for RowEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{}({})", self.icon.name(), label),
            None => f.write_str(self.icon.name()),
        }
    }
}

/// A single paint operation, applied in plan order.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Border(Rgb<u8>),
    Icon {
        icon: Icon,
        centre: (i32, i32),
    },
    Text {
        text: String,
        at: (i32, i32),
        size: u32,
        colour: Rgb<u8>,
        anchor: Anchor,
    },
}

impl Mark {
    fn text<S: Into<String>>(
        text: S,
        at: (i32, i32),
        size: u32,
        colour: Rgb<u8>,
        anchor: Anchor,
    ) -> Self {
        Mark::Text {
            text: text.into(),
            at,
            size,
            colour,
            anchor,
        }
    }
}

/// Planned card for one dive.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub free_dive: bool,
    /// Rotation row after separators were inserted.
    pub rotations: Vec<RowEntry>,
    /// Position row after separators were inserted.
    pub positions: Vec<RowEntry>,
    pub marks: Vec<Mark>,
}

impl CardLayout {
    pub fn plan(record: &DiveRecord, variant: CardVariant) -> Result<Self> {
        record.validate()?;
        let free_dive = record.is_free_dive();
        let mut marks = Vec::new();

        if let CardVariant::Bordered { colour } = variant {
            marks.push(Mark::Border(colour));
        }

        marks.push(Mark::text(
            &record.group,
            GROUP_AT,
            GROUP_SIZE,
            GROUP_COLOUR,
            Anchor::TopLeft,
        ));
        marks.push(Mark::text(
            &record.sub_group,
            SUB_GROUP_AT,
            SUB_GROUP_SIZE,
            SUB_GROUP_COLOUR,
            Anchor::TopLeft,
        ));

        let connective = if free_dive { "and any 2 of" } else { "and" };
        marks.push(Mark::text(
            connective,
            ((CARD_WIDTH / 2) as i32, CONNECTIVE_Y),
            CONNECTIVE_SIZE,
            CONNECTIVE_COLOUR,
            Anchor::Centre,
        ));

        let rotations = interpose(rotation_entries(record), RowEntry::separator(Icon::Plus));
        for (entry, x) in rotations.iter().zip(slot_centres(rotations.len(), CARD_WIDTH)) {
            let centre = (x, ROTATION_Y);
            marks.push(Mark::Icon {
                icon: entry.icon,
                centre,
            });
            if let Some(label) = &entry.label {
                let colour = if entry.icon == Icon::Twist {
                    TWIST_COLOUR
                } else {
                    SOM_COLOUR
                };
                marks.push(Mark::text(label, centre, COUNT_SIZE, colour, Anchor::Centre));
            }
        }

        if free_dive && matches!(variant, CardVariant::Bordered { .. }) {
            marks.push(Mark::text(
                "(Free dive)",
                FREE_NOTE_AT,
                FREE_NOTE_SIZE,
                DIFFICULTY_COLOUR,
                Anchor::TopLeft,
            ));
        }

        let entries = position_entries(record, variant);
        if entries.is_empty() {
            return Err(CardError::Validation(format!(
                "'{} / {}' has no str, pike or tuck difficulty",
                record.group, record.sub_group
            )));
        }
        let positions = interpose(entries, RowEntry::separator(Icon::Or));
        let position_y = variant.position_y();
        for (entry, x) in positions.iter().zip(slot_centres(positions.len(), CARD_WIDTH)) {
            marks.push(Mark::Icon {
                icon: entry.icon,
                centre: (x, position_y),
            });
            if let Some(label) = &entry.label {
                marks.push(Mark::text(
                    label,
                    (x, position_y + DIFFICULTY_OFFSET_Y),
                    DIFFICULTY_SIZE,
                    DIFFICULTY_COLOUR,
                    Anchor::Centre,
                ));
            }
        }

        Ok(Self {
            free_dive,
            rotations,
            positions,
            marks,
        })
    }
}

/// Insert `separator` between consecutive items.
///
/// `n` items become `2n - 1`: originals at even indices, separators at odd.
pub fn interpose<T: Clone>(items: Vec<T>, separator: T) -> Vec<T> {
    let mut out = Vec::with_capacity((items.len() * 2).saturating_sub(1));
    for (idx, item) in items.into_iter().enumerate() {
        if idx > 0 {
            out.push(separator.clone());
        }
        out.push(item);
    }
    out
}

/// Horizontal centres for `count` evenly spaced slots across `width`.
///
/// Slot `j` (1-based) sits at `j * floor(width / (count + 1))`.
pub fn slot_centres(count: usize, width: u32) -> Vec<i32> {
    let spacing = width as usize / (count + 1);
    (1..=count).map(|slot| (slot * spacing) as i32).collect()
}

/// Rotation counts print without a trailing `.0` when whole.
pub fn format_count(value: f64) -> String {
    format!("{value}")
}

/// Degrees of difficulty always carry a fractional digit.
pub fn format_difficulty(value: f64) -> String {
    format!("{value:?}")
}

fn rotation_entries(record: &DiveRecord) -> Vec<RowEntry> {
    [(Icon::Som, record.som), (Icon::Twist, record.twist)]
        .into_iter()
        .filter_map(|(icon, value)| value.map(|v| RowEntry::new(icon, Some(format_count(v)))))
        .collect()
}

fn position_entries(record: &DiveRecord, variant: CardVariant) -> Vec<RowEntry> {
    if !record.is_free_dive() {
        return present_positions([
            (Icon::Str, record.straight),
            (Icon::Pike, record.pike),
            (Icon::Tuck, record.tuck),
        ]);
    }

    // the free difficulty is shown under the pike icon
    let slots = [
        (Icon::Str, record.straight),
        (Icon::Pike, record.free),
        (Icon::Tuck, record.tuck),
    ];
    match variant {
        CardVariant::Plain => present_positions(slots),
        CardVariant::Bordered { .. } => slots
            .into_iter()
            .map(|(icon, value)| RowEntry::new(icon, value.map(format_difficulty)))
            .collect(),
    }
}

fn present_positions(slots: [(Icon, Option<f64>); 3]) -> Vec<RowEntry> {
    slots
        .into_iter()
        .filter_map(|(icon, value)| value.map(|v| RowEntry::new(icon, Some(format_difficulty(v)))))
        .collect()
}

/// Render a row as `som(1.5) plus twist(2)` for listings.
pub fn describe_row(entries: &[RowEntry]) -> String {
    entries
        .iter()
        .map(|entry| entry.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
