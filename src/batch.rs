use std::path::Path;

use image::RgbImage;
use log::{debug, info};

use crate::assets::IconLibrary;
use crate::compose::compose_card;
use crate::error::{CardError, Result};
use crate::layout::CardVariant;
use crate::record::DiveRecord;

/// A composed card paired with the position of its record in the input.
#[derive(Debug, Clone)]
pub struct RenderedCard {
    pub index: usize,
    pub canvas: RgbImage,
}

/// Load the icon set from `asset_dir` and compose one card per record.
///
/// Nothing is composed if any icon is missing.
pub fn generate_dive_cards(
    asset_dir: &Path,
    records: &[DiveRecord],
    variant: CardVariant,
) -> Result<Vec<RenderedCard>> {
    let library = IconLibrary::load(asset_dir)?;
    info!("loaded icon set from {}", asset_dir.display());
    compose_all(&library, records, variant)
}

/// Compose `records` in input order against an already loaded library.
pub fn compose_all(
    library: &IconLibrary,
    records: &[DiveRecord],
    variant: CardVariant,
) -> Result<Vec<RenderedCard>> {
    let mut cards = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let canvas = compose_card(library, record, variant).map_err(|err| {
            CardError::InvalidRecord {
                index,
                source: Box::new(err),
            }
        })?;
        debug!(
            "composed card {} ({} / {})",
            index, record.group, record.sub_group
        );
        cards.push(RenderedCard { index, canvas });
    }
    info!("composed {} dive card(s)", cards.len());
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn library() -> IconLibrary {
        IconLibrary::from_fn(|_| RgbImage::from_pixel(20, 20, Rgb([0, 0, 0])))
    }

    fn dive(group: &str, som: Option<f64>) -> DiveRecord {
        DiveRecord {
            som,
            tuck: Some(1.0),
            ..DiveRecord::new(group, "Som")
        }
    }

    #[test]
    fn cards_keep_input_order_and_index() {
        let records = vec![dive("Forward", Some(1.0)), dive("Back", Some(2.0))];
        let cards = compose_all(&library(), &records, CardVariant::Plain).unwrap();
        let indices: Vec<usize> = cards.iter().map(|c| c.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn invalid_record_reports_its_index() {
        let records = vec![dive("Forward", Some(1.0)), dive("Back", None)];
        let err = compose_all(&library(), &records, CardVariant::Plain).unwrap_err();
        match err {
            CardError::InvalidRecord { index, source } => {
                assert_eq!(index, 1);
                assert!(matches!(*source, CardError::Validation(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_input_yields_no_cards() {
        let cards = compose_all(&library(), &[], CardVariant::Plain).unwrap();
        assert!(cards.is_empty());
    }
}
