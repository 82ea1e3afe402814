use image::RgbImage;

use crate::assets::IconLibrary;
use crate::error::Result;
use crate::graphics::{draw_border, draw_text, paste_centred};
use crate::layout::{CardLayout, CardVariant, Mark};
use crate::record::DiveRecord;

/// Lay out `record` and paint it onto a fresh copy of the blank card.
pub fn compose_card(
    library: &IconLibrary,
    record: &DiveRecord,
    variant: CardVariant,
) -> Result<RgbImage> {
    let layout = CardLayout::plan(record, variant)?;
    Ok(paint_layout(library, &layout))
}

/// Apply every mark of `layout`, in order, to a copy of the library template.
pub fn paint_layout(library: &IconLibrary, layout: &CardLayout) -> RgbImage {
    let mut card = library.template().clone();
    for mark in &layout.marks {
        match mark {
            Mark::Border(colour) => draw_border(&mut card, *colour),
            Mark::Icon { icon, centre } => paste_centred(&mut card, library.icon(*icon), *centre),
            Mark::Text {
                text,
                at,
                size,
                colour,
                anchor,
            } => draw_text(&mut card, text, *at, *size, *colour, *anchor),
        }
    }
    card
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Icon;
    use crate::graphics::colour::WHITE;
    use crate::layout::{CARD_HEIGHT, CARD_WIDTH};
    use image::Rgb;

    fn library() -> IconLibrary {
        IconLibrary::from_fn(|icon| {
            let shade = match icon {
                Icon::Som => Rgb([200, 10, 10]),
                Icon::Twist => Rgb([10, 200, 10]),
                Icon::Str => Rgb([10, 10, 200]),
                Icon::Pike => Rgb([200, 200, 10]),
                Icon::Tuck => Rgb([10, 200, 200]),
                Icon::Plus => Rgb([90, 90, 90]),
                Icon::Or => Rgb([40, 40, 40]),
            };
            RgbImage::from_pixel(60, 60, shade)
        })
    }

    fn forward() -> DiveRecord {
        DiveRecord {
            som: Some(1.5),
            straight: Some(1.2),
            ..DiveRecord::new("Forward", "1 1/2 Som")
        }
    }

    #[test]
    fn composing_twice_is_byte_identical() {
        let library = library();
        let variant = CardVariant::Bordered {
            colour: Rgb([0, 0, 255]),
        };
        let first = compose_card(&library, &forward(), variant).unwrap();
        let second = compose_card(&library, &forward(), variant).unwrap();
        assert_eq!(first.dimensions(), (CARD_WIDTH, CARD_HEIGHT));
        assert!(first.as_raw() == second.as_raw());
    }

    #[test]
    fn template_is_not_mutated() {
        let library = library();
        compose_card(&library, &forward(), CardVariant::Plain).unwrap();
        assert!(library.template().pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn icons_are_pasted_at_their_slots() {
        let library = library();
        let card = compose_card(&library, &forward(), CardVariant::Plain).unwrap();
        // som icon centred at (257, 250); corner pixel away from the count text
        assert_eq!(*card.get_pixel(229, 222), Rgb([200, 10, 10]));
        // str icon centred at (257, 500) on the plain card
        assert_eq!(*card.get_pixel(229, 472), Rgb([10, 10, 200]));
        // no plus icon anywhere in the rotation row
        assert!(
            (0..CARD_WIDTH).all(|x| *card.get_pixel(x, 250) != Rgb([90, 90, 90]))
        );
    }

    #[test]
    fn border_colour_reaches_the_edges() {
        let library = library();
        let colour = Rgb([0, 128, 0]);
        let card = compose_card(&library, &forward(), CardVariant::Bordered { colour }).unwrap();
        assert_eq!(*card.get_pixel(0, 0), colour);
        assert_eq!(*card.get_pixel(CARD_WIDTH - 1, CARD_HEIGHT - 1), colour);

        let plain = compose_card(&library, &forward(), CardVariant::Plain).unwrap();
        assert_eq!(*plain.get_pixel(0, 0), WHITE);
    }
}
