//! Shared clap helper types for CLI commands.

use divecards::CardVariant;
use divecards::graphics::colour::parse_colour;
use image::Rgb;

/// Clap value parser for `--border` colours (`#rrggbb`, `#rgb` or a name).
pub fn parse_border(input: &str) -> Result<Rgb<u8>, String> {
    parse_colour(input).map_err(|err| err.to_string())
}

/// A border colour selects the bordered card design.
pub fn variant_for(border: Option<Rgb<u8>>) -> CardVariant {
    match border {
        Some(colour) => CardVariant::Bordered { colour },
        None => CardVariant::Plain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_flag_selects_variant() {
        assert_eq!(variant_for(None), CardVariant::Plain);
        let colour = parse_border("#FFD700").unwrap();
        assert_eq!(variant_for(Some(colour)), CardVariant::Bordered { colour });
    }

    #[test]
    fn bad_border_reports_input() {
        let err = parse_border("#zzz").unwrap_err();
        assert!(err.contains("#zzz"), "{err}");
    }
}
