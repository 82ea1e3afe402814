use image::Rgb;

use crate::error::{CardError, Result};

pub const WHITE: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);

/// Parse `#rrggbb`, `#rgb` or one of a few CSS colour names.
pub fn parse_colour(input: &str) -> Result<Rgb<u8>> {
    let value = input.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| CardError::Colour(input.to_string()));
    }
    named(&value.to_ascii_lowercase()).ok_or_else(|| CardError::Colour(input.to_string()))
}

/// Compile-time variant of [`parse_colour`] for the fixed card palette.
pub const fn hex(value: u32) -> Rgb<u8> {
    Rgb([(value >> 16) as u8, (value >> 8) as u8, value as u8])
}

fn parse_hex(hex: &str) -> Option<Rgb<u8>> {
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Rgb([r, g, b]))
        }
        3 => {
            let mut channels = [0u8; 3];
            for (slot, digit) in channels.iter_mut().zip(hex.chars()) {
                let v = digit.to_digit(16)? as u8;
                *slot = v * 17;
            }
            Some(Rgb(channels))
        }
        _ => None,
    }
}

fn named(name: &str) -> Option<Rgb<u8>> {
    let rgb = match name {
        "white" => WHITE,
        "black" => hex(0x000000),
        "red" => hex(0xff0000),
        "green" => hex(0x008000),
        "blue" => hex(0x0000ff),
        "yellow" => hex(0xffff00),
        "orange" => hex(0xffa500),
        "purple" => hex(0x800080),
        "gold" => hex(0xffd700),
        "silver" => hex(0xc0c0c0),
        "bronze" => hex(0xcd7f32),
        "grey" | "gray" => hex(0x808080),
        _ => return None,
    };
    Some(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(parse_colour("#0146FF").unwrap(), Rgb([0x01, 0x46, 0xff]));
        assert_eq!(parse_colour("#f0a").unwrap(), Rgb([0xff, 0x00, 0xaa]));
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(parse_colour("Gold").unwrap(), Rgb([0xff, 0xd7, 0x00]));
        assert_eq!(parse_colour(" white ").unwrap(), WHITE);
    }

    #[test]
    fn rejects_garbage() {
        for input in ["", "#12", "#gggggg", "chartreuse-ish"] {
            assert!(matches!(parse_colour(input), Err(CardError::Colour(_))), "{input}");
        }
    }

    #[test]
    fn const_hex_matches_parser() {
        assert_eq!(hex(0xCE00FF), parse_colour("#CE00FF").unwrap());
    }
}
