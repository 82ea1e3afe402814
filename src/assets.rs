use std::convert::Infallible;
use std::fmt;
use std::path::Path;

use image::RgbImage;
use log::debug;

use crate::error::{CardError, Result};
use crate::graphics::colour::WHITE;
use crate::layout::{CARD_HEIGHT, CARD_WIDTH};

/// Symbolic names of the pictograms placed on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Som,
    Twist,
    Str,
    Pike,
    Tuck,
    Plus,
    Or,
}

impl Icon {
    pub const ALL: [Icon; 7] = [
        Icon::Som,
        Icon::Twist,
        Icon::Str,
        Icon::Pike,
        Icon::Tuck,
        Icon::Plus,
        Icon::Or,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Icon::Som => "som",
            Icon::Twist => "twist",
            Icon::Str => "str",
            Icon::Pike => "pike",
            Icon::Tuck => "tuck",
            Icon::Plus => "plus",
            Icon::Or => "or",
        }
    }

    /// Asset file expected in the icon directory.
    pub fn file_name(&self) -> String {
        format!("{}.jpg", self.name())
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pictograms and the blank card every composition starts from.
///
/// Loaded once per batch and only ever borrowed immutably afterwards.
#[derive(Debug, Clone)]
pub struct IconLibrary {
    som: RgbImage,
    twist: RgbImage,
    straight: RgbImage,
    pike: RgbImage,
    tuck: RgbImage,
    plus: RgbImage,
    or: RgbImage,
    template: RgbImage,
}

impl IconLibrary {
    /// Read every icon from `dir`, failing on the first missing or unreadable file.
    pub fn load(dir: &Path) -> Result<Self> {
        let library = Self::try_from_fn(|icon| {
            let path = dir.join(icon.file_name());
            if !path.is_file() {
                return Err(CardError::MissingAsset {
                    icon: icon.name(),
                    path,
                });
            }
            let image = image::open(&path).map_err(|source| CardError::Asset {
                path: path.clone(),
                source,
            })?;
            debug!("loaded {} icon from {}", icon, path.display());
            Ok(image.to_rgb8())
        })?;
        Ok(library)
    }

    /// Build a library from in-memory images.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Icon) -> RgbImage,
    {
        match Self::try_from_fn(|icon| Ok::<_, Infallible>(f(icon))) {
            Ok(library) => library,
            Err(never) => match never {},
        }
    }

    fn try_from_fn<E, F>(mut f: F) -> Result<Self, E>
    where
        F: FnMut(Icon) -> Result<RgbImage, E>,
    {
        Ok(Self {
            som: f(Icon::Som)?,
            twist: f(Icon::Twist)?,
            straight: f(Icon::Str)?,
            pike: f(Icon::Pike)?,
            tuck: f(Icon::Tuck)?,
            plus: f(Icon::Plus)?,
            or: f(Icon::Or)?,
            template: RgbImage::from_pixel(CARD_WIDTH, CARD_HEIGHT, WHITE),
        })
    }

    pub fn icon(&self, icon: Icon) -> &RgbImage {
        match icon {
            Icon::Som => &self.som,
            Icon::Twist => &self.twist,
            Icon::Str => &self.straight,
            Icon::Pike => &self.pike,
            Icon::Tuck => &self.tuck,
            Icon::Plus => &self.plus,
            Icon::Or => &self.or,
        }
    }

    /// Blank white card the composer copies for every dive.
    pub fn template(&self) -> &RgbImage {
        &self.template
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn file_names_match_asset_convention() {
        let names: Vec<String> = Icon::ALL.iter().map(Icon::file_name).collect();
        assert_eq!(
            names,
            ["som.jpg", "twist.jpg", "str.jpg", "pike.jpg", "tuck.jpg", "plus.jpg", "or.jpg"]
        );
    }

    #[test]
    fn from_fn_keeps_each_icon_distinct() {
        let library = IconLibrary::from_fn(|icon| {
            let shade = Icon::ALL.iter().position(|i| *i == icon).unwrap_or(0) as u8;
            RgbImage::from_pixel(4, 4, Rgb([shade, shade, shade]))
        });
        for (idx, icon) in Icon::ALL.iter().enumerate() {
            assert_eq!(library.icon(*icon).get_pixel(0, 0).0[0], idx as u8);
        }
        assert_eq!(library.template().dimensions(), (CARD_WIDTH, CARD_HEIGHT));
        assert_eq!(*library.template().get_pixel(100, 100), WHITE);
    }

    #[test]
    fn load_reports_first_missing_icon() {
        let dir = tempfile::tempdir().unwrap();
        let err = IconLibrary::load(dir.path()).unwrap_err();
        match err {
            CardError::MissingAsset { icon, path } => {
                assert_eq!(icon, "som");
                assert_eq!(path, dir.path().join("som.jpg"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
