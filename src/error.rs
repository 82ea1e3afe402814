use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while loading assets, composing cards or writing them out.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("missing {icon} icon: {} not found", path.display())]
    MissingAsset { icon: &'static str, path: PathBuf },

    #[error("failed to decode asset {}", path.display())]
    Asset {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid dive record: {0}")]
    Validation(String),

    #[error("dive record {index} is invalid")]
    InvalidRecord {
        index: usize,
        #[source]
        source: Box<CardError>,
    },

    #[error("unrecognised colour '{0}'")]
    Colour(String),

    #[error("failed to read dive records from {}: {message}", path.display())]
    Records { path: PathBuf, message: String },

    #[error("failed to encode card {index} as JPEG")]
    Encode {
        index: usize,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = CardError> = std::result::Result<T, E>;
