//! JPEG persistence for rendered cards and the optional URL manifest.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use image::ExtendedColorType;
use image::codecs::jpeg::JpegEncoder;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::batch::RenderedCard;
use crate::error::{CardError, Result};

pub const DEFAULT_PREFIX: &str = "dive_card";
pub const JPEG_QUALITY: u8 = 75;

/// Writes rendered cards as `{prefix}_{index}.jpg` into one directory.
#[derive(Debug, Clone)]
pub struct CardWriter {
    output_dir: PathBuf,
    prefix: String,
    quality: u8,
}

/// A card that made it to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenCard {
    pub index: usize,
    pub file_name: String,
    pub path: PathBuf,
    pub sha256: String,
}

#[derive(Debug)]
pub struct WriteFailure {
    pub index: usize,
    pub error: CardError,
}

/// Outcome of writing a batch; failures do not stop later cards.
#[derive(Debug, Default)]
pub struct WriteReport {
    pub written: Vec<WrittenCard>,
    pub failures: Vec<WriteFailure>,
}

impl WriteReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl CardWriter {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
            prefix: DEFAULT_PREFIX.to_string(),
            quality: JPEG_QUALITY,
        }
    }

    pub fn with_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn file_name(&self, index: usize) -> String {
        format!("{}_{}.jpg", self.prefix, index)
    }

    /// Encode and write every card, collecting per-file failures.
    pub fn write_all(&self, cards: &[RenderedCard]) -> WriteReport {
        let mut report = WriteReport::default();
        for card in cards {
            match self.write_card(card) {
                Ok(written) => report.written.push(written),
                Err(error) => {
                    warn!("card {} not written: {}", card.index, error);
                    report.failures.push(WriteFailure {
                        index: card.index,
                        error,
                    });
                }
            }
        }
        info!(
            "wrote {} of {} card(s) to {}",
            report.written.len(),
            cards.len(),
            self.output_dir.display()
        );
        report
    }

    pub fn write_card(&self, card: &RenderedCard) -> Result<WrittenCard> {
        let bytes = encode_jpeg(card, self.quality)?;
        let file_name = self.file_name(card.index);
        let path = self.output_dir.join(&file_name);
        fs::write(&path, &bytes).map_err(|source| CardError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(WrittenCard {
            index: card.index,
            file_name,
            path,
            sha256: format!("{:x}", Sha256::digest(&bytes)),
        })
    }
}

/// Encode a card canvas as baseline JPEG.
pub fn encode_jpeg(card: &RenderedCard, quality: u8) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
        encoder
            .encode(
                card.canvas.as_raw(),
                card.canvas.width(),
                card.canvas.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|source| CardError::Encode {
                index: card.index,
                source,
            })?;
    }
    Ok(bytes)
}

/// Public location of one written card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub index: usize,
    pub file: String,
    pub url: String,
    pub sha256: String,
}

/// Index → URL listing handed to whatever publishes the cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub generated_at: DateTime<Utc>,
    pub base_url: String,
    pub cards: Vec<ManifestEntry>,
}

impl Manifest {
    /// URLs are `base_url` followed directly by the file name.
    pub fn build<S: Into<String>>(base_url: S, written: &[WrittenCard]) -> Self {
        let base_url = base_url.into();
        let cards = written
            .iter()
            .map(|card| ManifestEntry {
                index: card.index,
                file: card.file_name.clone(),
                url: format!("{}{}", base_url, card.file_name),
                sha256: card.sha256.clone(),
            })
            .collect();
        Self {
            generated_at: Utc::now(),
            base_url,
            cards,
        }
    }

    pub fn url_for(&self, index: usize) -> Option<&str> {
        self.cards
            .iter()
            .find(|entry| entry.index == index)
            .map(|entry| entry.url.as_str())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let write_err = |source| CardError::Write {
            path: path.to_path_buf(),
            source,
        };
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|err| write_err(err.into()))?;
        writer.write_all(b"\n").map_err(write_err)?;
        writer.flush().map_err(write_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use pretty_assertions::assert_eq;

    fn card(index: usize) -> RenderedCard {
        RenderedCard {
            index,
            canvas: RgbImage::from_pixel(32, 48, Rgb([20, 120, 220])),
        }
    }

    #[test]
    fn file_names_combine_prefix_and_index() {
        let writer = CardWriter::new("out");
        assert_eq!(writer.file_name(7), "dive_card_7.jpg");
        let writer = writer.with_prefix("forward");
        assert_eq!(writer.file_name(0), "forward_0.jpg");
    }

    #[test]
    fn writes_decodable_jpegs() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CardWriter::new(dir.path()).with_prefix("set");
        let report = writer.write_all(&[card(0), card(3)]);
        assert!(report.is_complete());
        assert_eq!(report.written.len(), 2);

        let path = dir.path().join("set_3.jpg");
        assert_eq!(report.written[1].path, path);
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 48));
        assert_eq!(report.written[1].sha256.len(), 64);
    }

    #[test]
    fn missing_directory_fails_each_card_visibly() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CardWriter::new(dir.path().join("absent"));
        let report = writer.write_all(&[card(0), card(1)]);
        assert!(report.written.is_empty());
        let failed: Vec<usize> = report.failures.iter().map(|f| f.index).collect();
        assert_eq!(failed, vec![0, 1]);
        assert!(matches!(report.failures[0].error, CardError::Write { .. }));
    }

    #[test]
    fn manifest_urls_append_file_name() {
        let written = vec![WrittenCard {
            index: 4,
            file_name: "dive_card_4.jpg".to_string(),
            path: PathBuf::from("out/dive_card_4.jpg"),
            sha256: "ab".repeat(32),
        }];
        let manifest = Manifest::build("https://cards.example.org/img/", &written);
        assert_eq!(
            manifest.url_for(4),
            Some("https://cards.example.org/img/dive_card_4.jpg")
        );
        assert_eq!(manifest.url_for(0), None);
    }

    #[test]
    fn manifest_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let writer = CardWriter::new(dir.path());
        let report = writer.write_all(&[card(1)]);
        let manifest = Manifest::build("/static/", &report.written);
        let path = dir.path().join("manifest.json");
        manifest.save(&path).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        let loaded: Manifest = serde_json::from_str(&raw).unwrap();
        assert_eq!(loaded, manifest);
    }
}
