use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CardError, Result};

/// One dive as it appears in the input sheet.
///
/// Every numeric attribute is optional; which ones are present decides what
/// ends up on the card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiveRecord {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub sub_group: String,
    /// Somersault count.
    #[serde(default)]
    pub som: Option<f64>,
    /// Twist count.
    #[serde(default)]
    pub twist: Option<f64>,
    /// Degree of difficulty when performed as a free dive.
    #[serde(default)]
    pub free: Option<f64>,
    #[serde(default, rename = "str")]
    pub straight: Option<f64>,
    #[serde(default)]
    pub pike: Option<f64>,
    #[serde(default)]
    pub tuck: Option<f64>,
}

impl DiveRecord {
    pub fn new<G: Into<String>, S: Into<String>>(group: G, sub_group: S) -> Self {
        Self {
            group: group.into(),
            sub_group: sub_group.into(),
            ..Self::default()
        }
    }

    /// A record with a `free` value is laid out as a free dive.
    ///
    /// The source sheets flag "not a free dive" by leaving `free` empty, so
    /// presence of the value is what switches the layout.
    pub fn is_free_dive(&self) -> bool {
        self.free.is_some()
    }

    /// Check the fields every card needs regardless of layout variant.
    pub fn validate(&self) -> Result<()> {
        if self.group.trim().is_empty() {
            return Err(CardError::Validation("group is required".to_string()));
        }
        if self.sub_group.trim().is_empty() {
            return Err(CardError::Validation("sub_group is required".to_string()));
        }
        if self.som.is_none() && self.twist.is_none() {
            return Err(CardError::Validation(format!(
                "'{} / {}' has neither som nor twist",
                self.group, self.sub_group
            )));
        }
        Ok(())
    }
}

/// Ordered collection of dive records read from a JSON or JSON Lines file.
#[derive(Debug, Clone, Default)]
pub struct DiveSheet {
    pub records: Vec<DiveRecord>,
}

impl DiveSheet {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|err| CardError::Records {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Self::parse(&raw).map_err(|message| CardError::Records {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse either a JSON array of records or one record per line.
    pub fn parse(raw: &str) -> Result<Self, String> {
        if raw.trim_start().starts_with('[') {
            let records: Vec<DiveRecord> =
                serde_json::from_str(raw).map_err(|err| format!("invalid JSON array: {err}"))?;
            return Ok(Self { records });
        }

        let mut records = Vec::new();
        for (idx, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: DiveRecord = serde_json::from_str(line)
                .map_err(|err| format!("invalid record at line {}: {err}", idx + 1))?;
            records.push(record);
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
