//! Convenience helpers shared across command handlers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use divecards::DiveSheet;

/// Load a record file, attaching path context to any error.
pub fn load_sheet(path: &Path) -> Result<DiveSheet> {
    let sheet = DiveSheet::load(path)
        .with_context(|| format!("failed to load dive records {}", path.display()))?;
    if sheet.is_empty() {
        return Err(anyhow!("{} contains no dive records", path.display()));
    }
    Ok(sheet)
}

/// Create the output directory (and parents) if it does not exist yet.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create output directory {}", path.display()))
}
