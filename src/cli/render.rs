//! Card rendering command (`divecards render ...`).

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use divecards::{CardWriter, DEFAULT_PREFIX, Manifest, generate_dive_cards};
use image::Rgb;

use crate::cli::common::{parse_border, variant_for};
use crate::cli::utils::{ensure_dir, load_sheet};

/// Args for `divecards render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Dive record file (JSON array or JSON Lines).
    pub records: PathBuf,
    /// Directory holding som.jpg, twist.jpg, str.jpg, pike.jpg, tuck.jpg, plus.jpg and or.jpg.
    #[arg(long = "assets")]
    pub assets: PathBuf,
    /// Directory the JPEG cards are written to.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Frame colour; enables the bordered card design.
    #[arg(long, value_parser = parse_border)]
    pub border: Option<Rgb<u8>>,
    /// File name prefix, producing `{prefix}_{index}.jpg`.
    #[arg(long, default_value = DEFAULT_PREFIX)]
    pub prefix: String,
    /// Public URL prefix; writes a manifest mapping each dive to its card URL.
    #[arg(long = "base-url")]
    pub base_url: Option<String>,
    /// Manifest location (defaults to `manifest.json` in the output directory).
    #[arg(long, requires = "base_url")]
    pub manifest: Option<PathBuf>,
}

/// Where the manifest goes, if one is requested via `--base-url`.
pub fn manifest_path(args: &RenderArgs) -> Option<PathBuf> {
    args.base_url.as_ref()?;
    Some(
        args.manifest
            .clone()
            .unwrap_or_else(|| args.output.join("manifest.json")),
    )
}

/// Execute the render command.
pub fn handle(args: RenderArgs) -> Result<()> {
    let sheet = load_sheet(&args.records)?;
    let variant = variant_for(args.border);
    let manifest = manifest_path(&args);

    let cards = generate_dive_cards(&args.assets, &sheet.records, variant)
        .with_context(|| format!("failed to render {}", args.records.display()))?;

    ensure_dir(&args.output)?;
    let writer = CardWriter::new(&args.output).with_prefix(args.prefix);
    let report = writer.write_all(&cards);

    if let (Some(path), Some(base_url)) = (manifest, args.base_url) {
        Manifest::build(base_url, &report.written)
            .save(&path)
            .with_context(|| format!("failed to write manifest {}", path.display()))?;
        println!("Wrote manifest to {}", path.display());
    }

    println!(
        "Rendered {} dive card(s) to {}",
        report.written.len(),
        args.output.display()
    );

    if report.is_complete() {
        return Ok(());
    }
    let failed = report.failures.len();
    for failure in report.failures {
        eprintln!(
            "card {}: {:#}",
            failure.index,
            anyhow::Error::new(failure.error)
        );
    }
    Err(anyhow!("{} card(s) could not be written", failed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    use divecards::Icon;
    use image::RgbImage;

    fn write_icons(dir: &Path) {
        for icon in Icon::ALL {
            RgbImage::from_pixel(40, 40, Rgb([90, 90, 90]))
                .save(dir.join(icon.file_name()))
                .unwrap();
        }
    }

    fn args(root: &Path, output: PathBuf) -> RenderArgs {
        let records = root.join("dives.jsonl");
        fs::write(
            &records,
            "{\"group\": \"Forward\", \"sub_group\": \"1 Som\", \"som\": 1, \"str\": 1.4}\n",
        )
        .unwrap();
        let assets = root.join("icons");
        fs::create_dir_all(&assets).unwrap();
        write_icons(&assets);
        RenderArgs {
            records,
            assets,
            output,
            border: None,
            prefix: DEFAULT_PREFIX.to_string(),
            base_url: None,
            manifest: None,
        }
    }

    #[test]
    fn manifest_only_with_base_url() {
        let root = tempfile::tempdir().unwrap();
        let mut args = args(root.path(), root.path().join("out"));
        assert_eq!(manifest_path(&args), None);

        args.base_url = Some("/cards/".to_string());
        assert_eq!(manifest_path(&args), Some(root.path().join("out/manifest.json")));

        args.manifest = Some(root.path().join("urls.json"));
        assert_eq!(manifest_path(&args), Some(root.path().join("urls.json")));
    }

    #[test]
    fn base_url_writes_default_manifest_next_to_cards() {
        let root = tempfile::tempdir().unwrap();
        let output = root.path().join("out");
        let mut args = args(root.path(), output.clone());
        args.base_url = Some("https://example.org/cards/".to_string());

        handle(args).unwrap();

        assert!(output.join("dive_card_0.jpg").is_file());
        let raw = fs::read_to_string(output.join("manifest.json")).unwrap();
        let manifest: Manifest = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            manifest.url_for(0),
            Some("https://example.org/cards/dive_card_0.jpg")
        );
    }

    #[test]
    fn unwritable_output_fails() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("not-a-dir");
        fs::write(&blocker, b"file").unwrap();

        let args = args(root.path(), blocker.join("out"));
        assert!(handle(args).is_err());
    }
}
