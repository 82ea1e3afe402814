//! Record validation command (`divecards check ...`).

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Args;
use divecards::{CardLayout, describe_row};
use image::Rgb;

use crate::cli::common::{parse_border, variant_for};
use crate::cli::utils::load_sheet;

/// Args for `divecards check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Dive record file (JSON array or JSON Lines).
    pub records: PathBuf,
    /// Plan the bordered design (the colour itself does not affect rows).
    #[arg(long, value_parser = parse_border)]
    pub border: Option<Rgb<u8>>,
}

/// Execute the check command.
pub fn handle(args: CheckArgs) -> Result<()> {
    let sheet = load_sheet(&args.records)?;
    let variant = variant_for(args.border);

    let mut invalid = 0usize;
    for (idx, record) in sheet.records.iter().enumerate() {
        match CardLayout::plan(record, variant) {
            Ok(layout) => {
                let kind = if layout.free_dive { " (free)" } else { "" };
                println!("Dive {:>4} | {} / {}{}", idx, record.group, record.sub_group, kind);
                println!("  rotations: {}", describe_row(&layout.rotations));
                println!("  positions: {}", describe_row(&layout.positions));
            }
            Err(err) => {
                invalid += 1;
                eprintln!("Dive {:>4} | {}", idx, err);
            }
        }
    }

    if invalid > 0 {
        return Err(anyhow!(
            "{} of {} dive record(s) are invalid",
            invalid,
            sheet.len()
        ));
    }
    println!("{} dive record(s) OK", sheet.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn check_file(contents: &str) -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        let records = dir.path().join("dives.jsonl");
        fs::write(&records, contents).unwrap();
        handle(CheckArgs {
            records,
            border: None,
        })
    }

    #[test]
    fn valid_sheet_passes() {
        let sheet = "{\"group\": \"Back\", \"sub_group\": \"Som\", \"som\": 1, \"tuck\": 1.5}\n";
        assert!(check_file(sheet).is_ok());
    }

    #[test]
    fn invalid_records_are_counted() {
        let sheet = concat!(
            "{\"group\": \"Back\", \"sub_group\": \"Som\", \"som\": 1, \"tuck\": 1.5}\n",
            "{\"group\": \"Back\", \"sub_group\": \"Dive\", \"tuck\": 1.2}\n",
        );
        let err = check_file(sheet).unwrap_err();
        assert!(err.to_string().contains("1 of 2"), "{err}");
    }
}
