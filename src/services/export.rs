use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::domain::{ListingRecord, OutputFormat};

pub const CSV_HEADER: [&str; 4] = ["Title", "Price", "Rating", "Reviews"];

/// Writes `products.csv` or `products.json` under `output_dir` and returns the
/// path written.
pub fn save(
    records: &[ListingRecord],
    format: OutputFormat,
    output_dir: &Path,
) -> anyhow::Result<PathBuf> {
    let path = output_dir.join(format!("products.{}", format));
    match format {
        OutputFormat::Csv => save_to_csv(records, &path)?,
        OutputFormat::Json => save_to_json(records, &path)?,
    }
    log::info!("Saved {} products to {}", records.len(), path.display());

    Ok(path)
}

pub fn save_to_csv(records: &[ListingRecord], path: &Path) -> anyhow::Result<()> {
    create_parent_dir(path)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

pub fn save_to_json(records: &[ListingRecord], path: &Path) -> anyhow::Result<()> {
    create_parent_dir(path)?;

    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut serializer)?;
    writer.flush()?;

    Ok(())
}

fn create_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    Ok(())
}
