//! CLI command for round-trip verification

use std::path::Path;

use anyhow::bail;

use crate::formats::{self, DatasetFormat};

pub fn execute(
    file: &Path,
    format: DatasetFormat,
    record_tag: &str,
    child_tag: Option<&str>,
    quiet: bool,
) -> anyhow::Result<()> {
    let (original, dataset) = super::load_dataset(file, format, record_tag, child_tag)?;

    let regenerated = formats::serialize(&dataset)?;
    let reparsed = match format {
        DatasetFormat::XmlFlat => formats::parse_flat(&regenerated, record_tag)?,
        DatasetFormat::XmlGrouped => formats::parse_grouped(&regenerated, record_tag, child_tag)?,
        DatasetFormat::Recipe => formats::parse_recipe(&regenerated, record_tag)?,
        DatasetFormat::Ini => formats::parse_ini(&regenerated)?,
    };

    if reparsed != dataset {
        let diff = crate::diff::diff_datasets(&dataset, &reparsed);
        for change in &diff.changes {
            eprintln!("{change}");
        }
        bail!(
            "{}: round trip altered {} record(s)",
            file.display(),
            diff.change_count()
        );
    }

    if !quiet {
        if regenerated == original {
            println!("{}: round trip is byte-identical", file.display());
        } else {
            // Formatting normalized but nothing was lost.
            println!(
                "{}: round trip clean ({} record(s); output normalized)",
                file.display(),
                dataset.records.len()
            );
        }
    }

    Ok(())
}
