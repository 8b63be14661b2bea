//! CLI command for comparing two config files

use std::path::Path;

use crate::diff::diff_datasets;
use crate::formats::DatasetFormat;

pub fn execute(
    old: &Path,
    new: &Path,
    format: DatasetFormat,
    record_tag: &str,
    child_tag: Option<&str>,
    json: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let (_, old_dataset) = super::load_dataset(old, format, record_tag, child_tag)?;
    let (_, new_dataset) = super::load_dataset(new, format, record_tag, child_tag)?;

    let result = diff_datasets(&old_dataset, &new_dataset);

    if json {
        let output = serde_json::json!({
            "old": old.display().to_string(),
            "new": new.display().to_string(),
            "identical": result.is_empty(),
            "change_count": result.change_count(),
            "changes": result.changes.iter().map(ToString::to_string).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if result.is_empty() {
        if !quiet {
            println!("Files are identical");
        }
        return Ok(());
    }

    for change in &result.changes {
        println!("{change}");
    }
    if !quiet {
        println!();
        println!("{}", result.summary());
    }

    Ok(())
}
