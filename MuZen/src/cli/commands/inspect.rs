//! CLI command for inspecting config file contents

use std::path::Path;

use crate::formats::DatasetFormat;
use crate::formats::schema::cat_and_index;

pub fn execute(
    file: &Path,
    format: DatasetFormat,
    record_tag: &str,
    child_tag: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let (_, dataset) = super::load_dataset(file, format, record_tag, child_tag)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dataset)?);
        return Ok(());
    }

    println!("{}: {} record(s)", file.display(), dataset.records.len());
    let keys = dataset.attribute_keys();
    if !keys.is_empty() {
        println!("attributes: {}", keys.join(", "));
    }

    for (position, record) in dataset.records.iter().enumerate() {
        let attrs: Vec<String> = record
            .attributes
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        println!("  [{position}] {}", attrs.join(" "));

        if !record.rates.is_empty() {
            println!("      rates: {}", record.rates.join(", "));
        }
        for child in &record.children {
            let attrs: Vec<String> = child
                .attributes
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect();
            println!("      <{}> {}", child.tag, attrs.join(" "));
        }
        for group in &record.groups {
            println!("      group {} ({} rule(s))", group.index, group.rules.len());
            for rule in &group.rules {
                let range = describe_item_range(rule.get("ItemMin"), rule.get("ItemMax"));
                println!("        {range}");
            }
        }
    }

    Ok(())
}

/// Decode a rule's flat-id range into category/index pairs.
fn describe_item_range(min: Option<&str>, max: Option<&str>) -> String {
    let decode = |raw: Option<&str>| {
        raw.and_then(|v| v.parse::<u32>().ok())
            .map(cat_and_index)
            .map_or_else(|| "?".to_string(), |(cat, idx)| format!("({cat}, {idx})"))
    };
    let min_desc = decode(min);
    let max_desc = decode(max);
    if min == max {
        format!("item {} {min_desc}", min.unwrap_or("?"))
    } else {
        format!(
            "items {}..{} {min_desc}..{max_desc}",
            min.unwrap_or("?"),
            max.unwrap_or("?")
        )
    }
}
