//! Recipe XML writing

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use std::fs;
use std::path::Path;

use super::super::common::finish_xml;
use super::super::record::{Dataset, Record};
use super::super::schema::{GROUP_INDEX_ATTR, GROUP_TAG, RATE_FAMILY, RULE_TAG, is_optional_attr};
use crate::error::Result;

/// Write a recipe dataset to disk
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_recipe<P: AsRef<Path>>(dataset: &Dataset, path: P) -> Result<()> {
    let xml = serialize_recipe(dataset)?;
    fs::write(path, xml)?;
    Ok(())
}

/// Serialize a recipe dataset to an XML string
///
/// Scalar attributes first, then the rate family: one value emits the bare
/// `MaxRate`, several emit `MaxRate1..N` in sequence order. Optional rule
/// attributes are dropped while empty.
///
/// # Errors
/// Returns an error if XML serialization fails.
pub fn serialize_recipe(dataset: &Dataset) -> Result<String> {
    let mut output = Vec::new();
    output.extend_from_slice(dataset.header.as_bytes());

    let mut writer = Writer::new_with_indent(&mut output, b'\t', 1);
    writer.write_event(Event::Start(BytesStart::new(dataset.root_tag.as_str())))?;

    for mix in &dataset.records {
        let mut element = BytesStart::new(dataset.record_tag.as_str());
        for (key, value) in &mix.attributes {
            element.push_attribute((key.as_str(), value.as_str()));
        }
        push_rates(&mut element, mix);

        if mix.groups.is_empty() {
            writer.write_event(Event::Empty(element))?;
            continue;
        }

        writer.write_event(Event::Start(element.borrow()))?;
        for group in &mix.groups {
            let mut group_element = BytesStart::new(GROUP_TAG);
            group_element.push_attribute((GROUP_INDEX_ATTR, group.index.as_str()));

            if group.rules.is_empty() {
                writer.write_event(Event::Empty(group_element))?;
                continue;
            }

            writer.write_event(Event::Start(group_element.borrow()))?;
            for rule in &group.rules {
                let mut rule_element = BytesStart::new(RULE_TAG);
                for (key, value) in &rule.attributes {
                    if value.is_empty() && is_optional_attr(key) {
                        continue;
                    }
                    rule_element.push_attribute((key.as_str(), value.as_str()));
                }
                writer.write_event(Event::Empty(rule_element))?;
            }
            writer.write_event(Event::End(BytesEnd::new(GROUP_TAG)))?;
        }
        writer.write_event(Event::End(BytesEnd::new(dataset.record_tag.as_str())))?;
    }

    writer.write_event(Event::End(BytesEnd::new(dataset.root_tag.as_str())))?;
    finish_xml(output)
}

fn push_rates(element: &mut BytesStart<'_>, mix: &Record) {
    if mix.rates.len() == 1 {
        element.push_attribute((RATE_FAMILY, mix.rates[0].as_str()));
    } else if mix.rates.len() > 1 {
        for (i, rate) in mix.rates.iter().enumerate() {
            element.push_attribute((format!("{RATE_FAMILY}{}", i + 1).as_str(), rate.as_str()));
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::super::reader::parse_recipe;
    use super::*;

    #[test]
    fn test_serialize_recipe_numbered_rates_stay_numbered() {
        let xml = "<Mixes>\n\t<Mix ID=\"1\" ReqMoney=\"0\" MaxRate1=\"80\" MaxRate2=\"60\" MaxRate3=\"40\" />\n</Mixes>";
        let dataset = parse_recipe(xml, "Mix").unwrap();
        let out = serialize_recipe(&dataset).unwrap();
        assert!(out.contains("MaxRate1=\"80\" MaxRate2=\"60\" MaxRate3=\"40\""));
        assert!(!out.contains("MaxRate=\""));
    }

    #[test]
    fn test_serialize_recipe_bare_rate_stays_bare() {
        let xml = "<Mixes>\n\t<Mix ID=\"2\" MaxRate=\"5\" />\n</Mixes>";
        let dataset = parse_recipe(xml, "Mix").unwrap();
        let out = serialize_recipe(&dataset).unwrap();
        assert!(out.contains("MaxRate=\"5\""));
        assert!(!out.contains("MaxRate1"));
    }

    #[test]
    fn test_serialize_recipe_omits_empty_kinda() {
        let xml = "<Mixes>\n\t<Mix ID=\"1\">\n\t\t<Group Index=\"1\">\n\t\t\t<Data ItemMin=\"0\" ItemMax=\"0\" LevelMin=\"0\" LevelMax=\"255\" OptMin=\"0\" OptMax=\"255\" CountMin=\"1\" CountMax=\"1\" ItemType=\"0\" />\n\t\t</Group>\n\t</Mix>\n</Mixes>";
        let dataset = parse_recipe(xml, "Mix").unwrap();
        // Parser normalized KindA to ""; the writer must drop it again.
        let out = serialize_recipe(&dataset).unwrap();
        assert!(!out.contains("KindA"));

        // A non-empty value appears.
        let mut dataset = dataset;
        dataset.records[0].groups[0].rules[0].set("KindA", "23");
        let out = serialize_recipe(&dataset).unwrap();
        assert!(out.contains("KindA=\"23\""));
    }

    #[test]
    fn test_serialize_recipe_round_trip_idempotent() {
        let source = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Mixes>\n\t<Mix ID=\"1\" ReqMoney=\"2000000\" MaxRate1=\"80\" MaxRate2=\"60\">\n\t\t<Group Index=\"1\">\n\t\t\t<Data ItemMin=\"7181\" ItemMax=\"7181\" LevelMin=\"4\" LevelMax=\"15\" OptMin=\"4\" OptMax=\"255\" CountMin=\"1\" CountMax=\"1\" ItemType=\"0\" />\n\t\t</Group>\n\t</Mix>\n</Mixes>\n";
        let dataset = parse_recipe(source, "Mix").unwrap();
        let regenerated = serialize_recipe(&dataset).unwrap();
        assert_eq!(regenerated, source);
        assert_eq!(parse_recipe(&regenerated, "Mix").unwrap(), dataset);
    }
}
