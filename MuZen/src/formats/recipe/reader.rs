//! Recipe XML reading

use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::fs;
use std::path::Path;

use super::super::common::{collect_attributes, split_header};
use super::super::record::{Dataset, DatasetFormat, Group, Record};
use super::super::schema::{GROUP_INDEX_ATTR, GROUP_TAG, RATE_FAMILY, RULE_TAG};
use crate::error::{Error, Result};

/// Read a recipe XML file from disk
///
/// # Errors
/// Returns an error if the file cannot be read or has invalid XML.
pub fn read_recipe<P: AsRef<Path>>(path: P, record_tag: &str) -> Result<Dataset> {
    let content = fs::read_to_string(path)?;
    parse_recipe(&content, record_tag)
}

/// Parse recipe XML from a string
///
/// Scalar attributes survive in document order, extras included. The rate
/// family is detected in either input form (numbered `MaxRate1..N` or the
/// bare `MaxRate`) and normalized into the record's rate sequence. Rules
/// missing `KindA` get it as an empty string.
///
/// # Errors
/// Returns an error if the XML is malformed.
pub fn parse_recipe(content: &str, record_tag: &str) -> Result<Dataset> {
    let (header, root_tag) = split_header(content)?;
    let mut dataset = Dataset::new(DatasetFormat::Recipe, header, root_tag, record_tag);

    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut current_mix: Option<Record> = None;
    let mut current_group: Option<Group> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if e.name().as_ref() == record_tag.as_bytes() && current_mix.is_none() {
                    current_mix = Some(parse_mix(collect_attributes(&e)?));
                } else if e.name().as_ref() == GROUP_TAG.as_bytes()
                    && current_mix.is_some()
                    && current_group.is_none()
                {
                    current_group = Some(parse_group(collect_attributes(&e)?));
                } else if e.name().as_ref() == RULE_TAG.as_bytes() {
                    if let Some(group) = current_group.as_mut() {
                        group.rules.push(parse_rule(collect_attributes(&e)?));
                    }
                }
            }
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == RULE_TAG.as_bytes() {
                    if let Some(group) = current_group.as_mut() {
                        group.rules.push(parse_rule(collect_attributes(&e)?));
                    }
                } else if e.name().as_ref() == GROUP_TAG.as_bytes() {
                    if let Some(mix) = current_mix.as_mut() {
                        mix.groups.push(parse_group(collect_attributes(&e)?));
                    }
                } else if e.name().as_ref() == record_tag.as_bytes() && current_mix.is_none() {
                    dataset.records.push(parse_mix(collect_attributes(&e)?));
                }
            }
            Ok(Event::End(e)) => {
                if e.name().as_ref() == GROUP_TAG.as_bytes() {
                    if let (Some(mix), Some(group)) = (current_mix.as_mut(), current_group.take()) {
                        mix.groups.push(group);
                    }
                } else if e.name().as_ref() == record_tag.as_bytes() {
                    if let Some(mix) = current_mix.take() {
                        dataset.records.push(mix);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::XmlError(e)),
            _ => {}
        }
        buf.clear();
    }

    tracing::debug!(
        root = %dataset.root_tag,
        records = dataset.records.len(),
        "parsed recipe document"
    );
    Ok(dataset)
}

fn parse_mix(mut attributes: IndexMap<String, String>) -> Record {
    let mut rates = Vec::new();
    if attributes.contains_key(&format!("{RATE_FAMILY}1")) {
        let mut i = 1;
        while let Some(rate) = attributes.shift_remove(&format!("{RATE_FAMILY}{i}")) {
            rates.push(rate);
            i += 1;
        }
    } else if let Some(rate) = attributes.shift_remove(RATE_FAMILY) {
        rates.push(rate);
    }

    Record {
        attributes,
        rates,
        ..Record::default()
    }
}

fn parse_group(attributes: IndexMap<String, String>) -> Group {
    Group::new(
        attributes
            .get(GROUP_INDEX_ATTR)
            .cloned()
            .unwrap_or_default(),
    )
}

fn parse_rule(mut attributes: IndexMap<String, String>) -> Record {
    // KindA is present but empty when the source omits it.
    if !attributes.contains_key("KindA") {
        attributes.insert("KindA".to_string(), String::new());
    }
    Record {
        attributes,
        ..Record::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXES: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Mixes>
	<Mix ID="1" ReqMoney="2000000" MaxRate1="80" MaxRate2="60" MaxRate3="40">
		<Group Index="1">
			<Data ItemMin="7181" ItemMax="7181" LevelMin="4" LevelMax="15" OptMin="4" OptMax="255" CountMin="1" CountMax="1" ItemType="0" />
			<Data ItemMin="6159" ItemMax="6159" LevelMin="0" LevelMax="255" OptMin="0" OptMax="255" CountMin="1" CountMax="1" ItemType="1" KindA="23" />
		</Group>
		<Group Index="2">
			<Data ItemMin="6158" ItemMax="6158" LevelMin="0" LevelMax="255" OptMin="0" OptMax="255" CountMin="1" CountMax="1" ItemType="0" />
		</Group>
	</Mix>
	<Mix ID="2" ReqMoney="0" MaxRate="100" Disabled="1">
	</Mix>
</Mixes>
"#;

    #[test]
    fn test_parse_recipe_structure() {
        let dataset = parse_recipe(MIXES, "Mix").unwrap();
        assert_eq!(dataset.records.len(), 2);
        let mix = &dataset.records[0];
        assert_eq!(mix.get("ID"), Some("1"));
        assert_eq!(mix.groups.len(), 2);
        assert_eq!(mix.groups[0].index, "1");
        assert_eq!(mix.groups[0].rules.len(), 2);
        assert_eq!(mix.groups[1].rules[0].get("ItemMin"), Some("6158"));
    }

    #[test]
    fn test_parse_recipe_numbered_rates() {
        let dataset = parse_recipe(MIXES, "Mix").unwrap();
        assert_eq!(dataset.records[0].rates, ["80", "60", "40"]);
        // Family members do not linger in the attribute bag.
        assert!(dataset.records[0].get("MaxRate1").is_none());
    }

    #[test]
    fn test_parse_recipe_bare_rate() {
        let dataset = parse_recipe(MIXES, "Mix").unwrap();
        assert_eq!(dataset.records[1].rates, ["100"]);
        // Extra scalar attributes survive.
        assert_eq!(dataset.records[1].get("Disabled"), Some("1"));
    }

    #[test]
    fn test_parse_recipe_kinda_defaults_empty() {
        let dataset = parse_recipe(MIXES, "Mix").unwrap();
        let rules = &dataset.records[0].groups[0].rules;
        assert_eq!(rules[0].get("KindA"), Some(""));
        assert_eq!(rules[1].get("KindA"), Some("23"));
    }
}
