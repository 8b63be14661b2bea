use muzen::prelude::*;
use pretty_assertions::assert_eq;

const EVENTS: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Events>\n\t<Event id=\"1\" name=\"A\" start_time=\"10:00\" duration=\"5\" enabled=\"true\" />\n</Events>\n";

const MIXES: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Mixes>\n\t<Mix ID=\"1\" ReqMoney=\"2000000\" MaxRate1=\"80\" MaxRate2=\"60\" MaxRate3=\"40\">\n\t\t<Group Index=\"1\">\n\t\t\t<Data ItemMin=\"7181\" ItemMax=\"7181\" LevelMin=\"4\" LevelMax=\"15\" OptMin=\"4\" OptMax=\"255\" CountMin=\"1\" CountMax=\"1\" ItemType=\"0\" />\n\t\t</Group>\n\t</Mix>\n</Mixes>\n";

#[test]
fn test_round_trip_idempotence_all_formats() {
    let flat = parse_flat(EVENTS, "Event").unwrap();
    assert_eq!(parse_flat(&serialize(&flat).unwrap(), "Event").unwrap(), flat);

    let grouped_src = "<InvasionManager>\n\t<Invasion Index=\"1\" Name=\"Golden\">\n\t\t<StartTime Hour=\"10\" />\n\t</Invasion>\n</InvasionManager>";
    let grouped = parse_grouped(grouped_src, "Invasion", None).unwrap();
    assert_eq!(
        parse_grouped(&serialize(&grouped).unwrap(), "Invasion", None).unwrap(),
        grouped
    );

    let recipe = parse_recipe(MIXES, "Mix").unwrap();
    assert_eq!(parse_recipe(&serialize(&recipe).unwrap(), "Mix").unwrap(), recipe);

    let ini = parse_ini("[Common]\nEventTime=60\n").unwrap();
    assert_eq!(parse_ini(&serialize(&ini).unwrap()).unwrap(), ini);
}

#[test]
fn test_rate_family_symmetry() {
    // Numbered in, numbered out.
    let numbered = parse_recipe(MIXES, "Mix").unwrap();
    let out = serialize(&numbered).unwrap();
    assert!(out.contains("MaxRate1=\"80\" MaxRate2=\"60\" MaxRate3=\"40\""));
    assert!(!out.contains("MaxRate=\""));

    // Bare in, bare out.
    let bare = parse_recipe("<Mixes><Mix ID=\"2\" MaxRate=\"5\" /></Mixes>", "Mix").unwrap();
    assert_eq!(bare.records[0].rates, ["5"]);
    let out = serialize(&bare).unwrap();
    assert!(out.contains("MaxRate=\"5\""));
    assert!(!out.contains("MaxRate1"));
}

#[test]
fn test_toggle_scalar_preserves_everything_else() {
    let dataset = parse_flat(EVENTS, "Event").unwrap();
    let mut editor = DatasetEditor::new(dataset);
    assert!(editor.update_scalar(0, "enabled", "false"));

    let out = serialize(editor.dataset()).unwrap();
    assert_eq!(
        out,
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Events>\n\t<Event id=\"1\" name=\"A\" start_time=\"10:00\" duration=\"5\" enabled=\"false\" />\n</Events>\n"
    );
}

#[test]
fn test_unknown_attributes_survive_editing() {
    let xml = "<Events><Event id=\"1\" FutureFlag=\"7\" enabled=\"true\" /></Events>";
    let mut editor = DatasetEditor::new(parse_flat(xml, "Event").unwrap());
    editor.update_scalar(0, "enabled", "false");
    let out = serialize(editor.dataset()).unwrap();
    assert!(out.contains("FutureFlag=\"7\""));
    // Order unchanged: the unknown attribute stays between id and enabled.
    assert!(out.contains("id=\"1\" FutureFlag=\"7\" enabled=\"false\""));
}

#[test]
fn test_group_lifecycle_on_parsed_recipe() {
    let mut editor = DatasetEditor::new(parse_recipe(MIXES, "Mix").unwrap());

    // Existing max index is 1, so the next group gets 2.
    assert_eq!(editor.add_group(0).as_deref(), Some("2"));
    let out = serialize(editor.dataset()).unwrap();
    assert!(out.contains("<Group Index=\"2\">"));
    // The seeded placeholder rule has no KindA in the output.
    assert!(!out.contains("KindA"));

    // Removal is positional: the group just added goes away again.
    assert!(editor.remove_group(0));
    assert_eq!(editor.dataset().records[0].groups.len(), 1);

    // Undo twice walks back both operations.
    assert!(editor.undo());
    assert!(editor.undo());
    assert_eq!(editor.dataset().records[0].groups.len(), 1);
    assert_eq!(
        parse_recipe(MIXES, "Mix").unwrap(),
        editor.dataset().clone()
    );
}

#[test]
fn test_ini_crlf_and_stray_lines_before_sections() {
    let ini = "LooseKey=1\r\n\r\n[Common]\r\nEventTime=60\r\nNotice=1\r\n\r\n[Golden]\r\nStartHour=10\r\n";
    let dataset = parse_ini(ini).unwrap();
    assert_eq!(dataset.records.len(), 2);
    assert!(dataset.records.iter().all(|r| r.get("LooseKey").is_none()));

    let out = serialize(&dataset).unwrap();
    assert_eq!(
        out,
        "[Common]\nEventTime=60\nNotice=1\n\n[Golden]\nStartHour=10\n\n"
    );
}

#[test]
fn test_diff_after_edit_names_the_change() {
    let before = parse_flat(EVENTS, "Event").unwrap();
    let mut editor = DatasetEditor::new(before.clone());
    editor.update_scalar(0, "enabled", "false");

    let result = diff_datasets(&before, editor.dataset());
    assert_eq!(result.change_count(), 1);
    assert_eq!(result.changes[0].attributes[0].key, "enabled");
    assert_eq!(result.summary(), "0 added, 0 removed, 1 modified");
}
