use std::fs;

use muadmin::AdminSuite;
use muadmin::cache::DraftCache;
use muadmin::category::CategoryId;
use muadmin::config::AdminConfig;
use muadmin::muzen::formats::serialize;
use muadmin::session::SaveOutcome;
use tempfile::TempDir;

const EVENT_XML: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Events>\n\t<Event id=\"1\" name=\"A\" start_time=\"10:00\" duration=\"5\" enabled=\"true\" />\n</Events>\n";

fn seed_events(data: &std::path::Path) {
    fs::create_dir_all(data.join("Event")).unwrap();
    fs::write(data.join("Event/Event.xml"), EVENT_XML).unwrap();
    fs::write(
        data.join("Event/InvasionManager.xml"),
        "<InvasionManager>\n\t<Invasion Index=\"1\" Name=\"Golden\">\n\t\t<StartTime Hour=\"10\" />\n\t</Invasion>\n</InvasionManager>\n",
    )
    .unwrap();
    fs::write(data.join("Event/Event.ini"), "[Common]\r\nEventTime=60\r\n").unwrap();
    fs::write(data.join("Event/EventSeasonManager.xml"), "<Events>\n</Events>\n").unwrap();
    fs::write(
        data.join("Event/InvasionMonsters.xml"),
        "<InvasionMonsters>\n\t<Invasion Index=\"1\" Name=\"Golden\">\n\t\t<Monster Class=\"43\" Count=\"10\" />\n\t</Invasion>\n</InvasionMonsters>\n",
    )
    .unwrap();
}

#[test]
fn test_toggle_enabled_and_save_with_backup() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("Data");
    seed_events(&data);

    let suite = AdminSuite::new(AdminConfig::rooted_at(&data));
    let mut session = suite.open(CategoryId::Events).unwrap();

    let editor = session.editor_mut("event").unwrap();
    assert!(editor.update_scalar(0, "enabled", "false"));

    assert_eq!(session.save("event").unwrap(), SaveOutcome::Saved);

    // Everything but the toggled attribute is untouched, order included.
    let written = fs::read_to_string(data.join("Event/Event.xml")).unwrap();
    assert_eq!(
        written,
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Events>\n\t<Event id=\"1\" name=\"A\" start_time=\"10:00\" duration=\"5\" enabled=\"false\" />\n</Events>\n"
    );

    // A backup of the original content exists.
    let backups: Vec<_> = fs::read_dir(data.join("backups/events"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(backups.len(), 1);
    let backed_up = fs::read_to_string(&backups[0]).unwrap();
    assert_eq!(backed_up, EVENT_XML);
}

#[test]
fn test_grouped_and_ini_files_round_trip_through_session() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("Data");
    seed_events(&data);

    let suite = AdminSuite::new(AdminConfig::rooted_at(&data));
    let mut session = suite.open(CategoryId::Events).unwrap();

    // Untouched files short-circuit instead of rewriting the bytes.
    for name in ["invasion_manager", "invasion_monsters"] {
        assert_eq!(session.save(name).unwrap(), SaveOutcome::Unchanged);
    }

    // The INI arrived with CRLF endings; an edit normalizes on save.
    session
        .editor_mut("event_ini")
        .unwrap()
        .update_scalar(0, "EventTime", "90");
    assert_eq!(session.save("event_ini").unwrap(), SaveOutcome::Saved);
    let written = fs::read_to_string(data.join("Event/Event.ini")).unwrap();
    assert_eq!(written, "[Common]\nEventTime=90\n\n");
}

#[test]
fn test_failed_save_keeps_edits_and_session_ready() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("Data");
    seed_events(&data);

    let suite = AdminSuite::new(AdminConfig::rooted_at(&data));
    let mut session = suite.open(CategoryId::Events).unwrap();
    session
        .editor_mut("event")
        .unwrap()
        .update_scalar(0, "enabled", "false");

    // Make the target path unwritable by replacing the file with a directory.
    let target = data.join("Event/Event.xml");
    fs::remove_file(&target).unwrap();
    fs::create_dir(&target).unwrap();

    assert!(session.save("event").is_err());
    assert_eq!(session.state(), muadmin::session::SessionState::Ready);
    assert!(session.status().unwrap().contains("failed to save"));
    // The edit is still there for a retry.
    assert_eq!(
        session.editor("event").unwrap().dataset().records[0].get("enabled"),
        Some("false")
    );
    assert_eq!(session.dirty_files(), ["event"]);
}

#[test]
fn test_map_drop_entity_flow() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("Data");
    fs::create_dir_all(data.join("Drop/EachMonsterMapDrop")).unwrap();
    fs::create_dir_all(data.join("Monster")).unwrap();
    fs::create_dir_all(data.join("Item")).unwrap();
    for (path, text) in [
        ("Drop/PentagramDropRate.xml", "<Drops>\n</Drops>\n"),
        ("Drop/SocketItemDropRates.xml", "<Drops>\n</Drops>\n"),
        ("Drop/ItemDropRateControl.ini", "[Control]\nRate=100\n"),
        ("Monster/MonsterList.xml", "<Monsters>\n</Monsters>\n"),
        ("Item/ItemList.xml", "<Items>\n</Items>\n"),
        ("Item/MasteryExcOptions.xml", "<Options>\n</Options>\n"),
    ] {
        fs::write(data.join(path), text).unwrap();
    }
    fs::write(
        data.join("Drop/EachMonsterMapDrop/MonsterMap_(0)_Bag.xml"),
        "<Bag>\n\t<Drop Rate=\"40\" ItemCat=\"14\" ItemIndex=\"13\" />\n</Bag>\n",
    )
    .unwrap();

    let suite = AdminSuite::new(AdminConfig::rooted_at(&data));
    let mut session = suite.open(CategoryId::MapDrops).unwrap();
    assert_eq!(session.entity_files(), ["MonsterMap_(0)_Bag.xml"]);
    // Reference files ride along as raw text.
    assert!(session.reference("item_list").unwrap().contains("<Items>"));

    session.open_entity("MonsterMap_(0)_Bag.xml").unwrap();
    session
        .editor_mut("MonsterMap_(0)_Bag.xml")
        .unwrap()
        .update_scalar(0, "Rate", "55");
    assert_eq!(
        session.save("MonsterMap_(0)_Bag.xml").unwrap(),
        SaveOutcome::Saved
    );

    let written =
        fs::read_to_string(data.join("Drop/EachMonsterMapDrop/MonsterMap_(0)_Bag.xml")).unwrap();
    assert!(written.contains("Rate=\"55\" ItemCat=\"14\" ItemIndex=\"13\""));

    // Bad filenames never reach the filesystem.
    assert!(session.open_entity("MonsterMap_(0)_Bag.xml.bak").is_err());
}

#[test]
fn test_draft_cache_is_advisory() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("Data");
    seed_events(&data);

    let suite = AdminSuite::new(AdminConfig::rooted_at(&data));
    let cache = DraftCache::at(temp.path().join("drafts"));

    let mut session = suite.open(CategoryId::Events).unwrap();
    session
        .editor_mut("event")
        .unwrap()
        .update_scalar(0, "enabled", "false");
    let text = serialize(session.editor("event").unwrap().dataset()).unwrap();
    cache.stash(CategoryId::Events, "event", &text).unwrap();

    // A fresh session loads from disk, not from the draft.
    let session = suite.open(CategoryId::Events).unwrap();
    assert_eq!(
        session.editor("event").unwrap().dataset().records[0].get("enabled"),
        Some("true")
    );
    // The draft is still there for the UI to offer back.
    let draft = cache.load(CategoryId::Events, "event").unwrap().unwrap();
    assert!(draft.content.contains("enabled=\"false\""));
}
