use scratchsync_core::{rhythmdb, source, timestamp::round_to_day, SourceMap};
use scratchsync_db::{ScratchDatabase, Track};
use scratchsync_sync::{sync, ReconciliationReport};

const ARMORED: &str = "Armored_Core/Armored_Core_-_Lost_Children.mp3";
const ORBITAL: &str = "Orbital/Orbital_-_In_Sides.mp3";
const DAFT: &str = "Daft_Punk/Daft_Punk_-_Tron_Legacy.mp3";
const ADVANTAGE: &str = "Advantage/Advantage_-_The_Lagoon.mp3";
const ORB: &str = "Orb/Orb_-_Adventures_Beyond.mp3";

const ARMORED_FIRST_SEEN: i64 = 1_357_430_400;

fn rhythmdb_xml() -> String {
    let songs = [
        (ARMORED, ARMORED_FIRST_SEEN),
        (ORBITAL, 1_357_516_800),
        (DAFT, 1_357_603_200),
        (ADVANTAGE, 1_357_689_600),
    ];
    let mut xml = String::from("<?xml version=\"1.0\" standalone=\"yes\"?>\n<rhythmdb version=\"2.0\">\n");
    for (path, first_seen) in songs {
        xml.push_str(&format!(
            "  <entry type=\"song\">\n    <location>file:///home/dj/Music/{path}</location>\n    <first-seen>{first_seen}</first-seen>\n  </entry>\n"
        ));
    }
    xml.push_str("</rhythmdb>\n");
    xml
}

fn source_map() -> SourceMap {
    let records = rhythmdb::parse_str(&rhythmdb_xml()).expect("parse rhythmdb");
    source::load(records).expect("load source")
}

fn target() -> ScratchDatabase {
    let mut armored = Track::new(&format!("home/dj/Music/{ARMORED}"));
    // Three days off: a stale time added.
    armored.set_time_added(round_to_day(ARMORED_FIRST_SEEN + 3 * 86_400).unwrap());
    let mut orb = Track::new(&format!("home/dj/Music/{ORB}"));
    orb.set_time_added(round_to_day(1_300_000_000).unwrap());
    [armored, orb].into_iter().collect()
}

fn assert_empty(report: &ReconciliationReport) {
    assert!(report.removed.is_empty(), "removed: {:?}", report.removed);
    assert!(report.added.is_empty(), "added: {:?}", report.added);
    assert!(report.changed.is_empty(), "changed: {:?}", report.changed);
}

#[test]
fn first_run_reports_expected_diff() {
    let mut db = target();
    let report = sync(&mut db, source_map(), None).expect("sync");

    assert_eq!(report.root, "home/dj/Music/");
    assert_eq!(report.removed, vec![ORB]);
    assert_eq!(report.added, vec![ADVANTAGE, DAFT, ORBITAL]);
    assert_eq!(report.changed.len(), 1);
    let change = &report.changed[0];
    assert_eq!(change.key, ARMORED);
    assert_eq!(change.new, round_to_day(ARMORED_FIRST_SEEN).unwrap());
    assert_ne!(change.old, change.new);

    assert_eq!(db.len(), 4);
}

#[test]
fn second_run_is_a_no_op() {
    let mut db = target();
    sync(&mut db, source_map(), None).expect("first sync");

    // Through the codec as well, as the CLI would between runs.
    let mut reloaded = ScratchDatabase::parse(&db.to_bytes().unwrap()).unwrap();
    let report = sync(&mut reloaded, source_map(), None).expect("second sync");
    assert_empty(&report);
    assert_eq!(reloaded, db);
}

#[test]
fn changed_entries_really_changed() {
    let mut db = target();
    let before: Vec<(String, i64)> = db
        .tracks()
        .iter()
        .map(|t| (t.filebase().to_string(), t.time_added()))
        .collect();
    let report = sync(&mut db, source_map(), None).expect("sync");

    for change in &report.changed {
        let filebase = format!("{}{}", report.root, change.key);
        let old = before.iter().find(|(p, _)| *p == filebase).map(|(_, t)| *t);
        let new = db
            .tracks()
            .iter()
            .find(|t| t.filebase() == filebase)
            .map(Track::time_added);
        assert_eq!(old, Some(change.old));
        assert_eq!(new, Some(change.new));
        assert_ne!(old, new);
    }
}

#[test]
fn required_base_guards_the_wrong_subtree() {
    let mut db = target();
    let err = sync(&mut db, source_map(), Some("home/dj/Desktop/")).unwrap_err();
    assert!(err.to_string().contains("doesn't match detected base 'home/dj/Music/'"));
    assert_eq!(db, target());
}
