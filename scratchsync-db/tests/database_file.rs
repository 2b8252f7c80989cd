//! On-disk database tests: a file shaped like one Scratch LIVE writes.

use std::fs;

use rstest::rstest;
use scratchsync_db::{
    chunk::{self, OTRK, PFIL, TADD, UADD, VRSN},
    DatabaseError, ScratchDatabase,
};
use tempfile::TempDir;

fn track_payload(path: &str, added: u32) -> Vec<u8> {
    let mut out = Vec::new();
    chunk::write_chunk(&mut out, b"ttyp", &chunk::encode_utf16("mp3")).unwrap();
    chunk::write_chunk(&mut out, &PFIL, &chunk::encode_utf16(path)).unwrap();
    chunk::write_chunk(&mut out, b"tsng", &chunk::encode_utf16("Some Song")).unwrap();
    chunk::write_chunk(&mut out, &TADD, &chunk::encode_utf16(&added.to_string())).unwrap();
    chunk::write_chunk(&mut out, &UADD, &added.to_be_bytes()).unwrap();
    chunk::write_chunk(&mut out, b"bmis", &[0]).unwrap();
    chunk::write_chunk(&mut out, b"ulbl", &[0, 0xff, 0xff, 0xff]).unwrap();
    out
}

fn database_bytes(tracks: &[(&str, u32)]) -> Vec<u8> {
    let mut out = Vec::new();
    chunk::write_chunk(
        &mut out,
        &VRSN,
        &chunk::encode_utf16("2.0/Serato Scratch LIVE Database"),
    )
    .unwrap();
    for (path, added) in tracks {
        chunk::write_chunk(&mut out, &OTRK, &track_payload(path, *added)).unwrap();
    }
    out
}

#[test]
fn open_reads_paths_and_times() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("database V2");
    fs::write(
        &path,
        database_bytes(&[
            ("home/dj/Music/Armored_Core/a.mp3", 1_357_401_600),
            ("home/dj/Music/Orb/b.mp3", 1_357_488_000),
        ]),
    )
    .unwrap();

    let db = ScratchDatabase::open_at(&path).unwrap();
    assert_eq!(db.len(), 2);
    assert_eq!(db.tracks()[0].filebase(), "home/dj/Music/Armored_Core/a.mp3");
    assert_eq!(db.tracks()[1].time_added(), 1_357_488_000);
    assert_eq!(
        db.version().as_deref(),
        Some("2.0/Serato Scratch LIVE Database")
    );
}

#[test]
fn untouched_database_saves_byte_identical() {
    let bytes = database_bytes(&[("a/1.mp3", 1), ("a/2.mp3", 2), ("b/3.mp3", 3)]);
    let db = ScratchDatabase::parse(&bytes).unwrap();
    assert_eq!(db.to_bytes().unwrap(), bytes);
}

#[rstest]
#[case::cut_in_header(5)]
#[case::cut_in_payload(20)]
fn truncated_file_is_rejected(#[case] keep: usize) {
    let bytes = database_bytes(&[("a/1.mp3", 1)]);
    let err = ScratchDatabase::parse(&bytes[..keep]).unwrap_err();
    assert!(
        matches!(
            err,
            DatabaseError::TruncatedHeader { .. } | DatabaseError::TruncatedPayload { .. }
        ),
        "got {err:?}"
    );
}
