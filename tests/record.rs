// RECORDER CONTRACT TESTS
// FILESYSTEM-LEVEL PROPERTIES OF THE TIMING RECORD: LAST-WRITE-WINS,
// EXACT RENDERING, FATAL UNOPENABLE DESTINATION, ONE FILE PER IDENTITY.
// NO ORCHESTRATOR, NO ROOT -- PLAIN TEMP DIRECTORIES.

use std::fs;
use std::path::PathBuf;

use stampede::clock::ClockReading;
use stampede::identity;
use stampede::record::{self, Mode, TimingRecord};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("stampede-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn rec(mode: Mode, identity: &str, sec: i64, nsec: i64) -> TimingRecord {
    TimingRecord {
        mode,
        identity: identity.to_string(),
        reading: ClockReading { sec, nsec },
    }
}

#[test]
fn write_names_file_after_identity() {
    let dir = scratch_dir("naming");
    let path = rec(Mode::KeepAlive, "host-7", 1, 2).write_to(&dir).unwrap();
    assert_eq!(path.file_name().unwrap(), "host-7.txt");

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("pod=host-7"));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn baseline_writes_process_key() {
    let dir = scratch_dir("baseline-key");
    let path = rec(Mode::Baseline, "host-7", 1, 2).write_to(&dir).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("process=host-7"));
    assert!(!content.contains("pod="));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn last_write_wins() {
    let dir = scratch_dir("overwrite");
    rec(Mode::Baseline, "r1", 5, 100).write_to(&dir).unwrap();
    rec(Mode::Baseline, "r1", 7, 2).write_to(&dir).unwrap();

    // STILL EXACTLY ONE FILE, HOLDING ONLY THE SECOND RECORD'S VALUES
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);
    let content = fs::read_to_string(dir.join("r1.txt")).unwrap();
    assert_eq!(
        content,
        "process=r1\nstart_time_sec=7\nstart_time_nsec=2\nstart_time_formatted=7.2\n"
    );
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn zero_reading_formats_as_zero_dot_zero() {
    let r = rec(Mode::Baseline, "z", 0, 0);
    assert!(r.render().contains("start_time_formatted=0.0\n"));
}

#[test]
fn missing_destination_is_fatal_and_leaves_nothing() {
    let dir = scratch_dir("missing");
    let gone = dir.join("does-not-exist");
    let result = rec(Mode::Baseline, "r1", 1, 1).write_to(&gone);
    assert!(result.is_err());
    assert!(!gone.join("r1.txt").exists());
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn writes_exactly_one_file() {
    let dir = scratch_dir("single");
    rec(Mode::KeepAlive, "only", 3, 4).write_to(&dir).unwrap();
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 1);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn identity_override_wins_over_host_name() {
    assert_eq!(
        identity::resolve(Some("timing-3".to_string())).unwrap(),
        "timing-3"
    );
}

#[test]
fn identity_defaults_to_host_name() {
    let name = identity::resolve(None).unwrap();
    assert!(!name.is_empty());
}

#[test]
fn written_record_parses_back() {
    let dir = scratch_dir("roundtrip");
    let path = rec(Mode::KeepAlive, "host-7", 12, 500_000_000)
        .write_to(&dir)
        .unwrap();

    let parsed = record::parse(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed.identity.as_deref(), Some("host-7"));
    assert_eq!(parsed.sec, 12);
    assert_eq!(parsed.nsec, 500_000_000);
    assert!((parsed.start_ms() - 12_500.0).abs() < 1e-9);
    fs::remove_dir_all(&dir).unwrap();
}
