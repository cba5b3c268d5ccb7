//! Save/load round trips through the public store API.

use class_roster::{ClassMetadata, Layout, Roster, RosterFile, Student};
use tempfile::tempdir;

fn varied_roster(count: usize) -> Roster {
    let genders = [0, 1, 2, 3, -5, i32::MAX];
    let records = (0..count)
        .map(|i| {
            Student::new(
                &format!("stu{i}-{}", "x".repeat(i % 7)),
                genders[i % genders.len()],
                (i * 37 % 1000) as u32,
            )
        })
        .collect();
    Roster::from_records(records)
}

#[test]
fn rosters_of_any_size_round_trip() {
    let dir = tempdir().unwrap();
    for layout in [Layout::Classic, Layout::Full] {
        let file = RosterFile::new(dir.path().join(format!("{layout:?}.bin")), layout);
        for count in [0, 1, 2, 17, 250] {
            let roster = varied_roster(count);
            file.save(&roster, None).unwrap();
            let loaded = file.load().unwrap();
            assert_eq!(loaded.roster, roster, "{layout:?} with {count} students");
        }
    }
}

#[test]
fn metadata_survives_a_reload_next_to_records() {
    let dir = tempdir().unwrap();
    let file = RosterFile::new(dir.path().join("class_list"), Layout::Full);
    let metadata = ClassMetadata::new("BIO", "110", "3");

    file.save(&varied_roster(5), Some(&metadata)).unwrap();
    let loaded = file.load().unwrap();
    assert_eq!(loaded.roster, varied_roster(5));
    assert_eq!(loaded.metadata, Some(metadata));
}

#[test]
fn loading_twice_keeps_only_the_latest_class() {
    let dir = tempdir().unwrap();
    let file = RosterFile::new(dir.path().join("class_list"), Layout::Full);

    file.save(&varied_roster(8), None).unwrap();
    let first = file.load().unwrap().roster;
    assert_eq!(first.count(), 8);

    file.save(&varied_roster(3), None).unwrap();
    let second = file.load().unwrap().roster;
    assert_eq!(second.count(), 3);
}
