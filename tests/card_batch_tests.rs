use checkdesk::core::card_batch::{CardArchive, archive_file_name};
use checkdesk::models::Member;
use chrono::NaiveDate;
use std::io::{Cursor, Read};
use zip::ZipArchive;

fn member(id: &str, name: &str) -> Member {
    Member {
        member_id: id.to_string(),
        full_name: name.to_string(),
        ..Default::default()
    }
}

#[test]
fn test_archive_name_uses_date() {
    let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    assert_eq!(archive_file_name(day), "new_member_cards_2025-03-01.zip");
}

#[test]
fn test_entries_named_after_members() {
    let mut archive = CardArchive::new(Cursor::new(Vec::new()));
    assert!(archive.is_empty());

    let a = archive
        .add(&member("M1", "Jordan  Smith"), b"png-one")
        .unwrap();
    let b = archive.add(&member("M2", "Ana Lee"), b"png-two").unwrap();
    assert_eq!(a, "Jordan_Smith_card.png");
    assert_eq!(b, "Ana_Lee_card.png");
    assert_eq!(archive.len(), 2);

    let cursor = archive.finish().unwrap();
    let mut zip = ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap();
    assert_eq!(zip.len(), 2);

    let mut body = Vec::new();
    zip.by_name("Ana_Lee_card.png")
        .unwrap()
        .read_to_end(&mut body)
        .unwrap();
    assert_eq!(body, b"png-two");
}

#[test]
fn test_duplicate_names_get_member_id() {
    let mut archive = CardArchive::new(Cursor::new(Vec::new()));

    let first = archive.add(&member("M1", "Jordan Smith"), b"1").unwrap();
    let second = archive.add(&member("M7", "Jordan Smith"), b"2").unwrap();
    assert_eq!(first, "Jordan_Smith_card.png");
    assert_eq!(second, "Jordan_Smith_M7_card.png");

    let cursor = archive.finish().unwrap();
    let zip = ZipArchive::new(Cursor::new(cursor.into_inner())).unwrap();
    assert_eq!(zip.len(), 2);
}
