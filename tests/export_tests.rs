use checkdesk::export::MemberExport;
use checkdesk::export::members::{export_members, members_csv, members_pdf};
use checkdesk::export::pdf::{PdfManager, fit_cell, pdf_safe};
use checkdesk::export::{ReportFormat, save_download};
use checkdesk::models::Member;
use std::fs;

fn sample() -> Vec<Member> {
    vec![
        Member {
            member_id: "M1".to_string(),
            full_name: "Jordan Smith".to_string(),
            email: "jordan@example.com".to_string(),
            department: "ERA Softwares".to_string(),
            membership_type: "Student".to_string(),
            date_of_birth: Some("1999-04-02T00:00:00.000Z".to_string()),
            issued_card: true,
            ..Default::default()
        },
        Member {
            member_id: "M2".to_string(),
            full_name: "Zoë Park".to_string(),
            ..Default::default()
        },
    ]
}

#[test]
fn test_members_csv_has_header_and_rows() {
    let rows: Vec<MemberExport> = sample().iter().map(MemberExport::from).collect();
    let csv = String::from_utf8(members_csv(&rows).unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("member_id,full_name,email"));
    assert!(lines[1].contains("1999-04-02"));
    assert!(lines[1].ends_with(",yes"));
    assert!(lines[2].ends_with(",no"));
}

#[test]
fn test_empty_members_csv_still_has_header() {
    let csv = String::from_utf8(members_csv(&[]).unwrap()).unwrap();
    assert_eq!(csv.lines().count(), 1);
    assert!(csv.starts_with("member_id,"));
}

#[test]
fn test_members_pdf_is_a_pdf() {
    let rows: Vec<MemberExport> = sample().iter().map(MemberExport::from).collect();
    let bytes = members_pdf(&rows, "Generated on 2025-03-01");
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_pdf_text_helpers() {
    assert_eq!(pdf_safe("Zoë"), "Zo?");
    let cut = fit_cell(&"x".repeat(200), 60.0, 8.5);
    assert!(cut.ends_with(".."));
    assert!(cut.len() < 20);
    assert_eq!(fit_cell("short", 200.0, 8.5), "short");
}

#[test]
fn test_long_tables_span_pages() {
    let rows: Vec<Vec<String>> = (0..120).map(|i| vec![i.to_string()]).collect();
    let mut pdf = PdfManager::new();
    pdf.write_table("Members Report", "", &["N"], &rows);
    assert!(pdf.page_count() >= 3);

    let mut empty = PdfManager::new();
    empty.write_table("Members Report", "", &["N"], &[]);
    assert_eq!(empty.page_count(), 1);
}

#[test]
fn test_export_members_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("members.csv");

    export_members(&sample(), ReportFormat::Csv, &path, "", false).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("Jordan Smith"));

    // overwriting needs --force
    export_members(&sample()[..1], ReportFormat::Csv, &path, "", true).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 2);
}

#[test]
fn test_download_is_saved_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("attendance.csv");

    save_download("Attendance CSV", b"a,b\n1,2\n", &path, false).unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"a,b\n1,2\n");

    let empty = dir.path().join("empty.csv");
    assert!(save_download("Attendance CSV", b"", &empty, false).is_err());
    assert!(!empty.exists());
}
