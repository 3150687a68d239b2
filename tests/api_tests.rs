use checkdesk::api::{Envelope, api_error};
use checkdesk::errors::AppError;
use checkdesk::models::attendance::{AttendanceFilter, AttendancePage};
use checkdesk::models::{Member, MemberForm};
use reqwest::StatusCode;

#[test]
fn test_api_error_prefers_server_message() {
    let err = api_error(
        StatusCode::BAD_REQUEST,
        r#"{"success":false,"message":"Member already checked in"}"#,
    );
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "Member already checked in (HTTP 400)");

    let err = api_error(StatusCode::NOT_FOUND, "<html>nope</html>");
    assert!(matches!(err, AppError::Api { status: 404, ref message } if message == "Not Found"));
}

#[test]
fn test_member_envelope_decodes() {
    let body = r#"{
        "success": true,
        "data": {
            "memberId": "M1",
            "fullName": "Jordan Smith",
            "email": "jordan@example.com",
            "department": "ERA Softwares",
            "membershipType": "Student",
            "dateOfBirth": "1999-04-02T00:00:00.000Z",
            "issuedCard": false
        }
    }"#;

    let env: Envelope<Member> = serde_json::from_str(body).unwrap();
    assert_eq!(env.success, Some(true));
    assert_eq!(env.data.member_id, "M1");
    assert_eq!(env.data.birth_day(), "1999-04-02");
    assert_eq!(env.data.to_form().date_of_birth, "1999-04-02");
}

#[test]
fn test_attendance_page_decodes() {
    let body = r#"{
        "data": [
            {"memberId": "M1", "member": {"fullName": "Jordan Smith"},
             "checkIn": "2025-03-01T09:00:00Z", "status": "checked-in"},
            {"memberId": "M2", "checkIn": "2025-03-01T08:00:00Z",
             "checkOut": "2025-03-01T10:00:00Z", "status": "checked-out"}
        ],
        "pagination": {"total": 12, "totalPages": 2}
    }"#;

    let page: AttendancePage = serde_json::from_str(body).unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].member_name(), "Jordan Smith");
    assert_eq!(page.data[1].member_name(), "-");
    assert!(page.data[1].check_out.is_some());
    assert_eq!(page.pagination.unwrap().total_pages, 2);
}

#[test]
fn test_filter_skips_blank_values() {
    let filter = AttendanceFilter {
        member_id: Some(" M1 ".to_string()),
        status: Some("".to_string()),
        start_date: None,
        end_date: Some("2025-03-31".to_string()),
    };
    assert_eq!(
        filter.to_query(),
        vec![
            ("memberId", "M1".to_string()),
            ("endDate", "2025-03-31".to_string())
        ]
    );
}

#[test]
fn test_member_form_validation() {
    let mut form = MemberForm {
        full_name: "Jordan Smith".to_string(),
        email: "jordan@example.com".to_string(),
        phone: "555-0100".to_string(),
        gender: "other".to_string(),
        date_of_birth: "1999-04-02".to_string(),
        department: "ERA Softwares".to_string(),
        membership_type: "Student".to_string(),
    };
    assert!(form.validate().is_ok());

    form.email = "not-an-email".to_string();
    assert!(matches!(form.validate(), Err(AppError::Validation(_))));

    form.email = "jordan@example.com".to_string();
    form.phone = " ".to_string();
    let msg = form.validate().unwrap_err().to_string();
    assert!(msg.contains("phone"));
}

#[test]
fn test_member_form_serializes_camel_case() {
    let form = MemberForm {
        full_name: "Jordan Smith".to_string(),
        membership_type: "Student".to_string(),
        ..Default::default()
    };
    let json = serde_json::to_value(&form).unwrap();
    assert_eq!(json["fullName"], "Jordan Smith");
    assert_eq!(json["membershipType"], "Student");
}
