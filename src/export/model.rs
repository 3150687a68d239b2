// src/export/model.rs

use crate::models::Member;
use serde::Serialize;

/// Flat member row for CSV / PDF reports.
#[derive(Serialize, Clone, Debug)]
pub struct MemberExport {
    pub member_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub date_of_birth: String,
    pub department: String,
    pub membership_type: String,
    pub card_issued: String,
}

impl From<&Member> for MemberExport {
    fn from(m: &Member) -> Self {
        Self {
            member_id: m.member_id.clone(),
            full_name: m.full_name.clone(),
            email: m.email.clone(),
            phone: m.phone.clone(),
            gender: m.gender.clone(),
            date_of_birth: m.birth_day(),
            department: m.department.clone(),
            membership_type: m.membership_type.clone(),
            card_issued: if m.issued_card { "yes" } else { "no" }.to_string(),
        }
    }
}

/// Column titles of the PDF table (CSV headers come from serde).
pub(crate) fn pdf_headers() -> Vec<&'static str> {
    vec![
        "ID",
        "Name",
        "Email",
        "Phone",
        "Department",
        "Type",
        "Card",
    ]
}

/// PDF rows: a narrower selection that fits an A4 page.
pub(crate) fn member_to_pdf_row(e: &MemberExport) -> Vec<String> {
    vec![
        e.member_id.clone(),
        e.full_name.clone(),
        e.email.clone(),
        e.phone.clone(),
        e.department.clone(),
        e.membership_type.clone(),
        e.card_issued.clone(),
    ]
}
