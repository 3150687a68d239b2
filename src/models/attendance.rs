use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRef {
    #[serde(default)]
    pub full_name: String,
}

/// One attendance record. Server-owned, read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub member_id: String,
    #[serde(default)]
    pub member: Option<MemberRef>,
    pub check_in: DateTime<Utc>,
    #[serde(default)]
    pub check_out: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: String,
}

impl AttendanceRecord {
    pub fn member_name(&self) -> &str {
        self.member
            .as_ref()
            .map(|m| m.full_name.as_str())
            .unwrap_or("-")
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub total_pages: u64,
}

/// `GET /attendance` body: records plus server-side pagination.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendancePage {
    #[serde(default)]
    pub data: Vec<AttendanceRecord>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// `data.attendance` returned by check-in / check-out.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceReceipt {
    #[serde(default)]
    pub check_in: Option<DateTime<Utc>>,
    #[serde(default)]
    pub check_out: Option<DateTime<Utc>>,
    /// minutes, present after check-out
    #[serde(default)]
    pub duration: Option<i64>,
}

/// Filters shared by the attendance list and its CSV export.
#[derive(Debug, Clone, Default)]
pub struct AttendanceFilter {
    pub member_id: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl AttendanceFilter {
    /// Only the filters that are set, as query parameters.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut q = Vec::new();
        let pairs = [
            ("memberId", &self.member_id),
            ("status", &self.status),
            ("startDate", &self.start_date),
            ("endDate", &self.end_date),
        ];
        for (key, value) in pairs {
            if let Some(v) = value
                && !v.trim().is_empty()
            {
                q.push((key, v.trim().to_string()));
            }
        }
        q
    }
}
