use crate::api::{ApiClient, endpoints};
use crate::core::scanner::CheckinBackend;
use crate::errors::AppResult;
use crate::models::AttendanceReceipt;
use crate::models::attendance::{AttendanceFilter, AttendancePage};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Server-side page size of the attendance list.
pub const ATTENDANCE_PAGE_SIZE: u32 = 10;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanBody<'a> {
    member_id: &'a str,
}

#[derive(Deserialize)]
struct ReceiptData {
    #[serde(default)]
    attendance: AttendanceReceipt,
}

impl ApiClient {
    pub async fn attendance_page(&self, page: u32, filter: &AttendanceFilter) -> AppResult<AttendancePage> {
        let mut query = vec![
            ("page", page.max(1).to_string()),
            ("limit", ATTENDANCE_PAGE_SIZE.to_string()),
        ];
        query.extend(filter.to_query());
        self.get_raw(endpoints::ATTENDANCE, &query).await
    }

    /// CSV export of the filtered records, as produced by the server.
    pub async fn export_attendance_csv(&self, filter: &AttendanceFilter) -> AppResult<Vec<u8>> {
        let mut query = vec![("format", "csv".to_string())];
        query.extend(filter.to_query());
        self.download(endpoints::ATTENDANCE_EXPORT, &query).await
    }

    /// Server-rendered report for a date range in `format` (`csv`/`pdf`).
    pub async fn export_report(&self, start: &str, end: &str, format: &str) -> AppResult<Vec<u8>> {
        let query = [
            ("startDate", start.to_string()),
            ("endDate", end.to_string()),
            ("format", format.to_string()),
        ];
        self.download(endpoints::ATTENDANCE_EXPORT, &query).await
    }
}

#[async_trait]
impl CheckinBackend for ApiClient {
    async fn check_in(&self, member_id: &str) -> AppResult<AttendanceReceipt> {
        let data: ReceiptData = self
            .post_data(endpoints::CHECK_IN, &ScanBody { member_id })
            .await?;
        Ok(data.attendance)
    }

    async fn check_out(&self, member_id: &str) -> AppResult<AttendanceReceipt> {
        let data: ReceiptData = self
            .post_data(endpoints::CHECK_OUT, &ScanBody { member_id })
            .await?;
        Ok(data.attendance)
    }
}
