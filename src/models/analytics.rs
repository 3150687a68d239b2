use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTrend {
    pub date: String,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub previous_total: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentCount {
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct HourCount {
    pub hour: u32,
    #[serde(default)]
    pub count: u64,
}

/// `data.analytics` of `GET /admin/reports/analytics`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    #[serde(default)]
    pub daily_trends: Vec<DailyTrend>,
    #[serde(default)]
    pub department_distribution: Vec<DepartmentCount>,
    #[serde(default)]
    pub peak_hours: Vec<HourCount>,
    /// minutes
    #[serde(default)]
    pub average_duration: Option<f64>,
}

/// Entry of the top-active and inactive member lists.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberActivity {
    #[serde(default)]
    pub member_id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub check_in_count: Option<u64>,
    #[serde(default)]
    pub last_check_in: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub inactive_days: Option<i64>,
}
