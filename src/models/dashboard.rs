use crate::models::analytics::HourCount;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct TypeCount {
    #[serde(rename = "type", alias = "_id", default)]
    pub kind: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub present: u64,
    #[serde(default)]
    pub membership_types: Vec<TypeCount>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    #[serde(default)]
    pub month: u64,
    #[serde(default)]
    pub avg_duration: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub members: MemberStats,
    #[serde(default)]
    pub attendance: AttendanceStats,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayStats {
    #[serde(default)]
    pub hourly_distribution: Vec<HourCount>,
    #[serde(default)]
    pub avg_duration: Option<f64>,
}

/// `data` of `GET /admin/dashboard` and `/admin/dashboard/today`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dashboard<S> {
    pub stats: S,
}
