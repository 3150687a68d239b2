use crate::api::{ApiClient, endpoints};
use crate::core::analytics::Period;
use crate::errors::AppResult;
use crate::models::analytics::{Analytics, MemberActivity};
use crate::models::dashboard::{Dashboard, DashboardStats, TodayStats};
use crate::utils::date::iso_day;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// Days without a check-in before a member counts as inactive.
pub const INACTIVE_AFTER_DAYS: u32 = 21;
/// Length of the top-active list.
pub const TOP_ACTIVE_LIMIT: u32 = 10;

#[derive(Deserialize)]
struct AnalyticsData {
    #[serde(default)]
    analytics: Analytics,
}

#[derive(Deserialize)]
struct ActivityList {
    #[serde(default)]
    members: Vec<MemberActivity>,
}

impl ApiClient {
    /// Dashboard totals, optionally as of a past instant.
    pub async fn dashboard(&self, as_of: Option<DateTime<Utc>>) -> AppResult<DashboardStats> {
        let query: Vec<(&'static str, String)> = as_of
            .map(|d| vec![("date", d.to_rfc3339())])
            .unwrap_or_default();
        let data: Dashboard<DashboardStats> = self.get_data(endpoints::DASHBOARD, &query).await?;
        Ok(data.stats)
    }

    pub async fn dashboard_today(&self) -> AppResult<TodayStats> {
        let data: Dashboard<TodayStats> = self.get_data(endpoints::DASHBOARD_TODAY, &[]).await?;
        Ok(data.stats)
    }

    pub async fn analytics(&self, period: Period, start: NaiveDate, end: NaiveDate) -> AppResult<Analytics> {
        let query = [
            ("period", period.as_str().to_string()),
            ("startDate", iso_day(start)),
            ("endDate", iso_day(end)),
        ];
        let data: AnalyticsData = self.get_data(endpoints::ANALYTICS, &query).await?;
        Ok(data.analytics)
    }

    pub async fn top_active_members(&self, period: Period) -> AppResult<Vec<MemberActivity>> {
        let query = [
            ("period", period.as_str().to_string()),
            ("limit", TOP_ACTIVE_LIMIT.to_string()),
        ];
        let list: ActivityList = self
            .get_data(endpoints::TOP_ACTIVE_MEMBERS, &query)
            .await?;
        Ok(list.members)
    }

    pub async fn inactive_members(&self) -> AppResult<Vec<MemberActivity>> {
        let query = [("days", INACTIVE_AFTER_DAYS.to_string())];
        let list: ActivityList = self
            .get_data(endpoints::INACTIVE_MEMBERS, &query)
            .await?;
        Ok(list.members)
    }
}
