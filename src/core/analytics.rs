//! Derived figures for the overview and analytics screens. The server does
//! the aggregation; these helpers only reshape what it returns.

use crate::models::analytics::{DailyTrend, DepartmentCount, HourCount};
use crate::models::dashboard::TypeCount;
use chrono::{Days, Months, NaiveDate};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Period {
    #[default]
    Week,
    Month,
    Year,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
        }
    }

    /// `(start, end)` of the period ending on `today`.
    pub fn date_range(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        let start = match self {
            Period::Week => today.checked_sub_days(Days::new(7)),
            Period::Month => today.checked_sub_months(Months::new(1)),
            Period::Year => today.checked_sub_months(Months::new(12)),
        };
        (start.unwrap_or(today), today)
    }
}

/// Relative change in percent; 0 when there is nothing to compare with.
pub fn percent_change(current: f64, previous: Option<f64>) -> f64 {
    match previous {
        Some(prev) if prev != 0.0 => (current - prev) / prev * 100.0,
        _ => 0.0,
    }
}

/// One slice of a distribution, with its share formatted to one decimal.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub label: String,
    pub count: u64,
    pub percentage: String,
}

fn shares(entries: impl Iterator<Item = (String, u64)>) -> Vec<Share> {
    let entries: Vec<(String, u64)> = entries.collect();
    let total: u64 = entries.iter().map(|(_, c)| c).sum();

    entries
        .into_iter()
        .map(|(label, count)| {
            let pct = if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            };
            Share {
                label,
                count,
                percentage: format!("{pct:.1}"),
            }
        })
        .collect()
}

/// Department split, largest first. Ties keep the server's order.
pub fn department_shares(dist: &[DepartmentCount]) -> Vec<Share> {
    let mut out = shares(dist.iter().map(|d| {
        let label = if d.department.trim().is_empty() {
            "None".to_string()
        } else {
            d.department.clone()
        };
        (label, d.count)
    }));
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

/// Membership type split, in the server's order.
pub fn membership_shares(types: &[TypeCount]) -> Vec<Share> {
    shares(types.iter().map(|t| (t.kind.clone(), t.count)))
}

/// Busiest hour; the earliest one wins a tie. `None` without data.
pub fn peak_hour(hours: &[HourCount]) -> Option<HourCount> {
    hours
        .iter()
        .copied()
        .filter(|h| h.count > 0)
        .fold(None, |best: Option<HourCount>, cur| match best {
            Some(b) if b.count >= cur.count => Some(b),
            _ => Some(cur),
        })
}

/// Change between the last two days of the daily trend.
pub fn latest_day_trend(trends: &[DailyTrend]) -> f64 {
    let n = trends.len();
    let current = n.checked_sub(1).map(|i| trends[i].total).unwrap_or(0);
    let previous = n.checked_sub(2).map(|i| trends[i].total).unwrap_or(0);
    percent_change(current as f64, Some(previous as f64))
}
