use crate::AppContext;
use crate::core::analytics::{Period, department_shares, latest_day_trend, peak_hour};
use crate::core::pagination::{ANALYTICS_PER_PAGE, Paginator};
use crate::errors::AppResult;
use crate::models::analytics::MemberActivity;
use crate::ui::messages::{field, header, muted};
use crate::utils::colors::{RESET, color_for_trend};
use crate::utils::date::today;
use crate::utils::formatting::{capitalize, format_avg_duration, format_days_ago, format_hour12, format_trend};
use crate::utils::table::Table;
use chrono::Utc;

pub async fn handle(period: Period, page: usize, ctx: &AppContext) -> AppResult<()> {
    let (client, _) = ctx.authed()?;
    let (start, end) = period.date_range(today());

    let (analytics, top_active, inactive) = tokio::try_join!(
        client.analytics(period, start, end),
        client.top_active_members(period),
        client.inactive_members(),
    )?;

    header(format!("Analytics ({}: {start} to {end})", capitalize(period.as_str())));

    let latest_total = analytics.daily_trends.last().map(|d| d.total).unwrap_or(0);
    let trend = latest_day_trend(&analytics.daily_trends);
    let active: u64 = analytics
        .department_distribution
        .iter()
        .map(|d| d.count)
        .sum();
    let peak = peak_hour(&analytics.peak_hours);

    field(
        "Total Check-ins",
        format!(
            "{latest_total} {}{} vs last {}{RESET}",
            color_for_trend(trend),
            format_trend(trend),
            period.as_str()
        ),
    );
    field("Active Members", active);
    field(
        "Peak Hour",
        match peak {
            Some(h) => format!("{} ({} check-ins)", format_hour12(Some(h.hour)), h.count),
            None => format!("{} (No data available)", format_hour12(None)),
        },
    );
    field(
        "Avg. Duration",
        format_avg_duration(analytics.average_duration.unwrap_or(0.0)),
    );

    header("Daily Check-ins");
    if analytics.daily_trends.is_empty() {
        muted("No check-ins in this period");
    } else {
        let mut table = Table::new(["Date", "Check-ins"]);
        for d in &analytics.daily_trends {
            table.add_row(vec![d.date.chars().take(10).collect(), d.total.to_string()]);
        }
        print!("{}", table.render());
    }

    header("Department Distribution");
    let shares = department_shares(&analytics.department_distribution);
    if shares.is_empty() {
        muted("No department data");
    } else {
        let mut table = Table::new(["Department", "Members", "Share"]);
        for s in shares {
            table.add_row(vec![s.label, s.count.to_string(), format!("{}%", s.percentage)]);
        }
        print!("{}", table.render());
    }

    let paginator = Paginator::new(ANALYTICS_PER_PAGE);

    header("Most Active Members");
    let top = paginator.page(&top_active, page);
    if top.items.is_empty() {
        muted("No active members in this period");
    } else {
        let mut table = Table::new(["Member", "Department", "Check-ins", "Last seen"]);
        for m in top.items {
            table.add_row(vec![
                m.full_name.clone(),
                m.department.clone(),
                m.check_in_count.unwrap_or(0).to_string(),
                last_seen(m),
            ]);
        }
        print!("{}", table.render());
        muted(top.summary());
    }

    header(format!("Inactive Members (no check-in for {}+ days)", crate::api::analytics::INACTIVE_AFTER_DAYS));
    let idle = paginator.page(&inactive, page);
    if idle.items.is_empty() {
        muted("Everyone checked in recently");
    } else {
        let mut table = Table::new(["Member", "Department", "Inactive for"]);
        for m in idle.items {
            table.add_row(vec![
                m.full_name.clone(),
                m.department.clone(),
                format!("{} days", m.inactive_days.unwrap_or(0)),
            ]);
        }
        print!("{}", table.render());
        muted(idle.summary());
    }

    if top.has_next() || idle.has_next() {
        muted(format!("Next: --page {}", top.number.max(idle.number) + 1));
    }
    Ok(())
}

fn last_seen(m: &MemberActivity) -> String {
    let days = m
        .last_check_in
        .map(|ts| (Utc::now() - ts).num_days());
    format_days_ago(days)
}
