use crate::AppContext;
use crate::core::analytics::{membership_shares, percent_change};
use crate::errors::AppResult;
use crate::ui::messages::{field, header, muted};
use crate::utils::colors::{RESET, color_for_trend};
use crate::utils::formatting::{format_trend, hour_bucket_label};
use crate::utils::table::Table;
use chrono::{Duration, Utc};

fn trend_cell(pct: f64) -> String {
    format!("{}{} vs last week{}", color_for_trend(pct), format_trend(pct), RESET)
}

/// Dashboard overview: totals now against the same figures a week ago,
/// membership split and today's check-ins per hour.
pub async fn handle(ctx: &AppContext) -> AppResult<()> {
    let (client, _) = ctx.authed()?;
    let week_ago = Utc::now() - Duration::days(7);

    let (now, last_week, today) = tokio::try_join!(
        client.dashboard(None),
        client.dashboard(Some(week_ago)),
        client.dashboard_today(),
    )?;

    header("Dashboard Overview");

    let members_trend = percent_change(
        now.members.total as f64,
        Some(last_week.members.total as f64),
    );
    let present_trend = percent_change(
        now.members.present as f64,
        Some(last_week.members.present as f64),
    );
    let today_avg = today.avg_duration.unwrap_or(0.0);
    let duration_trend = percent_change(today_avg, last_week.attendance.avg_duration);
    let month_trend = percent_change(
        now.attendance.month as f64,
        Some(last_week.attendance.month as f64),
    );

    field(
        "Total Members",
        format!("{:<8} {}", now.members.total, trend_cell(members_trend)),
    );
    field(
        "Present Today",
        format!("{:<8} {}", now.members.present, trend_cell(present_trend)),
    );
    field(
        "Avg. Duration",
        format!(
            "{:<8} {}",
            format!("{}h", (today_avg / 60.0).round() as i64),
            trend_cell(duration_trend)
        ),
    );
    field(
        "Monthly Check-ins",
        format!("{:<8} {}", now.attendance.month, trend_cell(month_trend)),
    );

    header("Membership Types");
    let shares = membership_shares(&now.members.membership_types);
    if shares.is_empty() {
        muted("No members yet");
    } else {
        let mut table = Table::new(["Type", "Members", "Share"]);
        for s in shares {
            table.add_row(vec![s.label, s.count.to_string(), format!("{}%", s.percentage)]);
        }
        print!("{}", table.render());
    }

    header("Today's Check-ins by Hour");
    let busy: Vec<_> = today
        .hourly_distribution
        .iter()
        .filter(|h| h.count > 0)
        .collect();
    if busy.is_empty() {
        muted("No check-ins today");
    } else {
        let mut table = Table::new(["Hour", "Check-ins"]);
        for h in busy {
            table.add_row(vec![hour_bucket_label(h.hour), h.count.to_string()]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
