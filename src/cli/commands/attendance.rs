use crate::AppContext;
use crate::api::attendance::ATTENDANCE_PAGE_SIZE;
use crate::cli::parser::{AttendanceCommand, AttendanceFilterArgs};
use crate::core::pagination::server_page_summary;
use crate::errors::AppResult;
use crate::export::save_download;
use crate::models::attendance::AttendanceFilter;
use crate::ui::messages::{info, muted};
use crate::utils::colors::{colorize_optional, colorize_status};
use crate::utils::date::{format_timestamp, iso_day, parse_opt_date, today};
use crate::utils::format_attendance_duration;
use crate::utils::path::expand_tilde;
use crate::utils::table::Table;

pub async fn handle(cmd: &AttendanceCommand, ctx: &AppContext) -> AppResult<()> {
    match cmd {
        AttendanceCommand::List { filter, page } => list(ctx, filter, *page).await,
        AttendanceCommand::Export {
            filter,
            file,
            force,
        } => export(ctx, filter, file.as_deref(), *force).await,
    }
}

impl AttendanceFilterArgs {
    /// Dates are checked locally so a typo never reaches the server.
    pub fn to_filter(&self) -> AppResult<AttendanceFilter> {
        Ok(AttendanceFilter {
            member_id: self.member_id.clone(),
            status: self.status.clone(),
            start_date: parse_opt_date(&self.start)?.map(iso_day),
            end_date: parse_opt_date(&self.end)?.map(iso_day),
        })
    }
}

async fn list(ctx: &AppContext, args: &AttendanceFilterArgs, page: u32) -> AppResult<()> {
    let filter = args.to_filter()?;
    let (client, _) = ctx.authed()?;
    let page = page.max(1);
    let result = client.attendance_page(page, &filter).await?;

    if result.data.is_empty() {
        info("No attendance records found");
        return Ok(());
    }

    let mut table = Table::new(["Member", "Member ID", "Check In", "Check Out", "Duration", "Status"]);
    for r in &result.data {
        table.add_row(vec![
            r.member_name().to_string(),
            r.member_id.clone(),
            format_timestamp(&r.check_in),
            colorize_optional(&r.check_out.as_ref().map(format_timestamp).unwrap_or_else(|| "-".to_string())),
            format_attendance_duration(&r.check_in, r.check_out.as_ref()),
            colorize_status(&r.status),
        ]);
    }
    print!("{}", table.render());

    if let Some(p) = result.pagination {
        muted(server_page_summary(page, ATTENDANCE_PAGE_SIZE, p.total));
        if (page as u64) < p.total_pages {
            muted(format!("Next: --page {}", page + 1));
        }
    }
    Ok(())
}

async fn export(ctx: &AppContext, args: &AttendanceFilterArgs, file: Option<&str>, force: bool) -> AppResult<()> {
    let filter = args.to_filter()?;
    let (client, _) = ctx.authed()?;

    let path = match file {
        Some(f) => expand_tilde(f),
        None => ctx
            .cfg
            .output_path(&format!("attendance_report_{}.csv", iso_day(today()))),
    };

    let bytes = client.export_attendance_csv(&filter).await?;
    save_download("Attendance CSV", &bytes, &path, force)
}
