use crate::AppContext;
use crate::cli::parser::Commands;
use crate::errors::{AppError, AppResult};
use crate::export::members::export_members;
use crate::export::{ReportKind, save_download};
use crate::ui::messages::info;
use crate::utils::date::{iso_day, parse_date, today};
use crate::utils::path::expand_tilde;

pub async fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    let Commands::Reports {
        kind,
        start,
        end,
        format,
        file,
        force,
    } = cmd
    else {
        return Ok(());
    };

    let (Some(kind), Some(start), Some(end)) = (kind, start, end) else {
        return Err(AppError::Validation(
            "Please select report type and date range".to_string(),
        ));
    };
    let (start, end) = (parse_date(start)?, parse_date(end)?);
    if start > end {
        return Err(AppError::Validation(format!(
            "start date {start} is after end date {end}"
        )));
    }
    let (start, end) = (iso_day(start), iso_day(end));

    let path = match file {
        Some(f) => expand_tilde(f),
        None => ctx.cfg.output_path(&format!(
            "{}_report_{start}_{end}.{}",
            kind.id(),
            format.as_str()
        )),
    };

    let (client, _) = ctx.authed()?;
    info(format!("Generating {} ({start} to {end})", kind.title()));

    match kind {
        ReportKind::Members => {
            let members = client.search_members("").await?;
            let subtitle = format!("Generated on {} - {} members", iso_day(today()), members.len());
            export_members(&members, *format, &path, &subtitle, *force)
        }
        ReportKind::Attendance | ReportKind::Duration => {
            let bytes = client.export_report(&start, &end, format.as_str()).await?;
            save_download(kind.title(), &bytes, &path, *force)
        }
    }
}
