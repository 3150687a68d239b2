//! Members report, generated locally from the member list.

use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::export::model::{MemberExport, member_to_pdf_row, pdf_headers};
use crate::export::pdf::PdfManager;
use crate::export::{ReportFormat, notify_export_success};
use crate::models::Member;
use crate::ui::messages::info;
use std::fs;
use std::path::Path;

pub fn export_members(
    members: &[Member],
    format: ReportFormat,
    path: &Path,
    subtitle: &str,
    force: bool,
) -> AppResult<()> {
    ensure_writable(path, force)?;
    let rows: Vec<MemberExport> = members.iter().map(MemberExport::from).collect();

    match format {
        ReportFormat::Csv => {
            info(format!("Exporting to CSV: {}", path.display()));
            fs::write(path, members_csv(&rows)?)?;
            notify_export_success("CSV", path);
        }
        ReportFormat::Pdf => {
            info(format!("Exporting to PDF: {}", path.display()));
            fs::write(path, members_pdf(&rows, subtitle))?;
            notify_export_success("PDF", path);
        }
    }
    Ok(())
}

/// CSV with a header row taken from the serde field names.
pub fn members_csv(rows: &[MemberExport]) -> AppResult<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    if rows.is_empty() {
        wtr.write_record([
            "member_id",
            "full_name",
            "email",
            "phone",
            "gender",
            "date_of_birth",
            "department",
            "membership_type",
            "card_issued",
        ])
        .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }
    for row in rows {
        wtr.serialize(row)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }
    wtr.into_inner()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))
}

pub fn members_pdf(rows: &[MemberExport], subtitle: &str) -> Vec<u8> {
    let table: Vec<Vec<String>> = rows.iter().map(member_to_pdf_row).collect();
    let mut pdf = PdfManager::new();
    pdf.write_table("Members Report", subtitle, &pdf_headers(), &table);
    pdf.finish()
}
