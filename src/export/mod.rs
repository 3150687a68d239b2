// src/export/mod.rs

pub mod download;
mod fs_utils;
pub mod members;
mod model;
pub mod pdf;

pub use download::save_download;
pub use fs_utils::{ensure_writable, write_output};
pub use model::MemberExport;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Common completion message for every export.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Csv,
    Pdf,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Pdf => "pdf",
        }
    }
}

/// Reports offered on the reports screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportKind {
    /// Daily check-in/out records with duration
    Attendance,
    /// Complete member list with details
    Members,
    /// Average stay duration by member
    Duration,
}

impl ReportKind {
    pub fn id(&self) -> &'static str {
        match self {
            ReportKind::Attendance => "attendance",
            ReportKind::Members => "members",
            ReportKind::Duration => "duration",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Attendance => "Attendance Report",
            ReportKind::Members => "Members Report",
            ReportKind::Duration => "Duration Analysis",
        }
    }
}
