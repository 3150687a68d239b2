use crate::core::analytics::Period;
use crate::core::scanner::ScanMode;
use crate::export::{ReportFormat, ReportKind};
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};

/// Command-line interface definition for checkdesk
/// Admin console for the membership check-in service
#[derive(Parser)]
#[command(
    name = "checkdesk",
    version = env!("CARGO_PKG_VERSION"),
    about = "Admin console for a membership check-in service: members, attendance, analytics, QR scanning and cards",
    long_about = None
)]
pub struct Cli {
    /// Override the API base URL (takes precedence over env and config)
    #[arg(global = true, long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration directory and a default config file
    Init {
        #[arg(long, help = "Overwrite an existing configuration file")]
        force: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Sign in and store the session token
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, help = "Password (prompted for when omitted)")]
        password: Option<String>,
    },

    /// Create an admin account and sign in with it
    Register {
        #[arg(long = "name")]
        full_name: String,

        #[arg(long)]
        email: String,

        #[arg(long, help = "Password (prompted for when omitted)")]
        password: Option<String>,
    },

    /// Drop the stored session
    Logout,

    /// Show the signed-in admin
    Whoami,

    /// Browse and manage members
    Members {
        #[command(subcommand)]
        action: MemberCommand,
    },

    /// Browse and export attendance records
    Attendance {
        #[command(subcommand)]
        action: AttendanceCommand,
    },

    /// Dashboard totals, weekly trends and today's hourly distribution
    Overview,

    /// Attendance analytics for a period
    Analytics {
        #[arg(long, short, value_enum, default_value = "week")]
        period: Period,

        #[arg(long, default_value_t = 1, help = "Page of the top-active list")]
        page: usize,
    },

    /// Generate an attendance, members or duration report
    Reports {
        #[arg(long = "type", value_enum)]
        kind: Option<ReportKind>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        start: Option<String>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        end: Option<String>,

        #[arg(long, value_enum, default_value = "csv")]
        format: ReportFormat,

        #[arg(long, value_name = "FILE", help = "Output file (default: <type>_report_<start>_<end>.<ext>)")]
        file: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Check members in or out by scanning their QR codes
    Scan {
        #[arg(long, value_enum, default_value = "check-in")]
        mode: ScanMode,
    },

    /// Profile, password and admin accounts
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },
}

/// Member fields accepted by `add` and `update`.
#[derive(Args, Debug, Clone, Default)]
pub struct MemberFields {
    #[arg(long = "name")]
    pub full_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long, help = "male, female or other")]
    pub gender: Option<String>,

    #[arg(long = "dob", value_name = "YYYY-MM-DD")]
    pub date_of_birth: Option<String>,

    #[arg(long, help = "ERA OPENLABS, ERA Softwares, ERA Manufacturing, ERA Education or None")]
    pub department: Option<String>,

    #[arg(long = "type", help = "Student, Staff, Executive, Guest or Managing Lead")]
    pub membership_type: Option<String>,
}

#[derive(Subcommand)]
pub enum MemberCommand {
    /// List members, 10 per page
    List {
        #[arg(long, short, default_value = "", help = "Search by name, email or member id")]
        search: String,

        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Register a new member
    Add {
        #[command(flatten)]
        fields: MemberFields,
    },

    /// Change fields of an existing member
    Update {
        member_id: String,

        #[command(flatten)]
        fields: MemberFields,
    },

    /// Delete a member
    Delete {
        member_id: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Generate membership cards
    #[command(group(ArgGroup::new("target").required(true).args(["member", "all_new"])))]
    Cards {
        #[arg(long, value_name = "ID", help = "Single card for this member")]
        member: Option<String>,

        #[arg(long = "all-new", help = "Zip of cards for every member without one")]
        all_new: bool,

        #[arg(long, value_name = "PATH", help = "Output file (default: in output_dir)")]
        out: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

/// Filters shared by `attendance list` and `attendance export`.
#[derive(Args, Debug, Clone, Default)]
pub struct AttendanceFilterArgs {
    #[arg(long = "member")]
    pub member_id: Option<String>,

    #[arg(long, help = "checked-in or checked-out")]
    pub status: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD")]
    pub start: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD")]
    pub end: Option<String>,
}

#[derive(Subcommand)]
pub enum AttendanceCommand {
    /// List attendance records, 10 per page
    List {
        #[command(flatten)]
        filter: AttendanceFilterArgs,

        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Save the filtered records as CSV
    Export {
        #[command(flatten)]
        filter: AttendanceFilterArgs,

        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AdminRole {
    #[default]
    Admin,
    Superadmin,
}

impl AdminRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Admin => "admin",
            AdminRole::Superadmin => "superadmin",
        }
    }
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Update your name and email
    Profile {
        #[arg(long = "name")]
        full_name: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },

    /// Change your password; you are signed out afterwards
    Password {
        #[arg(long)]
        current: Option<String>,

        #[arg(long = "new")]
        new_password: Option<String>,

        #[arg(long)]
        confirm: Option<String>,
    },

    /// List admin accounts (superadmin only)
    Admins,

    /// Create an admin account (superadmin only)
    AdminAdd {
        #[arg(long = "name")]
        full_name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        password: Option<String>,

        #[arg(long, value_enum, default_value = "admin")]
        role: AdminRole,
    },

    /// Change an admin account (superadmin only)
    AdminUpdate {
        id: String,

        #[arg(long = "name")]
        full_name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long, value_enum)]
        role: Option<AdminRole>,
    },

    /// Delete an admin account (superadmin only)
    AdminDelete {
        id: String,

        #[arg(long, short = 'y')]
        yes: bool,
    },
}
