//! REST endpoints of the check-in backend, relative to the base URL.

// Auth
pub const LOGIN: &str = "/auth/login";
pub const REGISTER: &str = "/auth/register";
pub const ADMINS: &str = "/auth/admins";
pub const UPDATE_ME: &str = "/auth/update-me";
pub const CHANGE_PASSWORD: &str = "/auth/change-password";

// Members
pub const MEMBERS: &str = "/members";
pub const REGISTER_MEMBER: &str = "/members/register";
pub const SEARCH_MEMBERS: &str = "/admin/search/members";
pub const MEMBERS_WITHOUT_CARDS: &str = "/members/without-cards";
pub const ISSUE_CARD: &str = "/members/card/issue";

// Check-in / check-out
pub const CHECK_IN: &str = "/members/check-in";
pub const CHECK_OUT: &str = "/members/check-out";

// Attendance
pub const ATTENDANCE: &str = "/attendance";
pub const ATTENDANCE_EXPORT: &str = "/attendance/export";

// Dashboard + analytics
pub const DASHBOARD: &str = "/admin/dashboard";
pub const DASHBOARD_TODAY: &str = "/admin/dashboard/today";
pub const ANALYTICS: &str = "/admin/reports/analytics";
pub const TOP_ACTIVE_MEMBERS: &str = "/admin/reports/analytics/top-active";
pub const INACTIVE_MEMBERS: &str = "/admin/reports/analytics/inactive";

pub fn member_by_id(id: &str) -> String {
    format!("{MEMBERS}/{id}")
}

pub fn admin_by_id(id: &str) -> String {
    format!("{ADMINS}/{id}")
}
