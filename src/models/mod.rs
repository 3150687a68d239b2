pub mod admin;
pub mod analytics;
pub mod attendance;
pub mod dashboard;
pub mod member;

pub use admin::Admin;
pub use attendance::{AttendanceReceipt, AttendanceRecord};
pub use member::{Member, MemberForm};
