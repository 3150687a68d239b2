use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MEMBERSHIP_TYPES: [&str; 5] = ["Student", "Staff", "Executive", "Guest", "Managing Lead"];
pub const DEPARTMENTS: [&str; 5] = [
    "ERA OPENLABS",
    "ERA Softwares",
    "ERA Manufacturing",
    "ERA Education",
    "None",
];
pub const GENDERS: [&str; 3] = ["male", "female", "other"];

/// A member as returned by the server. Only mirrored for display and
/// resubmitted as an edited copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub member_id: String,
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub membership_type: String,
    #[serde(default)]
    pub issued_card: bool,
}

impl Member {
    /// Date of birth as `YYYY-MM-DD`; the server may send a full timestamp.
    pub fn birth_day(&self) -> String {
        match self.date_of_birth.as_deref() {
            Some(s) if s.len() >= 10 => s[..10].to_string(),
            Some(s) => s.to_string(),
            None => "-".to_string(),
        }
    }

    /// Copy of the editable fields, used to build an update request.
    pub fn to_form(&self) -> MemberForm {
        MemberForm {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            gender: self.gender.clone(),
            date_of_birth: self.birth_day(),
            department: self.department.clone(),
            membership_type: self.membership_type.clone(),
        }
    }
}

/// Registration / update payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub gender: String,
    pub date_of_birth: String,
    pub department: String,
    pub membership_type: String,
}

/// Optional per-field changes applied on top of an existing member.
#[derive(Debug, Clone, Default)]
pub struct MemberPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub date_of_birth: Option<String>,
    pub department: Option<String>,
    pub membership_type: Option<String>,
}

impl MemberPatch {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.gender.is_none()
            && self.date_of_birth.is_none()
            && self.department.is_none()
            && self.membership_type.is_none()
    }

    pub fn apply(self, form: &mut MemberForm) {
        let MemberPatch {
            full_name,
            email,
            phone,
            gender,
            date_of_birth,
            department,
            membership_type,
        } = self;

        if let Some(v) = full_name {
            form.full_name = v;
        }
        if let Some(v) = email {
            form.email = v;
        }
        if let Some(v) = phone {
            form.phone = v;
        }
        if let Some(v) = gender {
            form.gender = v;
        }
        if let Some(v) = date_of_birth {
            form.date_of_birth = v;
        }
        if let Some(v) = department {
            form.department = v;
        }
        if let Some(v) = membership_type {
            form.membership_type = v;
        }
    }
}

impl MemberForm {
    /// Required-field checks done before anything is sent.
    pub fn validate(&self) -> AppResult<()> {
        let required = [
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("gender", &self.gender),
            ("dateOfBirth", &self.date_of_birth),
            ("department", &self.department),
            ("membershipType", &self.membership_type),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(k, _)| *k)
            .collect();
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }

        if !self.email.contains('@') {
            return Err(AppError::Validation(format!("invalid email: {}", self.email)));
        }

        NaiveDate::parse_from_str(self.date_of_birth.trim(), "%Y-%m-%d").map_err(|_| {
            AppError::Validation(format!(
                "dateOfBirth must be YYYY-MM-DD, got '{}'",
                self.date_of_birth
            ))
        })?;

        Ok(())
    }
}
