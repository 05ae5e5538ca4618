use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display as FmtDisplay, Formatter, Result as FmtResult},
    str::FromStr,
};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::schedule::Schedule;

/// Identifier of a record. Backend rows use numbers, fixtures use strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// Compares against a JSON `id` field using the textual form of both sides
    pub fn matches(&self, value: &serde_json::Value) -> bool {
        match value {
            serde_json::Value::String(s) => *s == self.to_string(),
            serde_json::Value::Number(n) => n.to_string() == self.to_string(),
            _ => false,
        }
    }
}

impl FmtDisplay for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for RecordId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map(Self::Number)
            .unwrap_or_else(|_| Self::Text(s.to_string())))
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserRole {
    Admin,
    Teacher,
    Student,
}

impl UserRole {
    pub fn all() -> Vec<UserRole> {
        UserRole::iter().collect()
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ClassStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

/// Minimal `{id, name}` reference embedded in other records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedRef {
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub code: Option<String>,
    pub banner_url: Option<String>,
    pub banner_cld_pub_id: Option<String>,
    pub head_teacher_id: Option<String>,
    pub head_teacher: Option<Box<User>>,
    #[serde(default)]
    pub teachers: Vec<User>,
    /// Position in the grade-promotion ordering
    pub level: Option<u32>,
    pub parent_department_id: Option<RecordId>,
    pub parent_department: Option<Box<Department>>,
    #[serde(default)]
    pub sections: Vec<Department>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: RecordId,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: String,
    pub department_id: Option<RecordId>,
    pub department: Option<Box<Department>>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDetails {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ClassStatus,
    #[serde(default)]
    pub capacity: u32,
    pub course_code: Option<String>,
    pub course_name: Option<String>,
    pub banner_url: Option<String>,
    pub banner_cld_pub_id: Option<String>,
    pub subject: Option<NamedRef>,
    pub teacher: Option<NamedRef>,
    pub department: Option<NamedRef>,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
    pub invite_code: Option<String>,
    pub total_students: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub bio: Option<String>,
    pub phone_number: Option<String>,
    pub image: Option<String>,
    pub image_cld_pub_id: Option<String>,
    pub department: Option<String>,
    pub address: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub joining_date: Option<String>,
    #[serde(default)]
    pub classes: Vec<ClassDetails>,
    #[serde(default)]
    pub departments: Vec<Department>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: RecordId,
    pub name: String,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub fathers_name: Option<String>,
    pub mothers_name: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub department: Option<String>,
    pub roll_number: Option<String>,
    pub joining_date: Option<String>,
    pub banner_url: Option<String>,
    pub banner_cld_pub_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: RecordId,
    pub class_id: RecordId,
    pub student_id: RecordId,
    pub date: String,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
    pub class: Option<NamedRef>,
    pub student: Option<NamedRef>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A single student's mark inside a bulk attendance submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    pub class_id: RecordId,
    pub student_id: RecordId,
    pub date: String,
    pub status: AttendanceStatus,
}
