use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub enrolled_courses: i32,
    pub courses: i32,
    pub students: i32,
    pub join_date: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Wire shape for user listings. The password digest never leaves the
/// database layer, and join date is reported date-only.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub enrolled_courses: i32,
    pub courses: i32,
    pub students: i32,
    pub join_date: String,
    pub status: String,
}

impl From<User> for UserSummary {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            phone: u.phone,
            gender: u.gender,
            age: u.age,
            enrolled_courses: u.enrolled_courses,
            courses: u.courses,
            students: u.students,
            join_date: u.join_date.date_naive().to_string(),
            status: u.status,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserListParams {
    pub role: Option<String>,
    pub search: Option<String>,
}

/// Totals block for the admin dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub total_students: i64,
    pub total_teachers: i64,
    pub active_courses: i64,
    /// Resource count. The frontend key predates the rename and stays for
    /// wire compatibility.
    #[serde(rename = "totalEnrollments")]
    pub total_resources: i64,
    pub total_placements: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_stats_keeps_the_legacy_enrollments_key() {
        let stats = PlatformStats {
            total_students: 3,
            total_teachers: 2,
            active_courses: 1,
            total_resources: 5,
            total_placements: 4,
        };
        let value = serde_json::to_value(&stats).expect("stats serialize");
        assert_eq!(value["totalEnrollments"], 5);
        assert!(value.get("totalResources").is_none());
    }
}
