use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Role attached to every ledger entry and user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Teacher,
    Student,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Student => "student",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "teacher" => Some(Self::Teacher),
            "student" => Some(Self::Student),
            _ => None,
        }
    }
}

/// Closed set of tracked actions. Each variant belongs to either the student
/// or the teacher side of the platform; `category` returns the owning role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    VideoView,
    ResourceDownload,
    SyllabusAccess,
    PlacementRegistration,
    Login,
    VideoUpload,
    ResourceUpload,
    SyllabusCreate,
    SyllabusUpdate,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VideoView => "video_view",
            Self::ResourceDownload => "resource_download",
            Self::SyllabusAccess => "syllabus_access",
            Self::PlacementRegistration => "placement_registration",
            Self::Login => "login",
            Self::VideoUpload => "video_upload",
            Self::ResourceUpload => "resource_upload",
            Self::SyllabusCreate => "syllabus_create",
            Self::SyllabusUpdate => "syllabus_update",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "video_view" => Some(Self::VideoView),
            "resource_download" => Some(Self::ResourceDownload),
            "syllabus_access" => Some(Self::SyllabusAccess),
            "placement_registration" => Some(Self::PlacementRegistration),
            "login" => Some(Self::Login),
            "video_upload" => Some(Self::VideoUpload),
            "resource_upload" => Some(Self::ResourceUpload),
            "syllabus_create" => Some(Self::SyllabusCreate),
            "syllabus_update" => Some(Self::SyllabusUpdate),
            _ => None,
        }
    }

    /// The role a given action semantically belongs to.
    pub fn category(&self) -> UserRole {
        match self {
            Self::VideoView
            | Self::ResourceDownload
            | Self::SyllabusAccess
            | Self::PlacementRegistration
            | Self::Login => UserRole::Student,
            Self::VideoUpload
            | Self::ResourceUpload
            | Self::SyllabusCreate
            | Self::SyllabusUpdate => UserRole::Teacher,
        }
    }
}

/// Which collection a ledger entry points at. Stored as a text tag; lookups
/// go through an explicit per-kind query rather than dynamic dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Video,
    Resource,
    SyllabusItem,
    Placement,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "Video",
            Self::Resource => "Resource",
            Self::SyllabusItem => "SyllabusItem",
            Self::Placement => "Placement",
        }
    }
}

/// Typed reference to the record an activity touched.
#[derive(Debug, Clone, Copy)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub id: i32,
}

/// One ledger entry, ready for insertion. The timestamp is assigned by the
/// database, not the caller.
#[derive(Debug)]
pub struct NewActivity {
    pub user_id: i32,
    pub user_role: UserRole,
    pub activity_type: ActivityType,
    pub target: Option<ResourceRef>,
    pub resource_title: Option<String>,
    pub metadata: serde_json::Value,
}

impl NewActivity {
    pub fn new(user_id: i32, user_role: UserRole, activity_type: ActivityType) -> Self {
        Self {
            user_id,
            user_role,
            activity_type,
            target: None,
            resource_title: None,
            metadata: serde_json::Value::Object(serde_json::Map::new()),
        }
    }

    pub fn target(mut self, kind: ResourceKind, id: i32, title: impl Into<String>) -> Self {
        self.target = Some(ResourceRef { kind, id });
        self.resource_title = Some(title.into());
        self
    }

    pub fn metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// A stored ledger row, as read back for analytics.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: i64,
    pub user_id: i32,
    pub user_role: String,
    pub activity_type: String,
    pub resource_id: Option<i32>,
    pub resource_kind: Option<String>,
    pub resource_title: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_type_round_trips_through_strings() {
        let all = [
            ActivityType::VideoView,
            ActivityType::ResourceDownload,
            ActivityType::SyllabusAccess,
            ActivityType::PlacementRegistration,
            ActivityType::Login,
            ActivityType::VideoUpload,
            ActivityType::ResourceUpload,
            ActivityType::SyllabusCreate,
            ActivityType::SyllabusUpdate,
        ];
        for ty in all {
            assert_eq!(ActivityType::parse(ty.as_str()), Some(ty));
        }
        assert_eq!(ActivityType::parse("video_delete"), None);
    }

    #[test]
    fn student_and_teacher_actions_are_partitioned() {
        assert_eq!(ActivityType::VideoView.category(), UserRole::Student);
        assert_eq!(ActivityType::PlacementRegistration.category(), UserRole::Student);
        assert_eq!(ActivityType::Login.category(), UserRole::Student);
        assert_eq!(ActivityType::VideoUpload.category(), UserRole::Teacher);
        assert_eq!(ActivityType::SyllabusUpdate.category(), UserRole::Teacher);
    }

    #[test]
    fn user_role_parses_known_roles_only() {
        assert_eq!(UserRole::parse("student"), Some(UserRole::Student));
        assert_eq!(UserRole::parse("teacher"), Some(UserRole::Teacher));
        assert_eq!(UserRole::parse("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("Student"), None);
    }
}
