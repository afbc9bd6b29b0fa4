use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: i32,
    pub title: String,
    pub description: String,
    /// Clock-style string, "H:MM:SS" or "MM:SS".
    pub duration: String,
    pub course: String,
    pub views: i64,
    pub upload_date: DateTime<Utc>,
    pub url: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Listing shape for the student video library.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub course: String,
    pub views: i64,
    pub upload_date: String,
    pub url: String,
}

impl From<&Video> for VideoSummary {
    fn from(v: &Video) -> Self {
        Self {
            id: v.id,
            title: v.title.clone(),
            description: v.description.clone(),
            duration: v.duration.clone(),
            course: v.course.clone(),
            views: v.views,
            upload_date: v.upload_date.date_naive().to_string(),
            url: v.url.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewVideoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub course: Option<String>,
    pub url: Option<String>,
    pub status: Option<String>,
    pub teacher_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateVideoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub course: Option<String>,
    pub url: Option<String>,
    pub status: Option<String>,
}
