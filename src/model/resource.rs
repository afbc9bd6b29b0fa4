use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// A question rendered into the report's marks buckets. Only 2, 4, and 8
/// mark questions are recognised; anything else is dropped at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub marks: i32,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: i32,
    pub title: String,
    pub subject: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub size: Option<String>,
    pub author: Option<String>,
    pub notes: Option<String>,
    pub upload_date: DateTime<Utc>,
    pub url: String,
    pub download_count: i64,
    pub topic: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub explanation: Option<String>,
    pub examples: Vec<String>,
    pub bullet_points: Vec<String>,
    #[sqlx(json)]
    pub questions: Vec<Question>,
}

/// Compact shape used by the student dashboard snapshot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSummary {
    pub id: i32,
    pub title: String,
    pub subject: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub size: Option<String>,
    pub author: Option<String>,
    pub notes: Option<String>,
    pub upload_date: String,
    pub url: String,
    pub download_count: i64,
}

impl From<&Resource> for ResourceSummary {
    fn from(r: &Resource) -> Self {
        Self {
            id: r.id,
            title: r.title.clone(),
            subject: r.subject.clone(),
            kind: r.kind.clone(),
            size: r.size.clone(),
            author: r.author.clone(),
            notes: r.notes.clone(),
            upload_date: r.upload_date.date_naive().to_string(),
            url: r.url.clone(),
            download_count: r.download_count,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewResourceRequest {
    pub title: Option<String>,
    pub subject: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub size: Option<String>,
    pub author: Option<String>,
    pub notes: Option<String>,
    pub url: Option<String>,
    pub topic: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub explanation: Option<String>,
    pub examples: Option<Vec<String>>,
    pub bullet_points: Option<Vec<String>>,
    pub questions: Option<Vec<Question>>,
    pub teacher_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateResourceRequest {
    pub title: Option<String>,
    pub subject: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub size: Option<String>,
    pub author: Option<String>,
    pub notes: Option<String>,
    pub url: Option<String>,
    pub topic: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub explanation: Option<String>,
    pub examples: Option<Vec<String>>,
    pub bullet_points: Option<Vec<String>>,
    pub questions: Option<Vec<Question>>,
}
