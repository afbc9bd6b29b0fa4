use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachment {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub url: Option<String>,
    pub size: Option<String>,
}

/// A placement drive. Date and time stay as display strings
/// ("2024-04-15", "10:00 AM") to match what the frontend renders.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub id: i32,
    pub company: String,
    pub role: String,
    pub package: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub status: String,
    pub description: String,
    pub procedure: Option<String>,
    pub eligibility: Option<String>,
    #[sqlx(json)]
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
}

/// Placement plus the set of registered student ids.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementWithRegistrations {
    #[serde(flatten)]
    pub placement: Placement,
    pub registered_students: Vec<i32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewPlacementRequest {
    pub company: Option<String>,
    pub role: Option<String>,
    pub package: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub procedure: Option<String>,
    pub eligibility: Option<String>,
    pub attachments: Option<Vec<Attachment>>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatePlacementRequest {
    pub company: Option<String>,
    pub role: Option<String>,
    pub package: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub procedure: Option<String>,
    pub eligibility: Option<String>,
    pub attachments: Option<Vec<Attachment>>,
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub user_id: Option<i32>,
}
