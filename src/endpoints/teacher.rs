//! The teacher dashboard endpoint: catalog counts plus a feed merged from
//! the latest syllabus, video, and resource records.

use axum::Json;
use chrono::{DateTime, Utc};
use serde_json::json;

use crate::dashboard::format_relative_time;
use crate::database::{resources, syllabus, users, videos};
use crate::error::ApiError;
use crate::model::syllabus::SyllabusItem;

fn syllabus_message(item: &SyllabusItem) -> String {
    match item.topic.as_deref() {
        Some(topic) => format!("Updated syllabus for \"{}\" - {topic}", item.course_name),
        None => format!("Updated syllabus for \"{}\"", item.course_name),
    }
}

pub async fn overview() -> Result<Json<serde_json::Value>, ApiError> {
    let now = Utc::now();

    let total_courses = syllabus::count().await?;
    let total_students = users::count_by_role("student").await?;
    let total_videos = videos::count().await?;
    let total_resources = resources::count().await?;

    let mut feed: Vec<(DateTime<Utc>, serde_json::Value)> = Vec::new();

    for item in syllabus::latest(3).await? {
        feed.push((
            item.created_at,
            json!({
                "id": format!("syllabus-{}", item.id),
                "type": "course",
                "message": syllabus_message(&item),
                "time": format_relative_time(item.created_at, now),
            }),
        ));
    }
    for video in videos::latest(3).await? {
        feed.push((
            video.created_at,
            json!({
                "id": format!("video-{}", video.id),
                "type": "video",
                "message": format!("Uploaded new video: \"{}\"", video.title),
                "time": format_relative_time(video.created_at, now),
            }),
        ));
    }
    for resource in resources::latest(3).await? {
        feed.push((
            resource.upload_date,
            json!({
                "id": format!("resource-{}", resource.id),
                "type": "content",
                "message": format!("Added study material: \"{}\"", resource.title),
                "time": format_relative_time(resource.upload_date, now),
            }),
        ));
    }

    feed.sort_by(|a, b| b.0.cmp(&a.0));
    feed.truncate(10);
    let recent_activity: Vec<serde_json::Value> = feed.into_iter().map(|(_, v)| v).collect();

    Ok(Json(json!({
        "stats": {
            "totalCourses": total_courses,
            "totalStudents": total_students,
            "totalVideos": total_videos,
            "totalResources": total_resources,
        },
        "recentActivity": recent_activity,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(topic: Option<&str>) -> SyllabusItem {
        SyllabusItem {
            id: 1,
            course_id: "CS301".to_string(),
            course_name: "Compilers".to_string(),
            semester: 6,
            academic_year: "2024-25".to_string(),
            topic: topic.map(str::to_string),
            date: None,
            ia_syllabus: Vec::new(),
            semester_syllabus: Vec::new(),
            materials: Vec::new(),
            created_by: None,
            status: "Draft".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn syllabus_feed_message_appends_the_topic_when_present() {
        assert_eq!(
            syllabus_message(&item(Some("Parsing"))),
            "Updated syllabus for \"Compilers\" - Parsing"
        );
        assert_eq!(
            syllabus_message(&item(None)),
            "Updated syllabus for \"Compilers\""
        );
    }
}
