//! The student dashboard endpoint: one aggregated snapshot per request,
//! assembled from the catalog tables plus the student's ledger slice.

use axum::Json;
use axum::extract::Query;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::dashboard;
use crate::database::{activity, placements, resources, syllabus, users, videos};
use crate::error::ApiError;
use crate::model::activity::{ActivityType, UserRole};
use crate::model::resource::ResourceSummary;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OverviewParams {
    pub student_id: Option<i32>,
}

pub async fn overview(
    Query(params): Query<OverviewParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let now = Utc::now();

    // The pipeline consumes full snapshots; only the cold-start suggestions
    // narrow to published videos.
    let all_videos = videos::list_all().await?;
    let catalog = resources::list(None).await?;
    let drives = placements::list().await?;
    let syllabus_items = syllabus::list().await?;

    let resource_summaries: Vec<ResourceSummary> =
        catalog.iter().map(ResourceSummary::from).collect();
    let deadlines = dashboard::upcoming_deadlines(&syllabus_items, now);
    let syllabus_cards = dashboard::syllabus_overview(&syllabus_items);

    // Anonymous visitors get the catalog snapshot with zeroed stats and the
    // cold-start suggestions.
    let Some(student_id) = params.student_id else {
        return Ok(Json(json!({
            "stats": {
                "enrolledCourses": 0,
                "videosWatched": 0,
                "completedLessons": 0,
                "studyHours": 0.0,
            },
            "continueLearning": dashboard::cold_start_suggestions(&all_videos),
            "upcomingDeadlines": deadlines,
            "syllabusOverview": syllabus_cards,
            "recentActivity": [],
            "videos": all_videos,
            "resources": resource_summaries,
            "placements": drives,
        })));
    };

    let student = users::find(student_id)
        .await?
        .ok_or(ApiError::NotFound("Student not found"))?;

    let watched_ids =
        activity::distinct_resource_ids(student_id, UserRole::Student, ActivityType::VideoView)
            .await?;
    let downloaded_ids = activity::distinct_resource_ids(
        student_id,
        UserRole::Student,
        ActivityType::ResourceDownload,
    )
    .await?;

    let watched_videos = videos::find_by_ids(&watched_ids).await?;
    let total_minutes: f64 = watched_videos
        .iter()
        .map(|v| dashboard::parse_duration_minutes(&v.duration))
        .sum();

    let recent_views = activity::recent_of_type(
        student_id,
        UserRole::Student,
        ActivityType::VideoView,
        10,
    )
    .await?;
    let mut continue_learning = dashboard::continue_learning(&recent_views, &all_videos, now);
    if continue_learning.is_empty() {
        continue_learning = dashboard::cold_start_suggestions(&all_videos);
    }

    let recent = activity::recent_for_user(student_id, UserRole::Student, 10).await?;
    let feed = dashboard::activity_feed(&recent, now);

    Ok(Json(json!({
        "stats": {
            "enrolledCourses": student.enrolled_courses,
            "videosWatched": watched_ids.len(),
            "completedLessons": downloaded_ids.len(),
            "studyHours": dashboard::study_hours(total_minutes),
        },
        "continueLearning": continue_learning,
        "upcomingDeadlines": deadlines,
        "syllabusOverview": syllabus_cards,
        "recentActivity": feed,
        "videos": all_videos,
        "resources": resource_summaries,
        "placements": drives,
    })))
}
