use axum::Json;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::json;

use crate::database::{activity, videos};
use crate::error::ApiError;
use crate::model::activity::{ActivityType, NewActivity, ResourceKind, UserRole};
use crate::model::video::{NewVideoRequest, UpdateVideoRequest, Video, VideoSummary};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub search: Option<String>,
}

/// Published videos for the student library.
pub async fn list(Query(params): Query<SearchParams>) -> Result<Json<Vec<VideoSummary>>, ApiError> {
    let videos = videos::list_published(params.search.as_deref()).await?;
    Ok(Json(videos.iter().map(VideoSummary::from).collect()))
}

/// Every video regardless of status, for the teacher console.
pub async fn list_all() -> Result<Json<Vec<Video>>, ApiError> {
    Ok(Json(videos::list_all().await?))
}

pub async fn get(Path(id): Path<i32>) -> Result<Json<Video>, ApiError> {
    let video = videos::find(id).await?.ok_or(ApiError::NotFound("Video not found"))?;
    Ok(Json(video))
}

pub async fn create(
    Json(req): Json<NewVideoRequest>,
) -> Result<(StatusCode, Json<Video>), ApiError> {
    let (Some(title), Some(description), Some(duration), Some(course), Some(url)) = (
        req.title.as_deref(),
        req.description.as_deref(),
        req.duration.as_deref(),
        req.course.as_deref(),
        req.url.as_deref(),
    ) else {
        return Err(ApiError::Validation(
            "title, description, duration, course and url are required".to_string(),
        ));
    };

    let status = req.status.as_deref().unwrap_or("Draft");
    let video = videos::create(title, description, duration, course, url, status).await?;

    if let Some(teacher_id) = req.teacher_id {
        activity::log(
            NewActivity::new(teacher_id, UserRole::Teacher, ActivityType::VideoUpload)
                .target(ResourceKind::Video, video.id, &video.title),
        )
        .await;
    }

    Ok((StatusCode::CREATED, Json(video)))
}

pub async fn update(
    Path(id): Path<i32>,
    Json(req): Json<UpdateVideoRequest>,
) -> Result<Json<Video>, ApiError> {
    let video = videos::update(id, &req)
        .await?
        .ok_or(ApiError::NotFound("Video not found"))?;
    Ok(Json(video))
}

pub async fn remove(Path(id): Path<i32>) -> Result<Json<serde_json::Value>, ApiError> {
    if !videos::delete(id).await? {
        return Err(ApiError::NotFound("Video not found"));
    }
    Ok(Json(json!({ "message": "Video deleted" })))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewRequest {
    pub student_id: Option<i32>,
}

/// Counts one view. The counter bump is atomic in the database, so
/// concurrent viewers never lose an increment.
pub async fn add_view(
    Path(id): Path<i32>,
    Json(req): Json<ViewRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let video = videos::increment_views(id)
        .await?
        .ok_or(ApiError::NotFound("Video not found"))?;

    if let Some(student_id) = req.student_id {
        activity::log(
            NewActivity::new(student_id, UserRole::Student, ActivityType::VideoView)
                .target(ResourceKind::Video, video.id, &video.title),
        )
        .await;
    }

    Ok(Json(json!({ "views": video.views })))
}
