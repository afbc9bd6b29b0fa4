use axum::Json;
use axum::extract::{Multipart, Path, Query};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::database::{activity, resources};
use crate::endpoints::videos::SearchParams;
use crate::error::ApiError;
use crate::model::activity::{ActivityType, NewActivity, ResourceKind, UserRole};
use crate::model::resource::{NewResourceRequest, Resource, UpdateResourceRequest};
use crate::report;

const UPLOAD_DIR: &str = "uploads/resources";
const MAX_PDF_BYTES: usize = 10 * 1024 * 1024;

pub async fn list(Query(params): Query<SearchParams>) -> Result<Json<Vec<Resource>>, ApiError> {
    Ok(Json(resources::list(params.search.as_deref()).await?))
}

pub async fn get(Path(id): Path<i32>) -> Result<Json<Resource>, ApiError> {
    let resource = resources::find(id)
        .await?
        .ok_or(ApiError::NotFound("Resource not found"))?;
    Ok(Json(resource))
}

pub async fn create(
    Json(req): Json<NewResourceRequest>,
) -> Result<(StatusCode, Json<Resource>), ApiError> {
    let (Some(title), Some(url)) = (req.title.as_deref(), req.url.as_deref()) else {
        return Err(ApiError::Validation("title and url are required".to_string()));
    };
    let kind = req.kind.as_deref().unwrap_or("notes");

    let resource = resources::create(&req, title, kind, url).await?;

    if let Some(teacher_id) = req.teacher_id {
        activity::log(
            NewActivity::new(teacher_id, UserRole::Teacher, ActivityType::ResourceUpload)
                .target(ResourceKind::Resource, resource.id, &resource.title),
        )
        .await;
    }

    Ok((StatusCode::CREATED, Json(resource)))
}

pub async fn update(
    Path(id): Path<i32>,
    Json(req): Json<UpdateResourceRequest>,
) -> Result<Json<Resource>, ApiError> {
    let resource = resources::update(id, &req)
        .await?
        .ok_or(ApiError::NotFound("Resource not found"))?;
    Ok(Json(resource))
}

pub async fn remove(Path(id): Path<i32>) -> Result<Json<serde_json::Value>, ApiError> {
    if !resources::delete(id).await? {
        return Err(ApiError::NotFound("Resource not found"));
    }
    Ok(Json(json!({ "message": "Resource deleted" })))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DownloadRequest {
    pub student_id: Option<i32>,
}

/// Counts one download via an atomic increment.
pub async fn add_download(
    Path(id): Path<i32>,
    Json(req): Json<DownloadRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let resource = resources::increment_downloads(id)
        .await?
        .ok_or(ApiError::NotFound("Resource not found"))?;

    if let Some(student_id) = req.student_id {
        activity::log(
            NewActivity::new(student_id, UserRole::Student, ActivityType::ResourceDownload)
                .target(ResourceKind::Resource, resource.id, &resource.title),
        )
        .await;
    }

    Ok(Json(json!({ "downloadCount": resource.download_count })))
}

/// Accepts one PDF as multipart form data and stores it under the upload
/// directory with a timestamp-random name.
pub async fn upload(mut multipart: Multipart) -> Result<Json<serde_json::Value>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        if field.content_type() != Some("application/pdf") {
            return Err(ApiError::Validation("Only PDF files are accepted".to_string()));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        if data.len() > MAX_PDF_BYTES {
            return Err(ApiError::Validation("File exceeds the 10 MB limit".to_string()));
        }

        let filename = format!("{}-{}.pdf", Utc::now().timestamp_millis(), rand::random::<u32>());
        let path = format!("{UPLOAD_DIR}/{filename}");
        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| ApiError::Internal(format!("failed to store upload: {e}")))?;

        return Ok(Json(json!({
            "url": format!("/{path}"),
            "size": data.len(),
        })));
    }

    Err(ApiError::Validation("No file field in the upload".to_string()))
}

/// Renders the resource as a printable study report.
pub async fn download_pdf(Path(id): Path<i32>) -> Result<impl IntoResponse, ApiError> {
    let resource = resources::find(id)
        .await?
        .ok_or(ApiError::NotFound("Resource not found"))?;

    let document = report::build_report(&resource);
    let bytes = report::render_pdf(&document)?;
    let filename = report::report_filename(&resource.title);

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    ))
}
