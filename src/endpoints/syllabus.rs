use axum::Json;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::json;

use crate::database::{activity, syllabus};
use crate::error::ApiError;
use crate::model::activity::{ActivityType, NewActivity, ResourceKind, UserRole};
use crate::model::syllabus::{
    AddIaUnitRequest, Material, NewSyllabusRequest, SemesterUnit, SyllabusItem, SyllabusSummary,
    UpdateSyllabusRequest,
};

/// Every syllabus item as a summary row with unit counts.
pub async fn list() -> Result<Json<Vec<SyllabusSummary>>, ApiError> {
    let items = syllabus::list().await?;
    Ok(Json(items.iter().map(SyllabusSummary::from).collect()))
}

/// Published syllabi for students, ordered by semester.
pub async fn list_published() -> Result<Json<Vec<SyllabusItem>>, ApiError> {
    Ok(Json(syllabus::list_published().await?))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetParams {
    pub student_id: Option<i32>,
}

pub async fn get(
    Path(id): Path<i32>,
    Query(params): Query<GetParams>,
) -> Result<Json<SyllabusItem>, ApiError> {
    let item = syllabus::find(id)
        .await?
        .ok_or(ApiError::NotFound("Syllabus not found"))?;

    if let Some(student_id) = params.student_id {
        activity::log(
            NewActivity::new(student_id, UserRole::Student, ActivityType::SyllabusAccess)
                .target(ResourceKind::SyllabusItem, item.id, &item.course_name),
        )
        .await;
    }

    Ok(Json(item))
}

pub async fn create(
    Json(req): Json<NewSyllabusRequest>,
) -> Result<(StatusCode, Json<SyllabusItem>), ApiError> {
    let (Some(course_id), Some(course_name), Some(semester), Some(academic_year)) = (
        req.course_id.as_deref(),
        req.course_name.as_deref(),
        req.semester,
        req.academic_year.as_deref(),
    ) else {
        return Err(ApiError::Validation(
            "courseId, courseName, semester and academicYear are required".to_string(),
        ));
    };

    let item = syllabus::create(&req, course_id, course_name, semester, academic_year).await?;

    if let Some(teacher_id) = req.teacher_id {
        activity::log(
            NewActivity::new(teacher_id, UserRole::Teacher, ActivityType::SyllabusCreate)
                .target(ResourceKind::SyllabusItem, item.id, &item.course_name),
        )
        .await;
    }

    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update(
    Path(id): Path<i32>,
    Json(req): Json<UpdateSyllabusRequest>,
) -> Result<Json<SyllabusItem>, ApiError> {
    let item = syllabus::update(id, &req)
        .await?
        .ok_or(ApiError::NotFound("Syllabus not found"))?;

    if let Some(teacher_id) = req.teacher_id {
        activity::log(
            NewActivity::new(teacher_id, UserRole::Teacher, ActivityType::SyllabusUpdate)
                .target(ResourceKind::SyllabusItem, item.id, &item.course_name),
        )
        .await;
    }

    Ok(Json(item))
}

pub async fn remove(Path(id): Path<i32>) -> Result<Json<serde_json::Value>, ApiError> {
    if !syllabus::delete(id).await? {
        return Err(ApiError::NotFound("Syllabus not found"));
    }
    Ok(Json(json!({ "message": "Syllabus deleted" })))
}

/// Appends one unit to the IA section named by `examType`, creating the
/// section on first use.
pub async fn add_ia_unit(
    Path(id): Path<i32>,
    Json(req): Json<AddIaUnitRequest>,
) -> Result<Json<SyllabusItem>, ApiError> {
    let (Some(exam_type), Some(unit)) = (req.exam_type, req.unit) else {
        return Err(ApiError::Validation("examType and unit are required".to_string()));
    };

    let item = syllabus::add_ia_unit(id, &exam_type, unit)
        .await?
        .ok_or(ApiError::NotFound("Syllabus not found"))?;
    Ok(Json(item))
}

pub async fn add_semester_unit(
    Path(id): Path<i32>,
    Json(unit): Json<SemesterUnit>,
) -> Result<Json<SyllabusItem>, ApiError> {
    let item = syllabus::add_semester_unit(id, unit)
        .await?
        .ok_or(ApiError::NotFound("Syllabus not found"))?;
    Ok(Json(item))
}

pub async fn add_material(
    Path(id): Path<i32>,
    Json(material): Json<Material>,
) -> Result<Json<SyllabusItem>, ApiError> {
    let item = syllabus::add_material(id, material)
        .await?
        .ok_or(ApiError::NotFound("Syllabus not found"))?;
    Ok(Json(item))
}
