use axum::Json;
use axum::extract::Path;
use axum::http::StatusCode;
use serde_json::json;

use crate::database::{activity, placements, users};
use crate::error::ApiError;
use crate::model::activity::{ActivityType, NewActivity, ResourceKind, UserRole};
use crate::model::placement::{
    NewPlacementRequest, Placement, PlacementWithRegistrations, RegisterRequest,
    UpdatePlacementRequest,
};

pub async fn list() -> Result<Json<Vec<PlacementWithRegistrations>>, ApiError> {
    Ok(Json(placements::list().await?))
}

pub async fn get(Path(id): Path<i32>) -> Result<Json<Placement>, ApiError> {
    let placement = placements::find(id)
        .await?
        .ok_or(ApiError::NotFound("Placement not found"))?;
    Ok(Json(placement))
}

pub async fn create(
    Json(req): Json<NewPlacementRequest>,
) -> Result<(StatusCode, Json<Placement>), ApiError> {
    let (Some(company), Some(role), Some(package), Some(date), Some(time), Some(location), Some(description)) = (
        req.company.as_deref(),
        req.role.as_deref(),
        req.package.as_deref(),
        req.date.as_deref(),
        req.time.as_deref(),
        req.location.as_deref(),
        req.description.as_deref(),
    ) else {
        return Err(ApiError::Validation(
            "company, role, package, date, time, location and description are required"
                .to_string(),
        ));
    };

    let placement =
        placements::create(&req, company, role, package, date, time, location, description)
            .await?;
    Ok((StatusCode::CREATED, Json(placement)))
}

pub async fn update(
    Path(id): Path<i32>,
    Json(req): Json<UpdatePlacementRequest>,
) -> Result<Json<Placement>, ApiError> {
    let placement = placements::update(id, &req)
        .await?
        .ok_or(ApiError::NotFound("Placement not found"))?;
    Ok(Json(placement))
}

pub async fn remove(Path(id): Path<i32>) -> Result<Json<serde_json::Value>, ApiError> {
    if !placements::delete(id).await? {
        return Err(ApiError::NotFound("Placement not found"));
    }
    Ok(Json(json!({ "message": "Placement deleted" })))
}

/// Registers a student for a placement drive. Registering twice is a no-op.
pub async fn register(
    Path(id): Path<i32>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Some(user_id) = req.user_id else {
        return Err(ApiError::Validation("userId is required".to_string()));
    };

    let placement = placements::find(id)
        .await?
        .ok_or(ApiError::NotFound("Placement not found"))?;
    if users::find(user_id).await?.is_none() {
        return Err(ApiError::NotFound("User not found"));
    }

    placements::register_student(placement.id, user_id).await?;

    activity::log(
        NewActivity::new(user_id, UserRole::Student, ActivityType::PlacementRegistration)
            .target(ResourceKind::Placement, placement.id, &placement.company),
    )
    .await;

    Ok(Json(json!({ "message": "Registered successfully" })))
}
