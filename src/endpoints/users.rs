use axum::Json;
use axum::extract::Query;
use axum::http::StatusCode;
use chrono::{DateTime, Duration, Local, Utc};

use crate::dashboard::{
    self, ActivitySeed, GrowthPoint, RegistrationSeed, STUDENT_GROWTH_TYPES, TEACHER_GROWTH_TYPES,
};
use crate::database::{activity, users};
use crate::error::ApiError;
use crate::model::activity::{ActivityType, UserRole};
use crate::model::user::{NewUserRequest, PlatformStats, UserListParams, UserSummary};

pub async fn list(
    Query(params): Query<UserListParams>,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    let users = users::list(params.role.as_deref(), params.search.as_deref()).await?;
    Ok(Json(users.into_iter().map(UserSummary::from).collect()))
}

pub async fn create(
    Json(req): Json<NewUserRequest>,
) -> Result<(StatusCode, Json<UserSummary>), ApiError> {
    let (Some(name), Some(email), Some(role)) =
        (req.name.as_deref(), req.email.as_deref(), req.role.as_deref())
    else {
        return Err(ApiError::Validation("name, email and role are required".to_string()));
    };
    if UserRole::parse(role).is_none() {
        return Err(ApiError::Validation(format!("unknown role: {role}")));
    }
    if users::email_exists(email).await? {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let user = users::create(users::NewUser {
        name,
        email,
        role,
        password: req.password.as_deref(),
        phone: req.phone.as_deref(),
        gender: req.gender.as_deref(),
        age: req.age,
        status: req.status.as_deref(),
    })
    .await?;

    Ok((StatusCode::CREATED, Json(UserSummary::from(user))))
}

pub async fn stats() -> Result<Json<PlatformStats>, ApiError> {
    Ok(Json(users::platform_stats().await?))
}

fn to_local(dt: DateTime<Utc>) -> chrono::NaiveDateTime {
    dt.with_timezone(&Local).naive_local()
}

/// Six-month growth series for the admin charts. Registrations are read in
/// full (the cumulative totals need all of history); ledger rows only matter
/// inside the charted months, so that read uses a generous UTC window and
/// the month classification trims it exactly.
pub async fn growth() -> Result<Json<Vec<GrowthPoint>>, ApiError> {
    let now_utc = Utc::now();
    let window_start = now_utc - Duration::days(190);

    let registrations: Vec<RegistrationSeed> = users::registration_seeds()
        .await?
        .into_iter()
        .map(|(role, created_at)| RegistrationSeed {
            is_student: role == "student",
            created_at: to_local(created_at),
        })
        .collect();

    let student_activities =
        activity_seeds(UserRole::Student, &STUDENT_GROWTH_TYPES, window_start, now_utc).await?;
    let teacher_activities =
        activity_seeds(UserRole::Teacher, &TEACHER_GROWTH_TYPES, window_start, now_utc).await?;

    let series = dashboard::growth_series(
        to_local(now_utc),
        &registrations,
        &student_activities,
        &teacher_activities,
    );
    Ok(Json(series))
}

async fn activity_seeds(
    role: UserRole,
    types: &[ActivityType],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<ActivitySeed>, ApiError> {
    let rows = activity::seeds_in_window(role, types, from, to).await?;
    Ok(rows
        .into_iter()
        .filter_map(|(user_id, ty, created_at)| {
            ActivityType::parse(&ty).map(|activity_type| ActivitySeed {
                user_id,
                activity_type,
                created_at: to_local(created_at),
            })
        })
        .collect())
}
