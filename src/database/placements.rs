use std::collections::HashMap;

use sqlx::Row;

use crate::database::pool;
use crate::model::placement::{
    Attachment, NewPlacementRequest, Placement, PlacementWithRegistrations, UpdatePlacementRequest,
};

const PLACEMENT_COLUMNS: &str = "id, company, role, package, date, time, location, status, \
     description, procedure, eligibility, attachments, created_at";

/// All placements (newest date first) with their registered student ids.
pub async fn list() -> Result<Vec<PlacementWithRegistrations>, sqlx::Error> {
    let query = format!("SELECT {PLACEMENT_COLUMNS} FROM placements ORDER BY date DESC;");
    let placements = sqlx::query_as::<_, Placement>(&query)
        .fetch_all(pool())
        .await?;

    let rows = sqlx::query(
        "SELECT placement_id, student_id FROM placement_registrations ORDER BY registered_at;",
    )
    .fetch_all(pool())
    .await?;

    let mut registrations: HashMap<i32, Vec<i32>> = HashMap::new();
    for row in rows {
        registrations
            .entry(row.get("placement_id"))
            .or_default()
            .push(row.get("student_id"));
    }

    Ok(placements
        .into_iter()
        .map(|placement| {
            let registered_students = registrations.remove(&placement.id).unwrap_or_default();
            PlacementWithRegistrations {
                placement,
                registered_students,
            }
        })
        .collect())
}

pub async fn find(id: i32) -> Result<Option<Placement>, sqlx::Error> {
    let query = format!("SELECT {PLACEMENT_COLUMNS} FROM placements WHERE id = $1;");
    sqlx::query_as::<_, Placement>(&query)
        .bind(id)
        .fetch_optional(pool())
        .await
}

pub async fn create(
    req: &NewPlacementRequest,
    company: &str,
    role: &str,
    package: &str,
    date: &str,
    time: &str,
    location: &str,
    description: &str,
) -> Result<Placement, sqlx::Error> {
    let attachments: Vec<Attachment> = req.attachments.clone().unwrap_or_default();
    let query = format!(
        "INSERT INTO placements
            (company, role, package, date, time, location, description,
             procedure, eligibility, attachments, status)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, COALESCE($11, 'Upcoming'))
         RETURNING {PLACEMENT_COLUMNS};"
    );
    sqlx::query_as::<_, Placement>(&query)
        .bind(company)
        .bind(role)
        .bind(package)
        .bind(date)
        .bind(time)
        .bind(location)
        .bind(description)
        .bind(req.procedure.as_deref())
        .bind(req.eligibility.as_deref())
        .bind(sqlx::types::Json(attachments))
        .bind(req.status.as_deref())
        .fetch_one(pool())
        .await
}

pub async fn update(
    id: i32,
    updates: &UpdatePlacementRequest,
) -> Result<Option<Placement>, sqlx::Error> {
    let attachments = updates.attachments.clone().map(sqlx::types::Json);
    let query = format!(
        "UPDATE placements SET
            company = COALESCE($2, company),
            role = COALESCE($3, role),
            package = COALESCE($4, package),
            date = COALESCE($5, date),
            time = COALESCE($6, time),
            location = COALESCE($7, location),
            description = COALESCE($8, description),
            procedure = COALESCE($9, procedure),
            eligibility = COALESCE($10, eligibility),
            attachments = COALESCE($11, attachments),
            status = COALESCE($12, status)
         WHERE id = $1
         RETURNING {PLACEMENT_COLUMNS};"
    );
    sqlx::query_as::<_, Placement>(&query)
        .bind(id)
        .bind(updates.company.as_deref())
        .bind(updates.role.as_deref())
        .bind(updates.package.as_deref())
        .bind(updates.date.as_deref())
        .bind(updates.time.as_deref())
        .bind(updates.location.as_deref())
        .bind(updates.description.as_deref())
        .bind(updates.procedure.as_deref())
        .bind(updates.eligibility.as_deref())
        .bind(attachments)
        .bind(updates.status.as_deref())
        .fetch_optional(pool())
        .await
}

pub async fn delete(id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM placements WHERE id = $1;")
        .bind(id)
        .execute(pool())
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Idempotent set-add: registering the same student twice is a no-op.
pub async fn register_student(placement_id: i32, student_id: i32) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO placement_registrations (placement_id, student_id)
         VALUES ($1, $2) ON CONFLICT DO NOTHING;",
    )
    .bind(placement_id)
    .bind(student_id)
    .execute(pool())
    .await?;
    Ok(())
}

pub async fn count() -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM placements;")
        .fetch_one(pool())
        .await?;
    Ok(row.get("n"))
}
