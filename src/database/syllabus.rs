use sqlx::Row;
use sqlx::types::Json;

use crate::database::pool;
use crate::model::syllabus::{
    IaSection, IaUnit, Material, NewSyllabusRequest, SemesterUnit, SyllabusItem,
    UpdateSyllabusRequest,
};

const SYLLABUS_COLUMNS: &str = "id, course_id, course_name, semester, academic_year, topic, date, \
     ia_syllabus, semester_syllabus, materials, created_by, status, created_at, updated_at";

pub async fn list() -> Result<Vec<SyllabusItem>, sqlx::Error> {
    let query =
        format!("SELECT {SYLLABUS_COLUMNS} FROM syllabus_items ORDER BY created_at DESC;");
    sqlx::query_as::<_, SyllabusItem>(&query)
        .fetch_all(pool())
        .await
}

/// Published syllabi for the student view, ordered by semester.
pub async fn list_published() -> Result<Vec<SyllabusItem>, sqlx::Error> {
    let query = format!(
        "SELECT {SYLLABUS_COLUMNS} FROM syllabus_items
         WHERE status = 'Published' ORDER BY semester ASC;"
    );
    sqlx::query_as::<_, SyllabusItem>(&query)
        .fetch_all(pool())
        .await
}

pub async fn find(id: i32) -> Result<Option<SyllabusItem>, sqlx::Error> {
    let query = format!("SELECT {SYLLABUS_COLUMNS} FROM syllabus_items WHERE id = $1;");
    sqlx::query_as::<_, SyllabusItem>(&query)
        .bind(id)
        .fetch_optional(pool())
        .await
}

pub async fn latest(limit: i64) -> Result<Vec<SyllabusItem>, sqlx::Error> {
    let query = format!(
        "SELECT {SYLLABUS_COLUMNS} FROM syllabus_items ORDER BY created_at DESC LIMIT $1;"
    );
    sqlx::query_as::<_, SyllabusItem>(&query)
        .bind(limit)
        .fetch_all(pool())
        .await
}

pub async fn create(
    req: &NewSyllabusRequest,
    course_id: &str,
    course_name: &str,
    semester: i32,
    academic_year: &str,
) -> Result<SyllabusItem, sqlx::Error> {
    let ia: Vec<IaSection> = req.ia_syllabus.clone().unwrap_or_default();
    let sem: Vec<SemesterUnit> = req.semester_syllabus.clone().unwrap_or_default();
    let materials: Vec<Material> = req.materials.clone().unwrap_or_default();
    let query = format!(
        "INSERT INTO syllabus_items
            (course_id, course_name, semester, academic_year, topic, date,
             ia_syllabus, semester_syllabus, materials, created_by, status)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, COALESCE($11, 'Draft'))
         RETURNING {SYLLABUS_COLUMNS};"
    );
    sqlx::query_as::<_, SyllabusItem>(&query)
        .bind(course_id)
        .bind(course_name)
        .bind(semester)
        .bind(academic_year)
        .bind(req.topic.as_deref())
        .bind(req.date)
        .bind(Json(ia))
        .bind(Json(sem))
        .bind(Json(materials))
        .bind(req.teacher_id)
        .bind(req.status.as_deref())
        .fetch_one(pool())
        .await
}

pub async fn update(
    id: i32,
    updates: &UpdateSyllabusRequest,
) -> Result<Option<SyllabusItem>, sqlx::Error> {
    let ia = updates.ia_syllabus.clone().map(Json);
    let sem = updates.semester_syllabus.clone().map(Json);
    let materials = updates.materials.clone().map(Json);
    let query = format!(
        "UPDATE syllabus_items SET
            course_id = COALESCE($2, course_id),
            course_name = COALESCE($3, course_name),
            semester = COALESCE($4, semester),
            academic_year = COALESCE($5, academic_year),
            topic = COALESCE($6, topic),
            date = COALESCE($7, date),
            ia_syllabus = COALESCE($8, ia_syllabus),
            semester_syllabus = COALESCE($9, semester_syllabus),
            materials = COALESCE($10, materials),
            status = COALESCE($11, status),
            updated_at = now()
         WHERE id = $1
         RETURNING {SYLLABUS_COLUMNS};"
    );
    sqlx::query_as::<_, SyllabusItem>(&query)
        .bind(id)
        .bind(updates.course_id.as_deref())
        .bind(updates.course_name.as_deref())
        .bind(updates.semester)
        .bind(updates.academic_year.as_deref())
        .bind(updates.topic.as_deref())
        .bind(updates.date)
        .bind(ia)
        .bind(sem)
        .bind(materials)
        .bind(updates.status.as_deref())
        .fetch_optional(pool())
        .await
}

pub async fn delete(id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM syllabus_items WHERE id = $1;")
        .bind(id)
        .execute(pool())
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Appends a unit to the IA section matching `exam_type`, creating the
/// section when it does not exist yet.
pub async fn add_ia_unit(
    id: i32,
    exam_type: &str,
    unit: IaUnit,
) -> Result<Option<SyllabusItem>, sqlx::Error> {
    let Some(item) = find(id).await? else {
        return Ok(None);
    };

    let mut ia = item.ia_syllabus;
    match ia.iter_mut().find(|s| s.exam_type == exam_type) {
        Some(section) => section.units.push(unit),
        None => ia.push(IaSection {
            exam_type: exam_type.to_string(),
            exam_date: None,
            units: vec![unit],
        }),
    }

    let query = format!(
        "UPDATE syllabus_items SET ia_syllabus = $2, updated_at = now()
         WHERE id = $1 RETURNING {SYLLABUS_COLUMNS};"
    );
    sqlx::query_as::<_, SyllabusItem>(&query)
        .bind(id)
        .bind(Json(ia))
        .fetch_optional(pool())
        .await
}

pub async fn add_semester_unit(
    id: i32,
    unit: SemesterUnit,
) -> Result<Option<SyllabusItem>, sqlx::Error> {
    let query = format!(
        "UPDATE syllabus_items
         SET semester_syllabus = semester_syllabus || $2, updated_at = now()
         WHERE id = $1 RETURNING {SYLLABUS_COLUMNS};"
    );
    sqlx::query_as::<_, SyllabusItem>(&query)
        .bind(id)
        .bind(Json(vec![unit]))
        .fetch_optional(pool())
        .await
}

pub async fn add_material(id: i32, material: Material) -> Result<Option<SyllabusItem>, sqlx::Error> {
    let query = format!(
        "UPDATE syllabus_items SET materials = materials || $2, updated_at = now()
         WHERE id = $1 RETURNING {SYLLABUS_COLUMNS};"
    );
    sqlx::query_as::<_, SyllabusItem>(&query)
        .bind(id)
        .bind(Json(vec![material]))
        .fetch_optional(pool())
        .await
}

pub async fn count() -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM syllabus_items;")
        .fetch_one(pool())
        .await?;
    Ok(row.get("n"))
}
