use sqlx::Row;
use sqlx::types::Json;

use crate::database::pool;
use crate::model::resource::{NewResourceRequest, Question, Resource, UpdateResourceRequest};

const RESOURCE_COLUMNS: &str = "id, title, subject, type, size, author, notes, upload_date, url, \
     download_count, topic, description, content, explanation, examples, bullet_points, questions";

pub async fn list(search: Option<&str>) -> Result<Vec<Resource>, sqlx::Error> {
    let query = format!(
        "SELECT {RESOURCE_COLUMNS} FROM resources
         WHERE ($1::text IS NULL
                OR title ILIKE '%' || $1 || '%'
                OR subject ILIKE '%' || $1 || '%'
                OR author ILIKE '%' || $1 || '%')
         ORDER BY upload_date DESC;"
    );
    sqlx::query_as::<_, Resource>(&query)
        .bind(search)
        .fetch_all(pool())
        .await
}

pub async fn find(id: i32) -> Result<Option<Resource>, sqlx::Error> {
    let query = format!("SELECT {RESOURCE_COLUMNS} FROM resources WHERE id = $1;");
    sqlx::query_as::<_, Resource>(&query)
        .bind(id)
        .fetch_optional(pool())
        .await
}

pub async fn latest(limit: i64) -> Result<Vec<Resource>, sqlx::Error> {
    let query =
        format!("SELECT {RESOURCE_COLUMNS} FROM resources ORDER BY upload_date DESC LIMIT $1;");
    sqlx::query_as::<_, Resource>(&query)
        .bind(limit)
        .fetch_all(pool())
        .await
}

pub async fn create(req: &NewResourceRequest, title: &str, kind: &str, url: &str) -> Result<Resource, sqlx::Error> {
    let questions: Vec<Question> = req.questions.clone().unwrap_or_default();
    let query = format!(
        "INSERT INTO resources
            (title, subject, type, size, author, notes, url, topic, description, content,
             explanation, examples, bullet_points, questions)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                 COALESCE($12, '{{}}'), COALESCE($13, '{{}}'), $14)
         RETURNING {RESOURCE_COLUMNS};"
    );
    sqlx::query_as::<_, Resource>(&query)
        .bind(title)
        .bind(req.subject.as_deref())
        .bind(kind)
        .bind(req.size.as_deref())
        .bind(req.author.as_deref())
        .bind(req.notes.as_deref())
        .bind(url)
        .bind(req.topic.as_deref())
        .bind(req.description.as_deref())
        .bind(req.content.as_deref())
        .bind(req.explanation.as_deref())
        .bind(req.examples.as_deref())
        .bind(req.bullet_points.as_deref())
        .bind(Json(questions))
        .fetch_one(pool())
        .await
}

pub async fn update(id: i32, updates: &UpdateResourceRequest) -> Result<Option<Resource>, sqlx::Error> {
    let questions = updates.questions.clone().map(Json);
    let query = format!(
        "UPDATE resources SET
            title = COALESCE($2, title),
            subject = COALESCE($3, subject),
            type = COALESCE($4, type),
            size = COALESCE($5, size),
            author = COALESCE($6, author),
            notes = COALESCE($7, notes),
            url = COALESCE($8, url),
            topic = COALESCE($9, topic),
            description = COALESCE($10, description),
            content = COALESCE($11, content),
            explanation = COALESCE($12, explanation),
            examples = COALESCE($13, examples),
            bullet_points = COALESCE($14, bullet_points),
            questions = COALESCE($15, questions)
         WHERE id = $1
         RETURNING {RESOURCE_COLUMNS};"
    );
    sqlx::query_as::<_, Resource>(&query)
        .bind(id)
        .bind(updates.title.as_deref())
        .bind(updates.subject.as_deref())
        .bind(updates.kind.as_deref())
        .bind(updates.size.as_deref())
        .bind(updates.author.as_deref())
        .bind(updates.notes.as_deref())
        .bind(updates.url.as_deref())
        .bind(updates.topic.as_deref())
        .bind(updates.description.as_deref())
        .bind(updates.content.as_deref())
        .bind(updates.explanation.as_deref())
        .bind(updates.examples.as_deref())
        .bind(updates.bullet_points.as_deref())
        .bind(questions)
        .fetch_optional(pool())
        .await
}

pub async fn delete(id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM resources WHERE id = $1;")
        .bind(id)
        .execute(pool())
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Atomic increment-and-fetch for the download counter.
pub async fn increment_downloads(id: i32) -> Result<Option<Resource>, sqlx::Error> {
    let query = format!(
        "UPDATE resources SET download_count = download_count + 1
         WHERE id = $1 RETURNING {RESOURCE_COLUMNS};"
    );
    sqlx::query_as::<_, Resource>(&query)
        .bind(id)
        .fetch_optional(pool())
        .await
}

pub async fn count() -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM resources;")
        .fetch_one(pool())
        .await?;
    Ok(row.get("n"))
}
