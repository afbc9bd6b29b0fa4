use sqlx::Row;

use crate::database::pool;
use crate::model::video::Video;

const VIDEO_COLUMNS: &str =
    "id, title, description, duration, course, views, upload_date, url, status, created_at";

/// Published videos for the student library, newest first, with an optional
/// case-insensitive search across title, description, and course.
pub async fn list_published(search: Option<&str>) -> Result<Vec<Video>, sqlx::Error> {
    let query = format!(
        "SELECT {VIDEO_COLUMNS} FROM videos
         WHERE status = 'Published'
           AND ($1::text IS NULL
                OR title ILIKE '%' || $1 || '%'
                OR description ILIKE '%' || $1 || '%'
                OR course ILIKE '%' || $1 || '%')
         ORDER BY created_at DESC;"
    );
    sqlx::query_as::<_, Video>(&query)
        .bind(search)
        .fetch_all(pool())
        .await
}

pub async fn list_all() -> Result<Vec<Video>, sqlx::Error> {
    let query = format!("SELECT {VIDEO_COLUMNS} FROM videos ORDER BY created_at DESC;");
    sqlx::query_as::<_, Video>(&query).fetch_all(pool()).await
}

pub async fn find(id: i32) -> Result<Option<Video>, sqlx::Error> {
    let query = format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1;");
    sqlx::query_as::<_, Video>(&query)
        .bind(id)
        .fetch_optional(pool())
        .await
}

pub async fn find_by_ids(ids: &[i32]) -> Result<Vec<Video>, sqlx::Error> {
    let query = format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = ANY($1);");
    sqlx::query_as::<_, Video>(&query)
        .bind(ids)
        .fetch_all(pool())
        .await
}

pub async fn latest(limit: i64) -> Result<Vec<Video>, sqlx::Error> {
    let query = format!("SELECT {VIDEO_COLUMNS} FROM videos ORDER BY created_at DESC LIMIT $1;");
    sqlx::query_as::<_, Video>(&query)
        .bind(limit)
        .fetch_all(pool())
        .await
}

pub async fn create(
    title: &str,
    description: &str,
    duration: &str,
    course: &str,
    url: &str,
    status: &str,
) -> Result<Video, sqlx::Error> {
    let query = format!(
        "INSERT INTO videos (title, description, duration, course, url, status)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING {VIDEO_COLUMNS};"
    );
    sqlx::query_as::<_, Video>(&query)
        .bind(title)
        .bind(description)
        .bind(duration)
        .bind(course)
        .bind(url)
        .bind(status)
        .fetch_one(pool())
        .await
}

/// Partial update; absent fields keep their stored value.
pub async fn update(
    id: i32,
    updates: &crate::model::video::UpdateVideoRequest,
) -> Result<Option<Video>, sqlx::Error> {
    let query = format!(
        "UPDATE videos SET
            title = COALESCE($2, title),
            description = COALESCE($3, description),
            duration = COALESCE($4, duration),
            course = COALESCE($5, course),
            url = COALESCE($6, url),
            status = COALESCE($7, status)
         WHERE id = $1
         RETURNING {VIDEO_COLUMNS};"
    );
    sqlx::query_as::<_, Video>(&query)
        .bind(id)
        .bind(updates.title.as_deref())
        .bind(updates.description.as_deref())
        .bind(updates.duration.as_deref())
        .bind(updates.course.as_deref())
        .bind(updates.url.as_deref())
        .bind(updates.status.as_deref())
        .fetch_optional(pool())
        .await
}

pub async fn delete(id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM videos WHERE id = $1;")
        .bind(id)
        .execute(pool())
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Atomic increment-and-fetch; concurrent views never lose updates.
pub async fn increment_views(id: i32) -> Result<Option<Video>, sqlx::Error> {
    let query = format!(
        "UPDATE videos SET views = views + 1 WHERE id = $1 RETURNING {VIDEO_COLUMNS};"
    );
    sqlx::query_as::<_, Video>(&query)
        .bind(id)
        .fetch_optional(pool())
        .await
}

pub async fn count() -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM videos;")
        .fetch_one(pool())
        .await?;
    Ok(row.get("n"))
}
