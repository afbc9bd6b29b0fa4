//! The activity ledger. Writes are pure inserts with a server-assigned
//! timestamp; entries are never mutated or deleted.

use chrono::{DateTime, Utc};
use sqlx::Row;

use crate::database::pool;
use crate::model::activity::{Activity, ActivityType, NewActivity, UserRole};

const ACTIVITY_COLUMNS: &str = "id, user_id, user_role, activity_type, resource_id, \
     resource_kind, resource_title, metadata, created_at";

/// Appends one ledger entry. Rejects an action recorded under the wrong
/// role; admins may record either kind.
pub async fn record(entry: &NewActivity) -> Result<(), sqlx::Error> {
    if entry.user_role != UserRole::Admin && entry.activity_type.category() != entry.user_role {
        return Err(sqlx::Error::Protocol(format!(
            "activity type {} is not a {} action",
            entry.activity_type.as_str(),
            entry.user_role.as_str()
        )));
    }

    sqlx::query(
        "INSERT INTO activities
            (user_id, user_role, activity_type, resource_id, resource_kind, resource_title, metadata)
         VALUES ($1, $2, $3, $4, $5, $6, $7);",
    )
    .bind(entry.user_id)
    .bind(entry.user_role.as_str())
    .bind(entry.activity_type.as_str())
    .bind(entry.target.map(|t| t.id))
    .bind(entry.target.map(|t| t.kind.as_str()))
    .bind(entry.resource_title.as_deref())
    .bind(&entry.metadata)
    .execute(pool())
    .await?;
    Ok(())
}

/// Best-effort write: the primary action must succeed whether or not its
/// ledger entry lands, so failures are warned about and dropped here.
pub async fn log(entry: NewActivity) {
    if let Err(e) = record(&entry).await {
        tracing::warn!(
            activity_type = entry.activity_type.as_str(),
            user_id = entry.user_id,
            "failed to record activity: {e}"
        );
    }
}

/// Most recent entries for one user, newest first.
pub async fn recent_for_user(
    user_id: i32,
    role: UserRole,
    limit: i64,
) -> Result<Vec<Activity>, sqlx::Error> {
    let query = format!(
        "SELECT {ACTIVITY_COLUMNS} FROM activities
         WHERE user_id = $1 AND user_role = $2
         ORDER BY created_at DESC LIMIT $3;"
    );
    sqlx::query_as::<_, Activity>(&query)
        .bind(user_id)
        .bind(role.as_str())
        .bind(limit)
        .fetch_all(pool())
        .await
}

/// Most recent entries of one type for one user, newest first.
pub async fn recent_of_type(
    user_id: i32,
    role: UserRole,
    ty: ActivityType,
    limit: i64,
) -> Result<Vec<Activity>, sqlx::Error> {
    let query = format!(
        "SELECT {ACTIVITY_COLUMNS} FROM activities
         WHERE user_id = $1 AND user_role = $2 AND activity_type = $3
         ORDER BY created_at DESC LIMIT $4;"
    );
    sqlx::query_as::<_, Activity>(&query)
        .bind(user_id)
        .bind(role.as_str())
        .bind(ty.as_str())
        .bind(limit)
        .fetch_all(pool())
        .await
}

/// Distinct targets a user has touched with a given action.
pub async fn distinct_resource_ids(
    user_id: i32,
    role: UserRole,
    ty: ActivityType,
) -> Result<Vec<i32>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT DISTINCT resource_id FROM activities
         WHERE user_id = $1 AND user_role = $2 AND activity_type = $3
           AND resource_id IS NOT NULL;",
    )
    .bind(user_id)
    .bind(role.as_str())
    .bind(ty.as_str())
    .fetch_all(pool())
    .await?;
    Ok(rows.into_iter().map(|r| r.get("resource_id")).collect())
}

/// Ledger slice for the growth series: all entries for one role within
/// `[from, to)` whose type is in the allow-list.
pub async fn seeds_in_window(
    role: UserRole,
    types: &[ActivityType],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<(i32, String, DateTime<Utc>)>, sqlx::Error> {
    let type_names: Vec<String> = types.iter().map(|t| t.as_str().to_string()).collect();
    let rows = sqlx::query(
        "SELECT user_id, activity_type, created_at FROM activities
         WHERE user_role = $1 AND activity_type = ANY($2)
           AND created_at >= $3 AND created_at < $4;",
    )
    .bind(role.as_str())
    .bind(&type_names)
    .bind(from)
    .bind(to)
    .fetch_all(pool())
    .await?;
    Ok(rows
        .into_iter()
        .map(|r| (r.get("user_id"), r.get("activity_type"), r.get("created_at")))
        .collect())
}
