use sha2::{Digest, Sha512};
use sqlx::Row;

use crate::database::pool;
use crate::model::user::{PlatformStats, User};

/// Digest for stored credentials: the email's halves are folded around the
/// password before hashing so equal passwords never share a digest.
fn password_digest(email: &str, password: &str) -> Vec<u8> {
    let email = email.as_bytes();
    let half = email.len() / 2;
    let salted = [&email[..half], password.as_bytes(), &email[half..]].concat();
    Sha512::digest(salted).to_vec()
}

const USER_COLUMNS: &str = "id, name, email, role, phone, gender, age, \
     enrolled_courses, courses, students, join_date, status, created_at";

pub async fn list(role: Option<&str>, search: Option<&str>) -> Result<Vec<User>, sqlx::Error> {
    let query = format!(
        "SELECT {USER_COLUMNS} FROM users
         WHERE ($1::text IS NULL OR role = $1)
           AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%' OR email ILIKE '%' || $2 || '%')
         ORDER BY created_at DESC;"
    );
    sqlx::query_as::<_, User>(&query)
        .bind(role)
        .bind(search)
        .fetch_all(pool())
        .await
}

pub async fn find(id: i32) -> Result<Option<User>, sqlx::Error> {
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1;");
    sqlx::query_as::<_, User>(&query)
        .bind(id)
        .fetch_optional(pool())
        .await
}

pub async fn email_exists(email: &str) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1) AS present;")
        .bind(email)
        .fetch_one(pool())
        .await?;
    Ok(row.get("present"))
}

pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub password: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub age: Option<i32>,
    pub status: Option<&'a str>,
}

pub async fn create(new: NewUser<'_>) -> Result<User, sqlx::Error> {
    let hash = new.password.map(|p| password_digest(new.email, p));
    let query = format!(
        "INSERT INTO users (name, email, password_hash, role, phone, gender, age, status)
         VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 'Active'))
         RETURNING {USER_COLUMNS};"
    );
    sqlx::query_as::<_, User>(&query)
        .bind(new.name)
        .bind(new.email)
        .bind(hash)
        .bind(new.role)
        .bind(new.phone)
        .bind(new.gender)
        .bind(new.age)
        .bind(new.status)
        .fetch_one(pool())
        .await
}

async fn count(query: &str) -> Result<i64, sqlx::Error> {
    let row = sqlx::query(query).fetch_one(pool()).await?;
    Ok(row.get("n"))
}

/// Totals for the admin dashboard cards.
pub async fn platform_stats() -> Result<PlatformStats, sqlx::Error> {
    Ok(PlatformStats {
        total_students: count("SELECT COUNT(*) AS n FROM users WHERE role = 'student';").await?,
        total_teachers: count("SELECT COUNT(*) AS n FROM users WHERE role = 'teacher';").await?,
        active_courses: count("SELECT COUNT(*) AS n FROM syllabus_items WHERE status = 'Published';")
            .await?,
        total_resources: count("SELECT COUNT(*) AS n FROM resources;").await?,
        total_placements: count("SELECT COUNT(*) AS n FROM placements;").await?,
    })
}

pub async fn count_by_role(role: &str) -> Result<i64, sqlx::Error> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM users WHERE role = $1;")
        .bind(role)
        .fetch_one(pool())
        .await?;
    Ok(row.get("n"))
}

/// Registration seed rows for the growth series: role and creation time of
/// every student and teacher account.
pub async fn registration_seeds() -> Result<Vec<(String, chrono::DateTime<chrono::Utc>)>, sqlx::Error>
{
    let rows = sqlx::query(
        "SELECT role, created_at FROM users WHERE role IN ('student', 'teacher');",
    )
    .fetch_all(pool())
    .await?;
    Ok(rows
        .into_iter()
        .map(|r| (r.get("role"), r.get("created_at")))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_digest_depends_on_email_and_password() {
        let a = password_digest("a@example.com", "hunter2");
        let b = password_digest("b@example.com", "hunter2");
        let c = password_digest("a@example.com", "hunter3");
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, password_digest("a@example.com", "hunter2"));
        assert_eq!(a.len(), 64);
    }
}
