use sqlx::{Pool, Postgres, postgres::PgPoolOptions};
use std::env::var;
use std::sync::OnceLock;

pub mod activity;
pub mod placements;
pub mod resources;
pub mod syllabus;
pub mod users;
pub mod videos;

static POOL: OnceLock<Pool<Postgres>> = OnceLock::new();

/// Connection pool, set once by `init_database` before the server starts.
pub(crate) fn pool() -> &'static Pool<Postgres> {
    POOL.get().expect("init_database must run before serving")
}

pub async fn init_database() -> Result<(), String> {
    let Ok(name) = var("PSQL_NAME") else {
        return Err("PSQL_NAME environment variable not present".into());
    };
    let Ok(pass) = var("PSQL_PASS") else {
        return Err("PSQL_PASS environment variable not present".into());
    };
    let host = var("PSQL_HOST").unwrap_or_else(|_| "localhost".into());

    let pool = match PgPoolOptions::new()
        .max_connections(10)
        .connect(&format!("postgres://{}:{}@{}/e_learning", name, pass, host))
        .await
    {
        Ok(p) => p,
        Err(e) => {
            return Err(format!("{e}"));
        }
    };

    // Initiate schema
    let mut transaction = match pool.begin().await {
        Ok(t) => t,
        Err(e) => return Err(format!("Could not begin schema transaction: {e}")),
    };

    if let Err(e) = sqlx::query(
        "CREATE TABLE IF NOT EXISTS users(
        id INTEGER PRIMARY KEY GENERATED ALWAYS AS IDENTITY,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        password_hash BYTEA,
        role TEXT NOT NULL CHECK (role IN ('admin', 'teacher', 'student')),
        phone TEXT,
        gender TEXT,
        age INTEGER,
        enrolled_courses INTEGER NOT NULL DEFAULT 0,
        courses INTEGER NOT NULL DEFAULT 0,
        students INTEGER NOT NULL DEFAULT 0,
        join_date TIMESTAMPTZ NOT NULL DEFAULT now(),
        status TEXT NOT NULL DEFAULT 'Active' CHECK (status IN ('Active', 'Inactive')),
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    );",
    )
    .execute(&mut *transaction)
    .await
    {
        return Err(format!("Failed to create users table: {e}"));
    }

    if let Err(e) = sqlx::query(
        "CREATE TABLE IF NOT EXISTS videos(
        id INTEGER PRIMARY KEY GENERATED ALWAYS AS IDENTITY,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        duration TEXT NOT NULL,
        course TEXT NOT NULL,
        views BIGINT NOT NULL DEFAULT 0,
        upload_date TIMESTAMPTZ NOT NULL DEFAULT now(),
        url TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'Draft' CHECK (status IN ('Draft', 'Published')),
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    );",
    )
    .execute(&mut *transaction)
    .await
    {
        return Err(format!("Failed to create videos table: {e}"));
    }

    if let Err(e) = sqlx::query(
        "CREATE TABLE IF NOT EXISTS resources(
        id INTEGER PRIMARY KEY GENERATED ALWAYS AS IDENTITY,
        title TEXT NOT NULL,
        subject TEXT,
        type TEXT NOT NULL,
        size TEXT,
        author TEXT,
        notes TEXT,
        upload_date TIMESTAMPTZ NOT NULL DEFAULT now(),
        url TEXT NOT NULL,
        download_count BIGINT NOT NULL DEFAULT 0,
        topic TEXT,
        description TEXT,
        content TEXT,
        explanation TEXT,
        examples TEXT[] NOT NULL DEFAULT '{}',
        bullet_points TEXT[] NOT NULL DEFAULT '{}',
        questions JSONB NOT NULL DEFAULT '[]'
    );",
    )
    .execute(&mut *transaction)
    .await
    {
        return Err(format!("Failed to create resources table: {e}"));
    }

    if let Err(e) = sqlx::query(
        "CREATE TABLE IF NOT EXISTS syllabus_items(
        id INTEGER PRIMARY KEY GENERATED ALWAYS AS IDENTITY,
        course_id TEXT NOT NULL,
        course_name TEXT NOT NULL,
        semester INTEGER NOT NULL,
        academic_year TEXT NOT NULL,
        topic TEXT,
        date DATE,
        ia_syllabus JSONB NOT NULL DEFAULT '[]',
        semester_syllabus JSONB NOT NULL DEFAULT '[]',
        materials JSONB NOT NULL DEFAULT '[]',
        created_by INTEGER REFERENCES users (id),
        status TEXT NOT NULL DEFAULT 'Draft' CHECK (status IN ('Draft', 'Published')),
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    );",
    )
    .execute(&mut *transaction)
    .await
    {
        return Err(format!("Failed to create syllabus_items table: {e}"));
    }

    if let Err(e) = sqlx::query(
        "CREATE TABLE IF NOT EXISTS placements(
        id INTEGER PRIMARY KEY GENERATED ALWAYS AS IDENTITY,
        company TEXT NOT NULL,
        role TEXT NOT NULL,
        package TEXT NOT NULL,
        date TEXT NOT NULL,
        time TEXT NOT NULL,
        location TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'Upcoming' CHECK (status IN ('Upcoming', 'Completed')),
        description TEXT NOT NULL,
        procedure TEXT,
        eligibility TEXT,
        attachments JSONB NOT NULL DEFAULT '[]',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    );",
    )
    .execute(&mut *transaction)
    .await
    {
        return Err(format!("Failed to create placements table: {e}"));
    }

    // Composite primary key gives placement registration its set semantics.
    if let Err(e) = sqlx::query(
        "CREATE TABLE IF NOT EXISTS placement_registrations(
        placement_id INTEGER REFERENCES placements (id) ON DELETE CASCADE,
        student_id INTEGER REFERENCES users (id),
        registered_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        CONSTRAINT placement_registrations_pkey PRIMARY KEY (placement_id, student_id)
    );",
    )
    .execute(&mut *transaction)
    .await
    {
        return Err(format!("Failed to create placement_registrations table: {e}"));
    }

    if let Err(e) = sqlx::query(
        "CREATE TABLE IF NOT EXISTS activities(
        id BIGINT PRIMARY KEY GENERATED ALWAYS AS IDENTITY,
        user_id INTEGER NOT NULL REFERENCES users (id),
        user_role TEXT NOT NULL CHECK (user_role IN ('admin', 'teacher', 'student')),
        activity_type TEXT NOT NULL,
        resource_id INTEGER,
        resource_kind TEXT CHECK (resource_kind IN ('Video', 'Resource', 'SyllabusItem', 'Placement')),
        resource_title TEXT,
        metadata JSONB NOT NULL DEFAULT '{}',
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    );",
    )
    .execute(&mut *transaction)
    .await
    {
        return Err(format!("Failed to create activities table: {e}"));
    }

    for index in [
        "CREATE INDEX IF NOT EXISTS activities_user_created ON activities (user_id, created_at DESC);",
        "CREATE INDEX IF NOT EXISTS activities_role_created ON activities (user_role, created_at DESC);",
        "CREATE INDEX IF NOT EXISTS activities_type_created ON activities (activity_type, created_at DESC);",
    ] {
        if let Err(e) = sqlx::query(index).execute(&mut *transaction).await {
            return Err(format!("Failed to create activity index: {e}"));
        }
    }

    if let Err(e) = transaction.commit().await {
        return Err(format!("Could not commit table-creation transaction: {e}"));
    }

    POOL.get_or_init(|| pool);

    Ok(())
}
