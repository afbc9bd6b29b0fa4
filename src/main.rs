use std::env::var;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::http::header::CONTENT_TYPE;
use axum::routing::{delete, get, post, put};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

mod dashboard;
mod database;
mod endpoints;
mod error;
mod model;
mod report;

/// Route-level cap on the multipart PDF upload.
const UPLOAD_BODY_LIMIT: usize = 12 * 1024 * 1024;

#[tokio::main]
async fn main() {
    // Begin logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).unwrap();

    // The frontend is served from a different origin, so allow everything it
    // sends: GET/POST/PUT/DELETE plus JSON bodies.
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(AllowOrigin::any());

    let app: Router = Router::new();

    // Video library
    let app = app
        .route("/api/videos", get(endpoints::videos::list))
        .route("/api/videos", post(endpoints::videos::create))
        .route("/api/videos/all", get(endpoints::videos::list_all))
        .route("/api/videos/{id}", get(endpoints::videos::get))
        .route("/api/videos/{id}", put(endpoints::videos::update))
        .route("/api/videos/{id}", delete(endpoints::videos::remove))
        .route("/api/videos/{id}/views", post(endpoints::videos::add_view));

    // Study resources and the report renderer
    let app = app
        .route("/api/resources", get(endpoints::resources::list))
        .route("/api/resources", post(endpoints::resources::create))
        .route(
            "/api/resources/upload",
            post(endpoints::resources::upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/resources/{id}", get(endpoints::resources::get))
        .route("/api/resources/{id}", put(endpoints::resources::update))
        .route("/api/resources/{id}", delete(endpoints::resources::remove))
        .route(
            "/api/resources/{id}/download",
            post(endpoints::resources::add_download),
        )
        .route("/api/resources/{id}/pdf", get(endpoints::resources::download_pdf));

    // Syllabus, including the nested-array appends
    let app = app
        .route("/api/syllabus", get(endpoints::syllabus::list))
        .route("/api/syllabus", post(endpoints::syllabus::create))
        .route("/api/syllabus/student", get(endpoints::syllabus::list_published))
        .route("/api/syllabus/{id}", get(endpoints::syllabus::get))
        .route("/api/syllabus/{id}", put(endpoints::syllabus::update))
        .route("/api/syllabus/{id}", delete(endpoints::syllabus::remove))
        .route("/api/syllabus/{id}/ia-unit", post(endpoints::syllabus::add_ia_unit))
        .route(
            "/api/syllabus/{id}/sem-unit",
            post(endpoints::syllabus::add_semester_unit),
        )
        .route("/api/syllabus/{id}/material", post(endpoints::syllabus::add_material));

    // Placement drives
    let app = app
        .route("/api/placements", get(endpoints::placements::list))
        .route("/api/placements", post(endpoints::placements::create))
        .route("/api/placements/{id}", get(endpoints::placements::get))
        .route("/api/placements/{id}", put(endpoints::placements::update))
        .route("/api/placements/{id}", delete(endpoints::placements::remove))
        .route(
            "/api/placements/{id}/register",
            post(endpoints::placements::register),
        );

    // User administration and the growth analytics
    let app = app
        .route("/api/users", get(endpoints::users::list))
        .route("/api/users", post(endpoints::users::create))
        .route("/api/users/stats", get(endpoints::users::stats))
        .route("/api/users/growth", get(endpoints::users::growth));

    // Dashboards and liveness
    let app = app
        .route("/api/student/overview", get(endpoints::student::overview))
        .route("/api/teacher/overview", get(endpoints::teacher::overview))
        .route("/api/health", get(endpoints::health));

    // Uploaded PDFs are served straight from disk
    let app = app
        .nest_service("/uploads", ServeDir::new("uploads"))
        .layer(cors);

    if let Err(e) = tokio::fs::create_dir_all("uploads/resources").await {
        error!("Could not create the upload directory: {e}");
        return;
    }

    if let Err(e) = database::init_database().await {
        error!("Failed to initialize database: {e}");
        return;
    }

    let port = var("PORT").unwrap_or_else(|_| "8000".into());
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(l) => l,
        Err(e) => {
            error!("Could not bind to port {port}: {e}");
            return;
        }
    };

    info!("Listening on port {port}");

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server exited with an error: {e}");
    }
}
