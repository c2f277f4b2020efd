use std::sync::{Arc, Mutex};

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tokio::sync::Semaphore;

use crate::config::PlannerConfig;
use crate::planner::{seed_directory_if_needed, seed_if_needed};
use crate::server_handlers::{
    catalog_search_handler, clear_completed_handler, course_details_handler, course_schedule_handler,
    course_schedules_handler, course_search_handler, help_handler, recent_uploads_handler, student_courses_handler,
    student_unmet_handler, transcript_ingest_handler, transcript_preview_handler, transcript_upload_handler,
};
use crate::storage::{open_store, SqliteStore};

/// Estado compartido por todos los workers.
///
/// El store va detrás de un `Mutex` (una sola conexión SQLite, escrituras
/// serializadas) y el semáforo limita el trabajo bloqueante concurrente.
pub struct AppState {
    pub store: Arc<Mutex<SqliteStore>>,
    pub permits: Arc<Semaphore>,
}

impl AppState {
    pub fn new(store: SqliteStore) -> Self {
        AppState {
            store: Arc::new(Mutex::new(store)),
            permits: Arc::new(Semaphore::new(std::cmp::max(1, num_cpus::get()))),
        }
    }
}

/// Route table, shared by `run_server` and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/transcript/preview", web::post().to(transcript_preview_handler))
        .route("/transcript", web::post().to(transcript_ingest_handler))
        .route("/transcript/upload", web::post().to(transcript_upload_handler))
        .route("/students/{id}/courses", web::get().to(student_courses_handler))
        .route("/students/{id}/unmet", web::get().to(student_unmet_handler))
        .route("/completed", web::delete().to(clear_completed_handler))
        .route("/catalog/search", web::get().to(catalog_search_handler))
        .route("/courses/search", web::get().to(course_search_handler))
        .route("/courses/{code}", web::get().to(course_details_handler))
        .route("/courses/{code}/schedules", web::get().to(course_schedules_handler))
        .route("/courses/{code}/schedules/{id}", web::get().to(course_schedule_handler))
        .route("/uploads", web::get().to(recent_uploads_handler))
        .route("/help", web::get().to(help_handler));
}

fn io_error(e: crate::errors::PlannerError) -> std::io::Error {
    std::io::Error::other(e.to_string())
}

pub async fn run_server(config: PlannerConfig) -> std::io::Result<()> {
    let mut store = open_store(&config).map_err(io_error)?;
    if seed_if_needed(&mut store, &config).map_err(io_error)? {
        tracing::info!("catalog tables written");
    }
    if seed_directory_if_needed(&mut store, &config).map_err(io_error)? {
        tracing::info!("course directory tables written");
    }

    let state = web::Data::new(AppState::new(store));
    tracing::info!(bind = %config.bind_addr, db = %config.db_path.display(), "starting HTTP server");

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
