use std::collections::HashMap;

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::planner::{completed_courses, reset, unmet_requirements};
use crate::server::AppState;
use crate::storage::recent_uploads;

use super::with_store;

const DEFAULT_UPLOAD_LIMIT: usize = 10;

pub async fn student_courses_handler(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let student_id = path.into_inner();
    let sid = student_id.clone();
    match with_store(&state, move |store| completed_courses(&*store, &sid)).await {
        Ok(courses) => HttpResponse::Ok().json(json!({"studentId": student_id, "courses": courses})),
        Err(resp) => resp,
    }
}

/// GET /students/{id}/unmet: ordenado por categoría y luego por código.
pub async fn student_unmet_handler(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let student_id = path.into_inner();
    let sid = student_id.clone();
    match with_store(&state, move |store| unmet_requirements(&*store, &sid)).await {
        Ok(unmet) => HttpResponse::Ok().json(json!({
            "studentId": student_id,
            "count": unmet.len(),
            "unmet": unmet
        })),
        Err(resp) => resp,
    }
}

/// DELETE /completed: borra los cursos de todos los estudiantes.
pub async fn clear_completed_handler(state: web::Data<AppState>) -> impl Responder {
    match with_store(&state, |store| reset(store)).await {
        Ok(deleted) => HttpResponse::Ok().json(json!({"deleted": deleted})),
        Err(resp) => resp,
    }
}

/// Query param: ?limit=10
pub async fn recent_uploads_handler(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let limit = query.get("limit").and_then(|s| s.parse::<usize>().ok()).unwrap_or(DEFAULT_UPLOAD_LIMIT);
    match with_store(&state, move |store| recent_uploads(store, limit)).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(resp) => resp,
    }
}
