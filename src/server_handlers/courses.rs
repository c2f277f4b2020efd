use std::collections::HashMap;

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::models::DirectoryTable;
use crate::server::AppState;

use super::{bad_request, not_found, with_store};

const DEFAULT_CODE_LIMIT: usize = 50;

/// GET /courses/search?table=...&q=...&limit=...
///
/// `table` defaults to GeneralEducationCourses; an empty `q` lists every code.
pub async fn course_search_handler(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let table = match query.get("table") {
        Some(name) => match DirectoryTable::from_name(name) {
            Some(t) => t,
            None => return bad_request(&format!("unknown table '{}'", name)),
        },
        None => DirectoryTable::GeneralEducation,
    };
    let q = query.get("q").map(|s| s.trim().to_string()).unwrap_or_default();
    let limit = query.get("limit").and_then(|s| s.parse::<usize>().ok()).unwrap_or(DEFAULT_CODE_LIMIT);

    let needle = q.clone();
    match with_store(&state, move |store| store.search_course_codes(table, &needle, limit)).await {
        Ok(codes) => HttpResponse::Ok().json(json!({"table": table.table_name(), "query": q, "results": codes})),
        Err(resp) => resp,
    }
}

/// GET /courses/{code}
pub async fn course_details_handler(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let code = path.into_inner();
    match with_store(&state, move |store| store.course_details(&code)).await {
        Ok(details) if details.is_empty() => not_found(&format!("course '{}' not found", details.course_code)),
        Ok(details) => HttpResponse::Ok().json(details),
        Err(resp) => resp,
    }
}

/// GET /courses/{code}/schedules
pub async fn course_schedules_handler(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let code = path.into_inner();
    let needle = code.clone();
    match with_store(&state, move |store| store.search_course_schedules(&needle)).await {
        Ok(rows) => HttpResponse::Ok().json(json!({"courseCode": code.trim(), "schedules": rows})),
        Err(resp) => resp,
    }
}

/// GET /courses/{code}/schedules/{id}
pub async fn course_schedule_handler(state: web::Data<AppState>, path: web::Path<(String, i64)>) -> impl Responder {
    let (code, id) = path.into_inner();
    let lookup = code.clone();
    match with_store(&state, move |store| store.fetch_schedule(&lookup, id)).await {
        Ok(Some(schedule)) => HttpResponse::Ok().json(schedule),
        Ok(None) => not_found(&format!("schedule {} of '{}' not found", id, code.trim())),
        Err(resp) => resp,
    }
}
