pub mod catalog;
pub mod courses;
pub mod docs;
pub mod students;
pub mod transcript;

pub use catalog::*;
pub use courses::*;
pub use docs::*;
pub use students::*;
pub use transcript::*;

use std::sync::{Arc, PoisonError};

use actix_web::HttpResponse;
use serde_json::json;

use crate::errors::PlannerError;
use crate::server::AppState;
use crate::storage::SqliteStore;

pub(crate) fn bad_request(msg: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({"error": msg}))
}

pub(crate) fn not_found(msg: &str) -> HttpResponse {
    HttpResponse::NotFound().json(json!({"error": msg}))
}

pub(crate) fn error_response(e: &PlannerError) -> HttpResponse {
    if e.is_storage() {
        tracing::error!(error = %e, "storage failure");
    } else {
        tracing::error!(error = %e, "request failed");
    }
    HttpResponse::InternalServerError().json(json!({"error": e.to_string()}))
}

/// Run `f` on the blocking pool, holding one semaphore permit for its
/// whole duration.
pub(crate) async fn run_blocking<T, F>(state: &AppState, f: F) -> Result<T, HttpResponse>
where
    F: FnOnce() -> Result<T, PlannerError> + Send + 'static,
    T: Send + 'static,
{
    let permit = match state.permits.clone().acquire_owned().await {
        Ok(p) => p,
        Err(_) => return Err(HttpResponse::InternalServerError().json(json!({"error": "failed to acquire semaphore"}))),
    };

    let handle = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        f()
    });

    match handle.await {
        Ok(Ok(v)) => Ok(v),
        Ok(Err(e)) => Err(error_response(&e)),
        Err(e) => Err(HttpResponse::InternalServerError().json(json!({"error": format!("task join error: {}", e)}))),
    }
}

/// Same as `run_blocking`, with the store locked for the closure.
pub(crate) async fn with_store<T, F>(state: &AppState, f: F) -> Result<T, HttpResponse>
where
    F: FnOnce(&mut SqliteStore) -> Result<T, PlannerError> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    run_blocking(state, move || {
        // a panicked writer leaves no open transaction behind (rusqlite rolls back on drop)
        let mut guard = store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    })
    .await
}
