use std::collections::HashMap;

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::catalog::search_catalog;
use crate::server::AppState;
use crate::storage::CatalogSource;

use super::{bad_request, with_store};

const DEFAULT_SEARCH_LIMIT: usize = 20;

/// GET /catalog/search?q=...&limit=...
///
/// LIKE search in SQLite first; when that finds nothing the whole catalog
/// is ranked by name similarity.
pub async fn catalog_search_handler(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let q = match query.get("q").map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
        Some(q) => q,
        None => return bad_request("q is required in query"),
    };
    let limit = query.get("limit").and_then(|s| s.parse::<usize>().ok()).unwrap_or(DEFAULT_SEARCH_LIMIT);

    let needle = q.clone();
    let result = with_store(&state, move |store| {
        let direct = store.search_catalog(&needle, limit)?;
        if !direct.is_empty() {
            return Ok(direct);
        }
        let catalog = store.load_catalog()?;
        Ok(search_catalog(&catalog.entries, &needle, limit).into_iter().cloned().collect())
    })
    .await;

    match result {
        Ok(results) => HttpResponse::Ok().json(json!({"query": q, "results": results})),
        Err(resp) => resp,
    }
}
