use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use futures_util::stream::StreamExt;
use serde::Serialize;

use crate::planner::{ingest_and_record, preview_transcript, IngestReport};
use crate::server::AppState;

use super::{bad_request, run_blocking, with_store};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadedTranscript {
    filename: String,
    #[serde(flatten)]
    report: IngestReport,
}

/// POST /transcript/preview: extraction only, nothing is stored.
pub async fn transcript_preview_handler(state: web::Data<AppState>, body: String) -> impl Responder {
    if body.trim().is_empty() {
        return bad_request("transcript text is empty");
    }
    match run_blocking(&state, move || Ok(preview_transcript(&body))).await {
        Ok(report) => HttpResponse::Ok().json(report),
        Err(resp) => resp,
    }
}

/// POST /transcript: body is the pasted transcript text.
pub async fn transcript_ingest_handler(state: web::Data<AppState>, body: String) -> impl Responder {
    if body.trim().is_empty() {
        return bad_request("transcript text is empty");
    }
    match with_store(&state, move |store| ingest_and_record(store, &[body])).await {
        Ok(mut reports) => HttpResponse::Ok().json(reports.pop()),
        Err(resp) => resp,
    }
}

/// POST /transcript/upload: one plain-text transcript per multipart part.
pub async fn transcript_upload_handler(state: web::Data<AppState>, mut payload: Multipart) -> impl Responder {
    let mut files: Vec<(String, String)> = Vec::new();
    while let Some(field_res) = payload.next().await {
        let mut field = match field_res {
            Ok(f) => f,
            Err(e) => return bad_request(&format!("multipart field error: {}", e)),
        };
        let filename = field
            .content_disposition()
            .get_filename()
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("upload-{}.txt", chrono::Utc::now().timestamp_millis()));

        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            match chunk {
                Ok(b) => bytes.extend_from_slice(&b),
                Err(e) => return bad_request(&format!("upload stream error: {}", e)),
            }
        }

        let text = String::from_utf8_lossy(&bytes).into_owned();
        if text.trim().is_empty() {
            tracing::debug!(filename = %filename, "ignoring empty upload part");
            continue;
        }
        files.push((filename, text));
    }

    if files.is_empty() {
        return bad_request("no transcript text in upload");
    }

    let (names, texts): (Vec<String>, Vec<String>) = files.into_iter().unzip();
    let result = with_store(&state, move |store| ingest_and_record(store, &texts)).await;

    match result {
        Ok(reports) => {
            let files: Vec<UploadedTranscript> = names
                .into_iter()
                .zip(reports)
                .map(|(filename, report)| UploadedTranscript { filename, report })
                .collect();
            HttpResponse::Ok().json(serde_json::json!({"status": "ok", "files": files}))
        }
        Err(resp) => resp,
    }
}
