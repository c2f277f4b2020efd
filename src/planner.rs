//! Orquestación: conecta el pipeline y el evaluador (puros) con el
//! almacenamiento que recibe explícitamente el llamador.

use serde::Serialize;

use crate::catalog::{default_catalog, default_directory, load_catalog_file, read_directory_json};
use crate::config::PlannerConfig;
use crate::errors::PlannerError;
use crate::models::{CompletedCourse, CourseDirectory, RequirementCatalog, UnmetRequirement};
use crate::requirements::{evaluate_unmet, sort_for_display};
use crate::storage::{CompletedCourseStore, EvaluationSource, SqliteStore};
use crate::transcript::{extract_transcript, TranscriptExtraction};

/// What the caller reports back after a transcript was processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    pub student_id: String,
    pub extracted: usize,
    pub skipped: usize,
    pub courses: Vec<CompletedCourse>,
    pub warning: Option<String>,
}

impl From<TranscriptExtraction> for IngestReport {
    fn from(x: TranscriptExtraction) -> Self {
        IngestReport {
            student_id: x.student_id,
            extracted: x.courses.len(),
            skipped: x.skipped.len(),
            courses: x.courses,
            warning: x.warning,
        }
    }
}

/// Run the pipeline without storing anything (confirmation step).
pub fn preview_transcript(raw: &str) -> IngestReport {
    extract_transcript(raw).into()
}

/// Run the pipeline and append every extracted course to `store`.
pub fn ingest_transcript<S>(store: &mut S, raw: &str) -> Result<IngestReport, PlannerError>
where
    S: CompletedCourseStore + ?Sized,
{
    let extraction = extract_transcript(raw);
    if !extraction.courses.is_empty() {
        store.append_all(&extraction.courses)?;
    }
    Ok(extraction.into())
}

/// Extract every transcript and store courses plus audit rows in one
/// transaction. Nothing is stored when any write fails.
pub fn ingest_and_record<T>(store: &mut SqliteStore, transcripts: &[T]) -> Result<Vec<IngestReport>, PlannerError>
where
    T: AsRef<str>,
{
    let extractions: Vec<TranscriptExtraction> = transcripts.iter().map(|t| extract_transcript(t.as_ref())).collect();
    store.record_extractions(&extractions)?;
    for x in &extractions {
        if let Some(w) = &x.warning {
            tracing::warn!(student_id = %x.student_id, warning = %w, "transcript stored nothing");
        }
    }
    Ok(extractions.into_iter().map(IngestReport::from).collect())
}

/// Unmet requirements for one student, sorted for display.
pub fn unmet_requirements<S>(source: &S, student_id: &str) -> Result<Vec<UnmetRequirement>, PlannerError>
where
    S: EvaluationSource + ?Sized,
{
    let snapshot = source.snapshot(student_id)?;
    let mut unmet = evaluate_unmet(&snapshot.completed, &snapshot.catalog);
    sort_for_display(&mut unmet);
    Ok(unmet)
}

pub fn completed_courses<S>(store: &S, student_id: &str) -> Result<Vec<CompletedCourse>, PlannerError>
where
    S: CompletedCourseStore + ?Sized,
{
    store.list_all(student_id)
}

/// Clear the completed-course table for every student.
pub fn reset<S>(store: &mut S) -> Result<usize, PlannerError>
where
    S: CompletedCourseStore + ?Sized,
{
    store.clear_all()
}

/// Catalog named by `PLANNER_CATALOG`, or the bundled seed.
pub fn load_configured_catalog(config: &PlannerConfig) -> Result<RequirementCatalog, PlannerError> {
    match &config.catalog_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading catalog seed");
            load_catalog_file(path)
        }
        None => default_catalog(),
    }
}

/// Seed the catalog tables when they are empty or a reseed was requested.
/// Returns whether the tables were written.
pub fn seed_if_needed(store: &mut SqliteStore, config: &PlannerConfig) -> Result<bool, PlannerError> {
    if !config.reseed_catalog && !store.catalog_is_empty()? {
        tracing::debug!("catalog already present, not reseeding");
        return Ok(false);
    }
    let catalog = load_configured_catalog(config)?;
    store.seed_catalog(&catalog)?;
    Ok(true)
}

/// Course directory named by `PLANNER_DIRECTORY`, or the bundled one.
pub fn load_configured_directory(config: &PlannerConfig) -> Result<CourseDirectory, PlannerError> {
    match &config.directory_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading course directory");
            read_directory_json(path)
        }
        None => default_directory(),
    }
}

/// Same policy as `seed_if_needed`, for the course directory tables.
pub fn seed_directory_if_needed(store: &mut SqliteStore, config: &PlannerConfig) -> Result<bool, PlannerError> {
    if !config.reseed_catalog && !store.directory_is_empty()? {
        return Ok(false);
    }
    let directory = load_configured_directory(config)?;
    store.seed_directory(&directory)?;
    Ok(true)
}
