//! Pipeline de extracción: texto del certificado -> cursos completados.
//!
//! Submódulos:
//! - `normalize`: limpieza de líneas
//! - `student`: localización del ID de estudiante
//! - `segment`: límites de registros (escáner de dos estados) y segmentos
//! - `parse`: lectura de campos con regex
//! - `classify`: categoría gruesa por prefijo
//!
//! Función pura de su entrada: sin I/O ni estado compartido.

pub mod classify;
pub mod normalize;
pub mod parse;
pub mod segment;
pub mod student;

pub use classify::{classify_course, TranscriptCategory};
pub use normalize::normalize_lines;
pub use parse::{parse_course_segment, ParsedCourseLine};
pub use segment::{split_segments, RawRecord, RecordKind, RecordScanner};
pub use student::locate_student_id;

use serde::Serialize;

use crate::models::CompletedCourse;

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptExtraction {
    pub student_id: String,
    /// In order of first appearance; retakes are kept.
    pub courses: Vec<CompletedCourse>,
    /// Segments that looked like course rows but could not be parsed.
    pub skipped: Vec<String>,
    /// Set when non-empty input produced no course at all.
    pub warning: Option<String>,
}

impl TranscriptExtraction {
    pub fn extracted(&self) -> usize {
        self.courses.len()
    }
}

pub fn extract_transcript(raw: &str) -> TranscriptExtraction {
    let lines = normalize_lines(raw);
    let student_id = locate_student_id(lines.iter().copied());

    let mut courses = Vec::new();
    let mut skipped = Vec::new();

    for record in RecordScanner::new(lines.iter().copied()) {
        for segment in split_segments(&record.text) {
            match parse_course_segment(segment) {
                Some(parsed) => courses.push(to_completed_course(&student_id, parsed)),
                None => {
                    tracing::debug!(segment, "skipping unparseable transcript segment");
                    skipped.push(segment.to_string());
                }
            }
        }
    }

    let warning = if courses.is_empty() && !lines.is_empty() {
        tracing::warn!(lines = lines.len(), "no course records recognised in non-empty transcript");
        Some("no course records were recognised in the transcript".to_string())
    } else {
        None
    };

    tracing::info!(
        student_id = %student_id,
        extracted = courses.len(),
        skipped = skipped.len(),
        "transcript extracted"
    );

    TranscriptExtraction { student_id, courses, skipped, warning }
}

fn to_completed_course(student_id: &str, parsed: ParsedCourseLine) -> CompletedCourse {
    let category = classify_course(&parsed.course_id).as_str().to_string();
    CompletedCourse {
        student_id: student_id.to_string(),
        course_id: parsed.course_id,
        course_name: parsed.course_name,
        grade: parsed.grade,
        category,
    }
}
