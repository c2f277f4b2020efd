use chrono::Utc;
use rusqlite::{params, Connection};
use serde::Serialize;

use crate::errors::PlannerError;
use crate::transcript::TranscriptExtraction;

use super::db::insert_courses;
use super::SqliteStore;

/// One row of the `TranscriptUploads` audit table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    pub id: i64,
    pub ts: String,
    pub student_id: String,
    pub extracted: i64,
    pub skipped: i64,
    pub warning: Option<String>,
}

fn insert_upload(
    conn: &Connection,
    ts: &str,
    student_id: &str,
    extracted: usize,
    skipped: usize,
    warning: Option<&str>,
) -> Result<i64, PlannerError> {
    conn.execute(
        "INSERT INTO TranscriptUploads (ts, studentID, extracted, skipped, warning) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![ts, student_id, extracted as i64, skipped as i64, warning],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert an audit row for a processed transcript. Returns the row id.
pub fn record_upload(
    store: &SqliteStore,
    student_id: &str,
    extracted: usize,
    skipped: usize,
    warning: Option<&str>,
) -> Result<i64, PlannerError> {
    let ts = Utc::now().to_rfc3339();
    insert_upload(store.connection(), &ts, student_id, extracted, skipped, warning)
}

impl SqliteStore {
    /// Course rows plus one audit row per extraction, in a single
    /// transaction: either every extraction is stored or none is.
    pub fn record_extractions(&mut self, extractions: &[TranscriptExtraction]) -> Result<usize, PlannerError> {
        let ts = Utc::now().to_rfc3339();
        let tx = self.connection_mut().transaction()?;
        let mut stored = 0;
        for x in extractions {
            stored += insert_courses(&tx, &x.courses)?;
            insert_upload(&tx, &ts, &x.student_id, x.courses.len(), x.skipped.len(), x.warning.as_deref())?;
        }
        tx.commit()?;
        tracing::debug!(transcripts = extractions.len(), stored, "transcripts stored");
        Ok(stored)
    }
}

/// Most recent uploads first.
pub fn recent_uploads(store: &SqliteStore, limit: usize) -> Result<Vec<UploadRecord>, PlannerError> {
    let mut stmt = store.connection().prepare(
        "SELECT id, ts, studentID, extracted, skipped, warning FROM TranscriptUploads ORDER BY id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit as i64], |row| {
        Ok(UploadRecord {
            id: row.get(0)?,
            ts: row.get(1)?,
            student_id: row.get(2)?,
            extracted: row.get(3)?,
            skipped: row.get(4)?,
            warning: row.get(5)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uploads_are_listed_newest_first() {
        let store = SqliteStore::open_in_memory().unwrap();
        record_upload(&store, "1", 3, 0, None).unwrap();
        let id = record_upload(&store, "2", 0, 1, Some("no course records")).unwrap();

        let rows = recent_uploads(&store, 10).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, id);
        assert_eq!(rows[0].warning.as_deref(), Some("no course records"));
        assert_eq!(rows[1].extracted, 3);
        assert!(chrono::DateTime::parse_from_rfc3339(&rows[1].ts).is_ok());

        assert_eq!(recent_uploads(&store, 1).unwrap().len(), 1);
    }

    #[test]
    fn failed_audit_insert_rolls_back_course_rows() {
        use crate::storage::CompletedCourseStore;
        use crate::transcript::extract_transcript;

        let mut store = SqliteStore::open_in_memory().unwrap();
        let first = extract_transcript("Student ID: 1\nCSC 100 Fundamentals 3.000 A");
        let second = extract_transcript("Student ID: 2\nENG 110 Composition 3.000 B");
        store.connection().execute_batch("DROP TABLE TranscriptUploads").unwrap();

        assert!(store.record_extractions(&[first, second]).is_err());
        assert!(store.list_all("1").unwrap().is_empty());
        assert!(store.list_all("2").unwrap().is_empty());
    }

    #[test]
    fn extractions_and_audit_rows_are_stored_together() {
        use crate::storage::CompletedCourseStore;
        use crate::transcript::extract_transcript;

        let mut store = SqliteStore::open_in_memory().unwrap();
        let x = extract_transcript("Student ID: 3\nCSC 100 Fundamentals 3.000 A\nCSC 100 Fundamentals 3.000 B");
        assert_eq!(store.record_extractions(&[x]).unwrap(), 2);
        assert_eq!(store.list_all("3").unwrap().len(), 2);
        let rows = recent_uploads(&store, 10).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].extracted, 2);
    }
}
