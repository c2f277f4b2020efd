use rusqlite::{params, Connection};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::config::PlannerConfig;
use crate::errors::PlannerError;
use crate::models::{
    CategoryDependencies, CompletedCourse, CourseEquivalence, RequirementCatalog, RequirementCatalogEntry,
    DEFAULT_ELECTIVE_CAP,
};

use super::{CatalogSource, CompletedCourseStore, EvaluationSnapshot, EvaluationSource};

const ELECTIVE_CAP_KEY: &str = "electiveCap";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS CompletedCourses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        studentID TEXT NOT NULL,
        courseID TEXT NOT NULL,
        courseName TEXT NOT NULL,
        grade TEXT NOT NULL,
        category TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_completed_student ON CompletedCourses(studentID);

    CREATE TABLE IF NOT EXISTS RequirementCatalog (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        courseID TEXT NOT NULL,
        courseName TEXT NOT NULL,
        category TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS CategoryDependencies (
        category TEXT NOT NULL,
        dependent TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS CourseEquivalences (
        requirement TEXT NOT NULL,
        alternate TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS CatalogSettings (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS GeneralEducationCourses (
        courseCode TEXT NOT NULL,
        courseTitle TEXT,
        units TEXT,
        description TEXT,
        area TEXT,
        subArea TEXT,
        gradingScheme TEXT,
        offeredTerms TEXT
    );

    CREATE TABLE IF NOT EXISTS ComputerScienceCourses (
        courseCode TEXT NOT NULL,
        courseTitle TEXT,
        units TEXT,
        division TEXT,
        description TEXT,
        offeredTerms TEXT,
        isElective TEXT
    );

    CREATE TABLE IF NOT EXISTS CrossListedCourses (
        courseCode TEXT NOT NULL,
        generalEducationArea TEXT,
        majorRequirement TEXT
    );

    CREATE TABLE IF NOT EXISTS CourseSchedules (
        courseCode TEXT NOT NULL,
        scheduleID INTEGER NOT NULL,
        days TEXT,
        time TEXT,
        instructor TEXT,
        location TEXT,
        semester TEXT,
        title TEXT,
        units TEXT,
        prerequisite TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_schedules_code ON CourseSchedules(courseCode);

    CREATE TABLE IF NOT EXISTS TranscriptUploads (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        ts TEXT NOT NULL,
        studentID TEXT NOT NULL,
        extracted INTEGER NOT NULL,
        skipped INTEGER NOT NULL,
        warning TEXT
    );
";

/// SQLite-backed store. One connection, owned; callers that share it
/// across threads wrap it in a mutex, which also serialises writes.
pub struct SqliteStore {
    conn: Connection,
}

impl fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SqliteStore(..)")
    }
}

/// Open the store named by the configuration, creating the parent
/// directory and tables if needed.
pub fn open_store(config: &PlannerConfig) -> Result<SqliteStore, PlannerError> {
    SqliteStore::open(&config.db_path)
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PlannerError> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let store = SqliteStore { conn: Connection::open(path)? };
        store.init_schema()?;
        tracing::info!(path = %path.display(), "sqlite store opened");
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, PlannerError> {
        let store = SqliteStore { conn: Connection::open_in_memory()? };
        store.init_schema()?;
        Ok(store)
    }

    pub fn init_schema(&self) -> Result<(), PlannerError> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    pub fn catalog_is_empty(&self) -> Result<bool, PlannerError> {
        let n: i64 = self.conn.query_row("SELECT COUNT(*) FROM RequirementCatalog", [], |r| r.get(0))?;
        Ok(n == 0)
    }

    /// Replace the catalog tables with `catalog` in one transaction.
    pub fn seed_catalog(&mut self, catalog: &RequirementCatalog) -> Result<(), PlannerError> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(
            "DELETE FROM RequirementCatalog;
             DELETE FROM CategoryDependencies;
             DELETE FROM CourseEquivalences;
             DELETE FROM CatalogSettings;",
        )?;
        {
            let mut stmt =
                tx.prepare("INSERT INTO RequirementCatalog (courseID, courseName, category) VALUES (?1, ?2, ?3)")?;
            for e in &catalog.entries {
                stmt.execute(params![e.course_id, e.course_name, e.category])?;
            }
            let mut stmt = tx.prepare("INSERT INTO CategoryDependencies (category, dependent) VALUES (?1, ?2)")?;
            for (category, dependent) in catalog.dependencies.pairs() {
                stmt.execute(params![category, dependent])?;
            }
            let mut stmt = tx.prepare("INSERT INTO CourseEquivalences (requirement, alternate) VALUES (?1, ?2)")?;
            for eq in &catalog.equivalences {
                stmt.execute(params![eq.requirement, eq.alternate])?;
            }
        }
        tx.execute(
            "INSERT INTO CatalogSettings (key, value) VALUES (?1, ?2)",
            params![ELECTIVE_CAP_KEY, catalog.elective_cap.to_string()],
        )?;
        tx.commit()?;
        tracing::info!(entries = catalog.entries.len(), "catalog seeded");
        Ok(())
    }

    /// Case-insensitive substring search on course ID or name.
    pub fn search_catalog(&self, needle: &str, limit: usize) -> Result<Vec<RequirementCatalogEntry>, PlannerError> {
        let pattern = like_pattern(needle);
        let mut stmt = self.conn.prepare(
            "SELECT courseID, courseName, category FROM RequirementCatalog
             WHERE LOWER(courseID) LIKE ?1 ESCAPE '\\' OR LOWER(courseName) LIKE ?1 ESCAPE '\\'
             ORDER BY courseID, id
             LIMIT ?2",
        )?;
        let rows = stmt.query_map(params![pattern, limit as i64], |row| {
            Ok(RequirementCatalogEntry { course_id: row.get(0)?, course_name: row.get(1)?, category: row.get(2)? })
        })?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }
}

/// `%needle%` for `LIKE ... ESCAPE '\\'`, lower-cased, with the LIKE
/// metacharacters escaped.
pub(crate) fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .trim()
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn read_courses(conn: &Connection, student_id: &str) -> Result<Vec<CompletedCourse>, PlannerError> {
    let mut stmt = conn.prepare(
        "SELECT studentID, courseID, courseName, grade, category FROM CompletedCourses
         WHERE studentID = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![student_id], |row| {
        Ok(CompletedCourse {
            student_id: row.get(0)?,
            course_id: row.get(1)?,
            course_name: row.get(2)?,
            grade: row.get(3)?,
            category: row.get(4)?,
        })
    })?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Insert completed-course rows on `conn`; the caller owns the transaction.
pub(crate) fn insert_courses(conn: &Connection, courses: &[CompletedCourse]) -> Result<usize, PlannerError> {
    let mut stmt = conn.prepare(
        "INSERT INTO CompletedCourses (studentID, courseID, courseName, grade, category)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for c in courses {
        stmt.execute(params![c.student_id, c.course_id, c.course_name, c.grade, c.category])?;
    }
    Ok(courses.len())
}

fn read_catalog(conn: &Connection) -> Result<RequirementCatalog, PlannerError> {
    let mut stmt = conn.prepare("SELECT courseID, courseName, category FROM RequirementCatalog ORDER BY id")?;
    let entries = stmt
        .query_map([], |row| {
            Ok(RequirementCatalogEntry { course_id: row.get(0)?, course_name: row.get(1)?, category: row.get(2)? })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut dependencies = CategoryDependencies::new();
    let mut stmt = conn.prepare("SELECT category, dependent FROM CategoryDependencies ORDER BY rowid")?;
    let pairs = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?;
    for p in pairs {
        let (category, dependent) = p?;
        dependencies.insert(&category, &dependent);
    }

    let mut stmt = conn.prepare("SELECT requirement, alternate FROM CourseEquivalences ORDER BY rowid")?;
    let equivalences = stmt
        .query_map([], |row| Ok(CourseEquivalence { requirement: row.get(0)?, alternate: row.get(1)? }))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare("SELECT value FROM CatalogSettings WHERE key = ?1")?;
    let mut rows = stmt.query(params![ELECTIVE_CAP_KEY])?;
    let elective_cap = match rows.next()? {
        Some(row) => row.get::<_, String>(0)?.trim().parse::<usize>().unwrap_or(DEFAULT_ELECTIVE_CAP),
        None => DEFAULT_ELECTIVE_CAP,
    };

    Ok(RequirementCatalog { entries, dependencies, equivalences, elective_cap })
}

impl CompletedCourseStore for SqliteStore {
    fn append(&mut self, course: &CompletedCourse) -> Result<(), PlannerError> {
        self.conn.execute(
            "INSERT INTO CompletedCourses (studentID, courseID, courseName, grade, category)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![course.student_id, course.course_id, course.course_name, course.grade, course.category],
        )?;
        tracing::debug!(course_id = %course.course_id, "completed course inserted");
        Ok(())
    }

    /// All rows or none.
    fn append_all(&mut self, courses: &[CompletedCourse]) -> Result<usize, PlannerError> {
        let tx = self.conn.transaction()?;
        let n = insert_courses(&tx, courses)?;
        tx.commit()?;
        Ok(n)
    }

    fn list_all(&self, student_id: &str) -> Result<Vec<CompletedCourse>, PlannerError> {
        read_courses(&self.conn, student_id)
    }

    fn clear_all(&mut self) -> Result<usize, PlannerError> {
        let n = self.conn.execute("DELETE FROM CompletedCourses", [])?;
        tracing::info!(deleted = n, "completed courses cleared");
        Ok(n)
    }
}

impl CatalogSource for SqliteStore {
    fn load_catalog(&self) -> Result<RequirementCatalog, PlannerError> {
        read_catalog(&self.conn)
    }
}

impl EvaluationSource for SqliteStore {
    /// Both reads happen inside one transaction so a concurrent writer can't
    /// hand the evaluator a half-updated view.
    fn snapshot(&self, student_id: &str) -> Result<EvaluationSnapshot, PlannerError> {
        let tx = self.conn.unchecked_transaction()?;
        let completed = read_courses(&tx, student_id)?;
        let catalog = read_catalog(&tx)?;
        tx.commit()?;
        Ok(EvaluationSnapshot { completed, catalog })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(student: &str, id: &str, grade: &str) -> CompletedCourse {
        CompletedCourse {
            student_id: student.into(),
            course_id: id.into(),
            course_name: format!("{} name", id),
            grade: grade.into(),
            category: "Computer Science".into(),
        }
    }

    #[test]
    fn retakes_are_separate_rows() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store.append(&course("1", "CSC 100", "D")).unwrap();
        store.append(&course("1", "CSC 100", "B")).unwrap();
        store.append(&course("2", "CSC 100", "A")).unwrap();
        let rows = store.list_all("1").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].grade, "D");
        assert_eq!(rows[1].grade, "B");
    }

    #[test]
    fn clear_all_removes_every_student() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.append_all(&[course("1", "CSC 100", "A"), course("2", "ENG 110", "B")]).unwrap(), 2);
        assert_eq!(store.clear_all().unwrap(), 2);
        assert!(store.list_all("1").unwrap().is_empty());
        assert!(store.list_all("2").unwrap().is_empty());
    }

    #[test]
    fn catalog_round_trips_through_tables() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        assert!(store.catalog_is_empty().unwrap());
        let mut catalog = RequirementCatalog::with_entries(vec![
            RequirementCatalogEntry::new("BIO 102", "General Biology", "B - B2"),
            RequirementCatalogEntry::new("MAT 361", "Linear Algebra", "Upper"),
        ]);
        catalog.dependencies.insert("B - B2", "B - B3");
        catalog.equivalences.push(CourseEquivalence::new("MAT 361", "CSC 371"));
        catalog.elective_cap = 3;

        store.seed_catalog(&catalog).unwrap();
        assert!(!store.catalog_is_empty().unwrap());
        assert_eq!(store.load_catalog().unwrap(), catalog);

        // reseeding replaces rather than appends
        store.seed_catalog(&catalog).unwrap();
        assert_eq!(store.load_catalog().unwrap().entries.len(), 2);
    }

    #[test]
    fn search_escapes_like_wildcards() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store
            .seed_catalog(&RequirementCatalog::with_entries(vec![
                RequirementCatalogEntry::new("CSC 121", "Intro to CS", "Lower"),
                RequirementCatalogEntry::new("BIO 102", "General Biology", "B - B2"),
            ]))
            .unwrap();
        assert_eq!(store.search_catalog("csc", 10).unwrap().len(), 1);
        assert_eq!(store.search_catalog("biology", 10).unwrap()[0].course_id, "BIO 102");
        assert!(store.search_catalog("%", 10).unwrap().is_empty());
    }

    #[test]
    fn snapshot_reads_courses_and_catalog() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        store
            .seed_catalog(&RequirementCatalog::with_entries(vec![RequirementCatalogEntry::new(
                "CSC 100",
                "Fundamentals",
                "Lower",
            )]))
            .unwrap();
        store.append(&course("9", "CSC 100", "A")).unwrap();
        let snap = store.snapshot("9").unwrap();
        assert_eq!(snap.completed.len(), 1);
        assert_eq!(snap.catalog.entries.len(), 1);
    }
}
