// Consultas del directorio de cursos (fichas y horarios).

use rusqlite::{params, OptionalExtension, Row};

use crate::catalog::canonical_course_id;
use crate::errors::PlannerError;
use crate::models::{
    ComputerScienceCourse, CourseDetails, CourseDirectory, CourseSchedule, CrossListedCourse, DirectoryTable,
    GeneralEducationCourse,
};

use super::db::{like_pattern, SqliteStore};

const SCHEDULE_COLUMNS: &str =
    "courseCode, scheduleID, days, time, instructor, location, semester, title, units, prerequisite";

fn schedule_from_row(row: &Row<'_>) -> rusqlite::Result<CourseSchedule> {
    Ok(CourseSchedule {
        course_code: row.get(0)?,
        schedule_id: row.get(1)?,
        days: row.get(2)?,
        time: row.get(3)?,
        instructor: row.get(4)?,
        location: row.get(5)?,
        semester: row.get(6)?,
        title: row.get(7)?,
        units: row.get(8)?,
        prerequisite: row.get(9)?,
    })
}

impl SqliteStore {
    pub fn directory_is_empty(&self) -> Result<bool, PlannerError> {
        for t in DirectoryTable::ALL {
            let sql = format!("SELECT COUNT(*) FROM {}", t.table_name());
            let n: i64 = self.connection().query_row(&sql, [], |r| r.get(0))?;
            if n > 0 {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Replace the four directory tables with `directory` in one transaction.
    pub fn seed_directory(&mut self, directory: &CourseDirectory) -> Result<(), PlannerError> {
        let tx = self.connection_mut().transaction()?;
        for t in DirectoryTable::ALL {
            tx.execute(&format!("DELETE FROM {}", t.table_name()), [])?;
        }
        {
            let mut stmt = tx.prepare(
                "INSERT INTO GeneralEducationCourses
                 (courseCode, courseTitle, units, description, area, subArea, gradingScheme, offeredTerms)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )?;
            for c in &directory.general_education {
                stmt.execute(params![
                    c.course_code,
                    c.course_title,
                    c.units,
                    c.description,
                    c.area,
                    c.sub_area,
                    c.grading_scheme,
                    c.offered_terms
                ])?;
            }
            let mut stmt = tx.prepare(
                "INSERT INTO ComputerScienceCourses
                 (courseCode, courseTitle, units, division, description, offeredTerms, isElective)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for c in &directory.computer_science {
                stmt.execute(params![
                    c.course_code,
                    c.course_title,
                    c.units,
                    c.division,
                    c.description,
                    c.offered_terms,
                    c.is_elective
                ])?;
            }
            let mut stmt = tx.prepare(
                "INSERT INTO CrossListedCourses (courseCode, generalEducationArea, majorRequirement)
                 VALUES (?1, ?2, ?3)",
            )?;
            for c in &directory.cross_listed {
                stmt.execute(params![c.course_code, c.general_education_area, c.major_requirement])?;
            }
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO CourseSchedules ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                SCHEDULE_COLUMNS
            ))?;
            for s in &directory.schedules {
                stmt.execute(params![
                    s.course_code,
                    s.schedule_id,
                    s.days,
                    s.time,
                    s.instructor,
                    s.location,
                    s.semester,
                    s.title,
                    s.units,
                    s.prerequisite
                ])?;
            }
        }
        tx.commit()?;
        tracing::info!(
            general_education = directory.general_education.len(),
            computer_science = directory.computer_science.len(),
            cross_listed = directory.cross_listed.len(),
            schedules = directory.schedules.len(),
            "course directory seeded"
        );
        Ok(())
    }

    /// Distinct course codes in `table` containing `needle`, case-insensitive.
    pub fn search_course_codes(
        &self,
        table: DirectoryTable,
        needle: &str,
        limit: usize,
    ) -> Result<Vec<String>, PlannerError> {
        let sql = format!(
            "SELECT DISTINCT courseCode FROM {} WHERE LOWER(courseCode) LIKE ?1 ESCAPE '\\'
             ORDER BY courseCode LIMIT ?2",
            table.table_name()
        );
        let mut stmt = self.connection().prepare(&sql)?;
        let rows = stmt.query_map(params![like_pattern(needle), limit as i64], |r| r.get::<_, String>(0))?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    /// Schedule rows whose code contains `needle`, by code then schedule ID.
    pub fn search_course_schedules(&self, needle: &str) -> Result<Vec<CourseSchedule>, PlannerError> {
        let sql = format!(
            "SELECT DISTINCT {} FROM CourseSchedules WHERE LOWER(courseCode) LIKE ?1 ESCAPE '\\'
             ORDER BY courseCode, scheduleID",
            SCHEDULE_COLUMNS
        );
        let mut stmt = self.connection().prepare(&sql)?;
        let rows = stmt.query_map(params![like_pattern(needle)], schedule_from_row)?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    pub fn fetch_schedule(&self, code: &str, schedule_id: i64) -> Result<Option<CourseSchedule>, PlannerError> {
        let sql = format!(
            "SELECT {} FROM CourseSchedules WHERE courseCode = ?1 AND scheduleID = ?2 LIMIT 1",
            SCHEDULE_COLUMNS
        );
        let row = self
            .connection()
            .query_row(&sql, params![canonical_course_id(code), schedule_id], schedule_from_row)
            .optional()?;
        Ok(row)
    }

    /// Rows for `code` from the three detail tables; all `None` when the
    /// directory does not know the course.
    pub fn course_details(&self, code: &str) -> Result<CourseDetails, PlannerError> {
        let code = canonical_course_id(code);
        let conn = self.connection();

        let general_education = conn
            .query_row(
                "SELECT courseCode, courseTitle, units, description, area, subArea, gradingScheme, offeredTerms
                 FROM GeneralEducationCourses WHERE courseCode = ?1 LIMIT 1",
                params![code],
                |r| {
                    Ok(GeneralEducationCourse {
                        course_code: r.get(0)?,
                        course_title: r.get(1)?,
                        units: r.get(2)?,
                        description: r.get(3)?,
                        area: r.get(4)?,
                        sub_area: r.get(5)?,
                        grading_scheme: r.get(6)?,
                        offered_terms: r.get(7)?,
                    })
                },
            )
            .optional()?;

        let computer_science = conn
            .query_row(
                "SELECT courseCode, courseTitle, units, division, description, offeredTerms, isElective
                 FROM ComputerScienceCourses WHERE courseCode = ?1 LIMIT 1",
                params![code],
                |r| {
                    Ok(ComputerScienceCourse {
                        course_code: r.get(0)?,
                        course_title: r.get(1)?,
                        units: r.get(2)?,
                        division: r.get(3)?,
                        description: r.get(4)?,
                        offered_terms: r.get(5)?,
                        is_elective: r.get(6)?,
                    })
                },
            )
            .optional()?;

        let cross_listed = conn
            .query_row(
                "SELECT courseCode, generalEducationArea, majorRequirement
                 FROM CrossListedCourses WHERE courseCode = ?1 LIMIT 1",
                params![code],
                |r| {
                    Ok(CrossListedCourse {
                        course_code: r.get(0)?,
                        general_education_area: r.get(1)?,
                        major_requirement: r.get(2)?,
                    })
                },
            )
            .optional()?;

        Ok(CourseDetails { course_code: code, general_education, computer_science, cross_listed })
    }
}
