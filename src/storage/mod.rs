//! Storage collaborators for completed courses and the requirement catalog.
//!
//! The core never touches storage; callers pass a store into `planner`.

pub mod db;
pub mod directory;
pub mod insertions;
pub mod memory;

pub use db::{SqliteStore, open_store};
pub use insertions::{UploadRecord, recent_uploads, record_upload};
pub use memory::MemoryStore;

use crate::errors::PlannerError;
use crate::models::{CompletedCourse, RequirementCatalog};

/// Completed-course table. No uniqueness on (student, course): retakes are
/// separate rows.
pub trait CompletedCourseStore {
    fn append(&mut self, course: &CompletedCourse) -> Result<(), PlannerError>;

    fn append_all(&mut self, courses: &[CompletedCourse]) -> Result<usize, PlannerError> {
        for c in courses {
            self.append(c)?;
        }
        Ok(courses.len())
    }

    fn list_all(&self, student_id: &str) -> Result<Vec<CompletedCourse>, PlannerError>;

    /// Removes every row for every student. Returns the number deleted.
    fn clear_all(&mut self) -> Result<usize, PlannerError>;
}

pub trait CatalogSource {
    fn load_catalog(&self) -> Result<RequirementCatalog, PlannerError>;
}

/// Inputs of one evaluation, read together.
#[derive(Debug, Clone)]
pub struct EvaluationSnapshot {
    pub completed: Vec<CompletedCourse>,
    pub catalog: RequirementCatalog,
}

pub trait EvaluationSource: CompletedCourseStore + CatalogSource {
    /// Read courses and catalog as one consistent view. Stores that can
    /// take a read transaction should override this.
    fn snapshot(&self, student_id: &str) -> Result<EvaluationSnapshot, PlannerError> {
        Ok(EvaluationSnapshot { completed: self.list_all(student_id)?, catalog: self.load_catalog()? })
    }
}
