use crate::errors::PlannerError;
use crate::models::{CompletedCourse, RequirementCatalog};

use super::{CatalogSource, CompletedCourseStore, EvaluationSource};

/// Vector-backed store for tests and embedding without SQLite.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    courses: Vec<CompletedCourse>,
    catalog: RequirementCatalog,
}

impl MemoryStore {
    pub fn new(catalog: RequirementCatalog) -> Self {
        MemoryStore { courses: Vec::new(), catalog }
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl CompletedCourseStore for MemoryStore {
    fn append(&mut self, course: &CompletedCourse) -> Result<(), PlannerError> {
        self.courses.push(course.clone());
        Ok(())
    }

    fn list_all(&self, student_id: &str) -> Result<Vec<CompletedCourse>, PlannerError> {
        Ok(self.courses.iter().filter(|c| c.student_id == student_id).cloned().collect())
    }

    fn clear_all(&mut self) -> Result<usize, PlannerError> {
        let n = self.courses.len();
        self.courses.clear();
        Ok(n)
    }
}

impl CatalogSource for MemoryStore {
    fn load_catalog(&self) -> Result<RequirementCatalog, PlannerError> {
        Ok(self.catalog.clone())
    }
}

impl EvaluationSource for MemoryStore {}
