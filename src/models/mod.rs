// Estructuras de datos principales

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod directory;

pub use directory::*;

/// Grade stored when a transcript segment carries no grade token.
pub const MISSING_GRADE: &str = "N/A";

/// Grades that count toward fulfilling a requirement. "N/A" is included on
/// purpose: in-progress rows show up without a grade.
pub const PASSING_GRADES: [&str; 8] = ["A", "A-", "B+", "B", "B-", "C+", "C", MISSING_GRADE];

pub const UPPER_DIVISION: &str = "Upper";
pub const LOWER_DIVISION: &str = "Lower";
pub const ELECTIVE: &str = "Elective";

/// Major categories; every other category tag is General Education.
pub const MAJOR_CATEGORIES: [&str; 3] = [UPPER_DIVISION, LOWER_DIVISION, ELECTIVE];

/// Default number of distinct elective matches that satisfies every elective.
pub const DEFAULT_ELECTIVE_CAP: usize = 2;

pub fn is_passing_grade(grade: &str) -> bool {
    let g = grade.trim();
    PASSING_GRADES.iter().any(|p| *p == g)
}

pub fn is_major_category(category: &str) -> bool {
    MAJOR_CATEGORIES.contains(&category)
}

/// A course found on a student's transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedCourse {
    pub student_id: String,
    /// Canonical `AAA ###` form.
    pub course_id: String,
    pub course_name: String,
    pub grade: String,
    pub category: String,
}

impl CompletedCourse {
    pub fn is_passing(&self) -> bool {
        is_passing_grade(&self.grade)
    }
}

/// Row of the degree requirement catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementCatalogEntry {
    pub course_id: String,
    pub course_name: String,
    pub category: String,
}

impl RequirementCatalogEntry {
    pub fn new(course_id: &str, course_name: &str, category: &str) -> Self {
        RequirementCatalogEntry {
            course_id: course_id.to_string(),
            course_name: course_name.to_string(),
            category: category.to_string(),
        }
    }

    pub fn is_major(&self) -> bool {
        is_major_category(&self.category)
    }
}

/// Catalog entry still missing for a student. Recomputed on every request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmetRequirement {
    pub course_id: String,
    pub course_name: String,
    pub category: String,
}

impl From<&RequirementCatalogEntry> for UnmetRequirement {
    fn from(e: &RequirementCatalogEntry) -> Self {
        UnmetRequirement {
            course_id: e.course_id.clone(),
            course_name: e.course_name.clone(),
            category: e.category.clone(),
        }
    }
}

/// Fulfilled category -> categories it also satisfies. Directional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryDependencies(pub BTreeMap<String, Vec<String>>);

impl CategoryDependencies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: &str, dependent: &str) {
        let deps = self.0.entry(category.to_string()).or_default();
        if !deps.iter().any(|d| d == dependent) {
            deps.push(dependent.to_string());
        }
    }

    pub fn dependents_of(&self, category: &str) -> &[String] {
        self.0.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Flat (category, dependent) pairs, used when persisting the table.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .flat_map(|(c, deps)| deps.iter().map(move |d| (c.clone(), d.clone())))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Completing `alternate` with a passing grade excuses `requirement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseEquivalence {
    pub requirement: String,
    pub alternate: String,
}

impl CourseEquivalence {
    pub fn new(requirement: &str, alternate: &str) -> Self {
        CourseEquivalence { requirement: requirement.to_string(), alternate: alternate.to_string() }
    }
}

fn default_elective_cap() -> usize {
    DEFAULT_ELECTIVE_CAP
}

/// Static reference data read by the evaluator: catalog rows plus the
/// dependency and equivalence lookup tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementCatalog {
    pub entries: Vec<RequirementCatalogEntry>,
    #[serde(default)]
    pub dependencies: CategoryDependencies,
    #[serde(default)]
    pub equivalences: Vec<CourseEquivalence>,
    #[serde(default = "default_elective_cap")]
    pub elective_cap: usize,
}

impl Default for RequirementCatalog {
    fn default() -> Self {
        RequirementCatalog {
            entries: Vec::new(),
            dependencies: CategoryDependencies::default(),
            equivalences: Vec::new(),
            elective_cap: DEFAULT_ELECTIVE_CAP,
        }
    }
}

impl RequirementCatalog {
    pub fn with_entries(entries: Vec<RequirementCatalogEntry>) -> Self {
        RequirementCatalog { entries, ..Self::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passing_vocabulary() {
        for g in ["A", "A-", "B+", "B", "B-", "C+", "C", "N/A", " B "] {
            assert!(is_passing_grade(g), "{} debería aprobar", g);
        }
        for g in ["C-", "D", "F", "W", "I", ""] {
            assert!(!is_passing_grade(g), "{} no debería aprobar", g);
        }
    }

    #[test]
    fn dependencies_ignore_duplicate_pairs() {
        let mut deps = CategoryDependencies::new();
        deps.insert("B - B2", "B - B3");
        deps.insert("B - B2", "B - B3");
        assert_eq!(deps.dependents_of("B - B2"), &["B - B3".to_string()]);
        assert!(deps.dependents_of("B - B3").is_empty());
        assert_eq!(deps.pairs().len(), 1);
    }

    #[test]
    fn catalog_json_defaults() {
        let c: RequirementCatalog = serde_json::from_str(
            r#"{"entries":[{"courseId":"CSC 100","courseName":"Fundamentals","category":"Lower"}]}"#,
        )
        .unwrap();
        assert_eq!(c.elective_cap, 2);
        assert!(c.dependencies.is_empty());
        assert!(c.entries[0].is_major());
    }
}
