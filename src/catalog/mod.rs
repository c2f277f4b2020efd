//! Requirement catalog sources.
//!
//! - `seed`: JSON seed files and the bundled default seed
//! - `excel`: spreadsheet seeds (calamine)
//! - `search`: lookup by code or name
//! - `directory`: course directory seed (details and schedules)

pub mod directory;
pub mod excel;
pub mod search;
pub mod seed;

pub use directory::{default_directory, parse_directory_json, read_directory_json};
pub use excel::read_catalog_workbook;
pub use search::search_catalog;
pub use seed::{default_catalog, parse_catalog_json, read_catalog_json};

use std::path::Path;

use crate::errors::PlannerError;
use crate::models::{CategoryDependencies, CourseEquivalence, RequirementCatalog};

/// Load a catalog seed, choosing the reader by file extension.
pub fn load_catalog_file<P: AsRef<Path>>(path: P) -> Result<RequirementCatalog, PlannerError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "json" => read_catalog_json(path),
        "xlsx" | "xlsm" | "xls" | "ods" => read_catalog_workbook(path),
        other => Err(PlannerError::Catalog(format!(
            "unsupported catalog format '{}' for {}",
            other,
            path.display()
        ))),
    }
}

pub(crate) fn canonical_course_id(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase()
}

/// Trim and upper-case course IDs, trim names and categories, and reject
/// entries without an ID or category.
pub(crate) fn normalize_catalog(catalog: RequirementCatalog) -> Result<RequirementCatalog, PlannerError> {
    let mut entries = Vec::with_capacity(catalog.entries.len());
    for (i, mut e) in catalog.entries.into_iter().enumerate() {
        e.course_id = canonical_course_id(&e.course_id);
        e.course_name = e.course_name.trim().to_string();
        e.category = e.category.trim().to_string();
        if e.course_id.is_empty() || e.category.is_empty() {
            return Err(PlannerError::Catalog(format!(
                "entry {} needs both a course id and a category",
                i + 1
            )));
        }
        entries.push(e);
    }

    let mut dependencies = CategoryDependencies::new();
    for (category, dependent) in catalog.dependencies.pairs() {
        dependencies.insert(category.trim(), dependent.trim());
    }

    let equivalences = catalog
        .equivalences
        .iter()
        .map(|eq| CourseEquivalence::new(&canonical_course_id(&eq.requirement), &canonical_course_id(&eq.alternate)))
        .collect();

    Ok(RequirementCatalog { entries, dependencies, equivalences, elective_cap: catalog.elective_cap })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_catalog_file("catalog.csv").unwrap_err();
        assert!(err.to_string().contains("unsupported catalog format"));
    }

    #[test]
    fn missing_json_file_is_io_error() {
        assert!(matches!(load_catalog_file("does/not/exist.json"), Err(PlannerError::Io(_))));
    }

    #[test]
    fn course_ids_collapse_inner_whitespace() {
        assert_eq!(canonical_course_id(" mat   361 "), "MAT 361");
    }
}
