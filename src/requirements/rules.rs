//! Reglas de evaluación, cada una como función pura sobre conjuntos en memoria.
//!
//! Cada regla recibe la salida de la etapa anterior para poder probarla por
//! separado: emparejamiento, cierre de dependencias de un nivel, filtros de
//! educación general y de la carrera, tope de electivos y equivalencias.

use std::collections::BTreeSet;

use crate::models::{
    CategoryDependencies, CompletedCourse, CourseEquivalence, RequirementCatalogEntry,
    UnmetRequirement, ELECTIVE, LOWER_DIVISION, UPPER_DIVISION,
};

/// Course IDs completed with a passing grade.
pub fn passing_course_ids(completed: &[CompletedCourse]) -> BTreeSet<String> {
    completed
        .iter()
        .filter(|c| c.is_passing())
        .map(|c| c.course_id.trim().to_string())
        .collect()
}

/// Catalog entries whose course ID was passed.
pub fn matched_entries<'a>(
    catalog: &'a [RequirementCatalogEntry],
    passed: &BTreeSet<String>,
) -> Vec<&'a RequirementCatalogEntry> {
    catalog.iter().filter(|e| passed.contains(e.course_id.trim())).collect()
}

/// Distinct categories with at least one match.
pub fn matched_categories(matched: &[&RequirementCatalogEntry]) -> BTreeSet<String> {
    matched.iter().map(|e| e.category.clone()).collect()
}

/// Matched categories plus their declared dependents. One level only: a
/// dependent of a dependent is not added.
pub fn fulfilled_categories(matched: &BTreeSet<String>, dependencies: &CategoryDependencies) -> BTreeSet<String> {
    let mut fulfilled = matched.clone();
    for category in matched {
        fulfilled.extend(dependencies.dependents_of(category).iter().cloned());
    }
    fulfilled
}

/// General-Education entries whose category is not fulfilled.
pub fn unmet_general_education(
    catalog: &[RequirementCatalogEntry],
    fulfilled: &BTreeSet<String>,
) -> Vec<UnmetRequirement> {
    catalog
        .iter()
        .filter(|e| !e.is_major())
        .filter(|e| !fulfilled.contains(&e.category))
        .map(UnmetRequirement::from)
        .collect()
}

/// Upper/Lower division entries not passed directly. Dependencies never
/// apply here.
pub fn unmet_division_courses(
    catalog: &[RequirementCatalogEntry],
    passed: &BTreeSet<String>,
) -> Vec<UnmetRequirement> {
    catalog
        .iter()
        .filter(|e| e.category == UPPER_DIVISION || e.category == LOWER_DIVISION)
        .filter(|e| !passed.contains(e.course_id.trim()))
        .map(UnmetRequirement::from)
        .collect()
}

/// Elective course IDs the student passed, used to remove individual
/// electives below the cap.
pub fn elective_matches(matched: &[&RequirementCatalogEntry]) -> BTreeSet<String> {
    matched
        .iter()
        .filter(|e| e.category == ELECTIVE)
        .map(|e| e.course_id.trim().to_string())
        .collect()
}

/// Passing completed records whose course ID is an Elective entry. Retakes
/// are separate records and each one counts.
pub fn elective_match_count(completed: &[CompletedCourse], catalog: &[RequirementCatalogEntry]) -> usize {
    let electives: BTreeSet<&str> = catalog
        .iter()
        .filter(|e| e.category == ELECTIVE)
        .map(|e| e.course_id.trim())
        .collect();
    completed
        .iter()
        .filter(|c| c.is_passing() && electives.contains(c.course_id.trim()))
        .count()
}

/// Elective entries left after capping.
///
/// With `count >= cap` every elective is met; below that only the matched
/// electives are removed (zero matches removes nothing).
pub fn capped_electives(
    catalog: &[RequirementCatalogEntry],
    matched: &BTreeSet<String>,
    count: usize,
    cap: usize,
) -> Vec<UnmetRequirement> {
    if count >= cap {
        return Vec::new();
    }
    catalog
        .iter()
        .filter(|e| e.category == ELECTIVE)
        .filter(|e| !matched.contains(e.course_id.trim()))
        .map(UnmetRequirement::from)
        .collect()
}

/// Drop every unmet entry excused by an equivalence whose alternate was
/// passed. Each equivalence is checked on its own.
pub fn apply_equivalences(
    unmet: Vec<UnmetRequirement>,
    equivalences: &[CourseEquivalence],
    passed: &BTreeSet<String>,
) -> Vec<UnmetRequirement> {
    let excused: BTreeSet<&str> = equivalences
        .iter()
        .filter(|eq| passed.contains(eq.alternate.trim()))
        .map(|eq| eq.requirement.trim())
        .collect();
    if excused.is_empty() {
        return unmet;
    }
    unmet
        .into_iter()
        .filter(|u| !excused.contains(u.course_id.trim()))
        .collect()
}
