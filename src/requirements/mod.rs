//! Requirement Evaluator: completed courses + catalog -> unmet requirements.
//!
//! Pure and recomputed from scratch on every call; the caller owns the
//! storage read that produces its inputs.

pub mod rules;

use std::cmp::Ordering;

use crate::models::{CompletedCourse, RequirementCatalog, UnmetRequirement};

use rules::{
    apply_equivalences, capped_electives, elective_match_count, elective_matches, fulfilled_categories, matched_categories,
    matched_entries, passing_course_ids, unmet_division_courses, unmet_general_education,
};

/// Unmet requirements, in catalog order within each family (Gen-Ed, then
/// Upper/Lower, then Elective). Use [`sort_for_display`] for presentation.
pub fn evaluate_unmet(completed: &[CompletedCourse], catalog: &RequirementCatalog) -> Vec<UnmetRequirement> {
    let entries = &catalog.entries;
    let passed = passing_course_ids(completed);
    let matched = matched_entries(entries, &passed);
    let categories = matched_categories(&matched);
    let fulfilled = fulfilled_categories(&categories, &catalog.dependencies);
    let electives = elective_matches(&matched);
    let elective_count = elective_match_count(completed, entries);

    let mut unmet = unmet_general_education(entries, &fulfilled);
    unmet.extend(unmet_division_courses(entries, &passed));
    unmet.extend(capped_electives(entries, &electives, elective_count, catalog.elective_cap));

    let unmet = apply_equivalences(unmet, &catalog.equivalences, &passed);

    tracing::debug!(
        passed = passed.len(),
        matched = matched.len(),
        fulfilled = fulfilled.len(),
        electives = elective_count,
        unmet = unmet.len(),
        "requirements evaluated"
    );
    unmet
}

/// Presentation order: category, then course ID.
pub fn sort_for_display(unmet: &mut [UnmetRequirement]) {
    unmet.sort_by(|a, b| match a.category.cmp(&b.category) {
        Ordering::Equal => a.course_id.cmp(&b.course_id),
        other => other,
    });
}
