use std::collections::BTreeSet;
use std::path::Path;

use crate::errors::PlannerError;
use crate::models::CourseDirectory;

use super::canonical_course_id;

const DEFAULT_DIRECTORY: &str = include_str!("../datafiles/course_directory.json");

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn checked_code(raw: &str, table: &str) -> Result<String, PlannerError> {
    let code = canonical_course_id(raw);
    if code.is_empty() {
        return Err(PlannerError::Catalog(format!("{} row without courseCode", table)));
    }
    Ok(code)
}

/// Canonical course codes, blank text fields as `None`, and no repeated
/// `(courseCode, scheduleId)` pair.
pub(crate) fn normalize_directory(mut d: CourseDirectory) -> Result<CourseDirectory, PlannerError> {
    for c in &mut d.general_education {
        c.course_code = checked_code(&c.course_code, "GeneralEducationCourses")?;
        c.course_title = non_blank(c.course_title.take());
        c.area = non_blank(c.area.take());
        c.sub_area = non_blank(c.sub_area.take());
    }
    for c in &mut d.computer_science {
        c.course_code = checked_code(&c.course_code, "ComputerScienceCourses")?;
        c.course_title = non_blank(c.course_title.take());
        c.division = non_blank(c.division.take());
    }
    for c in &mut d.cross_listed {
        c.course_code = checked_code(&c.course_code, "CrossListedCourses")?;
        c.general_education_area = non_blank(c.general_education_area.take());
        c.major_requirement = non_blank(c.major_requirement.take());
    }
    let mut seen = BTreeSet::new();
    for s in &mut d.schedules {
        s.course_code = checked_code(&s.course_code, "CourseSchedules")?;
        if !seen.insert((s.course_code.clone(), s.schedule_id)) {
            return Err(PlannerError::Catalog(format!(
                "duplicate schedule {} for {}",
                s.schedule_id, s.course_code
            )));
        }
    }
    Ok(d)
}

/// Parse a directory seed (see `src/datafiles/course_directory.json`).
pub fn parse_directory_json(json: &str) -> Result<CourseDirectory, PlannerError> {
    let d: CourseDirectory = serde_json::from_str(json)?;
    normalize_directory(d)
}

pub fn read_directory_json<P: AsRef<Path>>(path: P) -> Result<CourseDirectory, PlannerError> {
    let text = std::fs::read_to_string(path)?;
    parse_directory_json(&text)
}

pub fn default_directory() -> Result<CourseDirectory, PlannerError> {
    parse_directory_json(DEFAULT_DIRECTORY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_directory_parses() {
        let d = default_directory().expect("directorio válido");
        assert!(!d.computer_science.is_empty());
        assert!(!d.schedules.is_empty());
        assert!(d.schedules.iter().any(|s| s.course_code == "CSC 121"));
    }

    #[test]
    fn codes_are_canonical() {
        let d = parse_directory_json(
            r#"{"crossListed":[{"courseCode":" csc  121 ","generalEducationArea":"  ","majorRequirement":"Lower"}]}"#,
        )
        .unwrap();
        assert_eq!(d.cross_listed[0].course_code, "CSC 121");
        assert_eq!(d.cross_listed[0].general_education_area, None);
    }

    #[test]
    fn rejects_blank_code_and_duplicate_schedule() {
        assert!(matches!(
            parse_directory_json(r#"{"computerScience":[{"courseCode":"  "}]}"#),
            Err(PlannerError::Catalog(_))
        ));
        let dup = r#"{"schedules":[
            {"courseCode":"CSC 121","scheduleId":1},
            {"courseCode":"csc 121","scheduleId":1}
        ]}"#;
        assert!(matches!(parse_directory_json(dup), Err(PlannerError::Catalog(_))));
    }
}
