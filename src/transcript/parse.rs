use regex::Regex;
use std::sync::LazyLock;

use crate::models::MISSING_GRADE;

/// `CODE ### name units [units] [grade] ...`
///
/// The name is the shortest run that is followed by one or two decimal
/// unit fields; anything after the grade (grade points, page footers) is
/// ignored.
static COURSE_WITH_UNITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]{3} \d{3})\s+(.+?)\s+(?:\d+\.\d+\s*){1,2}([A-Z][+-]?)?(?:\s|$)")
        .expect("course line pattern")
});

/// Fallback for rows printed without unit columns: `CODE ### name [grade]`.
///
/// Without units to anchor it, a trailing token is a grade only if it is a
/// letter grade (A-D or F); `Computer Sci I` keeps its `I`.
static COURSE_WITHOUT_UNITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]{3} \d{3})\s+(.+?)(?:\s+([A-DF][+-]?))?\s*$").expect("bare course line pattern")
});

/// Fields read from one course segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCourseLine {
    pub course_id: String,
    pub course_name: String,
    pub grade: String,
}

/// Read (course ID, course name, grade) from a segment. `None` means the
/// segment is not a course row and should be skipped.
pub fn parse_course_segment(segment: &str) -> Option<ParsedCourseLine> {
    let segment = segment.trim();
    let caps = COURSE_WITH_UNITS
        .captures(segment)
        .or_else(|| COURSE_WITHOUT_UNITS.captures(segment))?;

    let course_id = caps.get(1)?.as_str().to_string();
    let course_name = caps.get(2)?.as_str().trim().to_string();
    if course_name.is_empty() {
        return None;
    }
    let grade = caps
        .get(3)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| MISSING_GRADE.to_string());

    Some(ParsedCourseLine { course_id, course_name, grade })
}
