// Directorio de cursos: fichas por tabla y horarios ofrecidos.
//
// Los campos descriptivos son opcionales; una ficha solo exige el código.

use serde::{Deserialize, Serialize};

/// Tables of the course directory, as named in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryTable {
    GeneralEducation,
    ComputerScience,
    CrossListed,
    Schedules,
}

impl DirectoryTable {
    pub const ALL: [DirectoryTable; 4] = [
        DirectoryTable::GeneralEducation,
        DirectoryTable::ComputerScience,
        DirectoryTable::CrossListed,
        DirectoryTable::Schedules,
    ];

    pub fn table_name(self) -> &'static str {
        match self {
            DirectoryTable::GeneralEducation => "GeneralEducationCourses",
            DirectoryTable::ComputerScience => "ComputerScienceCourses",
            DirectoryTable::CrossListed => "CrossListedCourses",
            DirectoryTable::Schedules => "CourseSchedules",
        }
    }

    /// Accepts the table name in any case, or the short aliases `ge`, `cs`,
    /// `crosslisted` and `schedules`.
    pub fn from_name(name: &str) -> Option<Self> {
        let n = name.trim().to_lowercase();
        DirectoryTable::ALL
            .into_iter()
            .find(|t| t.table_name().to_lowercase() == n)
            .or(match n.as_str() {
                "ge" | "generaleducation" => Some(DirectoryTable::GeneralEducation),
                "cs" | "computerscience" => Some(DirectoryTable::ComputerScience),
                "crosslisted" => Some(DirectoryTable::CrossListed),
                "schedules" => Some(DirectoryTable::Schedules),
                _ => None,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralEducationCourse {
    pub course_code: String,
    pub course_title: Option<String>,
    pub units: Option<String>,
    pub description: Option<String>,
    pub area: Option<String>,
    pub sub_area: Option<String>,
    pub grading_scheme: Option<String>,
    pub offered_terms: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputerScienceCourse {
    pub course_code: String,
    pub course_title: Option<String>,
    pub units: Option<String>,
    pub division: Option<String>,
    pub description: Option<String>,
    pub offered_terms: Option<String>,
    /// Free text as published ("Yes"/"No").
    pub is_elective: Option<String>,
}

/// Course that counts both for a GE area and for a major requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossListedCourse {
    pub course_code: String,
    pub general_education_area: Option<String>,
    pub major_requirement: Option<String>,
}

/// One offered section. `(course_code, schedule_id)` identifies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSchedule {
    pub course_code: String,
    pub schedule_id: i64,
    pub days: Option<String>,
    pub time: Option<String>,
    pub instructor: Option<String>,
    pub location: Option<String>,
    pub semester: Option<String>,
    pub title: Option<String>,
    pub units: Option<String>,
    pub prerequisite: Option<String>,
}

/// Contents of a directory seed file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDirectory {
    #[serde(default)]
    pub general_education: Vec<GeneralEducationCourse>,
    #[serde(default)]
    pub computer_science: Vec<ComputerScienceCourse>,
    #[serde(default)]
    pub cross_listed: Vec<CrossListedCourse>,
    #[serde(default)]
    pub schedules: Vec<CourseSchedule>,
}

impl CourseDirectory {
    pub fn is_empty(&self) -> bool {
        self.general_education.is_empty()
            && self.computer_science.is_empty()
            && self.cross_listed.is_empty()
            && self.schedules.is_empty()
    }
}

/// Everything the directory knows about one course code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetails {
    pub course_code: String,
    pub general_education: Option<GeneralEducationCourse>,
    pub computer_science: Option<ComputerScienceCourse>,
    pub cross_listed: Option<CrossListedCourse>,
}

impl CourseDetails {
    pub fn is_empty(&self) -> bool {
        self.general_education.is_none() && self.computer_science.is_none() && self.cross_listed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_and_aliases() {
        assert_eq!(DirectoryTable::from_name("CourseSchedules"), Some(DirectoryTable::Schedules));
        assert_eq!(DirectoryTable::from_name("computersciencecourses"), Some(DirectoryTable::ComputerScience));
        assert_eq!(DirectoryTable::from_name(" ge "), Some(DirectoryTable::GeneralEducation));
        assert_eq!(DirectoryTable::from_name("Students"), None);
    }

    #[test]
    fn missing_fields_are_none() {
        let d: CourseDirectory =
            serde_json::from_str(r#"{"schedules":[{"courseCode":"CSC 121","scheduleId":1}]}"#).unwrap();
        assert!(d.general_education.is_empty());
        assert_eq!(d.schedules[0].days, None);
        assert!(!d.is_empty());
    }
}
