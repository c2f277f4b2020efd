/// Coarse tag attached to every extracted course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptCategory {
    ComputerScience,
    GeneralEducation,
}

impl TranscriptCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            TranscriptCategory::ComputerScience => "Computer Science",
            TranscriptCategory::GeneralEducation => "General Education",
        }
    }
}

/// Subject prefixes counted as major coursework.
const MAJOR_KEYWORDS: [&str; 4] = ["CSC", "MAT", "PHY", "CIS"];

/// Total: any input maps to exactly one category.
pub fn classify_course(course_id: &str) -> TranscriptCategory {
    let upper = course_id.to_uppercase();
    if MAJOR_KEYWORDS.iter().any(|k| upper.contains(k)) {
        TranscriptCategory::ComputerScience
    } else {
        TranscriptCategory::GeneralEducation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn major_prefixes() {
        for id in ["CSC 100", "MAT 191", "PHY 130", "CIS 270", "csc 101"] {
            assert_eq!(classify_course(id), TranscriptCategory::ComputerScience, "{}", id);
        }
    }

    #[test]
    fn everything_else_is_general_education() {
        for id in ["ENG 110", "HIS 101", "", "???"] {
            assert_eq!(classify_course(id).as_str(), "General Education", "{}", id);
        }
    }
}
