const STUDENT_ID_MARKER: &str = "student id";

/// Find the student identifier among normalized transcript lines.
///
/// The first line containing the marker (case-insensitive) and a `:` wins;
/// the ID is the first token after that `:`. No marker yields `""`.
pub fn locate_student_id<'a, I>(lines: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    for line in lines {
        if !line.to_lowercase().contains(STUDENT_ID_MARKER) {
            continue;
        }
        let Some((_, rest)) = line.split_once(':') else {
            continue;
        };
        if let Some(token) = rest.split_whitespace().next() {
            return token.to_string();
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_token_after_colon() {
        let lines = ["Unofficial Transcript", "Student ID: 211547663", "CSC 100 Fundamentals 3.000 A"];
        assert_eq!(locate_student_id(lines), "211547663");
    }

    #[test]
    fn marker_is_case_insensitive_and_ignores_trailing_fields() {
        let lines = ["STUDENT ID:  42   Name: Ada"];
        assert_eq!(locate_student_id(lines), "42");
    }

    #[test]
    fn missing_marker_gives_empty_string() {
        let lines = ["CSC 100 Fundamentals 3.000 A"];
        assert_eq!(locate_student_id(lines), "");
    }

    #[test]
    fn marker_without_separator_keeps_scanning() {
        let lines = ["Student ID pending", "Student ID: 7"];
        assert_eq!(locate_student_id(lines), "7");
    }
}
