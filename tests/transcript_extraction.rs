use courseplanner::transcript::{classify_course, extract_transcript, parse_course_segment, split_segments};

const TRANSCRIPT: &str = "\
Unofficial Transcript
Name: Jane Doe
Student ID: 012345678   Program: BS Computer Science

Fall 2021
CSC 101 Intro to Computing 3.000 3.000 A
MAT 141 Calculus I 4.000 4.000 B+
ENG 110 Composition and
  Rhetoric 3.000 3.000 A-
Term GPA 3.71

Spring 2022
CSC 202 Data Structures 3.000 3.000 B CSC 210 Discrete Structures 3.000 3.000 C+
HIS 101 World History 3.000 IP
";

#[test]
fn full_transcript_is_extracted_in_order() {
    let x = extract_transcript(TRANSCRIPT);
    assert_eq!(x.student_id, "012345678");

    let ids: Vec<&str> = x.courses.iter().map(|c| c.course_id.as_str()).collect();
    assert_eq!(ids, vec!["CSC 101", "MAT 141", "ENG 110", "CSC 202", "CSC 210", "HIS 101"]);

    let eng = &x.courses[2];
    assert_eq!(eng.course_name, "Composition and Rhetoric");
    assert_eq!(eng.grade, "A-");
    assert_eq!(eng.category, "General Education");

    assert_eq!(x.courses[4].grade, "C+");
    assert_eq!(x.courses[5].grade, "N/A");
    assert!(x.courses.iter().all(|c| c.student_id == "012345678"));
    assert!(x.warning.is_none());
}

#[test]
fn rerunning_gives_identical_records() {
    assert_eq!(extract_transcript(TRANSCRIPT), extract_transcript(TRANSCRIPT));
}

#[test]
fn retakes_are_kept() {
    let x = extract_transcript("CSC 101 Intro 3.000 F\nCSC 101 Intro 3.000 B\n");
    assert_eq!(x.extracted(), 2);
    assert_eq!(x.courses[0].grade, "F");
    assert_eq!(x.courses[1].grade, "B");
}

#[test]
fn back_to_back_records_split_into_parseable_segments() {
    let line = "CSC 101 Intro to Computing 3.000 A MAT 141 Calculus I 4.000 B";
    let segments = split_segments(line);
    assert_eq!(segments.len(), 2);
    let parsed: Vec<_> = segments.iter().filter_map(|s| parse_course_segment(s)).collect();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[1].course_id, "MAT 141");
    assert_eq!(parsed[1].grade, "B");
}

#[test]
fn canonical_segment_parses_exactly() {
    let p = parse_course_segment("CSC 101 Intro to Computing 3.000 A").unwrap();
    assert_eq!(p.course_id, "CSC 101");
    assert_eq!(p.course_name, "Intro to Computing");
    assert_eq!(p.grade, "A");
}

#[test]
fn classifier_is_total() {
    for id in ["CSC 101", "csc 101", "MAT 200", "PHY 150", "CIS 300", "ENG 110", "", "???", "HIST"] {
        let c = classify_course(id).as_str();
        assert!(c == "Computer Science" || c == "General Education", "{} -> {}", id, c);
    }
}

#[test]
fn empty_and_noise_only_input() {
    let empty = extract_transcript("   \n\t\n");
    assert!(empty.courses.is_empty());
    assert!(empty.warning.is_none());
    assert_eq!(empty.student_id, "");

    let noise = extract_transcript("Student ID: 9\nnothing that looks like a course\n");
    assert!(noise.courses.is_empty());
    assert!(noise.warning.is_some());
    assert_eq!(noise.student_id, "9");
}
