//! Record boundaries: rejoin wrapped transcript lines into raw records, then
//! split each record into one segment per course.
//!
//! Finding the boundaries is kept apart from reading the fields (see
//! `parse`), so a record can be inspected before any regex capture runs.

use regex::Regex;
use std::sync::LazyLock;

/// A line opening a new course record.
static COURSE_LINE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3} \d{3}").expect("course line pattern"));

/// Any course ID embedded in a record.
static COURSE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{3} \d{3}").expect("course id pattern"));

pub fn starts_course_record(line: &str) -> bool {
    COURSE_LINE_START.is_match(line)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// No course line seen yet; lines go to the preamble.
    Outside,
    /// Accumulating the record opened by the last course line.
    Inside,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Text before the first course line (headers, student info).
    Preamble,
    /// A course line plus every continuation line that followed it.
    Course,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub kind: RecordKind,
    pub text: String,
}

/// Lazy two-state scanner over normalized lines.
///
/// Continuation lines are space-joined onto the current record; a course
/// line flushes it and opens a new one.
pub struct RecordScanner<I> {
    lines: I,
    state: ScanState,
    acc: String,
}

impl<'a, I> RecordScanner<I>
where
    I: Iterator<Item = &'a str>,
{
    pub fn new<T>(lines: T) -> Self
    where
        T: IntoIterator<Item = &'a str, IntoIter = I>,
    {
        RecordScanner { lines: lines.into_iter(), state: ScanState::Outside, acc: String::new() }
    }

    fn current_kind(&self) -> RecordKind {
        match self.state {
            ScanState::Outside => RecordKind::Preamble,
            ScanState::Inside => RecordKind::Course,
        }
    }

    fn take_record(&mut self) -> Option<RawRecord> {
        if self.acc.is_empty() {
            return None;
        }
        Some(RawRecord { kind: self.current_kind(), text: std::mem::take(&mut self.acc) })
    }
}

impl<'a, I> Iterator for RecordScanner<I>
where
    I: Iterator<Item = &'a str>,
{
    type Item = RawRecord;

    fn next(&mut self) -> Option<RawRecord> {
        while let Some(line) = self.lines.next() {
            if starts_course_record(line) {
                let flushed = self.take_record();
                self.state = ScanState::Inside;
                self.acc.push_str(line);
                if flushed.is_some() {
                    return flushed;
                }
            } else {
                if !self.acc.is_empty() {
                    self.acc.push(' ');
                }
                self.acc.push_str(line);
            }
        }
        self.take_record()
    }
}

/// Split a record into one trimmed segment per embedded course ID.
///
/// Text before the first course ID (preamble noise) belongs to no segment.
pub fn split_segments(record: &str) -> Vec<&str> {
    let starts: Vec<usize> = COURSE_ID.find_iter(record).map(|m| m.start()).collect();
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(record.len());
            record[start..end].trim()
        })
        .filter(|s| !s.is_empty())
        .collect()
}
