/// Split raw extracted text into trimmed, non-empty logical lines.
///
/// PDF text dumps mix `\n`, `\r\n` and lone `\r`, so all three break lines.
pub fn normalize_lines(raw: &str) -> Vec<&str> {
    raw.split(['\n', '\r'])
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_blank_lines_and_trims() {
        let raw = "  Student ID: 123  \n\n\t\nCSC 100 Fundamentals 3.000 A\r\n   ";
        assert_eq!(
            normalize_lines(raw),
            vec!["Student ID: 123", "CSC 100 Fundamentals 3.000 A"]
        );
    }

    #[test]
    fn lone_carriage_returns_split_lines() {
        assert_eq!(normalize_lines("a\rb\r\rc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert!(normalize_lines("   \n \t \r\n").is_empty());
        assert!(normalize_lines("").is_empty());
    }
}
