use crate::models::RequirementCatalogEntry;

/// Minimum Jaro-Winkler similarity for the fuzzy fallback.
const FUZZY_THRESHOLD: f64 = 0.85;

/// Busca en el catálogo por código o nombre (sin distinguir mayúsculas).
///
/// Primero las coincidencias por subcadena, en orden de catálogo. Si nada
/// contiene la consulta, los nombres se ordenan por similitud, así
/// "Data Structure" igual encuentra "Data Structures".
pub fn search_catalog<'a>(
    entries: &'a [RequirementCatalogEntry],
    query: &str,
    limit: usize,
) -> Vec<&'a RequirementCatalogEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let direct: Vec<&RequirementCatalogEntry> = entries
        .iter()
        .filter(|e| e.course_id.to_lowercase().contains(&needle) || e.course_name.to_lowercase().contains(&needle))
        .take(limit)
        .collect();
    if !direct.is_empty() {
        return direct;
    }

    let mut scored: Vec<(f64, &RequirementCatalogEntry)> = entries
        .iter()
        .map(|e| (strsim::jaro_winkler(&needle, &e.course_name.to_lowercase()), e))
        .filter(|(score, _)| *score >= FUZZY_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, e)| e).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<RequirementCatalogEntry> {
        vec![
            RequirementCatalogEntry::new("CSC 121", "Introduction to Computer Science I", "Lower"),
            RequirementCatalogEntry::new("CSC 311", "Data Structures and Algorithms", "Upper"),
            RequirementCatalogEntry::new("BIO 102", "General Biology", "B - B2"),
        ]
    }

    #[test]
    fn substring_on_code_is_case_insensitive() {
        let c = catalog();
        let hits: Vec<&str> = search_catalog(&c, "csc", 10).iter().map(|e| e.course_id.as_str()).collect();
        assert_eq!(hits, vec!["CSC 121", "CSC 311"]);
    }

    #[test]
    fn substring_on_name() {
        let c = catalog();
        assert_eq!(search_catalog(&c, "biology", 10)[0].course_id, "BIO 102");
    }

    #[test]
    fn limit_applies() {
        let c = catalog();
        assert_eq!(search_catalog(&c, "c", 1).len(), 1);
    }

    #[test]
    fn fuzzy_fallback_tolerates_typos() {
        let c = catalog();
        let hits = search_catalog(&c, "general biologi", 5);
        assert_eq!(hits.first().map(|e| e.course_id.as_str()), Some("BIO 102"));
    }

    #[test]
    fn blank_query_finds_nothing() {
        assert!(search_catalog(&catalog(), "   ", 5).is_empty());
    }
}
