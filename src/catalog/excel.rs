use calamine::{open_workbook_auto, Data, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::PlannerError;
use crate::models::{CategoryDependencies, CourseEquivalence, RequirementCatalog, RequirementCatalogEntry};

use super::normalize_catalog;

const DEPENDENCIES_SHEET: &str = "dependencies";
const EQUIVALENCES_SHEET: &str = "equivalences";

/// Convierte un `Data` de calamine a String
pub fn data_to_string(d: &Data) -> String {
    match d {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(s) => s.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Normaliza encabezados eliminando espacios y pasando a minúsculas.
pub fn normalize_header(s: &str) -> String {
    s.to_lowercase().chars().filter(|c| !c.is_whitespace() && *c != '_').collect()
}

fn find_column(header: &[String], names: &[&str]) -> Option<usize> {
    header.iter().position(|h| names.contains(&normalize_header(h).as_str()))
}

/// Catalog rows from a sheet whose first row is a header naming the
/// course id, course name and category columns.
pub fn entries_from_rows(rows: &[Vec<String>]) -> Result<Vec<RequirementCatalogEntry>, PlannerError> {
    let Some((header, body)) = rows.split_first() else {
        return Ok(Vec::new());
    };
    let id_col = find_column(header, &["courseid", "coursecode", "code"])
        .ok_or_else(|| PlannerError::Catalog("catalog sheet has no course id column".into()))?;
    let name_col = find_column(header, &["coursename", "coursetitle", "title", "name"]);
    let cat_col = find_column(header, &["category", "requirement", "area"])
        .ok_or_else(|| PlannerError::Catalog("catalog sheet has no category column".into()))?;

    let mut entries = Vec::new();
    for row in body {
        let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");
        if cell(id_col).is_empty() && cell(cat_col).is_empty() {
            continue;
        }
        let name = name_col.map(cell).unwrap_or("");
        entries.push(RequirementCatalogEntry::new(cell(id_col), name, cell(cat_col)));
    }
    Ok(entries)
}

/// Two-column (from, to) rows, header row skipped.
pub fn pairs_from_rows(rows: &[Vec<String>]) -> Vec<(String, String)> {
    rows.iter()
        .skip(1)
        .filter_map(|r| {
            let a = r.first()?.trim();
            let b = r.get(1)?.trim();
            if a.is_empty() || b.is_empty() { None } else { Some((a.to_string(), b.to_string())) }
        })
        .collect()
}

type Workbook = Sheets<BufReader<File>>;

fn sheet_rows(workbook: &mut Workbook, name: &str) -> Result<Vec<Vec<String>>, PlannerError> {
    let range = workbook.worksheet_range(name)?;
    Ok(range.rows().map(|r| r.iter().map(data_to_string).collect()).collect())
}

/// Lee un catálogo desde Excel/ODS: primera hoja = catálogo, hojas
/// opcionales `Dependencies` y `Equivalences`.
pub fn read_catalog_workbook<P: AsRef<Path>>(path: P) -> Result<RequirementCatalog, PlannerError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names().to_owned();
    let Some(first) = sheet_names.first() else {
        return Err(PlannerError::Catalog("workbook has no sheets".into()));
    };

    let entries = entries_from_rows(&sheet_rows(&mut workbook, first)?)?;
    let mut catalog = RequirementCatalog::with_entries(entries);

    for name in &sheet_names {
        match name.trim().to_lowercase().as_str() {
            DEPENDENCIES_SHEET => {
                let mut deps = CategoryDependencies::new();
                for (category, dependent) in pairs_from_rows(&sheet_rows(&mut workbook, name)?) {
                    deps.insert(&category, &dependent);
                }
                catalog.dependencies = deps;
            }
            EQUIVALENCES_SHEET => {
                catalog.equivalences = pairs_from_rows(&sheet_rows(&mut workbook, name)?)
                    .into_iter()
                    .map(|(req, alt)| CourseEquivalence::new(&req, &alt))
                    .collect();
            }
            _ => {}
        }
    }

    tracing::info!(
        entries = catalog.entries.len(),
        dependencies = catalog.dependencies.pairs().len(),
        equivalences = catalog.equivalences.len(),
        "catalog workbook read"
    );
    normalize_catalog(catalog)
}
