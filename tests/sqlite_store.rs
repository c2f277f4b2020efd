use std::path::PathBuf;

use courseplanner::config::PlannerConfig;
use courseplanner::models::{RequirementCatalog, RequirementCatalogEntry};
use courseplanner::planner::{ingest_transcript, reset, seed_if_needed, unmet_requirements};
use courseplanner::storage::{
    open_store, recent_uploads, record_upload, CatalogSource, CompletedCourseStore, SqliteStore,
};

fn temp_db(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("courseplanner-test-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir.join("nested").join("planner.db")
}

#[test]
fn rows_survive_reopen() {
    let path = temp_db("reopen");
    {
        let mut store = SqliteStore::open(&path).unwrap();
        ingest_transcript(&mut store, "Student ID: 77\nCSC 100 Fundamentals 3.000 A\nENG 110 Composition 3.000 B\n")
            .unwrap();
    }
    let store = SqliteStore::open(&path).unwrap();
    let rows = store.list_all("77").unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].course_id, "CSC 100");
    assert_eq!(rows[1].category, "General Education");
    let _ = std::fs::remove_dir_all(path.parent().unwrap().parent().unwrap());
}

#[test]
fn startup_seeds_bundled_catalog_from_config() {
    let path = temp_db("seed");
    let config = PlannerConfig { db_path: path.clone(), ..PlannerConfig::default() };
    let mut store = open_store(&config).unwrap();
    assert!(seed_if_needed(&mut store, &config).unwrap());

    let catalog = store.load_catalog().unwrap();
    assert!(!catalog.is_empty());
    assert_eq!(catalog.elective_cap, 2);
    assert_eq!(catalog.dependencies.dependents_of("B - B2"), &["B - B3".to_string()]);
    assert!(catalog.equivalences.iter().any(|e| e.requirement == "MAT 361" && e.alternate == "CSC 371"));
    let _ = std::fs::remove_dir_all(path.parent().unwrap().parent().unwrap());
}

#[test]
fn evaluation_reads_stored_courses_and_catalog() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store
        .seed_catalog(&RequirementCatalog::with_entries(vec![
            RequirementCatalogEntry::new("ENG 110", "Composition", "A - A2"),
            RequirementCatalogEntry::new("CSC 100", "Fundamentals", "Lower"),
            RequirementCatalogEntry::new("CSC 200", "Data Structures", "Lower"),
        ]))
        .unwrap();

    ingest_transcript(&mut store, "Student ID: 5\nCSC 100 Fundamentals 3.000 A\n").unwrap();
    ingest_transcript(&mut store, "Student ID: 6\nCSC 200 Data Structures 3.000 A\n").unwrap();

    let unmet = unmet_requirements(&store, "5").unwrap();
    let ids: Vec<&str> = unmet.iter().map(|u| u.course_id.as_str()).collect();
    assert_eq!(ids, vec!["ENG 110", "CSC 200"]);

    assert_eq!(reset(&mut store).unwrap(), 2);
    assert_eq!(unmet_requirements(&store, "5").unwrap().len(), 3);
}

#[test]
fn upload_audit_rows() {
    let store = SqliteStore::open_in_memory().unwrap();
    record_upload(&store, "5", 4, 1, None).unwrap();
    let rows = recent_uploads(&store, 5).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].student_id, "5");
    assert_eq!(rows[0].skipped, 1);
}
