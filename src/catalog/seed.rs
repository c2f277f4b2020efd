use std::path::Path;

use crate::errors::PlannerError;
use crate::models::RequirementCatalog;

use super::normalize_catalog;

/// Seed shipped with the crate, used when no catalog file is configured.
const DEFAULT_SEED: &str = include_str!("../datafiles/catalog_seed.json");

/// Parse a JSON catalog seed (see `src/datafiles/catalog_seed.json`).
pub fn parse_catalog_json(json: &str) -> Result<RequirementCatalog, PlannerError> {
    let catalog: RequirementCatalog = serde_json::from_str(json)?;
    normalize_catalog(catalog)
}

pub fn read_catalog_json<P: AsRef<Path>>(path: P) -> Result<RequirementCatalog, PlannerError> {
    let text = std::fs::read_to_string(path)?;
    parse_catalog_json(&text)
}

pub fn default_catalog() -> Result<RequirementCatalog, PlannerError> {
    parse_catalog_json(DEFAULT_SEED)
}
