use std::env;
use std::path::PathBuf;

use crate::errors::PlannerError;

pub const DEFAULT_DB_PATH: &str = "data/planner.db";
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

pub fn default_log_filter() -> &'static str {
    "courseplanner=info,actix_web=info"
}

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    pub db_path: PathBuf,
    pub bind_addr: String,
    /// Catalog seed file; `None` means the bundled seed.
    pub catalog_path: Option<PathBuf>,
    /// Course directory seed (JSON); `None` means the bundled one.
    pub directory_path: Option<PathBuf>,
    /// Replace catalog and directory tables at startup even when they are populated.
    pub reseed_catalog: bool,
    pub log_filter: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            bind_addr: DEFAULT_BIND.to_string(),
            catalog_path: None,
            directory_path: None,
            reseed_catalog: false,
            log_filter: default_log_filter().to_string(),
        }
    }
}

// load .env if present
fn load_dotenv() {
    let _ = dotenv::dotenv();
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Resolve a DB URL to a local SQLite path. Accepts `sqlite://` and
/// `file://`; remote schemes are not supported.
pub fn sqlite_path_from_url(url: &str) -> Result<PathBuf, PlannerError> {
    if let Some(rest) = url.strip_prefix("sqlite://") {
        Ok(PathBuf::from(rest))
    } else if let Some(rest) = url.strip_prefix("file://") {
        Ok(PathBuf::from(rest))
    } else if url.contains("://") {
        Err(PlannerError::Configuration(format!("PLANNER_DB_URL uses unsupported scheme: {}", url)))
    } else {
        Ok(PathBuf::from(url))
    }
}

impl PlannerConfig {
    pub fn from_env() -> Result<Self, PlannerError> {
        load_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PlannerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = PlannerConfig::default();

        if let Some(p) = non_empty(lookup("PLANNER_DB_PATH")) {
            cfg.db_path = PathBuf::from(p);
        } else if let Some(url) = non_empty(lookup("PLANNER_DB_URL")) {
            cfg.db_path = sqlite_path_from_url(&url)?;
        }

        if let Some(bind) = non_empty(lookup("PLANNER_BIND")) {
            cfg.bind_addr = bind;
        }
        cfg.catalog_path = non_empty(lookup("PLANNER_CATALOG")).map(PathBuf::from);
        cfg.directory_path = non_empty(lookup("PLANNER_DIRECTORY")).map(PathBuf::from);
        cfg.reseed_catalog = non_empty(lookup("PLANNER_RESEED"))
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        if let Some(filter) = non_empty(lookup("RUST_LOG")) {
            cfg.log_filter = filter;
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(PlannerConfig::from_lookup(lookup(&[])).unwrap(), PlannerConfig::default());
    }

    #[test]
    fn path_wins_over_url() {
        let cfg = PlannerConfig::from_lookup(lookup(&[
            ("PLANNER_DB_PATH", "/tmp/a.db"),
            ("PLANNER_DB_URL", "sqlite:///tmp/b.db"),
        ]))
        .unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("/tmp/a.db"));
    }

    #[test]
    fn sqlite_and_file_urls() {
        assert_eq!(sqlite_path_from_url("sqlite:///var/p.db").unwrap(), PathBuf::from("/var/p.db"));
        assert_eq!(sqlite_path_from_url("file://rel/p.db").unwrap(), PathBuf::from("rel/p.db"));
        assert!(matches!(
            sqlite_path_from_url("postgres://u@h/db"),
            Err(PlannerError::Configuration(_))
        ));
    }

    #[test]
    fn reseed_and_catalog_flags() {
        let cfg = PlannerConfig::from_lookup(lookup(&[
            ("PLANNER_CATALOG", "seed.xlsx"),
            ("PLANNER_DIRECTORY", "  "),
            ("PLANNER_RESEED", "TRUE"),
            ("PLANNER_BIND", "0.0.0.0:9000"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();
        assert_eq!(cfg.catalog_path, Some(PathBuf::from("seed.xlsx")));
        assert_eq!(cfg.directory_path, None);
        assert!(cfg.reseed_catalog);
        assert_eq!(cfg.bind_addr, "0.0.0.0:9000");
        assert_eq!(cfg.log_filter, "debug");
    }

    #[test]
    fn directory_seed_path() {
        let cfg = PlannerConfig::from_lookup(lookup(&[("PLANNER_DIRECTORY", "data/directory.json")])).unwrap();
        assert_eq!(cfg.directory_path, Some(PathBuf::from("data/directory.json")));
        assert!(!cfg.reseed_catalog);
    }
}
