use std::path::{Path, PathBuf};

pub mod extract;
pub mod lookup;
pub mod psat;
pub mod sources;
pub mod status;

pub const SUBSTANCES_FILE: &str = "substances.json";
pub const CORRELATIONS_FILE: &str = "correlations.json";
pub const GRID_TABLES_FILE: &str = "grid_tables.json";

pub fn tables_dir(cache_root: &Path) -> PathBuf {
    cache_root.join("tables")
}

pub fn default_manifest_path(cache_root: &Path) -> PathBuf {
    cache_root.join("manifests").join("extract_run.json")
}
