use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalProps {
    #[serde(rename = "tc")]
    pub temperature: f64,
    #[serde(rename = "pc")]
    pub pressure: f64,
    #[serde(rename = "vc")]
    pub volume: f64,
    #[serde(rename = "zc")]
    pub compressibility_factor: f64,
}

/// One row of the pure-substance characteristic property table.
///
/// `acentric_factor` or `normal_boiling_temp` is 0.0 when the source row
/// printed a dash in its place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstanceRecord {
    pub name: String,
    #[serde(rename = "mw")]
    pub molar_mass: f64,
    #[serde(rename = "acentric")]
    pub acentric_factor: f64,
    #[serde(rename = "tn")]
    pub normal_boiling_temp: f64,
    pub critical: CriticalProps,
}

/// Vapor-pressure correlation constants: `ln P = A - B / (T + C)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationRecord {
    pub name: String,
    pub formula: String,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    #[serde(rename = "t_min")]
    pub valid_temp_min: f64,
    #[serde(rename = "t_max")]
    pub valid_temp_max: f64,
    #[serde(rename = "h")]
    pub enthalpy_param: f64,
    #[serde(rename = "tn")]
    pub normal_boiling_temp: f64,
}

/// The eight reduced-property correction tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Z0,
    Z1,
    H0,
    H1,
    S0,
    S1,
    Phi0,
    Phi1,
}

impl TableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Z0 => "z0",
            Self::Z1 => "z1",
            Self::H0 => "h0",
            Self::H1 => "h1",
            Self::S0 => "s0",
            Self::S1 => "s1",
            Self::Phi0 => "phi0",
            Self::Phi1 => "phi1",
        }
    }
}

/// Values are indexed `[temperature row][pressure column]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridTable {
    pub kind: TableKind,
    #[serde(rename = "reduced_pressure")]
    pub reduced_pressure_axis: Vec<f64>,
    #[serde(rename = "reduced_temperature")]
    pub reduced_temperature_axis: Vec<f64>,
    pub values: Vec<Vec<Option<f64>>>,
}

pub type GridTables = BTreeMap<TableKind, Vec<GridTable>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEntry {
    pub role: String,
    pub path: String,
    pub backend: String,
    pub page_count: usize,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractPaths {
    pub cache_root: String,
    pub out_dir: String,
    pub manifest_path: String,
    pub substances_path: Option<String>,
    pub correlations_path: Option<String>,
    pub grid_tables_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractCounts {
    pub page_count: usize,
    pub substance_records: usize,
    pub correlation_records: usize,
    pub grid_tables: usize,
    pub grid_fragments: usize,
    pub merged_grid_tables: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub command: String,
    pub paths: ExtractPaths,
    pub counts: ExtractCounts,
    pub source_hashes: Vec<SourceEntry>,
    pub warnings: Vec<String>,
    pub notes: Vec<String>,
}
