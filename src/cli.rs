use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::TableKind;

#[derive(Parser, Debug)]
#[command(
    name = "thermo-tables",
    version,
    about = "Extract substance property, vapor-pressure and reduced-property tables from page text"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Extract(ExtractArgs),
    Lookup(LookupArgs),
    Psat(PsatArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(long, default_value = ".cache/thermo-tables")]
    pub cache_root: PathBuf,

    /// Pages of the substance property table (.pdf or form-feed separated text).
    #[arg(long)]
    pub properties: Option<PathBuf>,

    /// Pages of the vapor-pressure correlation table.
    #[arg(long)]
    pub correlations: Option<PathBuf>,

    /// Pages of the reduced-property grid tables.
    #[arg(long)]
    pub grid: Option<PathBuf>,

    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum PropertyFamily {
    Z,
    H,
    S,
    Phi,
}

impl PropertyFamily {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Z => "z",
            Self::H => "h",
            Self::S => "s",
            Self::Phi => "phi",
        }
    }

    /// Base and correction table for this family.
    pub fn table_kinds(self) -> (TableKind, TableKind) {
        match self {
            Self::Z => (TableKind::Z0, TableKind::Z1),
            Self::H => (TableKind::H0, TableKind::H1),
            Self::S => (TableKind::S0, TableKind::S1),
            Self::Phi => (TableKind::Phi0, TableKind::Phi1),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct LookupArgs {
    #[arg(long, default_value = ".cache/thermo-tables")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub grid_tables_path: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = PropertyFamily::Z)]
    pub property: PropertyFamily,

    #[arg(long)]
    pub pr: f64,

    #[arg(long)]
    pub tr: f64,

    /// Acentric factor; when given the two terms are combined.
    #[arg(long)]
    pub omega: Option<f64>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PsatArgs {
    #[arg(long, default_value = ".cache/thermo-tables")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub correlations_path: Option<PathBuf>,

    /// Compound name or formula.
    #[arg(long)]
    pub compound: String,

    /// Temperature in degrees Celsius.
    #[arg(long)]
    pub t: f64,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = ".cache/thermo-tables")]
    pub cache_root: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}
