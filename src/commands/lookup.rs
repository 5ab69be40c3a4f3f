use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use super::{GRID_TABLES_FILE, tables_dir};
use crate::cli::{LookupArgs, PropertyFamily};
use crate::lookup::{Correlation, combine};
use crate::model::GridTables;
use crate::util::read_json;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupResponse {
    pub property: String,
    pub reduced_pressure: f64,
    pub reduced_temperature: f64,
    pub base: f64,
    pub departure: f64,
    pub omega: Option<f64>,
    pub combined: Option<f64>,
}

pub fn run(args: LookupArgs) -> Result<()> {
    let path = args
        .grid_tables_path
        .clone()
        .unwrap_or_else(|| tables_dir(&args.cache_root).join(GRID_TABLES_FILE));
    let tables: GridTables = read_json(&path)?;

    info!(path = %path.display(), tables = tables.len(), "loaded grid tables");

    let response = evaluate(&tables, args.property, args.pr, args.tr, args.omega)?;

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut output, &response)
            .context("failed to serialize lookup json output")?;
        writeln!(output)?;
    } else {
        writeln!(
            output,
            "{}: Pr={} Tr={} base={:.5} departure={:.5}",
            response.property,
            response.reduced_pressure,
            response.reduced_temperature,
            response.base,
            response.departure,
        )?;
        if let (Some(omega), Some(combined)) = (response.omega, response.combined) {
            writeln!(output, "combined (omega={omega}): {combined:.5}")?;
        }
    }
    output.flush()?;

    Ok(())
}

pub fn evaluate(
    tables: &GridTables,
    property: PropertyFamily,
    pr: f64,
    tr: f64,
    omega: Option<f64>,
) -> Result<LookupResponse> {
    let (base_kind, departure_kind) = property.table_kinds();
    let correlation = Correlation::from_tables(tables, base_kind, departure_kind)?;
    let (base, departure) = correlation
        .at(pr, tr)
        .with_context(|| format!("failed to evaluate {} correlation", property.as_str()))?;

    Ok(LookupResponse {
        property: property.as_str().to_string(),
        reduced_pressure: pr,
        reduced_temperature: tr,
        base,
        departure,
        omega,
        combined: omega.map(|omega| combine(base, departure, omega)),
    })
}
