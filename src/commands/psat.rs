use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::info;

use super::{CORRELATIONS_FILE, tables_dir};
use crate::cli::PsatArgs;
use crate::model::CorrelationRecord;
use crate::util::read_json;

#[derive(Debug, Clone, Serialize)]
struct PsatResponse<'a> {
    name: &'a str,
    formula: &'a str,
    temperature: f64,
    ln_psat: f64,
    psat: f64,
}

pub fn run(args: PsatArgs) -> Result<()> {
    let path = args
        .correlations_path
        .clone()
        .unwrap_or_else(|| tables_dir(&args.cache_root).join(CORRELATIONS_FILE));
    let records: Vec<CorrelationRecord> = read_json(&path)?;

    info!(path = %path.display(), records = records.len(), "loaded correlation constants");

    let Some(record) = find_compound(&records, &args.compound) else {
        bail!("no correlation constants for {} in {}", args.compound, path.display());
    };

    let ln_psat = record
        .ln_psat(args.t)
        .with_context(|| format!("failed to evaluate saturation pressure for {}", record.name))?;
    let psat = record.psat(args.t)?;
    let response = PsatResponse {
        name: &record.name,
        formula: &record.formula,
        temperature: args.t,
        ln_psat,
        psat,
    };

    let mut output = io::BufWriter::new(io::stdout().lock());
    if args.json {
        serde_json::to_writer_pretty(&mut output, &response)
            .context("failed to serialize psat json output")?;
        writeln!(output)?;
    } else {
        writeln!(
            output,
            "{} ({}) at {} C: Psat={:.4} kPa",
            response.name, response.formula, response.temperature, response.psat
        )?;
    }
    output.flush()?;

    Ok(())
}

/// First record whose name or formula matches, in table order.
pub fn find_compound<'a>(
    records: &'a [CorrelationRecord],
    query: &str,
) -> Option<&'a CorrelationRecord> {
    records.iter().find(|record| record.matches(query))
}
