use std::path::Path;

use anyhow::{Result, bail};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::sources::{LoadedSource, load_source};
use super::{
    CORRELATIONS_FILE, GRID_TABLES_FILE, SUBSTANCES_FILE, default_manifest_path, tables_dir,
};
use crate::cli::ExtractArgs;
use crate::extract::TableExtractor;
use crate::model::{ExtractCounts, ExtractPaths, ExtractRunManifest};
use crate::util::{now_utc_string, utc_compact_string, write_json_pretty};

pub fn run(args: ExtractArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    if args.properties.is_none() && args.correlations.is_none() && args.grid.is_none() {
        bail!("nothing to extract: pass --properties, --correlations or --grid");
    }

    let cache_root = args.cache_root.clone();
    let out_dir = args
        .out_dir
        .clone()
        .unwrap_or_else(|| tables_dir(&cache_root));
    let manifest_path = args
        .manifest_path
        .clone()
        .unwrap_or_else(|| default_manifest_path(&cache_root));

    info!(cache_root = %cache_root.display(), run_id = %run_id, "starting extract");

    // Every source is loaded before anything is written.
    let properties = args
        .properties
        .as_deref()
        .map(|path| load_source("properties", path))
        .transpose()?;
    let correlations = args
        .correlations
        .as_deref()
        .map(|path| load_source("correlations", path))
        .transpose()?;
    let grid = args
        .grid
        .as_deref()
        .map(|path| load_source("grid", path))
        .transpose()?;

    let extractor = TableExtractor::new()?;
    let mut counts = ExtractCounts::default();
    let mut warnings = Vec::<String>::new();
    let mut paths = ExtractPaths {
        cache_root: cache_root.display().to_string(),
        out_dir: out_dir.display().to_string(),
        manifest_path: manifest_path.display().to_string(),
        substances_path: None,
        correlations_path: None,
        grid_tables_path: None,
    };

    if let Some(source) = &properties {
        let records = extractor.substances(&source.pages);
        counts.page_count += source.pages.len();
        counts.substance_records = records.len();
        check_nonempty(source, records.len(), &mut warnings);
        info!(records = records.len(), "extracted substance properties");

        paths.substances_path = emit(&out_dir.join(SUBSTANCES_FILE), &records, args.dry_run)?;
    }

    if let Some(source) = &correlations {
        let records = extractor.correlations(&source.pages);
        counts.page_count += source.pages.len();
        counts.correlation_records = records.len();
        check_nonempty(source, records.len(), &mut warnings);
        info!(records = records.len(), "extracted correlation constants");

        paths.correlations_path = emit(&out_dir.join(CORRELATIONS_FILE), &records, args.dry_run)?;
    }

    if let Some(source) = &grid {
        let extraction = extractor.grid_tables(&source.pages);
        counts.page_count += source.pages.len();
        counts.grid_tables = extraction.tables.len();
        counts.grid_fragments = extraction.fragment_count;
        counts.merged_grid_tables = extraction.merged_count;
        check_nonempty(source, extraction.tables.len(), &mut warnings);
        warnings.extend(extraction.warnings);
        info!(
            tables = extraction.tables.len(),
            fragments = extraction.fragment_count,
            merged = extraction.merged_count,
            "extracted grid tables"
        );

        paths.grid_tables_path = emit(
            &out_dir.join(GRID_TABLES_FILE),
            &extraction.tables,
            args.dry_run,
        )?;
    }

    if args.dry_run {
        info!(
            pages = counts.page_count,
            substances = counts.substance_records,
            correlations = counts.correlation_records,
            grid_tables = counts.grid_tables,
            warnings = warnings.len(),
            "extract dry-run complete"
        );
        return Ok(());
    }

    let manifest = ExtractRunManifest {
        manifest_version: 1,
        run_id,
        status: "completed".to_string(),
        started_at,
        updated_at: now_utc_string(),
        command: render_extract_command(&args),
        paths,
        counts,
        source_hashes: [&properties, &correlations, &grid]
            .into_iter()
            .flatten()
            .map(LoadedSource::entry)
            .collect(),
        warnings,
        notes: vec![
            "Rows that do not fit a table grammar are dropped without error; compare record counts against the source."
                .to_string(),
        ],
    };

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote extract run manifest");

    Ok(())
}

fn emit<T: Serialize>(path: &Path, value: &T, dry_run: bool) -> Result<Option<String>> {
    if dry_run {
        return Ok(None);
    }

    write_json_pretty(path, value)?;
    info!(path = %path.display(), "wrote table output");
    Ok(Some(path.display().to_string()))
}

fn check_nonempty(source: &LoadedSource, count: usize, warnings: &mut Vec<String>) {
    if count > 0 {
        return;
    }

    warn!(role = source.role, path = %source.path.display(), "source produced no records");
    warnings.push(format!(
        "{} source {} produced no records",
        source.role,
        source.path.display()
    ));
}

fn render_extract_command(args: &ExtractArgs) -> String {
    let mut command = vec![
        "thermo-tables".to_string(),
        "extract".to_string(),
        "--cache-root".to_string(),
        args.cache_root.display().to_string(),
    ];

    let flags = [
        ("--properties", &args.properties),
        ("--correlations", &args.correlations),
        ("--grid", &args.grid),
        ("--out-dir", &args.out_dir),
        ("--manifest-path", &args.manifest_path),
    ];
    for (flag, value) in flags {
        if let Some(path) = value {
            command.push(flag.to_string());
            command.push(path.display().to_string());
        }
    }
    if args.dry_run {
        command.push("--dry-run".to_string());
    }

    command.join(" ")
}
