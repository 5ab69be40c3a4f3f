use anyhow::Result;
use tracing::{info, warn};

use super::default_manifest_path;
use crate::cli::StatusArgs;
use crate::model::ExtractRunManifest;
use crate::util::read_json;

pub fn run(args: StatusArgs) -> Result<()> {
    let manifest_path = args
        .manifest_path
        .clone()
        .unwrap_or_else(|| default_manifest_path(&args.cache_root));

    info!(cache_root = %args.cache_root.display(), "status requested");

    if !manifest_path.exists() {
        warn!(path = %manifest_path.display(), "extract run manifest missing");
        return Ok(());
    }

    let manifest: ExtractRunManifest = read_json(&manifest_path)?;

    info!(
        run_id = %manifest.run_id,
        status = %manifest.status,
        started_at = %manifest.started_at,
        updated_at = %manifest.updated_at,
        command = %manifest.command,
        "loaded extract run manifest"
    );
    info!(
        pages = manifest.counts.page_count,
        substances = manifest.counts.substance_records,
        correlations = manifest.counts.correlation_records,
        grid_tables = manifest.counts.grid_tables,
        grid_fragments = manifest.counts.grid_fragments,
        merged_grid_tables = manifest.counts.merged_grid_tables,
        "extract counts"
    );

    for source in &manifest.source_hashes {
        info!(
            role = %source.role,
            path = %source.path,
            backend = %source.backend,
            pages = source.page_count,
            sha256 = %source.sha256,
            "source"
        );
    }

    for output in [
        &manifest.paths.substances_path,
        &manifest.paths.correlations_path,
        &manifest.paths.grid_tables_path,
    ]
    .into_iter()
    .flatten()
    {
        if !std::path::Path::new(output).exists() {
            warn!(path = %output, "table output missing");
        }
    }

    for warning in &manifest.warnings {
        warn!(warning = %warning, "extract warning");
    }

    Ok(())
}
