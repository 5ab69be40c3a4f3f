use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::model::SourceEntry;
use crate::util::{sha256_bytes, sha256_file};

const FORM_FEED: char = '\u{000C}';

/// Raw per-page text of one source document.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub role: &'static str,
    pub path: PathBuf,
    pub backend: &'static str,
    pub pages: Vec<String>,
    pub sha256: String,
}

impl LoadedSource {
    pub fn entry(&self) -> SourceEntry {
        SourceEntry {
            role: self.role.to_string(),
            path: self.path.display().to_string(),
            backend: self.backend.to_string(),
            page_count: self.pages.len(),
            sha256: self.sha256.clone(),
        }
    }
}

/// Loads a `.pdf` through `pdftotext`, anything else as a text transcript
/// with pages separated by form feeds.
pub fn load_source(role: &'static str, path: &Path) -> Result<LoadedSource> {
    if !path.is_file() {
        bail!("{} source not found: {}", role, path.display());
    }

    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    let source = if is_pdf {
        LoadedSource {
            role,
            path: path.to_path_buf(),
            backend: "pdftotext",
            pages: extract_pages_with_pdftotext(path)?,
            sha256: sha256_file(path)?,
        }
    } else {
        let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        LoadedSource {
            role,
            path: path.to_path_buf(),
            backend: "text",
            pages: split_pages(&String::from_utf8_lossy(&raw)),
            sha256: sha256_bytes(&raw),
        }
    };

    info!(
        role,
        path = %source.path.display(),
        backend = source.backend,
        pages = source.pages.len(),
        "loaded source"
    );

    Ok(source)
}

pub fn split_pages(text: &str) -> Vec<String> {
    let mut pages: Vec<String> = text
        .split(FORM_FEED)
        .map(|chunk| chunk.replace('\u{0000}', ""))
        .collect();

    while let Some(last_page) = pages.last() {
        if last_page.trim().is_empty() {
            pages.pop();
            continue;
        }
        break;
    }

    pages
}

fn extract_pages_with_pdftotext(pdf_path: &Path) -> Result<Vec<String>> {
    let output = Command::new("pdftotext")
        .arg("-enc")
        .arg("UTF-8")
        .arg(pdf_path)
        .arg("-")
        .output()
        .with_context(|| format!("failed to execute pdftotext for {}", pdf_path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "pdftotext returned non-zero exit status for {}: {}",
            pdf_path.display(),
            stderr.trim()
        );
    }

    Ok(split_pages(&String::from_utf8_lossy(&output.stdout)))
}
