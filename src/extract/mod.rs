//! Table extraction from per-page text transcripts.
//!
//! Every pipeline runs the same stages: page text is split into lines, each
//! line is normalized once for its table grammar, numeric tokens are
//! scanned, and the trailing run of values is assigned to fields. Rows that
//! do not fit the grammar are dropped; only the caller can tell from the
//! record count.

mod classify;
mod correlation;
mod grid;
mod normalize;
mod properties;
mod scanner;

use anyhow::Result;

use crate::model::{CorrelationRecord, SubstanceRecord};

pub use grid::GridExtraction;

#[derive(Debug, Clone)]
pub struct TableExtractor {
    scanner: scanner::NumericScanner,
}

impl TableExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            scanner: scanner::NumericScanner::new()?,
        })
    }

    /// Substance property rows in page/line order.
    pub fn substances(&self, pages: &[String]) -> Vec<SubstanceRecord> {
        properties::parse_substance_pages(&self.scanner, pages)
    }

    /// Vapor-pressure correlation rows in page/line order.
    pub fn correlations(&self, pages: &[String]) -> Vec<CorrelationRecord> {
        correlation::parse_correlation_pages(&self.scanner, pages)
    }

    /// Reduced-property grid tables, with split fragments merged per kind.
    pub fn grid_tables(&self, pages: &[String]) -> GridExtraction {
        grid::parse_grid_pages(&self.scanner, pages)
    }
}
