use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use super::normalize::{NormalizeProfile, normalize_line, page_lines};
use super::scanner::{NumericScanner, NumericToken};
use crate::model::{GridTable, GridTables, TableKind};

const TITLE_MARKER: &str = "Table D.";
const PRESSURE_AXIS_MARKER: &str = "Pr =";
const MIN_GRID_ROW_TOKENS: usize = 2;

/// Title fragments, most specific first so "Z 1" never falls through to a
/// shorter pattern.
const KIND_FRAGMENTS: [(&str, TableKind); 9] = [
    ("Z 1", TableKind::Z1),
    ("Z1", TableKind::Z1),
    ("Z0", TableKind::Z0),
    ("( HR)1", TableKind::H1),
    ("( HR)0", TableKind::H0),
    ("( SR)1", TableKind::S1),
    ("( SR)0", TableKind::S0),
    ("ϕ1", TableKind::Phi1),
    ("ϕ0", TableKind::Phi0),
];

#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub reduced_temperature: f64,
    pub values: Vec<Option<f64>>,
}

/// One page's share of a logical grid table.
#[derive(Debug, Clone, PartialEq)]
pub struct GridFragment {
    pub kind: TableKind,
    pub page: usize,
    pub reduced_pressure_axis: Vec<f64>,
    pub rows: Vec<GridRow>,
}

#[derive(Debug, Default)]
pub struct GridExtraction {
    pub tables: GridTables,
    pub fragment_count: usize,
    pub merged_count: usize,
    pub warnings: Vec<String>,
}

/// Fragments collected per table kind; merging only happens in `finish`.
#[derive(Debug, Default)]
pub struct GridAccumulator {
    fragments: BTreeMap<TableKind, Vec<GridFragment>>,
}

pub fn kind_from_title(title: &str) -> Option<TableKind> {
    KIND_FRAGMENTS
        .iter()
        .find(|(fragment, _)| title.contains(fragment))
        .map(|(_, kind)| *kind)
}

pub fn parse_grid_pages(scanner: &NumericScanner, pages: &[String]) -> GridExtraction {
    let mut accumulator = GridAccumulator::default();

    for (page_index, page) in pages.iter().enumerate() {
        if let Some(fragment) = parse_grid_page(scanner, page_index + 1, page) {
            info!(
                page = fragment.page,
                kind = fragment.kind.as_str(),
                rows = fragment.rows.len(),
                columns = fragment.reduced_pressure_axis.len(),
                "parsed grid fragment"
            );
            accumulator.push(fragment);
        }
    }

    accumulator.finish()
}

/// Extracts the fragment printed on one page, if the page belongs to a
/// recognized grid table and yields both an axis and data rows.
pub fn parse_grid_page(
    scanner: &NumericScanner,
    page_number: usize,
    page: &str,
) -> Option<GridFragment> {
    let lines = page_lines(page);

    let title = lines
        .iter()
        .find(|line| line.contains(TITLE_MARKER) && line.contains(':'))?;
    let Some(kind) = kind_from_title(title) else {
        debug!(page = page_number, title = %title, "unrecognized grid table title");
        return None;
    };

    let mut axis = Vec::<f64>::new();
    let mut rows = Vec::<GridRow>::new();

    for raw_line in lines {
        let line = normalize_line(raw_line, NormalizeProfile::GridTable);

        if line.contains(PRESSURE_AXIS_MARKER) {
            axis = scanner
                .tokens(&line)
                .iter()
                .filter_map(NumericToken::value)
                .collect();
            continue;
        }

        if let Some(row) = parse_grid_row(scanner, &line, axis.len()) {
            rows.push(row);
        }
    }

    seal_fragment(kind, page_number, axis, rows)
}

/// Reads a reduced temperature followed by `width` value slots.
pub fn parse_grid_row(scanner: &NumericScanner, line: &str, width: usize) -> Option<GridRow> {
    let tokens = scanner.tokens(line);
    if width == 0 || tokens.len() < MIN_GRID_ROW_TOKENS {
        return None;
    }

    let reduced_temperature = tokens[0].value()?;
    let values = tokens[1..]
        .iter()
        .take(width)
        .map(NumericToken::value)
        .collect::<Vec<Option<f64>>>();

    (values.len() == width).then_some(GridRow {
        reduced_temperature,
        values,
    })
}

fn seal_fragment(
    kind: TableKind,
    page: usize,
    axis: Vec<f64>,
    mut rows: Vec<GridRow>,
) -> Option<GridFragment> {
    let before = rows.len();
    rows.retain(|row| row.values.len() == axis.len());
    if rows.len() != before {
        debug!(
            page,
            kind = kind.as_str(),
            dropped = before - rows.len(),
            "dropped rows read against a superseded pressure axis"
        );
    }

    if axis.is_empty() || rows.is_empty() {
        debug!(page, kind = kind.as_str(), "grid page produced no fragment");
        return None;
    }

    Some(GridFragment {
        kind,
        page,
        reduced_pressure_axis: axis,
        rows,
    })
}

impl GridFragment {
    fn into_table(self) -> GridTable {
        let (reduced_temperature_axis, values) = self
            .rows
            .into_iter()
            .map(|row| (row.reduced_temperature, row.values))
            .unzip();

        GridTable {
            kind: self.kind,
            reduced_pressure_axis: self.reduced_pressure_axis,
            reduced_temperature_axis,
            values,
        }
    }
}

impl GridAccumulator {
    pub fn push(&mut self, fragment: GridFragment) {
        self.fragments.entry(fragment.kind).or_default().push(fragment);
    }

    pub fn fragment_count(&self) -> usize {
        self.fragments.values().map(Vec::len).sum()
    }

    pub fn finish(self) -> GridExtraction {
        let mut extraction = GridExtraction {
            fragment_count: self.fragment_count(),
            ..GridExtraction::default()
        };

        for (kind, fragments) in self.fragments {
            let count = fragments.len();
            let mut fragments = fragments.into_iter();
            let (Some(first), second) = (fragments.next(), fragments.next()) else {
                continue;
            };

            if count > 2 {
                let message = format!(
                    "{} table split into {} fragments; merged the first two and ignored the rest",
                    kind.as_str(),
                    count
                );
                warn!(kind = kind.as_str(), fragments = count, "unexpected grid fragment count");
                extraction.warnings.push(message);
            }

            let table = match second {
                Some(second) => {
                    extraction.merged_count += 1;
                    merge_fragments(first, second, &mut extraction.warnings)
                }
                None => first.into_table(),
            };

            extraction.tables.insert(kind, vec![table]);
        }

        extraction
    }
}

/// Joins a low-pressure and a high-pressure fragment, dropping the second
/// fragment's first column (the shared boundary pressure).
pub fn merge_fragments(
    first: GridFragment,
    second: GridFragment,
    warnings: &mut Vec<String>,
) -> GridTable {
    let kind = first.kind;

    if first.reduced_pressure_axis.last() != second.reduced_pressure_axis.first() {
        let message = format!(
            "{} fragments on pages {} and {} do not share a boundary pressure",
            kind.as_str(),
            first.page,
            second.page
        );
        warn!(kind = kind.as_str(), "grid fragments do not share a boundary pressure");
        warnings.push(message);
    }

    if first.rows.len() != second.rows.len() {
        let message = format!(
            "{} fragments on pages {} and {} have {} and {} temperature rows",
            kind.as_str(),
            first.page,
            second.page,
            first.rows.len(),
            second.rows.len()
        );
        warn!(kind = kind.as_str(), "grid fragments differ in row count");
        warnings.push(message);
    }

    let tail_width = second.reduced_pressure_axis.len().saturating_sub(1);
    let mut merged = first.into_table();
    merged
        .reduced_pressure_axis
        .extend(second.reduced_pressure_axis.iter().skip(1));

    for (index, row) in merged.values.iter_mut().enumerate() {
        match second.rows.get(index) {
            Some(tail) => row.extend(tail.values.iter().skip(1)),
            None => row.extend(std::iter::repeat_n(None, tail_width)),
        }
    }

    merged
}
