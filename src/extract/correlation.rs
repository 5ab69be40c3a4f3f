use tracing::{debug, trace};

use super::classify::{CORRELATION_TABLE_NOISE, is_known_noise};
use super::normalize::{NormalizeProfile, normalize_line, page_lines};
use super::scanner::{NumericScanner, TrailingFields, take_trailing};
use crate::model::CorrelationRecord;

const CORRELATION_FIELDS: usize = 7;

pub fn parse_correlation_pages(
    scanner: &NumericScanner,
    pages: &[String],
) -> Vec<CorrelationRecord> {
    let mut records = Vec::<CorrelationRecord>::new();

    for (page_index, page) in pages.iter().enumerate() {
        let before = records.len();

        for raw_line in page_lines(page) {
            let line = normalize_line(raw_line, NormalizeProfile::CorrelationTable);
            if is_known_noise(&line, &CORRELATION_TABLE_NOISE) {
                trace!(page = page_index + 1, line = %line, "skipped header line");
                continue;
            }

            if scanner.count(&line) < CORRELATION_FIELDS {
                continue;
            }

            match parse_correlation_row(scanner, &line) {
                Some(record) => records.push(record),
                None => debug!(page = page_index + 1, line = %line, "dropped correlation row"),
            }
        }

        debug!(
            page = page_index + 1,
            rows = records.len() - before,
            "parsed correlation page"
        );
    }

    records
}

/// Parses one normalized row: name words, a formula, then A, B, C,
/// T_min, T_max, the enthalpy parameter and the normal boiling point.
pub fn parse_correlation_row(scanner: &NumericScanner, line: &str) -> Option<CorrelationRecord> {
    let tokens = scanner.tokens(line);
    let TrailingFields { prefix, values } = take_trailing(line, &tokens, CORRELATION_FIELDS)?;
    let (name, formula) = split_name_formula(&prefix)?;
    let &[a, b, c, valid_temp_min, valid_temp_max, enthalpy_param, normal_boiling_temp] =
        values.as_slice()
    else {
        return None;
    };

    Some(CorrelationRecord {
        name,
        formula,
        a,
        b,
        c,
        valid_temp_min,
        valid_temp_max,
        enthalpy_param,
        normal_boiling_temp,
    })
}

/// The last whitespace group is the formula, everything before it the name.
/// A trailing all-digit group is a subscript the extractor split off the
/// formula ("CCl 4") and is glued back on first.
pub fn split_name_formula(prefix: &str) -> Option<(String, String)> {
    let mut groups = prefix
        .split_whitespace()
        .map(str::to_string)
        .collect::<Vec<String>>();
    if groups.len() < 2 {
        return None;
    }

    let detached_subscript = groups.len() > 2
        && groups
            .last()
            .map(|group| group.chars().all(|character| character.is_ascii_digit()))
            .unwrap_or(false);
    if detached_subscript {
        let subscript = groups.pop()?;
        if let Some(formula) = groups.last_mut() {
            formula.push_str(&subscript);
        }
    }

    let formula = groups.pop()?;
    Some((groups.join(" "), formula))
}
