use tracing::{debug, trace};

use super::classify::{PROPERTY_TABLE_NOISE, is_data_row, is_known_noise};
use super::normalize::{NormalizeProfile, normalize_line, page_lines};
use super::scanner::{NumericScanner, NumericToken, TrailingFields, take_trailing};
use crate::model::{CriticalProps, SubstanceRecord};

const FULL_ROW_FIELDS: usize = 7;
const SHORT_ROW_FIELDS: usize = 6;

/// Acentric factors stay below this; critical temperatures in kelvin never do.
const ACENTRIC_CEILING: f64 = 10.0;

/// Which column a six-value row left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    MissingAcentric,
    MissingBoilingTemp,
}

/// Decides from the second value of a six-value row whether it is a critical
/// temperature (acentric factor omitted) or an acentric factor (boiling
/// temperature omitted).
pub fn infer_missing_field(second_value: f64) -> MissingField {
    if second_value > ACENTRIC_CEILING {
        MissingField::MissingAcentric
    } else {
        MissingField::MissingBoilingTemp
    }
}

pub fn parse_substance_pages(scanner: &NumericScanner, pages: &[String]) -> Vec<SubstanceRecord> {
    let mut records = Vec::<SubstanceRecord>::new();

    for (page_index, page) in pages.iter().enumerate() {
        let before = records.len();

        for raw_line in page_lines(page) {
            let line = normalize_line(raw_line, NormalizeProfile::PropertyTable);
            if is_known_noise(&line, &PROPERTY_TABLE_NOISE) || !is_data_row(scanner, &line) {
                trace!(page = page_index + 1, line = %line, "skipped non-data line");
                continue;
            }

            match parse_substance_row(scanner, &line) {
                Some(record) => records.push(record),
                None => debug!(page = page_index + 1, line = %line, "dropped substance row"),
            }
        }

        debug!(
            page = page_index + 1,
            rows = records.len() - before,
            "parsed substance page"
        );
    }

    records
}

/// Parses one normalized data row of the property table.
pub fn parse_substance_row(scanner: &NumericScanner, line: &str) -> Option<SubstanceRecord> {
    let tokens = scanner.tokens(line);

    match tokens.len() {
        count if count < SHORT_ROW_FIELDS => None,
        SHORT_ROW_FIELDS => parse_short_row(line, &tokens),
        _ => parse_full_row(line, &tokens),
    }
}

fn parse_full_row(line: &str, tokens: &[NumericToken]) -> Option<SubstanceRecord> {
    let TrailingFields { prefix, values } = take_trailing(line, tokens, FULL_ROW_FIELDS)?;
    let &[molar_mass, acentric, tc, pc, zc, vc, tn] = values.as_slice() else {
        return None;
    };

    Some(substance(prefix, molar_mass, acentric, tn, [tc, pc, zc, vc]))
}

fn parse_short_row(line: &str, tokens: &[NumericToken]) -> Option<SubstanceRecord> {
    let TrailingFields { prefix, values } = take_trailing(line, tokens, SHORT_ROW_FIELDS)?;
    let &[molar_mass, second, third, fourth, fifth, sixth] = values.as_slice() else {
        return None;
    };

    let record = match infer_missing_field(second) {
        MissingField::MissingAcentric => {
            substance(prefix, molar_mass, 0.0, 0.0, [second, third, fourth, fifth])
        }
        MissingField::MissingBoilingTemp => {
            substance(prefix, molar_mass, second, 0.0, [third, fourth, fifth, sixth])
        }
    };

    Some(record)
}

/// `critical` is ordered as printed: temperature, pressure, compressibility, volume.
fn substance(
    name: String,
    molar_mass: f64,
    acentric_factor: f64,
    normal_boiling_temp: f64,
    critical: [f64; 4],
) -> SubstanceRecord {
    let [temperature, pressure, compressibility_factor, volume] = critical;

    SubstanceRecord {
        name,
        molar_mass,
        acentric_factor,
        normal_boiling_temp,
        critical: CriticalProps {
            temperature,
            pressure,
            volume,
            compressibility_factor,
        },
    }
}
