use super::scanner::NumericScanner;

pub const MIN_DATA_ROW_TOKENS: usize = 6;

pub const PROPERTY_TABLE_NOISE: [&str; 4] =
    ["Table B.1", "Molar mass", "Critical properties", "Substance"];

pub const CORRELATION_TABLE_NOISE: [&str; 3] = ["Table B.2", "Constants", "Formula"];

/// Page furniture shared by every page of a table: titles, column captions
/// and units lines.
pub fn is_known_noise(line: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| line.contains(marker))
}

/// A data row starts with a letter or digit and carries at least six
/// numeric tokens.
pub fn is_data_row(scanner: &NumericScanner, line: &str) -> bool {
    let starts_alphanumeric = line
        .chars()
        .next()
        .map(char::is_alphanumeric)
        .unwrap_or(false);

    starts_alphanumeric && scanner.count(line) >= MIN_DATA_ROW_TOKENS
}
