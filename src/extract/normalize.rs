/// Which table grammar a line is about to be fed into.
///
/// The property and correlation tables carry footnote glyphs that never
/// belong to a value; the correlation table additionally prints an em-dash
/// between columns that would otherwise glue onto the following digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeProfile {
    PropertyTable,
    CorrelationTable,
    GridTable,
}

const FOOTNOTE_GLYPHS: [char; 2] = ['\u{2020}', '*'];

pub fn normalize_line(line: &str, profile: NormalizeProfile) -> String {
    let mut normalized = String::with_capacity(line.len());

    for character in line.chars() {
        match character {
            '\u{2212}' | '\u{2013}' => normalized.push('-'),
            '\u{2014}' if profile == NormalizeProfile::CorrelationTable => normalized.push(' '),
            glyph
                if profile != NormalizeProfile::GridTable && FOOTNOTE_GLYPHS.contains(&glyph) => {}
            other => normalized.push(other),
        }
    }

    normalized
}

/// Splits one page of extracted text into trimmed, non-empty lines.
pub fn page_lines(page: &str) -> Vec<&str> {
    page.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
