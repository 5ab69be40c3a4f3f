use anyhow::{Context, Result};
use regex::Regex;

const FLOAT_PATTERN: &str = r"[-+]?(?:\d*\.\d+|\d+)";

/// A floating-point literal found in a line and its byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericToken {
    pub text: String,
    pub start: usize,
}

impl NumericToken {
    pub fn value(&self) -> Option<f64> {
        self.text.parse::<f64>().ok()
    }
}

/// The non-numeric lead-in of a row and the values of its trailing run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailingFields {
    pub prefix: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct NumericScanner {
    float_regex: Regex,
}

impl NumericScanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            float_regex: Regex::new(FLOAT_PATTERN).context("failed to compile numeric regex")?,
        })
    }

    /// Expects an already normalized line.
    pub fn tokens(&self, line: &str) -> Vec<NumericToken> {
        self.float_regex
            .find_iter(line)
            .map(|found| NumericToken {
                text: found.as_str().to_string(),
                start: found.start(),
            })
            .collect()
    }

    pub fn count(&self, line: &str) -> usize {
        self.float_regex.find_iter(line).count()
    }
}

/// Takes the last `count` tokens of `line` as values and everything before
/// the first of them as the prefix.
///
/// Returns `None` when the line has fewer than `count` tokens or one of the
/// trailing tokens does not parse as a float.
pub fn take_trailing(line: &str, tokens: &[NumericToken], count: usize) -> Option<TrailingFields> {
    if count == 0 || tokens.len() < count {
        return None;
    }

    let trailing = &tokens[tokens.len() - count..];
    let values = trailing
        .iter()
        .map(NumericToken::value)
        .collect::<Option<Vec<f64>>>()?;
    let prefix = line.get(..trailing[0].start)?.trim().to_string();

    Some(TrailingFields { prefix, values })
}
