//! Line-delimited JSON datasets of issue/solution pairs

use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::SupportError;
use crate::models::IssueRecord;

/// A category and the dataset file feeding its namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSource {
    pub category: String,
    pub path: PathBuf,
}

impl DatasetSource {
    pub fn new(category: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            category: category.into(),
            path: path.into(),
        }
    }
}

/// Parses `CATEGORY=PATH`
impl FromStr for DatasetSource {
    type Err = SupportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((category, path)) if !category.trim().is_empty() && !path.trim().is_empty() => {
                Ok(Self::new(category.trim(), path.trim()))
            }
            _ => Err(SupportError::Dataset(format!(
                "expected CATEGORY=PATH, got '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.category, self.path.display())
    }
}

/// What a single dataset line turned into
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Record(IssueRecord),
    /// Issue text missing or blank; excluded silently
    EmptyIssue,
    /// Usable issue text but no id
    MissingId,
    /// Not a JSON object
    Invalid(String),
}

/// Records kept from a dataset and how many lines were dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDataset {
    pub records: Vec<IssueRecord>,
    pub skipped: usize,
}

/// Text form of a field: strings as-is, null or absent as empty, anything
/// else as its JSON rendering. Always trimmed.
fn text_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
    }
}

pub fn parse_line(line: &str) -> ParsedLine {
    let value: Value = match serde_json::from_str(line) {
        Ok(value) => value,
        Err(e) => return ParsedLine::Invalid(e.to_string()),
    };

    let Value::Object(fields) = value else {
        return ParsedLine::Invalid("not a JSON object".to_string());
    };

    let issue = text_field(fields.get("issue"));
    if issue.is_empty() {
        return ParsedLine::EmptyIssue;
    }

    let id = text_field(fields.get("id"));
    if id.is_empty() {
        return ParsedLine::MissingId;
    }

    ParsedLine::Record(IssueRecord {
        id,
        issue,
        solution: text_field(fields.get("solution")),
    })
}

/// Parse every non-blank line; data errors never abort the dataset
pub fn parse_dataset(contents: &str) -> ParsedDataset {
    let mut parsed = ParsedDataset::default();

    for (number, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line) {
            ParsedLine::Record(record) => parsed.records.push(record),
            ParsedLine::EmptyIssue => {
                tracing::debug!(line = number + 1, "Skipping record without issue text");
                parsed.skipped += 1;
            }
            ParsedLine::MissingId => {
                tracing::warn!(line = number + 1, "Skipping record without id");
                parsed.skipped += 1;
            }
            ParsedLine::Invalid(reason) => {
                tracing::warn!(line = number + 1, %reason, "Skipping unparsable line");
                parsed.skipped += 1;
            }
        }
    }

    parsed
}
