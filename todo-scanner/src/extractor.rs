//! Marker extraction from single lines of text.

use std::fmt;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Matches the start of a marker. Only the keyword followed by a colon
/// counts; `TODOs` or `FIXME` without a colon are plain text.
const MARKER_PATTERN: &str = r"(TODO|FIXME):";

/// Kind of inline marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarkerKind {
    /// A `TODO:` marker.
    Todo,

    /// A `FIXME:` marker.
    Fixme,
}

impl MarkerKind {
    /// The keyword as it appears in source text.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::Fixme => "FIXME",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "TODO" => Some(Self::Todo),
            "FIXME" => Some(Self::Fixme),
            _ => None,
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.keyword())
    }
}

/// A single marker found in a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerMatch {
    /// The marker keyword.
    pub kind: MarkerKind,

    /// Trailing text up to the next marker or end of line, trimmed.
    pub text: String,

    /// Byte offset of the keyword within the line.
    pub offset: usize,
}

/// Extracts `TODO:`/`FIXME:` markers from lines of text.
#[derive(Debug, Clone)]
pub struct MarkerExtractor {
    pattern: Regex,
}

impl MarkerExtractor {
    /// Create a new extractor.
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(MARKER_PATTERN)?,
        })
    }

    /// Extract every marker in `line`, in order of appearance.
    ///
    /// Each marker's text runs from just after its colon to the start of the
    /// next marker on the same line, or to the end of the line.
    pub fn extract(&self, line: &str) -> Vec<MarkerMatch> {
        let starts: Vec<(usize, usize, MarkerKind)> = self
            .pattern
            .captures_iter(line)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let kind = MarkerKind::from_keyword(caps.get(1)?.as_str())?;
                Some((whole.start(), whole.end(), kind))
            })
            .collect();

        starts
            .iter()
            .enumerate()
            .map(|(i, &(offset, text_start, kind))| {
                let text_end = starts.get(i + 1).map_or(line.len(), |next| next.0);
                MarkerMatch {
                    kind,
                    text: line[text_start..text_end].trim().to_string(),
                    offset,
                }
            })
            .collect()
    }
}
