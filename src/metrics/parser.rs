//! Marker detection and body tokenizing

use super::{Extraction, MetricSet};
use crate::error::CompareError;
use regex::Regex;
use std::borrow::Cow;

/// Metrics struct name emitted by the trie node iterator
pub const DEFAULT_MARKER: &str = "TrieNodeIterMetrics";

/// Lexical unit of a marker body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Run of text between delimiters, untrimmed
    Text(&'a str),
    /// `:`
    Colon,
    /// `,`
    Comma,
}

/// Splits a marker body into [`Token`]s
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    rest: &'a str,
}

impl<'a> Tokenizer<'a> {
    /// Tokenize `body`
    pub fn new(body: &'a str) -> Self {
        Self { rest: body }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let first = self.rest.chars().next()?;
        match first {
            ':' => {
                self.rest = &self.rest[1..];
                Some(Token::Colon)
            }
            ',' => {
                self.rest = &self.rest[1..];
                Some(Token::Comma)
            }
            _ => {
                let end = self.rest.find([':', ',']).unwrap_or(self.rest.len());
                let (text, rest) = self.rest.split_at(end);
                self.rest = rest;
                Some(Token::Text(text))
            }
        }
    }
}

/// One comma-delimited piece of the body
#[derive(Default)]
struct Segment<'a> {
    key: &'a str,
    value: &'a str,
    colons: usize,
    raw: String,
}

impl<'a> Segment<'a> {
    fn push(&mut self, token: Token<'a>) {
        match token {
            Token::Text(text) => {
                match self.colons {
                    0 => self.key = text,
                    1 => self.value = text,
                    _ => {}
                }
                self.raw.push_str(text);
            }
            Token::Colon => {
                self.colons += 1;
                self.raw.push(':');
            }
            Token::Comma => {}
        }
    }

    /// `(key, value)` if the segment holds exactly one colon
    fn pair(&self) -> Option<(&'a str, &'a str)> {
        (self.colons == 1).then(|| (self.key.trim(), self.value.trim()))
    }
}

/// Locates the metrics marker in a line and parses its body
#[derive(Debug, Clone)]
pub struct MetricExtractor {
    marker: String,
    pattern: Regex,
}

impl MetricExtractor {
    /// Extractor for `final_metrics=TrieNodeIterMetrics { ... }`
    pub fn new() -> Self {
        // SAFETY: the default marker is a plain identifier, so the escaped pattern always compiles.
        Self::with_marker(DEFAULT_MARKER).expect("default marker pattern is valid")
    }

    /// Extractor for `final_metrics=<struct_name> { ... }`
    ///
    /// # Examples
    ///
    /// ```
    /// use node_iter_compare::metrics::MetricExtractor;
    ///
    /// let extractor = MetricExtractor::with_marker("AccountIterMetrics")?;
    /// let extraction = extractor.extract("final_metrics=AccountIterMetrics { seeks: 3 }")?;
    /// assert_eq!(extraction.metrics().and_then(|m| m.get("seeks")), Some(3));
    /// # Ok::<(), node_iter_compare::error::CompareError>(())
    /// ```
    pub fn with_marker(struct_name: &str) -> Result<Self, CompareError> {
        let struct_name = struct_name.trim();
        if struct_name.is_empty() {
            return Err(CompareError::InvalidConfig {
                reason: "marker struct name must not be empty".to_string(),
            });
        }

        let pattern = format!(
            r"final_metrics={}\s*\{{\s*(.*?)\s*\}}",
            regex::escape(struct_name)
        );
        let pattern = Regex::new(&pattern).map_err(|e| CompareError::InvalidConfig {
            reason: format!("marker '{}' does not form a valid pattern: {}", struct_name, e),
        })?;

        Ok(Self {
            marker: struct_name.to_string(),
            pattern,
        })
    }

    /// Metrics struct name this extractor matches
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Scan one line for the marker and parse its `key: value` pairs
    ///
    /// Segments without exactly one colon are skipped and kept on
    /// [`MetricSet::skipped`]. A value that is not a base-10 integer fails the
    /// whole line.
    ///
    /// # Examples
    ///
    /// ```
    /// use node_iter_compare::metrics::{Extraction, MetricExtractor};
    ///
    /// let extractor = MetricExtractor::new();
    ///
    /// let line = "done final_metrics=TrieNodeIterMetrics { hashed_cursor_seek_count: 100 }";
    /// let metrics = extractor.extract(line)?;
    /// assert_eq!(metrics.metrics().and_then(|m| m.get("hashed_cursor_seek_count")), Some(100));
    ///
    /// assert_eq!(extractor.extract("no metrics here")?, Extraction::NotFound);
    /// # Ok::<(), node_iter_compare::error::CompareError>(())
    /// ```
    pub fn extract(&self, line: &str) -> Result<Extraction, CompareError> {
        let Some(body) = self
            .pattern
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
        else {
            return Ok(Extraction::NotFound);
        };

        parse_body(body).map(Extraction::Found)
    }
}

impl Default for MetricExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_body(body: &str) -> Result<MetricSet, CompareError> {
    let mut metrics = MetricSet::new();
    let mut segment = Segment::default();

    for token in Tokenizer::new(body).chain(std::iter::once(Token::Comma)) {
        if token != Token::Comma {
            segment.push(token);
            continue;
        }

        let finished = std::mem::take(&mut segment);
        match finished.pair() {
            Some((key, value)) => {
                let parsed = strip_digit_separators(value)
                    .parse::<u64>()
                    .map_err(|source| CompareError::InvalidMetricValue {
                        key: key.to_string(),
                        value: value.to_string(),
                        source,
                    })?;
                metrics.insert(key, parsed);
            }
            None => {
                let raw = finished.raw.trim();
                if !raw.is_empty() {
                    log::debug!("skipping malformed metric segment '{}'", raw);
                    metrics.record_skipped(raw.to_string());
                }
            }
        }
    }

    Ok(metrics)
}

/// Drop `_` separators placed between digits, as in `1_000`
///
/// Misplaced underscores are left in place so the integer parse rejects them.
fn strip_digit_separators(value: &str) -> Cow<'_, str> {
    if !value.contains('_') {
        return Cow::Borrowed(value);
    }

    let bytes = value.as_bytes();
    let well_placed = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    });

    if well_placed {
        Cow::Owned(value.replace('_', ""))
    } else {
        Cow::Borrowed(value)
    }
}
