//! Delimiter and header detection, and row tokenization.
//!
//! Each candidate delimiter is scored by the number of cells that are strict
//! IPv4 literals when the sampled lines are split on it. The highest score
//! wins; ties go to the earlier entry of [`Delimiter::CANDIDATES`]. When every
//! candidate scores zero the file is read line by line ([`Delimiter::None`]).

use super::validate::{is_strict_ipv4, trim_cell};
use crate::config::SAMPLE_LINES;

/// Field separator of an input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    Comma,
    Semicolon,
    Tab,
    Pipe,
    /// No separator found, each line is a single token.
    None,
}

impl Delimiter {
    /// Candidates in tie-break priority order.
    pub const CANDIDATES: [Delimiter; 4] = [
        Delimiter::Comma,
        Delimiter::Semicolon,
        Delimiter::Tab,
        Delimiter::Pipe,
    ];

    pub fn as_char(&self) -> Option<char> {
        match self {
            Delimiter::Comma => Some(','),
            Delimiter::Semicolon => Some(';'),
            Delimiter::Tab => Some('\t'),
            Delimiter::Pipe => Some('|'),
            Delimiter::None => None,
        }
    }

    /// Split one line. Ragged rows are fine, every line stands alone.
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self.as_char() {
            Some(c) => line.split(c).collect(),
            None => vec![line],
        }
    }

    /// Number of strict IPv4 cells on `line`.
    fn valid_cells(&self, line: &str) -> usize {
        self.split(line)
            .into_iter()
            .filter(|cell| is_strict_ipv4(trim_cell(cell)))
            .count()
    }

    /// Number of strict IPv4 cells across `lines`.
    pub fn score(&self, lines: &[&str]) -> usize {
        lines.iter().map(|line| self.valid_cells(line)).sum()
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Delimiter::Comma => "comma",
            Delimiter::Semicolon => "semicolon",
            Delimiter::Tab => "tab",
            Delimiter::Pipe => "pipe",
            Delimiter::None => "none",
        };
        write!(f, "{name}")
    }
}

/// Result of [`detect`] for one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterProfile {
    pub delimiter: Delimiter,
    /// First non-blank line is a header and is not data.
    pub has_header: bool,
    /// Valid IPv4 cells found in the sample with the chosen delimiter.
    pub score: usize,
}

impl Default for DelimiterProfile {
    fn default() -> Self {
        DelimiterProfile {
            delimiter: Delimiter::None,
            has_header: false,
            score: 0,
        }
    }
}

/// One non-blank input line and its cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    /// 1-based line number in the source.
    pub line_no: usize,
    pub line: &'a str,
    pub tokens: Vec<&'a str>,
}

/// Non-blank lines with their 1-based line numbers.
fn data_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| (i + 1, line))
}

/// Infer the delimiter and header of `content`. Never fails.
pub fn detect(content: &str) -> DelimiterProfile {
    let sample: Vec<&str> = data_lines(content)
        .take(SAMPLE_LINES)
        .map(|(_, line)| line)
        .collect();
    if sample.is_empty() {
        log::debug!("detect(): empty input, no delimiter");
        return DelimiterProfile::default();
    }

    let mut best = DelimiterProfile::default();
    for candidate in Delimiter::CANDIDATES {
        let score = candidate.score(&sample);
        log::trace!("detect(): {candidate} scored {score}");
        // strictly greater keeps the earlier candidate on ties
        if score > best.score {
            best.delimiter = candidate;
            best.score = score;
        }
    }

    if best.delimiter != Delimiter::None {
        let first = best.delimiter.valid_cells(sample[0]);
        best.has_header = first == 0 && best.score > 0;
    }

    log::debug!(
        "detect(): delimiter={} has_header={} score={} sample_lines={}",
        best.delimiter,
        best.has_header,
        best.score,
        sample.len()
    );
    best
}

/// Split `content` into rows using `profile`, dropping blank lines and the header.
pub fn tokenize<'a>(content: &'a str, profile: &DelimiterProfile) -> Vec<Row<'a>> {
    let skip = usize::from(profile.has_header);
    data_lines(content)
        .skip(skip)
        .map(|(line_no, line)| Row {
            line_no,
            line,
            tokens: profile.delimiter.split(line),
        })
        .collect()
}
