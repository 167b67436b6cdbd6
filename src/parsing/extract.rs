//! IPv4 extraction from tokenized rows.

use super::delimiter::Row;
use super::validate::{clean_token, parse_strict_ipv4};
use lazy_static::lazy_static;
use regex::Regex;
use std::net::Ipv4Addr;

lazy_static! {
    // Maximal runs of word characters and dots. An address glued to letters or
    // followed by a fifth group stays one run and fails validation.
    static ref CANDIDATE_RUN: Regex = Regex::new(r"[0-9A-Za-z.]+").expect("Invalid Regex?");
}

/// Collect every valid address from `rows`, in scan order, duplicates kept.
///
/// Tokens are validated one by one. A row whose tokens hold no address is
/// scanned again as free text, so log lines and misaligned columns still
/// yield their addresses. Invalid tokens are dropped silently.
pub fn extract(rows: &[Row]) -> Vec<Ipv4Addr> {
    let mut addrs = Vec::new();
    let mut recovered = 0;
    for row in rows {
        let before = addrs.len();
        addrs.extend(
            row.tokens
                .iter()
                .filter_map(|token| parse_strict_ipv4(clean_token(token))),
        );
        if addrs.len() == before {
            let found = scan_line(row.line);
            if !found.is_empty() {
                log::trace!("line {}: recovered {} by scan", row.line_no, found.len());
                recovered += found.len();
            }
            addrs.extend(found);
        }
    }
    log::debug!(
        "extract(): rows={} addresses={} recovered_by_scan={}",
        rows.len(),
        addrs.len(),
        recovered
    );
    addrs
}

/// Find IPv4 literals embedded anywhere in `line`.
pub fn scan_line(line: &str) -> Vec<Ipv4Addr> {
    CANDIDATE_RUN
        .find_iter(line)
        .filter_map(|m| parse_strict_ipv4(m.as_str().trim_matches('.')))
        .collect()
}
