//! Terminal output utilities.
//!
//! Renders the session projections (raw list, `/32` list, summary) for the CLI.

use crate::models::CidrRecord;
use crate::session::Summary;
use colored::Colorize;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Numbered listing of `items` under `title`.
pub fn render_list(title: &str, items: &[String]) -> String {
    let mut out = format!("# {title} [{}]\n", items.len());
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!("{},{}\n", format_field(i + 1, 6), format_field(item, 20)));
    }
    out
}

/// One HCL `cidr_blocks` assignment per record, for one rule per address.
pub fn render_rules(records: &[CidrRecord]) -> String {
    records
        .iter()
        .map(|r| format!("cidr_blocks = {}\n", r.bracketed()))
        .collect()
}

pub fn render_summary(summary: &Summary) -> String {
    format!(
        "Raw IPs: [{raw}]  Processed: [{processed}]  File: {file}  Stage: {stage}",
        raw = summary.raw_count,
        processed = summary.processed_count,
        file = summary.source_name.as_deref().unwrap_or("-"),
        stage = summary.stage,
    )
}

pub fn print_list(title: &str, items: &[String]) {
    print!("{}", render_list(title, items));
}

pub fn print_summary(summary: &Summary) {
    println!("{}", render_summary(summary).bold());
}
