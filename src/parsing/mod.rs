//! Input parsing.
//!
//! - [`validate`] - Strict IPv4 literal validation
//! - [`delimiter`] - Delimiter/header detection and tokenization
//! - [`extract`] - Address extraction from rows

mod delimiter;
mod extract;
mod validate;

pub use delimiter::{detect, tokenize, Delimiter, DelimiterProfile, Row};
pub use extract::{extract, scan_line};
pub use validate::{clean_token, is_strict_ipv4, parse_strict_ipv4, trim_cell};
