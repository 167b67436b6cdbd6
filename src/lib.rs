//! Normalize loosely structured IPv4 IoC exports into Terraform-ready `/32` blocks.
//!
//! Pipeline: [`parsing::detect`] -> [`parsing::tokenize`] -> [`parsing::extract`]
//! -> [`processing::dedupe`] -> [`processing::to_cidr`] -> [`output`].
//! [`session::Session`] strings the stages together for a front end.

pub mod cmd;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod parsing;
pub mod processing;
pub mod session;

pub use error::{NormalizerError, Result};
pub use session::{Session, Stage, Summary};

use models::RawAddressSet;
use parsing::DelimiterProfile;

/// Detect, tokenize, extract and de-duplicate `content`.
///
/// Never fails: unusable input yields an empty set.
///
/// # Examples
/// ```
/// use terraform_ioc_normalizer::{normalize, parsing::Delimiter};
/// let (profile, addrs) = normalize("IP Address;\n102.129.165.164;\n103.136.69.227;\n");
/// assert_eq!(profile.delimiter, Delimiter::Semicolon);
/// assert!(profile.has_header);
/// assert_eq!(addrs.to_strings(), vec!["102.129.165.164", "103.136.69.227"]);
/// ```
pub fn normalize(content: &str) -> (DelimiterProfile, RawAddressSet) {
    let profile = parsing::detect(content);
    let rows = parsing::tokenize(content, &profile);
    let addrs = processing::dedupe(parsing::extract(&rows));
    (profile, addrs)
}
