//! Domain models for the IoC normalizer.
//!
//! This module contains the core data structures used throughout the application:
//! - [`SourceDocument`] - Loaded input file
//! - [`Ipv4`] - IPv4 address with CIDR notation support
//! - [`RawAddressSet`] and [`CidrRecord`] - Validated addresses and their `/32` forms
//! - [`ExportSnapshot`] - Timestamped export record

mod address;
mod ipv4;
mod snapshot;
mod source;

// Re-export public types
pub use address::{CidrRecord, RawAddressSet};
pub use ipv4::{Ipv4, MAX_LENGTH};
pub use snapshot::{ExportSnapshot, TIMESTAMP_FORMAT};
pub use source::{is_supported, SourceDocument};
