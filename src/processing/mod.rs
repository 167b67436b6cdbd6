//! Address processing logic.
//!
//! - [`dedup`] - De-duplication of extracted addresses
//! - [`cidr`] - Conversion to `/32` CIDR records

mod cidr;
mod dedup;

// Re-export public functions
pub use cidr::to_cidr;
pub use dedup::dedupe;
