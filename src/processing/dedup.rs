//! Address de-duplication logic.
//!
//! Collapses repeated addresses while keeping first-seen order.

use crate::models::RawAddressSet;
use itertools::Itertools;
use std::net::Ipv4Addr;

/// De-duplicate extracted addresses.
///
/// # Arguments
/// * `addrs` - Extractor output, in scan order, may contain duplicates
///
/// # Returns
/// The [`RawAddressSet`] with the first occurrence of each address kept
pub fn dedupe<I>(addrs: I) -> RawAddressSet
where
    I: IntoIterator<Item = Ipv4Addr>,
{
    let mut total = 0;
    let unique: Vec<Ipv4Addr> = addrs.into_iter().inspect(|_| total += 1).unique().collect();
    log::debug!(
        "dedupe(): {} addresses -> {} unique ({} duplicates dropped)",
        total,
        unique.len(),
        total - unique.len()
    );
    RawAddressSet::from_unique(unique)
}
