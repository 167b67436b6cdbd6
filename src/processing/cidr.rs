//! `/32` conversion.

use crate::models::{CidrRecord, RawAddressSet};

/// Map every address to its single-host CIDR record, same order.
pub fn to_cidr(addrs: &RawAddressSet) -> Vec<CidrRecord> {
    let records: Vec<CidrRecord> = addrs.iter().copied().map(CidrRecord::new).collect();
    log::info!("Generated {} /32 CIDR blocks", records.len());
    records
}
