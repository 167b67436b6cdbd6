//! Validated address collections.

use super::Ipv4;
use std::net::Ipv4Addr;

/// Ordered, duplicate-free list of validated IPv4 addresses.
///
/// Order is the order of first occurrence in the source file. Only
/// [`crate::processing::dedupe`] builds one from extractor output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAddressSet {
    addrs: Vec<Ipv4Addr>,
}

impl RawAddressSet {
    pub(crate) fn from_unique(addrs: Vec<Ipv4Addr>) -> RawAddressSet {
        RawAddressSet { addrs }
    }

    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ipv4Addr> {
        self.addrs.iter()
    }

    pub fn as_slice(&self) -> &[Ipv4Addr] {
        &self.addrs
    }

    /// Dotted-quad strings, in order.
    pub fn to_strings(&self) -> Vec<String> {
        self.addrs.iter().map(|a| a.to_string()).collect()
    }
}

impl<'a> IntoIterator for &'a RawAddressSet {
    type Item = &'a Ipv4Addr;
    type IntoIter = std::slice::Iter<'a, Ipv4Addr>;

    fn into_iter(self) -> Self::IntoIter {
        self.addrs.iter()
    }
}

/// One address together with its `/32` renderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CidrRecord {
    pub block: Ipv4,
}

impl CidrRecord {
    pub fn new(addr: Ipv4Addr) -> CidrRecord {
        CidrRecord {
            block: Ipv4::host(addr),
        }
    }

    pub fn address(&self) -> Ipv4Addr {
        self.block.addr
    }

    /// `ip/32`, for plain text and JSON arrays.
    pub fn bare(&self) -> String {
        self.block.to_string()
    }

    /// `"ip/32"`, for direct embedding in an HCL list.
    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.block)
    }

    /// `["ip/32"]`, a single-element HCL list for one rule.
    pub fn bracketed(&self) -> String {
        format!("[{}]", self.quoted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cidr_record_forms() {
        let rec = CidrRecord::new(Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(rec.bare(), "10.0.0.1/32");
        assert_eq!(rec.quoted(), "\"10.0.0.1/32\"");
        assert_eq!(rec.bracketed(), "[\"10.0.0.1/32\"]");
        assert_eq!(rec.address(), Ipv4Addr::new(10, 0, 0, 1));
        assert!(rec.block.is_host());
    }

    #[test]
    fn test_raw_set_strings() {
        let set = RawAddressSet::from_unique(vec![
            Ipv4Addr::new(192, 168, 1, 1),
            Ipv4Addr::new(10, 0, 0, 1),
        ]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.to_strings(), vec!["192.168.1.1", "10.0.0.1"]);
        assert_eq!((&set).into_iter().count(), 2);
        assert!(RawAddressSet::default().is_empty());
    }
}
