//! Strict IPv4 literal validation.
//!
//! Accepted: exactly four `.`-separated decimal octets, each 0-255, written
//! without leading zeros (`0` itself is fine). `192.168.001.001` is rejected
//! rather than normalised, because some parsers read a leading zero as octal.
//! Anything with a prefix, port, fifth group or IPv6 syntax is rejected.

use std::net::Ipv4Addr;

/// Characters removed from both ends of a cell before scoring.
const CELL_TRIM: [char; 2] = ['"', '\''];

/// Extra punctuation a naive split leaves on a field.
const FIELD_PUNCTUATION: [char; 9] = [',', ';', '|', '[', ']', '(', ')', '{', '}'];

/// Parse a dotted-quad with the strict rules above.
///
/// # Examples
/// ```
/// use terraform_ioc_normalizer::parsing::parse_strict_ipv4;
/// assert!(parse_strict_ipv4("102.129.165.164").is_some());
/// assert!(parse_strict_ipv4("192.168.001.001").is_none());
/// ```
pub fn parse_strict_ipv4(s: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut parts = s.split('.');
    for octet in octets.iter_mut() {
        *octet = parse_octet(parts.next()?)?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(Ipv4Addr::from(octets))
}

pub fn is_strict_ipv4(s: &str) -> bool {
    parse_strict_ipv4(s).is_some()
}

fn parse_octet(part: &str) -> Option<u8> {
    if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if part.len() > 1 && part.starts_with('0') {
        return None;
    }
    part.parse().ok()
}

/// Strip whitespace and quotes around a cell.
pub fn trim_cell(cell: &str) -> &str {
    cell.trim_matches(|c: char| c.is_whitespace() || CELL_TRIM.contains(&c))
}

/// [`trim_cell`] plus leftover delimiter punctuation and brackets.
pub fn clean_token(token: &str) -> &str {
    token.trim_matches(|c: char| {
        c.is_whitespace() || CELL_TRIM.contains(&c) || FIELD_PUNCTUATION.contains(&c)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_addresses() {
        assert_eq!(
            parse_strict_ipv4("192.168.1.1"),
            Some(Ipv4Addr::new(192, 168, 1, 1))
        );
        assert!(is_strict_ipv4("0.0.0.0"));
        assert!(is_strict_ipv4("255.255.255.255"));
        assert!(is_strict_ipv4("10.0.0.1"));
    }

    #[test]
    fn test_malformed_rejected() {
        for bad in [
            "999.1.1.1",
            "1.2.3",
            "1.2.3.4.5",
            "1.2.3.abc",
            "256.0.0.1",
            "1..2.3",
            "1.2.3.4.",
            ".1.2.3.4",
            "1.2.3.4/32",
            "1.2.3.4:80",
            "+1.2.3.4",
            "1.2.3.-4",
            "::1",
            "::ffff:1.2.3.4",
            "",
            " 1.2.3.4",
            "１.2.3.4",
        ] {
            assert!(!is_strict_ipv4(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_leading_zeros_rejected() {
        assert!(!is_strict_ipv4("192.168.001.001"));
        assert!(!is_strict_ipv4("192.168.1.01"));
        assert!(!is_strict_ipv4("010.0.0.1"));
        assert!(is_strict_ipv4("192.168.100.1"));
    }

    #[test]
    fn test_trim_cell() {
        assert_eq!(trim_cell("  \"10.0.0.1\" "), "10.0.0.1");
        assert_eq!(trim_cell("'10.0.0.1'"), "10.0.0.1");
        assert_eq!(trim_cell("10.0.0.1;"), "10.0.0.1;");
    }

    #[test]
    fn test_clean_token() {
        assert_eq!(clean_token("102.129.165.164;"), "102.129.165.164");
        assert_eq!(clean_token(" [\"10.0.0.1\"], "), "10.0.0.1");
        assert_eq!(clean_token("(1.2.3.4)"), "1.2.3.4");
        assert_eq!(clean_token("1.2.3.4."), "1.2.3.4.");
    }
}
