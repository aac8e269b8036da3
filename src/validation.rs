//! Address validation.
//!
//! Every token is checked here before it reaches the blacklist file or a
//! firewall command line. Only bare host addresses are accepted; CIDR
//! suffixes and IPv6 zone identifiers are rejected.

use std::fmt;
use std::net::IpAddr;

use crate::error::{BlacklistError, Result};

/// A validated IPv4 or IPv6 host address.
///
/// Keeps the token exactly as it was supplied, so that what lands in the
/// blacklist file is what the operator typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    text: String,
    ip: IpAddr,
}

impl Address {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_ipv6(&self) -> bool {
        self.ip.is_ipv6()
    }

    /// Case-insensitive comparison against a raw line from the blacklist file.
    pub fn matches(&self, line: &str) -> bool {
        self.text.eq_ignore_ascii_case(line)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Validate a token and return it as an [`Address`].
///
/// # Examples
/// ```
/// use blacklist::validation::validate_address;
/// assert!(validate_address("192.168.1.1").is_ok());
/// assert!(validate_address("::1").is_ok());
/// assert!(validate_address("300.1.1.1").is_err());
/// assert!(validate_address("10.0.0.0/8").is_err());
/// ```
pub fn validate_address(token: &str) -> Result<Address> {
    let invalid = |reason: &str| BlacklistError::InvalidAddress {
        token: token.to_string(),
        reason: reason.to_string(),
    };

    if token.is_empty() {
        return Err(invalid("empty address"));
    }
    if token.chars().any(char::is_whitespace) {
        return Err(invalid("contains whitespace"));
    }
    if token.contains('/') {
        return Err(invalid("prefix lengths are not supported, use a host address"));
    }
    if token.contains('%') {
        return Err(invalid("zone identifiers are not supported"));
    }

    let ip: IpAddr = token
        .parse()
        .map_err(|_| invalid("not a valid IP literal"))?;

    Ok(Address {
        text: token.to_string(),
        ip,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(token: &str) -> String {
        match validate_address(token) {
            Err(BlacklistError::InvalidAddress { reason, .. }) => reason,
            other => panic!("expected InvalidAddress for {:?}, got {:?}", token, other),
        }
    }

    #[test]
    fn test_validate_ipv4() {
        let addr = validate_address("192.168.1.1").unwrap();
        assert_eq!(addr.as_str(), "192.168.1.1");
        assert!(!addr.is_ipv6());
    }

    #[test]
    fn test_validate_ipv6() {
        let addr = validate_address("2001:0db8:85a3:0000:0000:8a2e:0370:7334").unwrap();
        assert!(addr.is_ipv6());

        assert!(validate_address("::1").is_ok());
        assert!(validate_address("::").is_ok());
        assert!(validate_address("::ffff:10.0.0.1").is_ok());
    }

    #[test]
    fn test_validate_keeps_original_text() {
        let addr = validate_address("2001:DB8::1").unwrap();
        assert_eq!(addr.to_string(), "2001:DB8::1");
        assert!(addr.matches("2001:db8::1"));
        assert!(!addr.matches("2001:db8::2"));
    }

    #[test]
    fn test_validate_edge_values() {
        assert!(validate_address("0.0.0.0").is_ok());
        assert!(validate_address("255.255.255.255").is_ok());
    }

    #[test]
    fn test_validate_out_of_range_octet() {
        assert_eq!(reason("300.1.1.1"), "not a valid IP literal");
        assert_eq!(reason("256.0.0.0"), "not a valid IP literal");
    }

    #[test]
    fn test_validate_malformed() {
        assert!(validate_address("1.2.3").is_err());
        assert!(validate_address("1.2.3.4.5").is_err());
        assert!(validate_address("-1.0.0.0").is_err());
        assert!(validate_address("hello").is_err());
        assert!(validate_address("1.2.3.4x").is_err());
        assert!(validate_address("2001:db8::g").is_err());
    }

    #[test]
    fn test_validate_empty() {
        assert_eq!(reason(""), "empty address");
    }

    #[test]
    fn test_validate_whitespace() {
        assert_eq!(reason(" 1.2.3.4"), "contains whitespace");
        assert_eq!(reason("1.2.3.4 "), "contains whitespace");
        assert_eq!(reason("1.2.3.4\n"), "contains whitespace");
        assert_eq!(reason("1.2. 3.4"), "contains whitespace");
    }

    #[test]
    fn test_validate_rejects_cidr() {
        assert!(reason("10.0.0.0/8").contains("prefix lengths"));
        assert!(reason("2001:db8::/32").contains("prefix lengths"));
    }

    #[test]
    fn test_validate_rejects_zone_id() {
        assert!(reason("fe80::1%eth0").contains("zone"));
    }

    #[test]
    fn test_validate_injection_attempts() {
        assert!(validate_address("1.2.3.4;rm").is_err());
        assert!(validate_address("$(whoami)").is_err());
        assert!(validate_address("1.2.3.4 -j ACCEPT").is_err());
        assert!(validate_address("-F").is_err());
    }

    #[test]
    fn test_validate_unicode() {
        // Full-width digits
        assert!(validate_address("１.２.３.４").is_err());
    }
}
