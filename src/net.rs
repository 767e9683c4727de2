use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use ipnet::{Ipv4AddrRange, Ipv4Net};

use crate::error::{Error, Result};

/// A validated IPv4 range in CIDR notation.
///
/// Host bits in the input are accepted and masked off, so `192.168.1.37/24`
/// describes the same range as `192.168.1.0/24`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct NetworkRange {
    net: Ipv4Net,
}

impl NetworkRange {
    pub fn parse(input: &str) -> Result<Self> {
        let net: Ipv4Net = input.trim().parse()?;
        Ok(Self { net: net.trunc() })
    }

    /// Network identifier of the range.
    pub fn network(&self) -> Ipv4Addr {
        self.net.network()
    }

    pub fn prefix_len(&self) -> u8 {
        self.net.prefix_len()
    }

    /// Iterates the usable host addresses in ascending order.
    ///
    /// The network and broadcast identifiers are excluded for prefixes up to
    /// /30; /31 and /32 ranges yield every address.
    pub fn hosts(&self) -> Ipv4AddrRange {
        self.net.hosts()
    }

    /// Number of usable host addresses, without enumerating them.
    pub fn host_count(&self) -> u64 {
        let span = 1u64 << (32 - self.net.prefix_len());
        if self.net.prefix_len() >= 31 {
            span
        } else {
            span - 2
        }
    }
}

impl FromStr for NetworkRange {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        Self::parse(input)
    }
}

impl fmt::Display for NetworkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.net)
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::NetworkRange;

    #[test]
    fn masks_host_bits() {
        let range = NetworkRange::parse("192.168.1.37/24").unwrap();
        assert_eq!(range.network(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(range.prefix_len(), 24);
        assert_eq!(range.to_string(), "192.168.1.0/24");
    }

    #[test]
    fn counts_usable_hosts() {
        let cases = [
            ("10.0.0.0/16", 65_534),
            ("192.168.1.0/24", 254),
            ("10.0.0.0/30", 2),
            ("10.0.0.0/31", 2),
            ("10.0.0.1/32", 1),
        ];
        for (input, expected) in cases {
            let range = NetworkRange::parse(input).unwrap();
            assert_eq!(range.host_count(), expected, "{input}");
        }
    }

    #[test]
    fn host_count_matches_enumeration() {
        for input in ["192.168.1.0/24", "10.0.0.0/29", "10.0.0.0/31", "10.0.0.1/32"] {
            let range = NetworkRange::parse(input).unwrap();
            assert_eq!(range.hosts().count() as u64, range.host_count(), "{input}");
        }
    }

    #[test]
    fn excludes_network_and_broadcast() {
        let range = NetworkRange::parse("10.0.0.0/29").unwrap();
        let hosts: Vec<Ipv4Addr> = range.hosts().collect();
        let expected: Vec<Ipv4Addr> = (1..=6).map(|d| Ipv4Addr::new(10, 0, 0, d)).collect();
        assert_eq!(hosts, expected);
    }

    #[test]
    fn single_address_range_keeps_its_address() {
        let range = NetworkRange::parse("10.1.2.3/32").unwrap();
        let hosts: Vec<Ipv4Addr> = range.hosts().collect();
        assert_eq!(hosts, vec![Ipv4Addr::new(10, 1, 2, 3)]);
    }

    #[test]
    fn rejects_malformed_input() {
        for input in ["999.0.0.0/24", "not-a-network", "10.0.0.0/33", "10.0.0.0", ""] {
            assert!(NetworkRange::parse(input).is_err(), "{input}");
        }
    }
}
