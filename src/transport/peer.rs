//! Peer identity for the connectionless link.

use std::fmt;
use std::str::FromStr;

use crate::error::NodeError;

/// Fixed 6-byte hardware address identifying the single receiver.
///
/// Loaded from configuration at startup and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeerAddress([u8; 6]);

impl PeerAddress {
    /// Broadcast placeholder address (`ff:ff:ff:ff:ff:ff`).
    ///
    /// A real deployment must configure the true receiver address; broadcast
    /// frames get no link-layer acknowledgement, so sends to this address
    /// report failure.
    pub const BROADCAST: PeerAddress = PeerAddress([0xFF; 6]);

    /// Creates an address from raw octets.
    #[must_use]
    pub fn new(octets: [u8; 6]) -> Self {
        Self(octets)
    }

    /// Returns the raw octets.
    #[must_use]
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Whether this is the broadcast placeholder.
    #[must_use]
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

impl FromStr for PeerAddress {
    type Err = NodeError;

    /// Parses a colon-separated hex address such as `24:6f:28:ab:cd:ef`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() != 6 {
            return Err(NodeError::InvalidPeerAddress(s.to_string()));
        }

        let mut octets = [0u8; 6];
        for (i, part) in parts.iter().enumerate() {
            octets[i] = u8::from_str_radix(part, 16)
                .map_err(|_| NodeError::InvalidPeerAddress(s.to_string()))?;
        }
        Ok(Self(octets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_address() {
        let addr: PeerAddress = "24:6f:28:ab:cd:ef".parse().unwrap();
        assert_eq!(addr.octets(), [0x24, 0x6F, 0x28, 0xAB, 0xCD, 0xEF]);
    }

    #[test]
    fn test_parse_uppercase() {
        let addr: PeerAddress = "FF:FF:FF:FF:FF:FF".parse().unwrap();
        assert!(addr.is_broadcast());
    }

    #[test]
    fn test_display_round_trip() {
        let addr: PeerAddress = "24:6f:28:ab:cd:ef".parse().unwrap();
        assert_eq!(addr.to_string(), "24:6f:28:ab:cd:ef");
        let back: PeerAddress = addr.to_string().parse().unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn test_rejects_wrong_octet_count() {
        assert!("24:6f:28:ab:cd".parse::<PeerAddress>().is_err());
        assert!("24:6f:28:ab:cd:ef:01".parse::<PeerAddress>().is_err());
        assert!("".parse::<PeerAddress>().is_err());
    }

    #[test]
    fn test_rejects_non_hex() {
        assert!("zz:6f:28:ab:cd:ef".parse::<PeerAddress>().is_err());
        assert!("not-a-mac".parse::<PeerAddress>().is_err());
    }

    #[test]
    fn test_rejects_wide_octets() {
        assert!("246f:28:ab:cd:ef:01".parse::<PeerAddress>().is_err());
    }

    #[test]
    fn test_broadcast_constant() {
        assert_eq!(PeerAddress::BROADCAST.octets(), [0xFF; 6]);
        assert!(PeerAddress::BROADCAST.is_broadcast());
        assert!(!PeerAddress::new([0, 1, 2, 3, 4, 5]).is_broadcast());
    }
}
