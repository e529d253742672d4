//! Node and clock sequence overrides for the time based versions

use std::{fmt::Display, str::FromStr};

use rand::Rng;

use crate::Error;

/// 48 bit node identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node(u64);

/// 14 bit clock sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockSeq(u16);

const NODE_MAX: u64 = (1 << 48) - 1;
const MULTICAST: u64 = 1 << 40;
const CLOCK_SEQ_MAX: u16 = (1 << 14) - 1;

impl Node {
    pub fn new(value: u64) -> Option<Self> {
        (value <= NODE_MAX).then_some(Self(value))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Random node with the multicast bit set, so it can never collide with
    /// a real IEEE 802 address
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self((rng.gen::<u64>() & NODE_MAX) | MULTICAST)
    }

    /// Parse an optional node
    ///
    /// An empty input means "no override".
    pub fn parse_opt(s: &str) -> Result<Option<Self>, Error> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        s.parse().map(Some)
    }
}

/// Hex bytes, optionally separated by `:` or `-`, read as a big-endian integer
///
/// `01:23:45:67:89:AB` is `0x0123456789ab`.
impl FromStr for Node {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| Error::InvalidNode {
            input: s.to_string(),
            reason,
        };
        let digits = s.replace([':', '-'], "");
        if digits.is_empty() {
            return Err(err("no hex digits"));
        }
        if digits.len() % 2 != 0 {
            return Err(err("odd number of hex digits"));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err("not a hex string"));
        }
        let digits = digits.trim_start_matches('0');
        if digits.len() > 12 {
            return Err(err("does not fit in 48 bits"));
        }
        let value = match digits {
            "" => 0,
            d => u64::from_str_radix(d, 16).map_err(|_| err("not a hex string"))?,
        };
        Ok(Self(value))
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = self.0.to_be_bytes();
        for (i, b) in bytes[2..].iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl ClockSeq {
    pub fn new(value: u16) -> Option<Self> {
        (value <= CLOCK_SEQ_MAX).then_some(Self(value))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self(rng.gen::<u16>() & CLOCK_SEQ_MAX)
    }

    /// Parse an optional clock sequence
    ///
    /// An empty input means "no override".
    pub fn parse_opt(s: &str) -> Result<Option<Self>, Error> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        s.parse().map(Some)
    }
}

/// Base 10 integer that fits in 14 bits
impl FromStr for ClockSeq {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| Error::InvalidClockSeq {
            input: s.to_string(),
            reason,
        };
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err("not a decimal number"));
        }
        s.parse::<u16>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| err("does not fit in 14 bits"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use test_case::test_case;

    #[test_case("01:23:45:67:89:AB" => 0x0123456789ab ; "colons")]
    #[test_case("01-23-45-67-89-ab" => 0x0123456789ab ; "dashes")]
    #[test_case("0123456789ab" => 0x0123456789ab ; "plain")]
    #[test_case("2001" => 0x2001 ; "short")]
    #[test_case("00:00:ff:ff:ff:ff:ff:ff" => 0xffffffffffff ; "leading zero bytes")]
    fn parse_node(s: &str) -> u64 {
        s.parse::<Node>().expect("failed to parse").get()
    }

    #[test_case("123" ; "odd length")]
    #[test_case("zz:zz" ; "not hex")]
    #[test_case("01:23:45:67:89:ab:cd" ; "too big")]
    #[test_case("::" ; "no digits")]
    fn bad_node(s: &str) {
        let err = s.parse::<Node>().unwrap_err();
        assert!(matches!(err, Error::InvalidNode { .. }));
        assert_eq!(err.input(), Some(s));
    }

    #[test]
    fn empty_is_no_override() {
        assert_eq!(Node::parse_opt("").unwrap(), None);
        assert_eq!(ClockSeq::parse_opt("  ").unwrap(), None);
    }

    #[test]
    fn node_display() {
        let node: Node = "01-23-45-67-89-AB".parse().unwrap();
        assert_eq!(node.to_string(), "01:23:45:67:89:ab");
    }

    #[test_case("1234" => 1234 ; "number")]
    #[test_case("0" => 0 ; "zero")]
    #[test_case("16383" => 16383 ; "max")]
    fn parse_clock_seq(s: &str) -> u16 {
        s.parse::<ClockSeq>().expect("failed to parse").get()
    }

    #[test_case("abc" ; "not a number")]
    #[test_case("-1" ; "negative")]
    #[test_case("16384" ; "too big")]
    #[test_case("99999999999" ; "way too big")]
    fn bad_clock_seq(s: &str) {
        let err = s.parse::<ClockSeq>().unwrap_err();
        assert!(matches!(err, Error::InvalidClockSeq { .. }));
    }

    #[test]
    fn random_defaults_in_range() {
        let mut rng = rand_pcg::Pcg64::seed_from_u64(3);
        for _ in 0..100 {
            let node = Node::random(&mut rng).get();
            assert!(node <= NODE_MAX);
            assert_ne!(node & MULTICAST, 0);
            assert!(ClockSeq::random(&mut rng).get() <= CLOCK_SEQ_MAX);
        }
    }
}
