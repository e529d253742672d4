//! 128 bit UUID value and its version / variant fields
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                                                               |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                               |  ver  |                       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                                                           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                                                               |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

use std::{fmt::Display, str::FromStr};

use crate::{format, Error};

/// A UUID, as 16 big-endian bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Uuid([u8; 16]);

/// Layout family encoded in the top bits of byte 8
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// `0xx`, reserved for NCS backward compatibility
    Ncs,
    /// `10x`, the layout every generator of this crate produces
    Rfc4122,
    /// `110`, reserved for Microsoft backward compatibility
    Microsoft,
    /// `111`, reserved for future definition
    Future,
}

impl Uuid {
    /// The nil UUID, all bits zero
    pub const NIL: Uuid = Uuid([0; 16]);

    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub const fn from_u128(value: u128) -> Self {
        Self(value.to_be_bytes())
    }

    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub const fn as_u128(&self) -> u128 {
        u128::from_be_bytes(self.0)
    }

    /// Version nibble, 0 to 15
    pub const fn version(&self) -> u8 {
        self.0[6] >> 4
    }

    pub fn variant(&self) -> Variant {
        match self.0[8] {
            0x00..=0x7f => Variant::Ncs,
            0x80..=0xbf => Variant::Rfc4122,
            0xc0..=0xdf => Variant::Microsoft,
            0xe0..=0xff => Variant::Future,
        }
    }

    /// Overwrite the version nibble, leaving every other bit as is
    pub fn set_version(&mut self, version: u8) {
        debug_assert!(version < 16, "version is a nibble");
        self.0[6] = (self.0[6] & 0x0f) | (version << 4);
    }

    /// Overwrite the top 2 bits of byte 8 with `10`
    pub fn set_variant(&mut self) {
        self.0[8] = (self.0[8] & 0x3f) | 0x80;
    }

    /// [`set_version`](Self::set_version) and [`set_variant`](Self::set_variant)
    pub(crate) fn with_markers(mut self, version: u8) -> Self {
        self.set_version(version);
        self.set_variant();
        self
    }

    /// Canonical hyphenated lowercase form
    pub fn to_canonical(&self) -> String {
        let bytes = format_canonical(self.0);
        // only ASCII is ever written to the buffer
        bytes.iter().map(|&b| b as char).collect()
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl From<Uuid> for u128 {
    fn from(uuid: Uuid) -> Self {
        uuid.as_u128()
    }
}

impl Display for Uuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_canonical())
    }
}

/// Parses the canonical form, or the same 32 hex digits without hyphens
impl FromStr for Uuid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        format::decode(s, format::Format::Uuid)
    }
}

const HEX: [u8; 16] = [
    b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', b'a', b'b', b'c', b'd', b'e', b'f',
];
const PARTS: [u8; 5] = [8, 4, 4, 4, 12];

fn format_canonical(uuid: [u8; 16]) -> [u8; 36] {
    let mut dst = [0; 36];

    let mut j = 0;
    let mut curr_part_len = 0;
    let mut p = 0;

    for b in uuid {
        dst[j] = HEX[(b >> 4) as usize];
        dst[j + 1] = HEX[(b & 0x0f) as usize];
        j += 2;
        curr_part_len += 2;
        if curr_part_len == PARTS[p] && p < PARTS.len() - 1 {
            p += 1;
            curr_part_len = 0;
            dst[j] = b'-';
            j += 1;
        }
    }
    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const SAMPLE: &str = "f81d4fae-7dec-11d0-a765-00a0c91e6bf6";

    #[test]
    fn canonical_display() {
        let uuid = Uuid::from_u128(0xf81d4fae_7dec_11d0_a765_00a0c91e6bf6);
        assert_eq!(uuid.to_string(), SAMPLE);
        assert_eq!(Uuid::NIL.to_string(), "00000000-0000-0000-0000-000000000000");
    }

    #[test_case(0 ; "zero")]
    #[test_case(4 ; "four")]
    #[test_case(15 ; "max")]
    fn set_version_only_touches_nibble(version: u8) {
        let mut uuid = Uuid::from_u128(u128::MAX);
        uuid.set_version(version);
        assert_eq!(uuid.version(), version);
        let mask = !(0xf_u128 << 76);
        assert_eq!(uuid.as_u128() & mask, u128::MAX & mask);
    }

    #[test_case(0x00 => 0x80 ; "from zero")]
    #[test_case(0xff => 0xbf ; "from ones")]
    #[test_case(0x5a => 0x9a ; "keeps low bits")]
    fn set_variant(byte: u8) -> u8 {
        let mut bytes = [0; 16];
        bytes[8] = byte;
        let mut uuid = Uuid::from_bytes(bytes);
        uuid.set_variant();
        assert_eq!(uuid.variant(), Variant::Rfc4122);
        uuid.as_bytes()[8]
    }

    #[test_case(0x7f => Variant::Ncs)]
    #[test_case(0x80 => Variant::Rfc4122)]
    #[test_case(0xc5 => Variant::Microsoft)]
    #[test_case(0xe0 => Variant::Future)]
    fn variant(byte: u8) -> Variant {
        let mut bytes = [0; 16];
        bytes[8] = byte;
        Uuid::from_bytes(bytes).variant()
    }

    #[test]
    fn version_of_known() {
        let uuid: Uuid = SAMPLE.parse().expect("valid uuid");
        assert_eq!(uuid.version(), 1);
        assert_eq!(uuid.variant(), Variant::Rfc4122);
    }
}
