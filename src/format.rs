//! Textual UUID representations

use std::{fmt::Display, str::FromStr};

use crate::{regex, Error, Uuid};

const URN_PREFIX: &str = "urn:uuid:";

/// A lossless text encoding of a UUID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// `f81d4fae-7dec-11d0-a765-00a0c91e6bf6`
    #[default]
    Uuid,
    /// `f81d4fae7dec11d0a76500a0c91e6bf6`
    Hex,
    /// `329800735698586629295641978511506172918`
    Int,
    /// `urn:uuid:f81d4fae-7dec-11d0-a765-00a0c91e6bf6`
    Urn,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format = match s {
            "uuid" | "uuid_hex" => Self::Uuid,
            "hex" => Self::Hex,
            "int" => Self::Int,
            "urn" => Self::Urn,
            _ => {
                return Err(Error::InvalidFormat {
                    input: s.to_string(),
                    reason: "unknown format, expected uuid, uuid_hex, hex, int or urn",
                })
            }
        };
        Ok(format)
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Format::Uuid => "uuid",
            Format::Hex => "hex",
            Format::Int => "int",
            Format::Urn => "urn",
        };
        f.write_str(s)
    }
}

/// Read `text` written in `format`
///
/// [`Format::Uuid`] and [`Format::Hex`] accept the same input: 32 hex digits,
/// in any case, with any hyphens and optionally wrapped in braces.
/// [`Format::Int`] is base 10, or base 16 with a `0x` prefix.
pub fn decode(text: &str, format: Format) -> Result<Uuid, Error> {
    let err = |reason| Error::InvalidFormat {
        input: text.to_string(),
        reason,
    };
    let s = text.trim();
    match format {
        Format::Uuid | Format::Hex => decode_hex(s).ok_or_else(|| err("expected 32 hex digits")),
        Format::Urn => {
            let rest = s
                .get(..URN_PREFIX.len())
                .filter(|p| p.eq_ignore_ascii_case(URN_PREFIX))
                .map(|_| &s[URN_PREFIX.len()..])
                .ok_or_else(|| err("missing 'urn:uuid:' prefix"))?;
            decode_hex(rest).ok_or_else(|| err("expected 32 hex digits after the prefix"))
        }
        Format::Int => {
            let re = regex!(r"\A(?:0[xX]([0-9a-fA-F]+)|\+?([0-9]+))\z");
            let caps = re.captures(s).ok_or_else(|| err("not an integer"))?;
            let value = match (caps.get(1), caps.get(2)) {
                (Some(hex), _) => u128::from_str_radix(hex.as_str(), 16),
                (_, Some(dec)) => dec.as_str().parse::<u128>(),
                _ => unreachable!("one branch of the regex matched"),
            };
            value
                .map(Uuid::from_u128)
                .map_err(|_| err("does not fit in 128 bits"))
        }
    }
}

fn decode_hex(s: &str) -> Option<Uuid> {
    let s = s
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .unwrap_or(s);
    let mut bytes = [0u8; 16];
    let mut nibbles = s.bytes().filter(|&b| b != b'-');
    for byte in bytes.iter_mut() {
        let high = hex_value(nibbles.next()?)?;
        let low = hex_value(nibbles.next()?)?;
        *byte = high << 4 | low;
    }
    if nibbles.next().is_some() {
        return None;
    }
    Some(Uuid::from_bytes(bytes))
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Write `uuid` in `format`, always lowercase
pub fn encode(uuid: Uuid, format: Format) -> String {
    match format {
        Format::Uuid => uuid.to_canonical(),
        Format::Hex => format!("{:032x}", uuid.as_u128()),
        Format::Int => uuid.as_u128().to_string(),
        Format::Urn => format!("{URN_PREFIX}{uuid}"),
    }
}

/// [`decode`] then [`encode`]
pub fn convert(text: &str, from: Format, to: Format) -> Result<String, Error> {
    decode(text, from).map(|uuid| encode(uuid, to))
}
