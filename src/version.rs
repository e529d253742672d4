//! Read the version of existing UUIDs

use crate::{
    format::{self, Format},
    Error, Uuid,
};

/// Decode `text` in whichever [`Format`] it is written
///
/// Hex (with or without hyphens) is tried first, so a 32 digit decimal string
/// is read as hex.
pub fn parse_any(text: &str) -> Result<Uuid, Error> {
    [Format::Uuid, Format::Urn, Format::Int]
        .into_iter()
        .find_map(|f| format::decode(text, f).ok())
        .ok_or_else(|| Error::InvalidUuid {
            input: text.to_string(),
            reason: "not a UUID in any known format",
        })
}

/// Version nibble of `text`
pub fn version_of(text: &str) -> Result<u8, Error> {
    parse_any(text).map(|uuid| uuid.version())
}
