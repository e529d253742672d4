//! Namespaces for the name based versions

use crate::{generate::hash::HashVersion, Error, Uuid};

/// `6ba7b810-9dad-11d1-80b4-00c04fd430c8`
pub const NAMESPACE_DNS: Uuid = Uuid::from_u128(0x6ba7b810_9dad_11d1_80b4_00c04fd430c8);
/// `6ba7b811-9dad-11d1-80b4-00c04fd430c8`
pub const NAMESPACE_URL: Uuid = Uuid::from_u128(0x6ba7b811_9dad_11d1_80b4_00c04fd430c8);
/// `6ba7b812-9dad-11d1-80b4-00c04fd430c8`
pub const NAMESPACE_OID: Uuid = Uuid::from_u128(0x6ba7b812_9dad_11d1_80b4_00c04fd430c8);
/// `6ba7b814-9dad-11d1-80b4-00c04fd430c8`
pub const NAMESPACE_X500: Uuid = Uuid::from_u128(0x6ba7b814_9dad_11d1_80b4_00c04fd430c8);

/// Namespace parameter of versions 3 and 5
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Namespace {
    #[default]
    Url,
    Dns,
    Oid,
    X500,
    /// No namespace, only the name is hashed
    Empty,
    /// An explicit namespace UUID
    Uuid(Uuid),
    /// Any other string, hashed into a namespace
    Name(String),
}

impl Namespace {
    /// Read a namespace parameter
    ///
    /// Keywords always win. Anything else is parsed as a UUID when `as_uuid`,
    /// or kept as an opaque name.
    pub fn parse(s: &str, as_uuid: bool) -> Result<Self, Error> {
        let ns = match s {
            "namespace_url" => Self::Url,
            "namespace_dns" => Self::Dns,
            "namespace_oid" => Self::Oid,
            "namespace_x500" => Self::X500,
            "empty_value" => Self::Empty,
            s if as_uuid => {
                let uuid = s.trim().parse().map_err(|_| Error::InvalidNamespace {
                    input: s.to_string(),
                    reason: "not a UUID",
                })?;
                Self::Uuid(uuid)
            }
            s => Self::Name(s.to_string()),
        };
        Ok(ns)
    }

    /// The namespace bytes to prefix the name with, `None` for [`Namespace::Empty`]
    ///
    /// A [`Namespace::Name`] is hashed with the same algorithm as the target
    /// version and marked as a version 1 UUID, so the result only depends on
    /// the string.
    pub fn resolve(&self, version: HashVersion) -> Option<Uuid> {
        match self {
            Namespace::Url => Some(NAMESPACE_URL),
            Namespace::Dns => Some(NAMESPACE_DNS),
            Namespace::Oid => Some(NAMESPACE_OID),
            Namespace::X500 => Some(NAMESPACE_X500),
            Namespace::Empty => None,
            Namespace::Uuid(uuid) => Some(*uuid),
            Namespace::Name(name) => {
                let digest = version.digest(&[name.as_bytes()]);
                Some(Uuid::from_bytes(digest).with_markers(1))
            }
        }
    }
}
