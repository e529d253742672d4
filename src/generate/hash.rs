//! Name based versions 3 (MD5) and 5 (SHA-1)

use md5::{Digest, Md5};
use sha1::Sha1;

use crate::Uuid;

/// Hash algorithm of a name based version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashVersion {
    /// Version 3
    Md5,
    /// Version 5
    Sha1,
}

impl HashVersion {
    pub fn version(self) -> u8 {
        match self {
            HashVersion::Md5 => 3,
            HashVersion::Sha1 => 5,
        }
    }

    /// First 16 bytes of the digest of all `parts` concatenated
    pub fn digest(self, parts: &[&[u8]]) -> [u8; 16] {
        let mut out = [0; 16];
        match self {
            HashVersion::Md5 => {
                let mut hasher = Md5::new();
                parts.iter().for_each(|p| hasher.update(p));
                out.copy_from_slice(&hasher.finalize());
            }
            HashVersion::Sha1 => {
                let mut hasher = Sha1::new();
                parts.iter().for_each(|p| hasher.update(p));
                out.copy_from_slice(&hasher.finalize()[..16]);
            }
        }
        out
    }

    /// Hash `name` in `namespace`, or alone if there is no namespace
    pub fn hash(self, namespace: Option<Uuid>, name: &str) -> Uuid {
        let digest = match namespace {
            Some(ns) => self.digest(&[&ns.as_bytes()[..], name.as_bytes()]),
            None => self.digest(&[name.as_bytes()]),
        };
        Uuid::from_bytes(digest).with_markers(self.version())
    }
}

pub fn uuid3(namespace: Option<Uuid>, name: &str) -> Uuid {
    HashVersion::Md5.hash(namespace, name)
}

pub fn uuid5(namespace: Option<Uuid>, name: &str) -> Uuid {
    HashVersion::Sha1.hash(namespace, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::{NAMESPACE_DNS, NAMESPACE_URL};
    use test_case::test_case;

    #[test_case(Some(NAMESPACE_DNS), "python.org" => "6fa459ea-ee8a-3ca4-894e-db77e160355e" ; "dns")]
    #[test_case(Some(NAMESPACE_URL), "input1" => "9684908e-84b7-31f4-9087-4523b979968c" ; "url")]
    #[test_case(Some(NAMESPACE_URL), "" => "14cdb9b4-de01-3faa-aff5-65bc2f771745" ; "empty name")]
    #[test_case(None, "input1" => "da853c58-26b7-38b8-a320-e42024d97837" ; "no namespace")]
    fn v3(namespace: Option<Uuid>, name: &str) -> String {
        let uuid = uuid3(namespace, name);
        assert_eq!(uuid.version(), 3);
        uuid.to_string()
    }

    #[test_case(Some(NAMESPACE_DNS), "python.org" => "886313e1-3b8a-5372-9b90-0c9aee199e5d" ; "dns")]
    #[test_case(Some(NAMESPACE_URL), "input1" => "e444e13a-e796-5e2d-8729-216fa0dd78b7" ; "url")]
    #[test_case(Some(NAMESPACE_URL), "" => "1b4db7eb-4057-5ddf-91e0-36dec72071f5" ; "empty name")]
    #[test_case(None, "input1" => "b115cbd4-5508-5987-a243-b40d8bb9324a" ; "no namespace")]
    fn v5(namespace: Option<Uuid>, name: &str) -> String {
        let uuid = uuid5(namespace, name);
        assert_eq!(uuid.version(), 5);
        uuid.to_string()
    }

    #[test]
    fn deterministic() {
        for name in ["", "a", "input2", "ünïcödé"] {
            assert_eq!(uuid3(Some(NAMESPACE_DNS), name), uuid3(Some(NAMESPACE_DNS), name));
            assert_eq!(uuid5(None, name), uuid5(None, name));
        }
    }
}
