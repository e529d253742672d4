use std::{collections::HashMap, fmt::Display, str::FromStr};

use rand::Rng;

use crate::{
    format::{self, Format},
    generate::{self, HashVersion},
    version, Clock, ClockSeq, Error, Namespace, Node, Uuid,
};

/// An ordered sequence of text cells
///
/// Operations that read their input take a single cell per row; the others
/// only count rows.
pub type Row = Vec<String>;

/// What to do with each row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Uuid1 {
        node: Option<Node>,
        clock_seq: Option<ClockSeq>,
    },
    /// Name based, MD5. The name is the row
    Uuid3 { namespace: Namespace },
    Uuid4,
    /// Name based, SHA-1. The name is the row
    Uuid5 { namespace: Namespace },
    Uuid6 {
        node: Option<Node>,
        clock_seq: Option<ClockSeq>,
    },
    Uuid7,
    Uuid8,
    /// Reorder a version 1 row into version 6
    Uuid1ToUuid6,
    /// Re-encode a row
    Convert { from: Format, to: Format },
    /// Version number of a row
    Version,
}

impl Operation {
    pub const NAMES: [&'static str; 10] = [
        "uuid1",
        "uuid3",
        "uuid4",
        "uuid5",
        "uuid6",
        "uuid7",
        "uuid8",
        "uuid1-to-uuid6",
        "convert",
        "version",
    ];

    /// Build an operation from named parameters
    ///
    /// Recognized parameters are `node`, `clock_seq`, `namespace`,
    /// `namespace_as_uuid`, `from_format` and `to_format`. Missing ones take
    /// their defaults: no node or clock sequence override, the URL namespace
    /// read as a keyword, and conversion from `uuid_hex` to `uuid`.
    pub fn from_params(name: &str, params: &HashMap<String, String>) -> Result<Self, Error> {
        let get = |key: &str| params.get(key).map(String::as_str).unwrap_or("");
        let namespace = || -> Result<Namespace, Error> {
            let ns = match get("namespace") {
                "" => return Ok(Namespace::default()),
                ns => ns,
            };
            let as_uuid = match get("namespace_as_uuid") {
                "" => false,
                flag => flag.parse::<bool>().map_err(|_| Error::InvalidNamespace {
                    input: flag.to_string(),
                    reason: "namespace_as_uuid must be 'true' or 'false'",
                })?,
            };
            Namespace::parse(ns, as_uuid)
        };
        let format_param = |key: &str| match get(key) {
            "" => Ok(Format::default()),
            f => f.parse::<Format>(),
        };

        let op = match name {
            "uuid1" => Self::Uuid1 {
                node: Node::parse_opt(get("node"))?,
                clock_seq: ClockSeq::parse_opt(get("clock_seq"))?,
            },
            "uuid3" => Self::Uuid3 {
                namespace: namespace()?,
            },
            "uuid4" => Self::Uuid4,
            "uuid5" => Self::Uuid5 {
                namespace: namespace()?,
            },
            "uuid6" => Self::Uuid6 {
                node: Node::parse_opt(get("node"))?,
                clock_seq: ClockSeq::parse_opt(get("clock_seq"))?,
            },
            "uuid7" => Self::Uuid7,
            "uuid8" => Self::Uuid8,
            "uuid1-to-uuid6" => Self::Uuid1ToUuid6,
            "convert" => Self::Convert {
                from: format_param("from_format")?,
                to: format_param("to_format")?,
            },
            "version" => Self::Version,
            other => return Err(Error::UnknownOperation(other.to_string())),
        };
        Ok(op)
    }

    /// Whether this operation creates values instead of reading them
    ///
    /// Generators produce one value when there are no rows.
    pub fn is_generator(&self) -> bool {
        !matches!(
            self,
            Self::Uuid1ToUuid6 | Self::Convert { .. } | Self::Version
        )
    }

    /// Whether each row's cell is an input, not just a count
    pub fn reads_rows(&self) -> bool {
        matches!(
            self,
            Self::Uuid3 { .. }
                | Self::Uuid5 { .. }
                | Self::Uuid1ToUuid6
                | Self::Convert { .. }
                | Self::Version
        )
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Uuid1 { .. } => Self::NAMES[0],
            Self::Uuid3 { .. } => Self::NAMES[1],
            Self::Uuid4 => Self::NAMES[2],
            Self::Uuid5 { .. } => Self::NAMES[3],
            Self::Uuid6 { .. } => Self::NAMES[4],
            Self::Uuid7 => Self::NAMES[5],
            Self::Uuid8 => Self::NAMES[6],
            Self::Uuid1ToUuid6 => Self::NAMES[7],
            Self::Convert { .. } => Self::NAMES[8],
            Self::Version => Self::NAMES[9],
        }
    }

    pub(crate) fn run<R: Rng, C: Clock>(
        &self,
        rng: &mut R,
        clock: &C,
        rows: &[Row],
    ) -> Result<Vec<String>, Error> {
        let namespace = match self {
            Self::Uuid3 { namespace } => namespace.resolve(HashVersion::Md5),
            Self::Uuid5 { namespace } => namespace.resolve(HashVersion::Sha1),
            _ => None,
        };

        if rows.is_empty() {
            if !self.is_generator() {
                return Ok(Vec::new());
            }
            return self.eval(rng, clock, namespace, "").map(|out| vec![out]);
        }

        rows.iter()
            .enumerate()
            .map(|(index, row)| {
                self.row_cell(row)
                    .and_then(|cell| self.eval(rng, clock, namespace, cell))
                    .map_err(|e| Error::Row {
                        index,
                        source: Box::new(e),
                    })
            })
            .collect()
    }

    fn row_cell<'r>(&self, row: &'r Row) -> Result<&'r str, Error> {
        match row.as_slice() {
            [] => Ok(""),
            [cell] => Ok(cell.as_str()),
            cells if self.reads_rows() => Err(Error::InvalidRow {
                input: cells.join("\t"),
                reason: "expected a single cell",
            }),
            [first, ..] => Ok(first.as_str()),
        }
    }

    fn eval<R: Rng, C: Clock>(
        &self,
        rng: &mut R,
        clock: &C,
        namespace: Option<Uuid>,
        cell: &str,
    ) -> Result<String, Error> {
        let uuid = match self {
            Self::Uuid1 { node, clock_seq } => generate::uuid1(rng, clock.now(), *node, *clock_seq),
            Self::Uuid3 { .. } => generate::uuid3(namespace, cell),
            Self::Uuid4 => generate::uuid4(rng),
            Self::Uuid5 { .. } => generate::uuid5(namespace, cell),
            Self::Uuid6 { node, clock_seq } => generate::uuid6(rng, clock.now(), *node, *clock_seq),
            Self::Uuid7 => generate::uuid7(rng, clock.now()),
            Self::Uuid8 => generate::uuid8(rng, clock.now()),
            Self::Uuid1ToUuid6 => {
                let v1 = version::parse_any(cell)?;
                generate::uuid1_to_uuid6(v1).map_err(|e| match e {
                    Error::InvalidUuid { reason, .. } => Error::InvalidUuid {
                        input: cell.to_string(),
                        reason,
                    },
                    e => e,
                })?
            }
            Self::Convert { from, to } => return format::convert(cell, *from, *to),
            Self::Version => return version::version_of(cell).map(|v| v.to_string()),
        };
        tracing::trace!(op = self.name(), %uuid, "generated");
        Ok(uuid.to_string())
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses an operation name with every parameter at its default
impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_params(s, &HashMap::new())
    }
}
