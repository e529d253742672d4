//! UUID generation and conversion, one value per input row
//!
//! Every [`Operation`] maps a batch of rows (each an ordered sequence of text
//! cells) to exactly one output string per row, or to a single value when there
//! are no rows at all.
//!
//! ```
//! use uuid_rows::{Engine, Operation, Namespace};
//!
//! let mut engine = Engine::with_seed(42);
//! let op = Operation::Uuid5 { namespace: Namespace::Dns };
//! let rows = vec![vec!["python.org".to_string()]];
//! let out = engine.run(&op, &rows).unwrap();
//! assert_eq!(out, ["886313e1-3b8a-5372-9b90-0c9aee199e5d"]);
//! ```
//!
//! Randomness and the clock are owned by the [`Engine`], so the same seed and
//! a [`FixedClock`] reproduce the same output.

pub mod clock;
pub mod format;
pub mod generate;
pub mod namespace;
pub mod node;
mod operation;
mod uuid;
pub mod version;

use rand::SeedableRng;
use rand_pcg::Pcg64 as Pcg;

pub use clock::{Clock, FixedClock, SystemClock};
pub use format::Format;
pub use namespace::Namespace;
pub use node::{ClockSeq, Node};
pub use operation::{Operation, Row};
pub use uuid::{Uuid, Variant};

macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| regex::Regex::new($re).unwrap())
    }};
}
pub(crate) use regex;

/// Runs [`Operation`]s
///
/// Holds the pseudorandom generator and the clock the generators read from.
#[derive(Debug, Clone)]
pub struct Engine<C = SystemClock> {
    rng: Pcg,
    clock: C,
}

impl Engine {
    /// Create a new engine
    ///
    /// Seed is autogenerated from entropy.
    pub fn new() -> Self {
        Self::from_rng(Pcg::from_entropy())
    }
    /// Create a new engine with a seed
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(Pcg::seed_from_u64(seed))
    }
    fn from_rng(rng: Pcg) -> Self {
        Self {
            rng,
            clock: SystemClock,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Engine<C> {
    /// Replace the time source
    pub fn with_clock<D: Clock>(self, clock: D) -> Engine<D> {
        Engine {
            rng: self.rng,
            clock,
        }
    }

    /// Run an operation over a batch of rows
    ///
    /// The output keeps the input order. The first malformed row fails the
    /// whole batch, see [`Error::Row`].
    pub fn run(&mut self, op: &Operation, rows: &[Row]) -> Result<Vec<String>, Error> {
        tracing::debug!(?op, rows = rows.len(), "running operation");
        op.run(&mut self.rng, &self.clock, rows)
    }
}

/// Engine error
///
/// Every variant carries the raw text that was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid node '{input}': {reason}")]
    InvalidNode { input: String, reason: &'static str },
    #[error("invalid clock sequence '{input}': {reason}")]
    InvalidClockSeq { input: String, reason: &'static str },
    #[error("invalid namespace '{input}': {reason}")]
    InvalidNamespace { input: String, reason: &'static str },
    #[error("invalid format '{input}': {reason}")]
    InvalidFormat { input: String, reason: &'static str },
    #[error("invalid UUID '{input}': {reason}")]
    InvalidUuid { input: String, reason: &'static str },
    #[error("invalid row '{input}': {reason}")]
    InvalidRow { input: String, reason: &'static str },
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
    /// A row of a batch failed
    #[error("row {index}: {source}")]
    Row {
        index: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// The rejected input, if the error is tied to one
    pub fn input(&self) -> Option<&str> {
        match self {
            Error::InvalidNode { input, .. }
            | Error::InvalidClockSeq { input, .. }
            | Error::InvalidNamespace { input, .. }
            | Error::InvalidFormat { input, .. }
            | Error::InvalidUuid { input, .. }
            | Error::InvalidRow { input, .. } => Some(input),
            Error::UnknownOperation(name) => Some(name),
            Error::Row { source, .. } => source.input(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_output() {
        let rows: Vec<Row> = (0..3).map(|i| vec![i.to_string()]).collect();
        let clock = FixedClock::from_nanos(1_645_557_742_000_000_000);
        let mut a = Engine::with_seed(7).with_clock(clock);
        let mut b = Engine::with_seed(7).with_clock(clock);
        for op in [Operation::Uuid4, Operation::Uuid7, Operation::Uuid8] {
            assert_eq!(a.run(&op, &rows).unwrap(), b.run(&op, &rows).unwrap());
        }
    }

    #[test]
    fn row_error_keeps_input() {
        let rows = vec![
            vec!["f81d4fae-7dec-11d0-a765-00a0c91e6bf6".to_string()],
            vec!["nope".to_string()],
        ];
        let err = Engine::with_seed(0)
            .run(&Operation::Version, &rows)
            .unwrap_err();
        assert!(matches!(err, Error::Row { index: 1, .. }));
        assert_eq!(err.input(), Some("nope"));
    }
}
