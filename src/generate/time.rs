//! Gregorian time based versions 1 and 6
//!
//! Both carry a 60 bit count of 100ns ticks since 1582-10-15, a 14 bit clock
//! sequence and a 48 bit node. Version 1 stores the timestamp low field first,
//! version 6 stores it most significant first so values sort by time.

use std::time::Duration;

use rand::Rng;

use crate::{ClockSeq, Error, Node, Uuid};

/// 100ns ticks between 1582-10-15 and 1970-01-01
const GREGORIAN_OFFSET: u64 = 0x01b2_1dd2_1381_4000;
const TIMESTAMP_MASK: u64 = (1 << 60) - 1;

/// 60 bit Gregorian timestamp of a UNIX time
pub fn gregorian_ticks(unix: Duration) -> u64 {
    let ticks = (unix.as_nanos() / 100) as u64;
    ticks.wrapping_add(GREGORIAN_OFFSET) & TIMESTAMP_MASK
}

fn low_bits(clock_seq: ClockSeq, node: Node) -> u128 {
    let clock_seq = 0x8000 | clock_seq.get() as u128;
    clock_seq << 48 | node.get() as u128
}

pub fn uuid1<R: Rng>(
    rng: &mut R,
    now: Duration,
    node: Option<Node>,
    clock_seq: Option<ClockSeq>,
) -> Uuid {
    let clock_seq = clock_seq.unwrap_or_else(|| ClockSeq::random(rng));
    let node = node.unwrap_or_else(|| Node::random(rng));
    let ts = gregorian_ticks(now) as u128;

    let time_low = ts & 0xffff_ffff;
    let time_mid = (ts >> 32) & 0xffff;
    let time_high = (ts >> 48) & 0x0fff;

    let value = time_low << 96
        | time_mid << 80
        | 0x1_u128 << 76
        | time_high << 64
        | low_bits(clock_seq, node);
    Uuid::from_u128(value)
}

pub fn uuid6<R: Rng>(
    rng: &mut R,
    now: Duration,
    node: Option<Node>,
    clock_seq: Option<ClockSeq>,
) -> Uuid {
    let clock_seq = clock_seq.unwrap_or_else(|| ClockSeq::random(rng));
    let node = node.unwrap_or_else(|| Node::random(rng));
    let ts = gregorian_ticks(now) as u128;
    Uuid::from_u128(reorder_v6(ts) | low_bits(clock_seq, node))
}

/// High 64 bits of a version 6 UUID with timestamp `ts`
fn reorder_v6(ts: u128) -> u128 {
    (ts >> 12) << 80 | 0x6_u128 << 76 | (ts & 0x0fff) << 64
}

/// Reorder the timestamp of a version 1 UUID into version 6 order
///
/// The clock sequence, the variant and the node (the low 64 bits) are kept
/// verbatim.
pub fn uuid1_to_uuid6(uuid: Uuid) -> Result<Uuid, Error> {
    if uuid.version() != 1 {
        return Err(Error::InvalidUuid {
            input: uuid.to_string(),
            reason: "not a version 1 UUID",
        });
    }
    let v = uuid.as_u128();
    let time_low = v >> 96;
    let time_mid = (v >> 80) & 0xffff;
    let time_high = (v >> 64) & 0x0fff;
    let ts = time_high << 48 | time_mid << 32 | time_low;

    let low = v & u64::MAX as u128;
    Ok(Uuid::from_u128(reorder_v6(ts) | low))
}
