//! Random and UNIX time based versions 4, 7 and 8

use std::time::Duration;

use rand::Rng;

use crate::Uuid;

const TIMESTAMP_MS_MASK: u128 = (1 << 48) - 1;
const NANOS_PER_MILLI: u128 = 1_000_000;

/// 122 random bits
pub fn uuid4<R: Rng>(rng: &mut R) -> Uuid {
    // https://datatracker.ietf.org/doc/html/rfc9562#section-5.4
    let bytes: [u8; 16] = rng.gen();
    Uuid::from_bytes(bytes).with_markers(4)
}

/// 48 bit UNIX milliseconds, then 74 random bits
pub fn uuid7<R: Rng>(rng: &mut R, now: Duration) -> Uuid {
    // https://datatracker.ietf.org/doc/html/rfc9562#section-5.7
    let ms = now.as_millis() & TIMESTAMP_MS_MASK;
    let rand = rng.gen::<u128>() & ((1 << 80) - 1);
    Uuid::from_u128(ms << 80 | rand).with_markers(7)
}

/// Custom layout with sub-millisecond precision
///
/// ```text
/// | unix_ts_ms (48) | ver (4) | subsec_a (12) | var (2) | subsec_b (8) | rand (54) |
/// ```
///
/// `subsec` is the nanoseconds within the millisecond scaled to 20 bits.
pub fn uuid8<R: Rng>(rng: &mut R, now: Duration) -> Uuid {
    // https://datatracker.ietf.org/doc/html/rfc9562#section-5.8
    let nanos = now.as_nanos();
    let ms = (nanos / NANOS_PER_MILLI) & TIMESTAMP_MS_MASK;
    let subsec = (nanos % NANOS_PER_MILLI) * (1 << 20) / NANOS_PER_MILLI;
    let subsec_a = subsec >> 8;
    let subsec_b = subsec & 0xff;
    let rand = rng.gen::<u64>() as u128 & ((1 << 54) - 1);
    let value = ms << 80 | subsec_a << 64 | subsec_b << 54 | rand;
    Uuid::from_u128(value).with_markers(8)
}
