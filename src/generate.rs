//! UUID generators, one per version
//!
//! Generators take their randomness and the current time as arguments and keep
//! no state between calls.

pub mod hash;
pub mod random;
pub mod time;

pub use hash::{uuid3, uuid5, HashVersion};
pub use random::{uuid4, uuid7, uuid8};
pub use time::{uuid1, uuid1_to_uuid6, uuid6};
