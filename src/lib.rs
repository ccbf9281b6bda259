//! Fixed-capacity circular byte buffer with at-most-two-piece writes and
//! reads across the wrap boundary.

pub mod config;
pub mod dump;
pub mod error;
pub mod ring_buffer;
pub mod script;

pub use error::Error;
pub use ring_buffer::{RingBuffer, State, MIN_CAPACITY};
