// src/error.rs

/// Failures reported by [`RingBuffer`](crate::RingBuffer) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Capacity below the two-byte minimum (one data byte plus the reserved slot).
    #[error("invalid capacity {0}: must be at least 2")]
    InvalidCapacity(usize),
    /// Pull or discard length below one.
    #[error("invalid length {0}: must be at least 1")]
    InvalidLength(usize),
    /// Push larger than the free space, or pull larger than the buffered data.
    #[error("overflow: requested {requested} bytes, {available} available")]
    Overflow { requested: usize, available: usize },
}

impl Error {
    /// Maps the `Error` to the process exit status used by `ringdemo`.
    pub fn to_status_code(&self) -> i32 {
        match self {
            Error::Overflow { .. } => 1,
            Error::InvalidLength(_) => 2,
            Error::InvalidCapacity(_) => 3,
        }
    }
}
