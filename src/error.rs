//! Error types for GPIO contract operations.

use crate::conn::Direction;

/// Common error type for GPIO operations.
///
/// Every contract operation reports its failure through one of these
/// variants; there is no hidden retry and no silent failure. Retry policy,
/// if any, belongs to the calling layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Backend could not be acquired (device missing, permission denied).
    ///
    /// Only `Opener::open` fails for environmental reasons; every later
    /// failure is either a caller contract violation or an I/O fault.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// Operation attempted on a pin without the required direction.
    ///
    /// Also covers pins that were never configured at all.
    #[error("pin {pin:?} is not configured as {required}")]
    NotConfigured {
        /// Virtual pin identifier as the caller passed it.
        pin: String,
        /// Direction the operation needs.
        required: Direction,
    },

    /// Value or pin identifier outside the contract range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O error from the underlying backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Operation attempted after the connection was closed.
    #[error("connection is closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, Error>;
