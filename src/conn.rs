//! GPIO connection and factory contracts.
//!
//! This module defines the capability traits every GPIO backend must
//! satisfy, whether the pins live behind memory-mapped registers, a kernel
//! interface, or an in-memory simulation. Callers program against [`Conn`]
//! and obtain connections from an [`Opener`]; all hardware-specific logic
//! stays behind those two seams.
//!
//! # Pin addressing
//!
//! Callers name pins by *virtual* string identifiers; each connection keeps
//! a flat virtual→physical translation table populated through
//! [`Conn::map`]. An identifier with no mapping entry falls back to
//! identity: `"25"` names physical line 25. Boards with different layouts
//! are handled by remapping, not by changing caller code.
//!
//! # Lifecycle
//!
//! A connection is created by [`Opener::open`] and destroyed by
//! [`Conn::close`]; there is no implicit cleanup. Once closed, every
//! operation on the connection fails with [`Error::Closed`].
//!
//! [`Error::Closed`]: crate::error::Error::Closed

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::Result;

/// Direction a pin is configured for.
///
/// Attached per-pin, not globally. The enum is non-exhaustive so a
/// bidirectional state can be added later without breaking backends that
/// match on it today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[non_exhaustive]
pub enum Direction {
    /// Pin senses a logic level driven from outside.
    In,
    /// Pin drives a logic level.
    Out,
}

/// An open GPIO connection.
///
/// The single abstraction through which all pin I/O flows. Methods take
/// `&self` so one connection can serve concurrent tasks; implementations
/// serialize their per-pin state (direction and mapping tables) internally,
/// holding any lock only across the state lookup or update, never across
/// the hardware access itself.
///
/// Logic levels are `u8` values constrained to `{0, 1}`. Passing anything
/// else to [`set_value`](Conn::set_value) is a caller contract violation
/// and is rejected with `InvalidArgument`; a backend returning anything
/// else from [`value`](Conn::value) is an implementation bug.
#[async_trait]
pub trait Conn: Send + Sync + Debug {
    /// Read the current logic level of the pin. 0 for low, 1 for high.
    ///
    /// The pin should be configured as [`Direction::In`] first; backends
    /// that permit reading an output pin document their read-while-output
    /// semantics. Fails with `NotConfigured` on an unconfigured pin,
    /// `InvalidArgument` when the identifier cannot be resolved, or `Io`
    /// when the underlying read fails.
    async fn value(&self, pin: &str) -> Result<u8>;

    /// Write a logic level to the pin. 0 for low, 1 for high.
    ///
    /// The pin must be configured as [`Direction::Out`]. A level outside
    /// `{0, 1}` fails with `InvalidArgument` and leaves pin state
    /// untouched.
    async fn set_value(&self, pin: &str, level: u8) -> Result<()>;

    /// Configure the direction of the pin.
    ///
    /// Legal transitions are unconfigured→`In`, unconfigured→`Out`, and
    /// `In`⇄`Out` at any time; the last write wins. Fails with `Io` when
    /// the backend cannot honor the direction (e.g. a hardware-fixed pin).
    async fn set_direction(&self, pin: &str, direction: Direction) -> Result<()>;

    /// Map a virtual pin identifier to a physical pin number.
    ///
    /// Pure metadata with no hardware side effect: idempotent, overwrites
    /// any previous mapping for the identifier, and takes effect for all
    /// subsequent operations naming it. The physical value is not
    /// validated here; a bad line number surfaces at the point of use.
    /// The only failure `map` itself reports is `Closed`.
    async fn map(&self, virtual_pin: &str, physical: u32) -> Result<()>;

    /// Close the connection and free the underlying resources.
    ///
    /// The first call releases the backend; every later call, and every
    /// other operation after a successful close, fails with `Closed`. A
    /// failed close does not leave the connection half-closed.
    async fn close(&self) -> Result<()>;
}

/// Factory producing live GPIO connections.
///
/// Hides backend discovery and initialization (opening device files,
/// setting up a register mapping, allocating a simulated pin bank) so test
/// and simulation backends substitute for hardware ones without changing
/// caller code. Callers hold a reference to the specific opener they want;
/// there is no process-wide backend registry.
#[async_trait]
pub trait Opener: Send + Sync {
    /// Acquire the backend resource and return a connection bound to it.
    ///
    /// Fails with `Unavailable` when the backend cannot be reached.
    async fn open(&self) -> Result<Box<dyn Conn>>;
}
