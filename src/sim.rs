//! Simulated GPIO backend.
//!
//! Provides an in-memory implementation of the connection contract for
//! tests and for development hosts without GPIO hardware. Unlike a real
//! backend, the "controller" here is synthesized at open time: a fixed
//! number of simulated lines, each tracking a direction and a logic level.
//!
//! # Semantics
//!
//! - Reading an `Out` pin returns the last driven level (loopback).
//! - Reading an `In` pin returns the externally injected level
//!   ([`SimConn::inject`]), defaulting to 0.
//! - Mapping is validated lazily: a physical line outside the configured
//!   range is reported as `InvalidArgument` when the pin is first used,
//!   not when it is mapped.
//! - Levels survive direction changes; switching `In`⇄`Out` does not
//!   reset a pin.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::trace;

use crate::conn::{Conn, Direction, Opener};
use crate::error::{Error, Result};

/// Factory for simulated GPIO connections.
///
/// Each [`open`](Opener::open) call yields an independent pin bank, so
/// concurrent connections never observe each other's state.
#[derive(Debug, Clone)]
pub struct SimOpener {
    lines: u32,
    available: bool,
}

impl SimOpener {
    /// Number of lines a default opener exposes.
    pub const DEFAULT_LINES: u32 = 32;

    /// Create an opener whose connections expose `lines` physical lines,
    /// numbered `0..lines`.
    pub fn new(lines: u32) -> Self {
        Self {
            lines,
            available: true,
        }
    }

    /// Create an opener that fails `open` with `Unavailable`.
    ///
    /// Stands in for a missing device or denied permission when testing
    /// environmental-failure handling in calling code.
    pub fn unavailable() -> Self {
        Self {
            lines: Self::DEFAULT_LINES,
            available: false,
        }
    }
}

impl Default for SimOpener {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LINES)
    }
}

#[async_trait]
impl Opener for SimOpener {
    async fn open(&self) -> Result<Box<dyn Conn>> {
        if !self.available {
            return Err(Error::Unavailable(
                "simulated GPIO controller is disabled".into(),
            ));
        }
        Ok(Box::new(SimConn::new(self.lines)))
    }
}

/// Per-pin state: configured direction and current logic level.
#[derive(Debug, Clone, Copy)]
struct PinState {
    direction: Direction,
    level: u8,
}

/// Mapping and pin tables, guarded together by one lock.
#[derive(Debug, Default)]
struct Tables {
    /// Virtual identifier → physical line.
    map: HashMap<String, u32>,
    /// Physical line → configured state. Absent means unconfigured.
    pins: HashMap<u32, PinState>,
}

/// Simulated GPIO connection over an in-memory pin bank.
///
/// State is serialized behind a connection-scoped mutex held only across
/// table lookups and updates. The closed flag is checked first on every
/// operation; once [`close`](Conn::close) succeeds the bank is dropped and
/// all further calls fail with `Closed`.
#[derive(Debug)]
pub struct SimConn {
    lines: u32,
    closed: AtomicBool,
    tables: Mutex<Tables>,
}

impl SimConn {
    /// Create a connection exposing physical lines `0..lines`.
    pub fn new(lines: u32) -> Self {
        Self {
            lines,
            closed: AtomicBool::new(false),
            tables: Mutex::new(Tables::default()),
        }
    }

    /// Inject an external logic level, simulating a signal driven from
    /// outside the controller.
    ///
    /// The pin is created as an `In` pin if it was never configured.
    /// Not part of the connection contract; test code uses the concrete
    /// type for this.
    pub fn inject(&self, pin: &str, level: u8) -> Result<()> {
        self.ensure_open()?;
        check_level(level)?;
        let mut tables = self.tables.lock().unwrap();
        let physical = self.resolve(&tables, pin)?;
        tables
            .pins
            .entry(physical)
            .or_insert(PinState {
                direction: Direction::In,
                level: 0,
            })
            .level = level;
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::Closed);
        }
        Ok(())
    }

    /// Translate a virtual identifier to a physical line.
    ///
    /// Falls back to identity for identifiers that parse as decimal
    /// integers. Range checking happens here, at the point of use, so a
    /// stale mapping is only reported once the pin is actually touched.
    fn resolve(&self, tables: &Tables, pin: &str) -> Result<u32> {
        let physical = match tables.map.get(pin) {
            Some(&physical) => physical,
            None => pin.parse::<u32>().map_err(|_| {
                Error::InvalidArgument(format!("unknown pin {pin:?} and no mapping for it"))
            })?,
        };
        if physical >= self.lines {
            return Err(Error::InvalidArgument(format!(
                "physical line {physical} out of range (controller has {} lines)",
                self.lines
            )));
        }
        Ok(physical)
    }
}

#[async_trait]
impl Conn for SimConn {
    async fn value(&self, pin: &str) -> Result<u8> {
        self.ensure_open()?;
        let tables = self.tables.lock().unwrap();
        let physical = self.resolve(&tables, pin)?;
        let state = tables.pins.get(&physical).ok_or_else(|| Error::NotConfigured {
            pin: pin.to_string(),
            required: Direction::In,
        })?;
        trace!(pin, physical, level = state.level, "read");
        Ok(state.level)
    }

    async fn set_value(&self, pin: &str, level: u8) -> Result<()> {
        self.ensure_open()?;
        // Reject before any table access so a bad level never alters state.
        check_level(level)?;
        let mut tables = self.tables.lock().unwrap();
        let physical = self.resolve(&tables, pin)?;
        match tables.pins.get_mut(&physical) {
            Some(state) if state.direction == Direction::Out => {
                state.level = level;
                trace!(pin, physical, level, "write");
                Ok(())
            }
            _ => Err(Error::NotConfigured {
                pin: pin.to_string(),
                required: Direction::Out,
            }),
        }
    }

    async fn set_direction(&self, pin: &str, direction: Direction) -> Result<()> {
        self.ensure_open()?;
        let mut tables = self.tables.lock().unwrap();
        let physical = self.resolve(&tables, pin)?;
        tables
            .pins
            .entry(physical)
            .or_insert(PinState {
                direction,
                level: 0,
            })
            .direction = direction;
        trace!(pin, physical, %direction, "set direction");
        Ok(())
    }

    async fn map(&self, virtual_pin: &str, physical: u32) -> Result<()> {
        self.ensure_open()?;
        let mut tables = self.tables.lock().unwrap();
        tables.map.insert(virtual_pin.to_string(), physical);
        trace!(virtual_pin, physical, "map");
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::AcqRel) {
            return Err(Error::Closed);
        }
        // Release the pin bank; post-close operations never touch it.
        let mut tables = self.tables.lock().unwrap();
        *tables = Tables::default();
        trace!("closed simulated connection");
        Ok(())
    }
}

fn check_level(level: u8) -> Result<()> {
    if level > 1 {
        return Err(Error::InvalidArgument(format!(
            "logic level must be 0 or 1, got {level}"
        )));
    }
    Ok(())
}
