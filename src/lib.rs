//! Backend-agnostic GPIO pin control for host systems.
//!
//! Single-board computers expose GPIO through wildly different mechanisms:
//! memory-mapped register blocks, kernel character devices, management
//! firmware tunneling pin operations over a serial link. This crate defines
//! the small contract that makes those backends interchangeable to calling
//! code, plus a simulated backend for tests and hardware-free development.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────┐
//! │        calling code / Device     │
//! └──────────────────────────────────┘
//!                 │
//!                 ▼
//! ┌──────────────────────────────────┐
//! │   Conn + Opener (this contract)  │
//! └──────────────────────────────────┘
//!        │                  │
//!        ▼                  ▼
//! ┌─────────────┐    ┌─────────────┐
//! │  hardware   │    │   SimConn   │
//! │  backends   │    │ (in-memory) │
//! └─────────────┘    └─────────────┘
//! ```
//!
//! A caller obtains a connection from an [`Opener`], configures pin
//! directions, reads and writes levels keyed by virtual pin identifiers,
//! and closes the connection when done. The two traits are the only
//! extension points; hardware-specific code lives entirely behind them.
//!
//! # Example
//!
//! ```
//! use pinbus::{Device, Direction, SimOpener};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> pinbus::Result<()> {
//! let opener = SimOpener::new(8);
//! let device = Device::open(&opener).await?;
//!
//! device.map("led", 3).await?;
//! device.set_direction("led", Direction::Out).await?;
//! device.set_high("led").await?;
//!
//! device.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod conn;
pub mod device;
pub mod error;
pub mod sim;

// Re-export the contract surface at the crate root for convenience.
pub use conn::{Conn, Direction, Opener};
pub use device::Device;
pub use error::{Error, Result};
pub use sim::{SimConn, SimOpener};
