//! Caller-facing GPIO device handle.
//!
//! [`Device`] wraps a boxed connection obtained from an injected
//! [`Opener`], giving calling code a concrete type to hold while keeping
//! every hardware decision behind the contract. Which backend a device
//! talks to is decided entirely by the opener passed to [`Device::open`].

use tracing::debug;

use crate::conn::{Conn, Direction, Opener};
use crate::error::Result;

/// A GPIO device bound to one open backend connection.
///
/// Forwards the connection contract verbatim and adds small level helpers.
/// Dropping a device does not close the connection; call
/// [`close`](Device::close) explicitly.
#[derive(Debug)]
pub struct Device {
    conn: Box<dyn Conn>,
}

impl Device {
    /// Open a device through the given factory.
    ///
    /// Fails with `Unavailable` when the backend cannot be reached.
    pub async fn open(opener: &dyn Opener) -> Result<Device> {
        let conn = opener.open().await?;
        debug!("opened GPIO device");
        Ok(Device { conn })
    }

    /// Read the logic level of the pin. 0 for low, 1 for high.
    pub async fn value(&self, pin: &str) -> Result<u8> {
        self.conn.value(pin).await
    }

    /// Write a logic level to the pin. 0 for low, 1 for high.
    pub async fn set_value(&self, pin: &str, level: u8) -> Result<()> {
        self.conn.set_value(pin, level).await
    }

    /// Configure the direction of the pin.
    pub async fn set_direction(&self, pin: &str, direction: Direction) -> Result<()> {
        self.conn.set_direction(pin, direction).await
    }

    /// Map a virtual pin identifier to a physical pin number.
    pub async fn map(&self, virtual_pin: &str, physical: u32) -> Result<()> {
        self.conn.map(virtual_pin, physical).await
    }

    /// Close the underlying connection.
    pub async fn close(&self) -> Result<()> {
        self.conn.close().await?;
        debug!("closed GPIO device");
        Ok(())
    }

    /// Drive the pin high.
    pub async fn set_high(&self, pin: &str) -> Result<()> {
        self.conn.set_value(pin, 1).await
    }

    /// Drive the pin low.
    pub async fn set_low(&self, pin: &str) -> Result<()> {
        self.conn.set_value(pin, 0).await
    }

    /// Whether the pin currently reads high.
    pub async fn is_high(&self, pin: &str) -> Result<bool> {
        Ok(self.conn.value(pin).await? == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::sim::SimOpener;

    #[tokio::test]
    async fn test_open_and_drive_pin() {
        let opener = SimOpener::new(8);
        let device = Device::open(&opener).await.unwrap();

        device.map("led", 3).await.unwrap();
        device.set_direction("led", Direction::Out).await.unwrap();

        device.set_high("led").await.unwrap();
        assert!(device.is_high("led").await.unwrap());
        assert_eq!(device.value("led").await.unwrap(), 1);

        device.set_low("led").await.unwrap();
        assert!(!device.is_high("led").await.unwrap());

        device.close().await.unwrap();
        assert!(matches!(
            device.value("led").await.unwrap_err(),
            Error::Closed
        ));
    }

    #[tokio::test]
    async fn test_open_propagates_unavailable() {
        let opener = SimOpener::unavailable();
        let err = Device::open(&opener).await.unwrap_err();
        assert!(matches!(err, Error::Unavailable(_)));
    }
}
