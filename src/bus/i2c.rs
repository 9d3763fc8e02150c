use crate::bus::wire::HalWire;
use crate::errors::{ReaderError, ReaderResult};

#[cfg(all(feature = "linux-hal", target_os = "linux"))]
pub use linux_embedded_hal::I2cdev as I2CDevice;

/// Wire transport over a Linux `/dev/i2c-*` character device
#[cfg(all(feature = "linux-hal", target_os = "linux"))]
pub type LinuxWire = HalWire<I2CDevice>;

#[cfg(all(feature = "linux-hal", target_os = "linux"))]
pub fn open_linux_bus(path: &str) -> ReaderResult<LinuxWire> {
    let device = I2CDevice::new(path).map_err(|e| ReaderError::BusOpen {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    tracing::debug!("[i2c] opened {}", path);
    Ok(HalWire::new(device))
}

/// Placeholder controller for builds without a Linux I2C backend
#[cfg(not(all(feature = "linux-hal", target_os = "linux")))]
pub struct I2CDevice {
    _phantom: std::marker::PhantomData<()>,
}

#[cfg(not(all(feature = "linux-hal", target_os = "linux")))]
impl embedded_hal::i2c::ErrorType for I2CDevice {
    type Error = embedded_hal::i2c::ErrorKind;
}

#[cfg(not(all(feature = "linux-hal", target_os = "linux")))]
impl embedded_hal::i2c::I2c for I2CDevice {
    fn transaction(
        &mut self,
        _address: u8,
        _operations: &mut [embedded_hal::i2c::Operation<'_>],
    ) -> Result<(), Self::Error> {
        Err(embedded_hal::i2c::ErrorKind::Other)
    }
}

#[cfg(not(all(feature = "linux-hal", target_os = "linux")))]
pub type LinuxWire = HalWire<I2CDevice>;

#[cfg(not(all(feature = "linux-hal", target_os = "linux")))]
pub fn open_linux_bus(path: &str) -> ReaderResult<LinuxWire> {
    Err(ReaderError::Unsupported {
        reason: format!(
            "cannot open '{}': I2C is only supported on Linux with the linux-hal feature",
            path
        ),
    })
}
