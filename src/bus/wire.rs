//! Byte-oriented I2C transport used by the code reader driver.
//!
//! The reader talks to the bus the way a microcontroller `Wire` library
//! does: request a number of bytes, then drain them one at a time from a
//! receive buffer, and build writes up in a transmit buffer that is sent
//! when the transaction ends.

use embedded_hal::i2c::I2c;
use std::collections::VecDeque;
use tracing::{trace, warn};

pub trait WireBus {
    type Error: std::fmt::Debug;

    /// Request `count` bytes from `address` into the receive buffer.
    ///
    /// `send_stop` releases the bus after the request. Returns the number
    /// of bytes actually received.
    fn request_from(&mut self, address: u8, count: usize, send_stop: bool) -> usize;

    /// Bytes still waiting in the receive buffer
    fn available(&self) -> usize;

    fn read_byte(&mut self) -> Option<u8>;

    fn begin_transmission(&mut self, address: u8);

    /// Queue one byte for the open transmission. Returns bytes queued.
    fn write_byte(&mut self, byte: u8) -> usize;

    fn end_transmission(&mut self, send_stop: bool) -> Result<(), Self::Error>;
}

/// [`WireBus`] on top of any embedded-hal 1.0 I2C controller
pub struct HalWire<I> {
    i2c: I,
    rx: VecDeque<u8>,
    tx: Vec<u8>,
    tx_address: Option<u8>,
}

/// Raised by [`HalWire::end_transmission`]
#[derive(Debug)]
pub enum WireError<E> {
    /// `end_transmission` without a matching `begin_transmission`
    NotStarted,
    Bus(E),
}

impl<I: I2c> HalWire<I> {
    pub fn new(i2c: I) -> Self {
        Self {
            i2c,
            rx: VecDeque::new(),
            tx: Vec::new(),
            tx_address: None,
        }
    }

    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c> WireBus for HalWire<I> {
    type Error = WireError<I::Error>;

    fn request_from(&mut self, address: u8, count: usize, send_stop: bool) -> usize {
        self.rx.clear();
        // A single embedded-hal read always ends with a stop condition, so
        // the flag cannot hold the bus across requests here.
        trace!(address, count, send_stop, "[wire] request");

        let mut buf = vec![0u8; count];
        match self.i2c.read(address, &mut buf) {
            Ok(()) => {
                self.rx.extend(buf);
                count
            }
            Err(e) => {
                warn!("[wire] read of {} bytes from {:#04x} failed: {:?}", count, address, e);
                0
            }
        }
    }

    fn available(&self) -> usize {
        self.rx.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn begin_transmission(&mut self, address: u8) {
        self.tx.clear();
        self.tx_address = Some(address);
    }

    fn write_byte(&mut self, byte: u8) -> usize {
        if self.tx_address.is_none() {
            return 0;
        }
        self.tx.push(byte);
        1
    }

    fn end_transmission(&mut self, send_stop: bool) -> Result<(), Self::Error> {
        let address = self.tx_address.take().ok_or(WireError::NotStarted)?;
        trace!(address, len = self.tx.len(), send_stop, "[wire] transmit");
        let result = self.i2c.write(address, &self.tx).map_err(WireError::Bus);
        self.tx.clear();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    /// Controller whose every transaction is refused by the target
    struct AbsentDevice;

    impl ErrorType for AbsentDevice {
        type Error = ErrorKind;
    }

    impl I2c for AbsentDevice {
        fn transaction(
            &mut self,
            _address: u8,
            _operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))
        }
    }

    #[test]
    fn request_buffers_bytes_for_draining() {
        let expectations = [I2cTransaction::read(0x0c, vec![1, 2, 3])];
        let mut wire = HalWire::new(I2cMock::new(&expectations));

        assert_eq!(wire.request_from(0x0c, 3, true), 3);
        assert_eq!(wire.available(), 3);
        assert_eq!(wire.read_byte(), Some(1));
        assert_eq!(wire.read_byte(), Some(2));
        assert_eq!(wire.available(), 1);
        assert_eq!(wire.read_byte(), Some(3));
        assert_eq!(wire.read_byte(), None);

        wire.release().done();
    }

    #[test]
    fn new_request_discards_unread_bytes() {
        let expectations = [
            I2cTransaction::read(0x0c, vec![9, 9]),
            I2cTransaction::read(0x0c, vec![7]),
        ];
        let mut wire = HalWire::new(I2cMock::new(&expectations));

        wire.request_from(0x0c, 2, false);
        wire.request_from(0x0c, 1, true);
        assert_eq!(wire.available(), 1);
        assert_eq!(wire.read_byte(), Some(7));

        wire.release().done();
    }

    #[test]
    fn transmission_is_sent_as_one_write() {
        let expectations = [I2cTransaction::write(0x0c, vec![0x01, 0x00])];
        let mut wire = HalWire::new(I2cMock::new(&expectations));

        wire.begin_transmission(0x0c);
        assert_eq!(wire.write_byte(0x01), 1);
        assert_eq!(wire.write_byte(0x00), 1);
        assert!(wire.end_transmission(true).is_ok());

        wire.release().done();
    }

    #[test]
    fn missing_device_yields_nothing_to_read() {
        let mut wire = HalWire::new(AbsentDevice);
        assert_eq!(wire.request_from(0x0c, 64, false), 0);
        assert_eq!(wire.available(), 0);
    }

    #[test]
    fn write_errors_come_back_from_end_transmission() {
        let mut wire = HalWire::new(AbsentDevice);
        wire.begin_transmission(0x0c);
        wire.write_byte(0x01);
        assert!(matches!(wire.end_transmission(true), Err(WireError::Bus(_))));
    }

    #[test]
    fn end_without_begin_is_rejected() {
        let mut wire = HalWire::new(AbsentDevice);
        assert_eq!(wire.write_byte(0x01), 0);
        assert!(matches!(wire.end_transmission(true), Err(WireError::NotStarted)));
    }
}
