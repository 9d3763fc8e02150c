use crate::bus::WireBus;
use crate::errors::{ReaderError, ReaderResult};
use crate::record::{CodeReaderResults, RESULTS_WIRE_SIZE};
use tracing::{debug, trace, warn};

/// 7-bit I2C address of the code reader board
pub const DEVICE_ADDRESS: u8 = 0x0C;

/// LED state register: 0 turns the LED off, anything else turns it on
pub const REG_LED_STATE: u8 = 0x01;

/// Largest single request the transport can buffer
pub const MAX_BYTES_PER_CHUNK: usize = 64;

pub struct CodeReader<W> {
    wire: W,
}

impl<W: WireBus> CodeReader<W> {
    pub fn new(wire: W) -> Self {
        Self { wire }
    }

    pub fn release(self) -> W {
        self.wire
    }

    /// Fetch the latest results into `out`.
    ///
    /// The record is pulled in chunks of at most [`MAX_BYTES_PER_CHUNK`]
    /// bytes, releasing the bus only after the last one. If any chunk comes
    /// up short the read stops there and `out` is left untouched.
    pub fn read_into(&mut self, out: &mut CodeReaderResults) -> ReaderResult<()> {
        let mut raw = [0u8; RESULTS_WIRE_SIZE];
        let mut index = 0;

        while index < RESULTS_WIRE_SIZE {
            let remaining = RESULTS_WIRE_SIZE - index;
            let chunk_len = remaining.min(MAX_BYTES_PER_CHUNK);
            let is_last_chunk = remaining <= MAX_BYTES_PER_CHUNK;

            let received = self.wire.request_from(DEVICE_ADDRESS, chunk_len, is_last_chunk);
            trace!(offset = index, chunk_len, received, "[reader] chunk requested");

            for (obtained, slot) in raw[index..index + chunk_len].iter_mut().enumerate() {
                let byte = if self.wire.available() < 1 {
                    None
                } else {
                    self.wire.read_byte()
                };
                match byte {
                    Some(b) => *slot = b,
                    None => {
                        warn!(
                            "[reader] only {} bytes available on I2C at offset {}, but we need {}",
                            obtained, index, chunk_len
                        );
                        return Err(ReaderError::IncompleteTransfer {
                            offset: index,
                            obtained,
                            needed: chunk_len,
                        });
                    }
                }
            }
            index += chunk_len;
        }

        *out = CodeReaderResults::from_wire(&raw);
        out.terminate();
        Ok(())
    }

    /// Fetch the latest results as a new record
    pub fn read(&mut self) -> ReaderResult<CodeReaderResults> {
        let mut results = CodeReaderResults::default();
        self.read_into(&mut results)?;
        Ok(results)
    }

    /// Write `value` to a device register. Bus errors are not reported.
    pub fn write_register(&mut self, reg: u8, value: u8) {
        self.wire.begin_transmission(DEVICE_ADDRESS);
        self.wire.write_byte(reg);
        self.wire.write_byte(value);
        if let Err(e) = self.wire.end_transmission(true) {
            debug!("[reader] write of {:#04x} to register {:#04x} ignored error: {:?}", value, reg, e);
        }
    }

    pub fn set_led(&mut self, on: bool) {
        self.write_register(REG_LED_STATE, u8::from(on));
    }
}
