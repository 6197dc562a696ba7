//! [`Transport`] implementation over any `embedded-hal` 1.0 I2C bus.
//!
//! [`I2cTransport`] adapts an [`embedded_hal::i2c::I2c`] implementation to
//! the transactional [`Transport`] surface the driver consumes: staged
//! bytes are collected in a fixed buffer and flushed as a single
//! `I2c::write` when the transaction closes; a close with nothing staged
//! becomes a zero-length write, which probes the device for an address ACK.
//!
//! # Example
//!
//! ```
//! use eeprom24::{Eeprom24, I2cTransport};
//! use embedded_hal::{delay::DelayNs, i2c::I2c};
//!
//! fn make<I2C: I2c, D: DelayNs>(i2c: I2C, delay: D) -> Eeprom24<I2cTransport<I2C>, D> {
//!     Eeprom24::new(I2cTransport::new(i2c), delay)
//! }
//! ```

use embedded_hal::i2c::I2c;

use crate::constants::TRANSPORT_BUFFER;
use crate::error::Error;
use crate::transport::Transport;

/// Bridges an `embedded-hal` I2C bus to the [`Transport`] capability.
#[derive(Debug)]
pub struct I2cTransport<I2C> {
    i2c: I2C,

    // Staged write transaction
    tx: [u8; TRANSPORT_BUFFER],
    tx_len: usize,
    tx_address: u8,
    tx_overflow: bool,

    // Receive buffer filled by `request`, drained by `read_byte`
    rx: [u8; TRANSPORT_BUFFER],
    rx_len: usize,
    rx_pos: usize,
}

impl<I2C> I2cTransport<I2C> {
    /// Wrap an I2C bus.
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            tx: [0; TRANSPORT_BUFFER],
            tx_len: 0,
            tx_address: 0,
            tx_overflow: false,
            rx: [0; TRANSPORT_BUFFER],
            rx_len: 0,
            rx_pos: 0,
        }
    }

    /// Return the wrapped bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> Transport for I2cTransport<I2C> {
    type Error = Error<I2C::Error>;

    fn begin(&mut self) -> Result<(), Self::Error> {
        // embedded-hal buses arrive initialized; nothing to do here.
        Ok(())
    }

    fn open(&mut self, address: u8) {
        self.tx_address = address;
        self.tx_len = 0;
        self.tx_overflow = false;
    }

    fn emit(&mut self, byte: u8) {
        if self.tx_len < self.tx.len() {
            self.tx[self.tx_len] = byte;
            self.tx_len += 1;
        } else {
            self.tx_overflow = true;
        }
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        if self.tx_overflow {
            return Err(Error::BufferOverflow);
        }
        let len = self.tx_len;
        self.tx_len = 0;
        self.i2c
            .write(self.tx_address, &self.tx[..len])
            .map_err(Error::Bus)
    }

    fn request(&mut self, address: u8, len: usize) -> Result<(), Self::Error> {
        let len = len.min(self.rx.len());
        self.i2c.read(address, &mut self.rx[..len]).map_err(Error::Bus)?;
        self.rx_len = len;
        self.rx_pos = 0;
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        if self.rx_pos >= self.rx_len {
            return Err(Error::NoData);
        }
        let byte = self.rx[self.rx_pos];
        self.rx_pos += 1;
        Ok(byte)
    }
}
