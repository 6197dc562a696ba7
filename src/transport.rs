//! The bus transport capability consumed by the driver.
//!
//! [`Transport`] models a transactional two-wire master: a write transaction
//! is opened against a bus address, payload bytes are staged, and closing
//! the transaction performs the wire exchange and reports whether the device
//! acknowledged it. Reads are a request of N bytes followed by popping them
//! one at a time, matching the auto-incrementing read model of the chips.
//!
//! The driver core ([`Eeprom24`](crate::Eeprom24)) is generic over this
//! trait, so the page-chunking and retry logic can be exercised against an
//! in-memory fake. [`I2cTransport`](crate::I2cTransport) implements it for
//! any [`embedded_hal::i2c::I2c`] bus.

/// A transactional two-wire bus master.
pub trait Transport {
    /// Error produced when a bus exchange cannot be carried out.
    type Error;

    /// One-time bus initialization. Called by
    /// [`Eeprom24::begin`](crate::Eeprom24::begin) before any transaction.
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Start staging a write transaction to `address`.
    ///
    /// Discards any previously staged bytes. No I/O happens until
    /// [`close`](Self::close).
    fn open(&mut self, address: u8);

    /// Stage one payload byte into the open transaction.
    fn emit(&mut self, byte: u8);

    /// Stage a run of payload bytes into the open transaction.
    fn emit_all(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.emit(byte);
        }
    }

    /// Perform the staged transaction as one wire exchange.
    ///
    /// `Err` means the transaction did not complete cleanly (the device did
    /// not acknowledge, the bus faulted, ...). Closing with zero staged
    /// bytes probes the device for an address ACK without transferring data.
    fn close(&mut self) -> Result<(), Self::Error>;

    /// Read `len` bytes from `address` into the transport's receive buffer.
    ///
    /// `len` is capped at the transport's buffer size
    /// ([`TRANSPORT_BUFFER`](crate::constants::TRANSPORT_BUFFER)).
    fn request(&mut self, address: u8, len: usize) -> Result<(), Self::Error>;

    /// Pop one byte received by the last [`request`](Self::request).
    fn read_byte(&mut self) -> Result<u8, Self::Error>;
}
