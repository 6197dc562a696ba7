//! Driver for 24-series I2C EEPROM chips (24C32, 24C64, 24LC256, ...).
//!
//! This crate turns logical `(address, data)` requests into correctly
//! chunked, correctly addressed I2C transactions: writes are split so that
//! no single transaction crosses an erase/write page boundary or exceeds
//! the bus payload cap, and the chip's transient not-ready state after a
//! write (its internal write cycle) is ridden out with a bounded
//! fixed-delay retry loop.
//!
//! # Quick Start
//!
//! ```
//! use eeprom24::{Eeprom24, I2cTransport};
//! use embedded_hal::{delay::DelayNs, i2c::I2c};
//!
//! fn dump<I2C: I2c, D: DelayNs>(i2c: I2C, delay: D) {
//!     // 24LC256 at the default address: two-byte addressing, 64-byte pages.
//!     let mut eeprom = Eeprom24::new(I2cTransport::new(i2c), delay);
//!     if eeprom.begin().is_err() {
//!         return;
//!     }
//!
//!     let written = eeprom.write(0x0000, b"hello eeprom");
//!     assert!(written <= 12); // short count = chip stopped acknowledging
//!
//!     let mut buf = [0u8; 12];
//!     let read = eeprom.read_into(0x0000, &mut buf);
//!     assert!(read <= 12);
//! }
//! ```
//!
//! # Features
//!
//! - **Page-chunked writes**: arbitrary-length buffer writes and single-byte
//!   fills, split along page boundaries ([`Eeprom24::write`],
//!   [`Eeprom24::fill`]).
//! - **Write-cycle polling**: bounded retry with fixed spacing while the
//!   chip commits a previous write ([`Eeprom24::is_ready`]).
//! - **Sequential reads**: pointer positioning plus auto-increment reads
//!   ([`Eeprom24::start_reading`], [`Eeprom24::read`],
//!   [`Eeprom24::read_into`]).
//! - **Pluggable bus**: the driver is generic over a transactional
//!   [`Transport`]; [`I2cTransport`] adapts any `embedded-hal` 1.0 I2C bus.
//! - **Address strapping**: up to eight devices per bus via the A0/A1/A2
//!   pins ([`AddressPins`]).
//!
//! Failure policy: bus-transaction failures are returned as data — short
//! write counts and `false` probes — never panics, so callers decide how to
//! react. See [`Eeprom24`] for details.

pub mod constants;
pub mod device;
pub mod error;
pub mod hal;
pub mod transport;
pub mod types;

// ---- Convenience re-exports ----

pub use constants::EEPROM_BASE_ADDRESS;
pub use device::Eeprom24;
pub use error::Error;
pub use hal::I2cTransport;
pub use transport::Transport;
pub use types::{AddressPins, Addressing};
