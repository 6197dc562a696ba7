//! Protocol constants for 24-series EEPROM communication.
//!
//! These constants define the fixed bus address base, the write-cycle retry
//! policy, and the transaction size limits. Most users should not need to
//! use these directly.

/// Fixed 7-bit bus address base of the 24-series family.
///
/// The three low bits are selected by the A0/A1/A2 strap pins, placing up
/// to eight devices on one bus (0x50..=0x57).
pub const EEPROM_BASE_ADDRESS: u8 = 0x50;

/// Number of retries after the initial attempt when a write transaction is
/// not acknowledged (nine transaction attempts total).
pub const WRITE_RETRIES: usize = 8;

/// Delay between retry attempts, in microseconds.
///
/// Rides out the chip's internal write cycle from a previous operation.
pub const RETRY_DELAY_US: u32 = 1000;

/// Maximum data bytes in a single write transaction.
///
/// The transport stages a whole transaction in a [`TRANSPORT_BUFFER`]-sized
/// buffer; up to two of those bytes are the memory address. This cap is
/// independent of the chip's page size.
pub const MAX_WRITE_PAYLOAD: usize = 30;

/// Size of the transport staging and receive buffers, and therefore the cap
/// on a single read request.
pub const TRANSPORT_BUFFER: usize = 32;

/// Write-page sizes of common 24-series chips.
///
/// Pass one of these to [`Eeprom24::with_config`](crate::Eeprom24::with_config)
/// when the default of 64 bytes does not match the target chip.
pub mod page {
    /// 24C01 / 24C02 (1-2 Kbit).
    pub const C01_C02: usize = 8;
    /// 24C04 / 24C08 / 24C16 (4-16 Kbit).
    pub const C04_C16: usize = 16;
    /// 24C32 / 24C64 (32-64 Kbit).
    pub const C32_C64: usize = 32;
    /// 24C128 / 24C256 (128-256 Kbit).
    pub const C128_C256: usize = 64;
    /// 24C512 (512 Kbit).
    pub const C512: usize = 128;
}
