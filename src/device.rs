//! The EEPROM device driver: addressing, page-chunked writes, and
//! write-cycle polling.
//!
//! [`Eeprom24`] is the main type in this crate. It owns a bus
//! [`Transport`](crate::Transport), a delay provider, and the static device
//! configuration (bus address, page size, addressing mode), and turns
//! logical `(address, data)` requests into correctly chunked bus
//! transactions.

use embedded_hal::delay::DelayNs;

use crate::constants::{MAX_WRITE_PAYLOAD, RETRY_DELAY_US, TRANSPORT_BUFFER, WRITE_RETRIES};
use crate::transport::Transport;
use crate::types::{AddressPins, Addressing};

/// Data source for a page-chunked write.
#[derive(Clone, Copy)]
enum Source<'a> {
    /// Repeat one byte value.
    Fill(u8),
    /// Sequential bytes from a caller buffer.
    Buffer(&'a [u8]),
}

/// A 24-series I2C EEPROM device.
///
/// All operations are synchronous and blocking: each call performs its bus
/// transactions (including busy-wait delays) to completion before returning.
/// The driver issues no locking of its own; callers sharing a bus must
/// serialize access themselves.
///
/// Bus-transaction failures are reported as data rather than errors: write
/// operations return the number of bytes actually committed, probes return
/// `false`. A short count means the chip stopped acknowledging and it is up
/// to the caller to react.
///
/// # Example
///
/// ```
/// use eeprom24::{AddressPins, Addressing, Eeprom24, Transport};
/// use embedded_hal::delay::DelayNs;
///
/// fn run<T: Transport, D: DelayNs>(bus: T, delay: D) {
///     // 24LC256 with A0 strapped high: two-byte addressing, 64-byte pages.
///     let pins = AddressPins::new(true, false, false);
///     let mut eeprom = Eeprom24::with_config(bus, delay, pins, Addressing::TwoByte, 64);
///     if eeprom.begin().is_err() {
///         return;
///     }
///     let written = eeprom.write(0x0100, b"hello");
///     assert!(written <= 5);
/// }
/// ```
pub struct Eeprom24<T, D> {
    transport: T,
    delay: D,

    // Static configuration, fixed at construction
    address: u8,
    addressing: Addressing,
    page_size: usize,
}

impl<T, D> std::fmt::Debug for Eeprom24<T, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Eeprom24")
            .field("address", &self.address)
            .field("addressing", &self.addressing)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl<T: Transport, D: DelayNs> Eeprom24<T, D> {
    /// A device with the default configuration: all strap pins low (bus
    /// address 0x50), two-byte addressing, 64-byte pages.
    pub fn new(transport: T, delay: D) -> Self {
        Self::with_config(transport, delay, AddressPins::default(), Addressing::default(), 64)
    }

    /// A device with explicit strap pins, addressing mode, and page size.
    ///
    /// Pure configuration, no I/O: the bus address is computed here once and
    /// never recomputed. `page_size` must match the physical chip (see
    /// [`constants::page`](crate::constants::page)).
    ///
    /// # Panics
    ///
    /// Panics if `page_size` is zero.
    pub fn with_config(
        transport: T,
        delay: D,
        pins: AddressPins,
        addressing: Addressing,
        page_size: usize,
    ) -> Self {
        assert!(page_size > 0, "page size must be nonzero");
        Self {
            transport,
            delay,
            address: pins.bus_address(),
            addressing,
            page_size,
        }
    }

    /// Initialize the underlying bus transport.
    ///
    /// Must be called before any other operation. Idempotent with respect
    /// to the driver's own state.
    pub fn begin(&mut self) -> Result<(), T::Error> {
        self.transport.begin()
    }

    /// Whether the device currently acknowledges bus transactions.
    ///
    /// A single address-set probe with no data payload and no retry; used
    /// to detect completion of the internal write cycle after a prior
    /// write. Returns `true` iff the probe closes cleanly.
    pub fn is_ready(&mut self) -> bool {
        self.start_reading(0, false)
    }

    /// Write one byte at `addr`.
    ///
    /// On a failed transaction, retries up to
    /// [`WRITE_RETRIES`](crate::constants::WRITE_RETRIES) more times with
    /// [`RETRY_DELAY_US`](crate::constants::RETRY_DELAY_US) spacing when
    /// `retry` is set, riding out the chip's internal write cycle; with
    /// `retry` unset it attempts exactly once.
    ///
    /// Returns 1 on success, 0 once the attempt budget is exhausted.
    pub fn write_byte(&mut self, addr: u16, value: u8, retry: bool) -> usize {
        if self.transact(addr, Some(value), retry) {
            1
        } else {
            0
        }
    }

    /// Write `value` at `count` consecutive addresses starting at `addr`.
    ///
    /// `count > 1` runs the page-chunked write in fill mode, with the same
    /// boundaries a buffer write of that length would use; `count == 1` is
    /// the single-byte path. The `retry` flag governs both the single-byte
    /// path and the per-chunk readiness polling.
    ///
    /// Returns the number of bytes committed (short on failure).
    pub fn fill(&mut self, addr: u16, value: u8, count: usize, retry: bool) -> usize {
        match count {
            0 => 0,
            1 => self.write_byte(addr, value, retry),
            _ => self.page_write(addr, Source::Fill(value), count, retry),
        }
    }

    /// Write `data` starting at `addr`, split into page-aligned chunks.
    ///
    /// Each chunk stays within one erase/write page and within the
    /// transport's per-transaction payload cap, and the chip is polled for
    /// readiness before every chunk.
    ///
    /// Returns the number of bytes committed. A short count means a chunk
    /// failed; everything before it is already on the chip.
    pub fn write(&mut self, addr: u16, data: &[u8]) -> usize {
        self.page_write(addr, Source::Buffer(data), data.len(), true)
    }

    /// Position the chip's internal address pointer at `addr`.
    ///
    /// Issues a dummy write carrying only the memory address, which both
    /// sets the pointer for a subsequent [`read`](Self::read) and probes
    /// readiness. Same retry policy as [`write_byte`](Self::write_byte).
    ///
    /// Returns `true` iff the address-set transaction succeeds.
    pub fn start_reading(&mut self, addr: u16, retry: bool) -> bool {
        self.transact(addr, None, retry)
    }

    /// Read one byte at the chip's current internal address pointer.
    ///
    /// The pointer auto-increments on the chip after every read, so
    /// repeated calls walk the memory sequentially. Assumes
    /// [`start_reading`](Self::start_reading) (or a previous read or write)
    /// has positioned the pointer; this call sets no address itself.
    pub fn read(&mut self) -> Result<u8, T::Error> {
        self.transport.request(self.address, 1)?;
        self.transport.read_byte()
    }

    /// Read `buf.len()` bytes starting at `addr` into `buf`.
    ///
    /// Positions the pointer once, then pulls the data in buffer-sized
    /// requests, relying on the chip's auto-increment. Returns the number
    /// of bytes confirmed read (short on failure); bytes past the returned
    /// count are unspecified.
    pub fn read_into(&mut self, addr: u16, buf: &mut [u8]) -> usize {
        if buf.is_empty() || !self.start_reading(addr, true) {
            return 0;
        }
        let mut filled = 0;
        while filled < buf.len() {
            let n = (buf.len() - filled).min(TRANSPORT_BUFFER);
            if self.transport.request(self.address, n).is_err() {
                return filled;
            }
            for slot in &mut buf[filled..filled + n] {
                match self.transport.read_byte() {
                    Ok(byte) => *slot = byte,
                    Err(_) => return filled,
                }
            }
            filled += n;
        }
        filled
    }

    /// The effective 7-bit bus address.
    pub fn bus_address(&self) -> u8 {
        self.address
    }

    /// The configured write-page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The configured addressing mode.
    pub fn addressing(&self) -> Addressing {
        self.addressing
    }

    /// Decompose into the underlying transport and delay provider.
    pub fn into_parts(self) -> (T, D) {
        (self.transport, self.delay)
    }

    /// Stage the memory address into the open transaction, one or two
    /// bytes per the addressing mode.
    fn emit_address(&mut self, addr: u16) {
        if self.addressing == Addressing::TwoByte {
            self.transport.emit((addr >> 8) as u8);
        }
        self.transport.emit(addr as u8);
    }

    /// One address-set transaction (plus optional data byte), with the
    /// bounded fixed-delay retry loop.
    fn transact(&mut self, addr: u16, data: Option<u8>, retry: bool) -> bool {
        for _ in 0..=WRITE_RETRIES {
            self.transport.open(self.address);
            self.emit_address(addr);
            if let Some(value) = data {
                self.transport.emit(value);
            }
            if self.transport.close().is_ok() {
                return true;
            }
            if !retry {
                break;
            }
            self.delay.delay_us(RETRY_DELAY_US);
        }
        false
    }

    /// Write `len` bytes from `source` starting at `addr` as a sequence of
    /// page writes.
    ///
    /// Each transaction covers at most the remainder of the current page
    /// (writes crossing a page boundary wrap within the page on these
    /// chips) and at most the transport payload cap, and is preceded by a
    /// readiness poll. Returns the bytes committed before the first
    /// failure.
    fn page_write(&mut self, mut addr: u16, source: Source<'_>, len: usize, retry: bool) -> usize {
        let mut written = 0;
        while written < len {
            let page_remaining = self.page_size - addr as usize % self.page_size;
            let n = page_remaining.min(len - written).min(MAX_WRITE_PAYLOAD);

            // Wait until the chip has finished its previous write cycle.
            if !self.start_reading(addr, retry) {
                return written;
            }

            self.transport.open(self.address);
            self.emit_address(addr);
            match source {
                Source::Fill(value) => {
                    for _ in 0..n {
                        self.transport.emit(value);
                    }
                }
                Source::Buffer(data) => {
                    self.transport.emit_all(&data[written..written + n]);
                }
            }
            if self.transport.close().is_err() {
                return written;
            }

            addr = addr.wrapping_add(n as u16);
            written += n;
        }
        written
    }
}
