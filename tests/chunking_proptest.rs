//! Property-based tests for the page-write chunking rule.
//!
//! Uses `proptest` to generate random page sizes, start addresses, and
//! write lengths, and verifies that the driver's chunking exactly covers
//! the requested range, respects page and payload bounds, and is minimal
//! under those constraints.

use eeprom24::constants::{MAX_WRITE_PAYLOAD, WRITE_RETRIES};
use eeprom24::{AddressPins, Addressing, Eeprom24, Transport};
use embedded_hal::delay::DelayNs;
use proptest::prelude::*;
use std::collections::VecDeque;

/// One closed transaction: staged bytes as they went out on the wire.
#[derive(Debug, Clone)]
struct Txn {
    bytes: Vec<u8>,
}

#[derive(Debug)]
struct FakeError;

/// Recording transport with scripted close outcomes (an exhausted script
/// means every close succeeds).
#[derive(Debug, Default)]
struct FakeTransport {
    transactions: Vec<Txn>,
    close_script: VecDeque<bool>,
    staged: Vec<u8>,
}

impl Transport for FakeTransport {
    type Error = FakeError;

    fn begin(&mut self) -> Result<(), FakeError> {
        Ok(())
    }

    fn open(&mut self, _address: u8) {
        self.staged.clear();
    }

    fn emit(&mut self, byte: u8) {
        self.staged.push(byte);
    }

    fn close(&mut self) -> Result<(), FakeError> {
        self.transactions.push(Txn {
            bytes: std::mem::take(&mut self.staged),
        });
        match self.close_script.pop_front() {
            Some(false) => Err(FakeError),
            _ => Ok(()),
        }
    }

    fn request(&mut self, _address: u8, _len: usize) -> Result<(), FakeError> {
        Ok(())
    }

    fn read_byte(&mut self) -> Result<u8, FakeError> {
        Err(FakeError)
    }
}

/// Delay provider counting invocations; the chunking tests never sleep.
#[derive(Debug, Default)]
struct CountingDelay {
    calls: u32,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, _ns: u32) {
        self.calls += 1;
    }
}

/// The data-carrying transactions, decoded as (start address, payload).
/// Readiness probes carry only the two address bytes.
fn data_chunks(transactions: &[Txn]) -> Vec<(u16, Vec<u8>)> {
    transactions
        .iter()
        .filter(|t| t.bytes.len() > 2)
        .map(|t| {
            let start = u16::from_be_bytes([t.bytes[0], t.bytes[1]]);
            (start, t.bytes[2..].to_vec())
        })
        .collect()
}

fn device_with(
    transport: FakeTransport,
    page_size: usize,
) -> Eeprom24<FakeTransport, CountingDelay> {
    Eeprom24::with_config(
        transport,
        CountingDelay::default(),
        AddressPins::default(),
        Addressing::TwoByte,
        page_size,
    )
}

proptest! {
    /// Chunks exactly cover the requested range, in order, each lying
    /// within a single page and within the payload cap, with no chunk that
    /// could have been merged into its successor.
    #[test]
    fn chunks_cover_the_range_and_are_minimal(
        page_size in 1usize..=128,
        addr in 0u16..=4096,
        len in 0usize..=300,
    ) {
        let data: Vec<u8> = (0..len).map(|i| i as u8).collect();
        let mut dev = device_with(FakeTransport::default(), page_size);
        prop_assert_eq!(dev.write(addr, &data), len);

        let (t, _) = dev.into_parts();
        let chunks = data_chunks(&t.transactions);

        // Exact coverage, in order.
        let total: usize = chunks.iter().map(|(_, payload)| payload.len()).sum();
        prop_assert_eq!(total, len);
        let mut expected_start = addr;
        let mut offset = 0;
        for (start, payload) in &chunks {
            prop_assert_eq!(*start, expected_start);
            prop_assert_eq!(payload.as_slice(), &data[offset..offset + payload.len()]);
            expected_start = expected_start.wrapping_add(payload.len() as u16);
            offset += payload.len();
        }

        // Page and payload bounds.
        for (start, payload) in &chunks {
            prop_assert!(payload.len() <= MAX_WRITE_PAYLOAD);
            prop_assert!(
                *start as usize % page_size + payload.len() <= page_size,
                "chunk at {} length {} crosses a {}-byte page boundary",
                start, payload.len(), page_size
            );
        }

        // Minimality: every chunk but the last either fills the payload
        // cap or runs to the end of its page.
        for (start, payload) in chunks.iter().take(chunks.len().saturating_sub(1)) {
            let reaches_page_end =
                (*start as usize % page_size) + payload.len() == page_size;
            prop_assert!(
                payload.len() == MAX_WRITE_PAYLOAD || reaches_page_end,
                "chunk at {} length {} should have been larger",
                start, payload.len()
            );
        }
    }

    /// A page-aligned write of exactly one page takes one chunk when the
    /// page fits the payload cap, else ceil(page / cap) chunks.
    #[test]
    fn page_sized_write_chunk_count(page_size in 1usize..=128) {
        let data = vec![0x5Au8; page_size];
        let mut dev = device_with(FakeTransport::default(), page_size);
        // Address 0 is aligned for every page size.
        prop_assert_eq!(dev.write(0, &data), page_size);

        let (t, _) = dev.into_parts();
        let chunks = data_chunks(&t.transactions);
        prop_assert_eq!(chunks.len(), page_size.div_ceil(MAX_WRITE_PAYLOAD));
    }

    /// A fill produces the same chunk boundaries as a buffer write of the
    /// same length, with every emitted byte equal to the fill value.
    #[test]
    fn fill_matches_buffer_chunking(
        page_size in 1usize..=128,
        addr in 0u16..=4096,
        len in 1usize..=300,
        value in any::<u8>(),
    ) {
        let data = vec![value; len];
        let mut buffered = device_with(FakeTransport::default(), page_size);
        prop_assert_eq!(buffered.write(addr, &data), len);

        let mut filled = device_with(FakeTransport::default(), page_size);
        prop_assert_eq!(filled.fill(addr, value, len, true), len);

        let (bt, _) = buffered.into_parts();
        let (ft, _) = filled.into_parts();
        let buffer_chunks = data_chunks(&bt.transactions);
        let fill_chunks = data_chunks(&ft.transactions);

        prop_assert_eq!(buffer_chunks.len(), fill_chunks.len());
        for ((bs, bp), (fs, fp)) in buffer_chunks.iter().zip(&fill_chunks) {
            prop_assert_eq!(bs, fs);
            prop_assert_eq!(bp.len(), fp.len());
            prop_assert!(fp.iter().all(|&b| b == value));
        }
    }

    /// When the transport fails the k-th chunk, the reported count is the
    /// sum of the chunks before it.
    #[test]
    fn short_count_accounts_for_completed_chunks(
        page_size in 1usize..=64,
        addr in 0u16..=1024,
        len in 1usize..=200,
        fail_seed in any::<u32>(),
    ) {
        // Dry run to learn the chunk layout for these parameters.
        let data: Vec<u8> = (0..len).map(|i| i as u8).collect();
        let mut dry = device_with(FakeTransport::default(), page_size);
        dry.write(addr, &data);
        let (t, _) = dry.into_parts();
        let layout: Vec<usize> =
            data_chunks(&t.transactions).iter().map(|(_, p)| p.len()).collect();

        // Fail one chunk close; every probe and earlier chunk succeeds.
        // Transactions alternate probe, chunk, probe, chunk, ...
        let fail_at = fail_seed as usize % layout.len();
        let mut script = VecDeque::new();
        for _ in 0..fail_at {
            script.push_back(true); // probe
            script.push_back(true); // chunk
        }
        script.push_back(true); // probe before the failing chunk
        script.push_back(false); // the failing chunk

        let transport = FakeTransport {
            close_script: script,
            ..Default::default()
        };
        let mut dev = device_with(transport, page_size);
        let written = dev.write(addr, &data);
        let expected: usize = layout[..fail_at].iter().sum();
        prop_assert_eq!(written, expected);
    }

    /// Retry accounting for the single-byte path: with `retry` set the
    /// driver attempts until the chip acknowledges or the budget of one
    /// initial try plus `WRITE_RETRIES` retries is spent, delaying after
    /// every failure.
    #[test]
    fn single_byte_retry_accounting(fail_count in 0usize..=12) {
        let transport = FakeTransport {
            close_script: std::iter::repeat(false).take(fail_count).collect(),
            ..Default::default()
        };
        let mut dev = device_with(transport, 64);
        let written = dev.write_byte(0x0010, 0x42, true);

        let budget = WRITE_RETRIES + 1;
        let (t, delay) = dev.into_parts();
        if fail_count < budget {
            prop_assert_eq!(written, 1);
            prop_assert_eq!(t.transactions.len(), fail_count + 1);
            prop_assert_eq!(delay.calls as usize, fail_count);
        } else {
            prop_assert_eq!(written, 0);
            prop_assert_eq!(t.transactions.len(), budget);
            prop_assert_eq!(delay.calls as usize, budget);
        }
    }
}
