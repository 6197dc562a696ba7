//! Error types for the eeprom24 crate.

/// The error type for bus transport operations.
///
/// The driver reports bus-transaction failures as data (short counts and
/// booleans); `Error` is the error currency of the transport layer itself,
/// generic over the underlying bus error `E`.
#[derive(Debug, thiserror::Error)]
pub enum Error<E> {
    /// An error from the underlying I2C bus (NACK, arbitration loss, ...).
    #[error("I2C bus error: {0:?}")]
    Bus(E),

    /// More bytes were staged than fit in one bus transaction.
    #[error("staged write exceeds the transport buffer")]
    BufferOverflow,

    /// A byte was requested with no received data pending.
    #[error("no received data pending")]
    NoData,
}

/// A specialized `Result` type for transport operations.
pub type Result<T, E> = std::result::Result<T, Error<E>>;
