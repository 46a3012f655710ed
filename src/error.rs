use core::convert::Infallible;

/// Result type for FeatherWing operations.
///
/// `E` is the error type of the wing's underlying driver. Wings whose driver
/// cannot fail use the default, [`Infallible`].
pub type Result<T, E = Infallible> = core::result::Result<T, Error<E>>;

/// Errors returned by FeatherWing device abstractions.
///
/// Driver (bus) failures are carried unmodified in [`Error::Bus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E = Infallible> {
    /// A linear pixel index was not below `rows × columns`.
    #[display("index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Number of pixels in the buffer.
        len: usize,
    },
    /// An `(x, y)` coordinate was outside the matrix.
    #[display("coordinate ({x}, {y}) out of bounds ({columns}x{rows})")]
    CoordinateOutOfBounds {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
        /// Matrix width.
        columns: usize,
        /// Matrix height.
        rows: usize,
    },
    /// A brightness value was outside the accepted range.
    #[display("brightness out of range")]
    BrightnessOutOfRange,
    /// A motor throttle was outside `-1.0..=1.0`.
    #[display("throttle out of range")]
    ThrottleOutOfRange,
    /// A date or time field was invalid (for example month 13 or February 30).
    #[display("invalid date or time")]
    InvalidTime,
    /// A motor or stepper shares channels with one that is already in use.
    #[display("motor channels already in use by another motor")]
    MotorInUse,
    /// Error reported by the underlying driver.
    #[display("bus error: {_0:?}")]
    Bus(E),
}

impl<E: core::fmt::Debug> core::error::Error for Error<E> {}

impl<E> Error<E> {
    /// Wrap a driver error. Handy with `map_err`.
    pub const fn bus(error: E) -> Self {
        Self::Bus(error)
    }
}

impl Error {
    /// Reinterpret a driver-independent error as the error type of a wing
    /// whose driver fails with `E`.
    #[must_use]
    pub fn into_driver_error<E>(self) -> Error<E> {
        match self {
            Self::IndexOutOfBounds { index, len } => Error::IndexOutOfBounds { index, len },
            Self::CoordinateOutOfBounds {
                x,
                y,
                columns,
                rows,
            } => Error::CoordinateOutOfBounds {
                x,
                y,
                columns,
                rows,
            },
            Self::BrightnessOutOfRange => Error::BrightnessOutOfRange,
            Self::ThrottleOutOfRange => Error::ThrottleOutOfRange,
            Self::InvalidTime => Error::InvalidTime,
            Self::MotorInUse => Error::MotorInUse,
            Self::Bus(never) => match never {},
        }
    }
}

impl<E> From<time::error::ComponentRange> for Error<E> {
    fn from(_: time::error::ComponentRange) -> Self {
        Self::InvalidTime
    }
}
