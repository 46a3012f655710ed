//! Driver seam for HT16K33 LED backpack chips, shared by the
//! [LED matrix](crate::matrix_featherwing) and [segment](crate::segments) wings.
//!
//! The chip driver itself is not part of this crate. Implement [`Ht16k33`]
//! plus [`Ht16k33Matrix`] or [`Ht16k33Segments`] for whichever HT16K33 driver
//! you use.

use crate::{Error, Result};

/// Default I2C address of HT16K33 FeatherWings.
pub const ADDRESS_DEFAULT: u8 = 0x70;

/// Highest brightness level accepted by the wings (16 levels, 0 = dimmest).
pub const BRIGHTNESS_LEVEL_MAX: u8 = 15;

/// Display blink rate.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkRate {
    /// Not blinking.
    #[default]
    Off,
    /// Blink at 2 Hz.
    TwoHz,
    /// Blink at 1 Hz.
    OneHz,
    /// Blink at 0.5 Hz.
    HalfHz,
}

impl BlinkRate {
    /// Register value: 0 = off, 1..=3 successively slower.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::TwoHz => 1,
            Self::OneHz => 2,
            Self::HalfHz => 3,
        }
    }
}

/// Operations common to every HT16K33 display driver.
pub trait Ht16k33 {
    /// Error type of the underlying bus.
    type Error;

    /// Push the driver's display buffer to the chip.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the write fails.
    fn show(&mut self) -> core::result::Result<(), Self::Error>;

    /// Current blink rate.
    fn blink_rate(&self) -> BlinkRate;

    /// Change the blink rate.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the write fails.
    fn set_blink_rate(&mut self, rate: BlinkRate) -> core::result::Result<(), Self::Error>;

    /// Current brightness as a fraction in `0.0..=1.0`.
    fn brightness(&self) -> f32;

    /// Change the brightness; `brightness` is a fraction in `0.0..=1.0`.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the write fails.
    fn set_brightness(&mut self, brightness: f32) -> core::result::Result<(), Self::Error>;
}

/// HT16K33 driver for a monochrome pixel matrix.
pub trait Ht16k33Matrix: Ht16k33 {
    /// Load row-major on/off pixels into the driver's display buffer.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the driver writes through immediately and fails.
    fn write_pixels(&mut self, pixels: &[bool]) -> core::result::Result<(), Self::Error>;
}

/// HT16K33 driver for 7- or 14-segment character displays.
pub trait Ht16k33Segments: Ht16k33 {
    /// Load `text` into the driver's display buffer.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the driver writes through immediately and fails.
    fn print(&mut self, text: &str) -> core::result::Result<(), Self::Error>;

    /// Turn every segment on or off in the driver's display buffer.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the driver writes through immediately and fails.
    fn fill(&mut self, on: bool) -> core::result::Result<(), Self::Error>;
}

/// Brightness level (0..=15) of `display`, rounded from its fraction.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "fraction is clamped to 0.0..=1.0 first"
)]
pub(crate) fn brightness_level<D: Ht16k33>(display: &D) -> u8 {
    let fraction = display.brightness();
    if fraction.is_nan() {
        return 0;
    }
    (fraction.clamp(0.0, 1.0) * f32::from(BRIGHTNESS_LEVEL_MAX) + 0.5) as u8
}

/// Set `display` to brightness `level` (0..=15).
pub(crate) fn set_brightness_level<D: Ht16k33>(display: &mut D, level: u8) -> Result<(), D::Error> {
    if level > BRIGHTNESS_LEVEL_MAX {
        return Err(Error::BrightnessOutOfRange);
    }
    display
        .set_brightness(f32::from(level) / f32::from(BRIGHTNESS_LEVEL_MAX))
        .map_err(Error::Bus)
}
