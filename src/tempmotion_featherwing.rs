//! A device abstraction for the ADXL343 + ADT7410 Sensor FeatherWing.
//!
//! The wing forwards to two independent drivers, so each method reports the
//! bus error of the chip it talks to.
//!
//! # Example
//!
//! ```rust,no_run
//! # use featherwing_kit::tempmotion_featherwing::{Adt7410, Adxl343};
//! # fn example<A: Adxl343, T: Adt7410>(adxl343: A, adt7410: T)
//! #     -> featherwing_kit::Result<(), A::Error> {
//! use featherwing_kit::tempmotion_featherwing::{TapDetection, TempMotionFeatherWing};
//!
//! let mut wing = TempMotionFeatherWing::new(adxl343, adt7410);
//! wing.enable_tap_detection(TapDetection { tap_count: 2, ..TapDetection::default() })?;
//! let (x, y, z) = wing.acceleration()?;
//! if wing.events()?.tap {
//!     // double tapped
//! }
//! # let _ = (x, y, z);
//! # Ok(())
//! # }
//! ```

use log::debug;

use crate::{Error, Result};

/// Default I2C address of the ADXL343 accelerometer.
pub const ADXL343_ADDRESS_DEFAULT: u8 = 0x53;

/// Default I2C address of the ADT7410 temperature sensor.
pub const ADT7410_ADDRESS_DEFAULT: u8 = 0x48;

/// Accelerometer output data rate, by register code.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs, reason = "variant names are the rate in hertz")]
#[repr(u8)]
pub enum DataRate {
    Hz3200 = 0b1111,
    Hz1600 = 0b1110,
    Hz800 = 0b1101,
    Hz400 = 0b1100,
    Hz200 = 0b1011,
    #[default]
    Hz100 = 0b1010,
    Hz50 = 0b1001,
    Hz25 = 0b1000,
    Hz12_5 = 0b0111,
    Hz6_25 = 0b0110,
    Hz3_13 = 0b0101,
    Hz1_56 = 0b0100,
    Hz0_78 = 0b0011,
    Hz0_39 = 0b0010,
    Hz0_20 = 0b0001,
    Hz0_10 = 0b0000,
}

/// Accelerometer measurement range.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Range {
    /// ±2 g.
    #[default]
    G2 = 0b00,
    /// ±4 g.
    G4 = 0b01,
    /// ±8 g.
    G8 = 0b10,
    /// ±16 g.
    G16 = 0b11,
}

/// Interrupt events latched by the accelerometer since the last read.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Events {
    /// Activity above the motion threshold.
    pub motion: bool,
    /// Free fall detected.
    pub freefall: bool,
    /// Single or double tap, whichever is enabled.
    pub tap: bool,
}

/// Motion detection settings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionDetection {
    /// Activity threshold, 62.5 mg per count.
    pub threshold: u8,
}

impl Default for MotionDetection {
    fn default() -> Self {
        Self { threshold: 18 }
    }
}

/// Free-fall detection settings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FreefallDetection {
    /// Free-fall threshold, 62.5 mg per count.
    pub threshold: u8,
    /// Minimum fall time, 5 ms per count.
    pub time: u8,
}

impl Default for FreefallDetection {
    fn default() -> Self {
        Self {
            threshold: 10,
            time: 25,
        }
    }
}

/// Tap detection settings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapDetection {
    /// 1 for single taps, 2 for double taps.
    pub tap_count: u8,
    /// Tap threshold, 62.5 mg per count.
    pub threshold: u8,
    /// Maximum tap duration, 625 µs per count.
    pub duration: u8,
    /// Wait before the second tap window opens, 1.25 ms per count.
    pub latency: u8,
    /// Second tap window, 1.25 ms per count.
    pub window: u8,
}

impl Default for TapDetection {
    fn default() -> Self {
        Self {
            tap_count: 1,
            threshold: 20,
            duration: 50,
            latency: 20,
            window: 255,
        }
    }
}

/// ADXL343 accelerometer driver operations the wing needs.
#[allow(clippy::missing_errors_doc, reason = "every method returns only the bus error")]
pub trait Adxl343 {
    /// Error type of the underlying bus.
    type Error;

    /// Acceleration `(x, y, z)` in m/s².
    fn acceleration(&mut self) -> core::result::Result<(f32, f32, f32), Self::Error>;
    /// Read and clear the latched interrupt events.
    fn events(&mut self) -> core::result::Result<Events, Self::Error>;
    /// Start reporting motion events.
    fn enable_motion_detection(
        &mut self,
        settings: MotionDetection,
    ) -> core::result::Result<(), Self::Error>;
    /// Stop reporting motion events.
    fn disable_motion_detection(&mut self) -> core::result::Result<(), Self::Error>;
    /// Start reporting free-fall events.
    fn enable_freefall_detection(
        &mut self,
        settings: FreefallDetection,
    ) -> core::result::Result<(), Self::Error>;
    /// Stop reporting free-fall events.
    fn disable_freefall_detection(&mut self) -> core::result::Result<(), Self::Error>;
    /// Start reporting tap events.
    fn enable_tap_detection(&mut self, settings: TapDetection)
    -> core::result::Result<(), Self::Error>;
    /// Stop reporting tap events.
    fn disable_tap_detection(&mut self) -> core::result::Result<(), Self::Error>;
    /// Current output data rate.
    fn data_rate(&mut self) -> core::result::Result<DataRate, Self::Error>;
    /// Change the output data rate.
    fn set_data_rate(&mut self, rate: DataRate) -> core::result::Result<(), Self::Error>;
    /// Current measurement range.
    fn range(&mut self) -> core::result::Result<Range, Self::Error>;
    /// Change the measurement range.
    fn set_range(&mut self, range: Range) -> core::result::Result<(), Self::Error>;
}

/// ADT7410 temperature sensor driver operations the wing needs.
#[allow(clippy::missing_errors_doc, reason = "every method returns only the bus error")]
pub trait Adt7410 {
    /// Error type of the underlying bus.
    type Error;

    /// Temperature in degrees Celsius.
    fn temperature(&mut self) -> core::result::Result<f32, Self::Error>;
    /// Raw status register.
    fn status(&mut self) -> core::result::Result<u8, Self::Error>;
    /// Raw configuration register.
    fn configuration(&mut self) -> core::result::Result<u8, Self::Error>;
    /// Write the configuration register.
    fn set_configuration(&mut self, configuration: u8) -> core::result::Result<(), Self::Error>;
}

/// ADXL343 + ADT7410 Sensor FeatherWing.
pub struct TempMotionFeatherWing<A, T> {
    adxl343: A,
    adt7410: T,
}

#[allow(clippy::missing_errors_doc, reason = "every method returns only the chip's bus error")]
impl<A: Adxl343, T: Adt7410> TempMotionFeatherWing<A, T> {
    /// Create the wing over its two drivers.
    #[must_use]
    pub fn new(adxl343: A, adt7410: T) -> Self {
        debug!(
            "TempMotionFeatherWing: adxl343 {:#04x}, adt7410 {:#04x}",
            ADXL343_ADDRESS_DEFAULT, ADT7410_ADDRESS_DEFAULT
        );
        Self { adxl343, adt7410 }
    }

    /// Temperature in degrees Celsius.
    pub fn temperature(&mut self) -> Result<f32, T::Error> {
        self.adt7410.temperature().map_err(Error::Bus)
    }

    /// ADT7410 status register.
    pub fn status(&mut self) -> Result<u8, T::Error> {
        self.adt7410.status().map_err(Error::Bus)
    }

    /// ADT7410 configuration register.
    pub fn configuration(&mut self) -> Result<u8, T::Error> {
        self.adt7410.configuration().map_err(Error::Bus)
    }

    /// Write the ADT7410 configuration register.
    pub fn set_configuration(&mut self, configuration: u8) -> Result<(), T::Error> {
        self.adt7410
            .set_configuration(configuration)
            .map_err(Error::Bus)
    }

    /// Acceleration `(x, y, z)` in m/s².
    pub fn acceleration(&mut self) -> Result<(f32, f32, f32), A::Error> {
        self.adxl343.acceleration().map_err(Error::Bus)
    }

    /// Events latched since the last call.
    pub fn events(&mut self) -> Result<Events, A::Error> {
        self.adxl343.events().map_err(Error::Bus)
    }

    /// Enable motion detection.
    pub fn enable_motion_detection(&mut self, settings: MotionDetection) -> Result<(), A::Error> {
        self.adxl343
            .enable_motion_detection(settings)
            .map_err(Error::Bus)
    }

    /// Disable motion detection.
    pub fn disable_motion_detection(&mut self) -> Result<(), A::Error> {
        self.adxl343.disable_motion_detection().map_err(Error::Bus)
    }

    /// Enable free-fall detection.
    pub fn enable_freefall_detection(
        &mut self,
        settings: FreefallDetection,
    ) -> Result<(), A::Error> {
        self.adxl343
            .enable_freefall_detection(settings)
            .map_err(Error::Bus)
    }

    /// Disable free-fall detection.
    pub fn disable_freefall_detection(&mut self) -> Result<(), A::Error> {
        self.adxl343.disable_freefall_detection().map_err(Error::Bus)
    }

    /// Enable tap detection.
    pub fn enable_tap_detection(&mut self, settings: TapDetection) -> Result<(), A::Error> {
        self.adxl343
            .enable_tap_detection(settings)
            .map_err(Error::Bus)
    }

    /// Disable tap detection.
    pub fn disable_tap_detection(&mut self) -> Result<(), A::Error> {
        self.adxl343.disable_tap_detection().map_err(Error::Bus)
    }

    /// Accelerometer output data rate.
    pub fn data_rate(&mut self) -> Result<DataRate, A::Error> {
        self.adxl343.data_rate().map_err(Error::Bus)
    }

    /// Change the accelerometer output data rate.
    pub fn set_data_rate(&mut self, rate: DataRate) -> Result<(), A::Error> {
        self.adxl343.set_data_rate(rate).map_err(Error::Bus)
    }

    /// Accelerometer measurement range.
    pub fn range(&mut self) -> Result<Range, A::Error> {
        self.adxl343.range().map_err(Error::Bus)
    }

    /// Change the accelerometer measurement range.
    pub fn set_range(&mut self, range: Range) -> Result<(), A::Error> {
        self.adxl343.set_range(range).map_err(Error::Bus)
    }

    /// Release both drivers.
    #[must_use]
    pub fn into_inner(self) -> (A, T) {
        (self.adxl343, self.adt7410)
    }
}
