//! A device abstraction for the INA219 current sensor FeatherWing.

use crate::{Error, Result};

/// Default I2C address of the INA219.
pub const ADDRESS_DEFAULT: u8 = 0x40;

/// INA219 driver readings the wing needs.
pub trait Ina219 {
    /// Error type of the underlying bus.
    type Error;

    /// Voltage on the load side of the shunt, in volts.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the read fails.
    fn bus_voltage(&mut self) -> core::result::Result<f32, Self::Error>;

    /// Voltage across the shunt resistor, in volts.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the read fails.
    fn shunt_voltage(&mut self) -> core::result::Result<f32, Self::Error>;

    /// Current through the shunt, in milliamps.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the read fails.
    fn current(&mut self) -> core::result::Result<f32, Self::Error>;
}

/// INA219 FeatherWing.
///
/// # Example
///
/// ```rust,no_run
/// # use featherwing_kit::ina219_featherwing::Ina219;
/// # fn example<D: Ina219>(ina219: D) -> featherwing_kit::Result<(), D::Error> {
/// use featherwing_kit::ina219_featherwing::Ina219FeatherWing;
///
/// let mut wing = Ina219FeatherWing::new(ina219);
/// let volts = wing.voltage()?;
/// let milliamps = wing.current()?;
/// # let _ = (volts, milliamps);
/// # Ok(())
/// # }
/// ```
pub struct Ina219FeatherWing<D> {
    ina219: D,
}

impl<D: Ina219> Ina219FeatherWing<D> {
    /// Create the wing over an INA219 driver.
    #[must_use]
    pub const fn new(ina219: D) -> Self {
        Self { ina219 }
    }

    /// Bus voltage in volts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn bus_voltage(&mut self) -> Result<f32, D::Error> {
        self.ina219.bus_voltage().map_err(Error::Bus)
    }

    /// Shunt voltage in volts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn shunt_voltage(&mut self) -> Result<f32, D::Error> {
        self.ina219.shunt_voltage().map_err(Error::Bus)
    }

    /// Load voltage in volts: bus voltage plus shunt voltage.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if either read fails.
    pub fn voltage(&mut self) -> Result<f32, D::Error> {
        Ok(self.bus_voltage()? + self.shunt_voltage()?)
    }

    /// Current in milliamps.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn current(&mut self) -> Result<f32, D::Error> {
        self.ina219.current().map_err(Error::Bus)
    }

    /// Release the INA219 driver.
    #[must_use]
    pub fn into_inner(self) -> D {
        self.ina219
    }
}
