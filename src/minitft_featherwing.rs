//! A device abstraction for the Mini Color TFT with Joystick FeatherWing.
//!
//! The joystick, the A/B buttons, the display reset line, and the backlight all
//! hang off a seesaw co-processor. The ST7735R display itself is driven
//! separately over SPI and is not owned by this wing.
//!
//! # Example
//!
//! ```rust,no_run
//! # use featherwing_kit::minitft_featherwing::Seesaw;
//! # fn example<D: Seesaw>(seesaw: D) -> featherwing_kit::Result<(), D::Error> {
//! use featherwing_kit::minitft_featherwing::{Button, MiniTftFeatherWing};
//!
//! let mut wing = MiniTftFeatherWing::new(seesaw)?;
//! wing.set_backlight(0.5)?;
//!
//! let buttons = wing.buttons();
//! if buttons.up || wing.is_pressed(Button::A) {
//!     wing.set_backlight(1.0)?;
//! }
//! # Ok(())
//! # }
//! ```

use log::{debug, warn};

use crate::{Error, Result};

/// Default I2C address of the wing's seesaw.
pub const ADDRESS_DEFAULT: u8 = 0x5E;

/// Seesaw pin that resets the display when driven high.
pub const DISPLAY_RESET_PIN: u8 = 8;

/// Seesaw PWM pin driving the backlight.
pub const BACKLIGHT_PIN: u8 = 5;

/// Bit mask of every button pin.
pub const BUTTON_MASK: u32 = Button::Up.mask()
    | Button::Down.mask()
    | Button::Left.mask()
    | Button::Right.mask()
    | Button::A.mask()
    | Button::B.mask()
    | Button::Select.mask();

const BACKLIGHT_DUTY_MAX: u8 = u8::MAX;

/// Seesaw pin configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Floating input.
    Input,
    /// Push-pull output.
    Output,
    /// Input with the internal pull-up enabled.
    InputPullUp,
}

/// Seesaw driver operations the wing needs.
pub trait Seesaw {
    /// Error type of the underlying bus.
    type Error;

    /// Configure every pin whose bit is set in `mask`.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the write fails.
    fn pin_mode_bulk(&mut self, mask: u32, mode: PinMode) -> core::result::Result<(), Self::Error>;

    /// Configure one pin.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the write fails.
    fn pin_mode(&mut self, pin: u8, mode: PinMode) -> core::result::Result<(), Self::Error>;

    /// Drive an output pin.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the write fails.
    fn digital_write(&mut self, pin: u8, high: bool) -> core::result::Result<(), Self::Error>;

    /// Read the pins whose bit is set in `mask`; a set bit means high.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the read fails.
    fn digital_read_bulk(&mut self, mask: u32) -> core::result::Result<u32, Self::Error>;

    /// Set the PWM duty of `pin`.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the write fails.
    fn analog_write(&mut self, pin: u8, duty: u8) -> core::result::Result<(), Self::Error>;
}

/// A button on the wing.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Joystick up.
    Up,
    /// Joystick down.
    Down,
    /// Joystick left.
    Left,
    /// Joystick right.
    Right,
    /// Button A.
    A,
    /// Button B.
    B,
    /// Joystick press.
    Select,
}

impl Button {
    /// Every button.
    pub const ALL: [Self; 7] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::A,
        Self::B,
        Self::Select,
    ];

    /// Seesaw pin the button is wired to.
    #[must_use]
    pub const fn pin(self) -> u8 {
        match self {
            Self::Right => 7,
            Self::Down => 4,
            Self::Left => 3,
            Self::Up => 2,
            Self::Select => 11,
            Self::A => 10,
            Self::B => 9,
        }
    }

    const fn mask(self) -> u32 {
        1 << self.pin()
    }
}

/// Snapshot of which buttons are held down.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools, reason = "one flag per physical button")]
pub struct Buttons {
    /// Joystick up.
    pub up: bool,
    /// Joystick down.
    pub down: bool,
    /// Joystick left.
    pub left: bool,
    /// Joystick right.
    pub right: bool,
    /// Button A.
    pub a: bool,
    /// Button B.
    pub b: bool,
    /// Joystick press.
    pub select: bool,
}

impl Buttons {
    /// Decode a bulk pin read. Buttons pull their pin low when pressed.
    #[must_use]
    pub const fn from_pin_levels(levels: u32) -> Self {
        Self {
            up: levels & Button::Up.mask() == 0,
            down: levels & Button::Down.mask() == 0,
            left: levels & Button::Left.mask() == 0,
            right: levels & Button::Right.mask() == 0,
            a: levels & Button::A.mask() == 0,
            b: levels & Button::B.mask() == 0,
            select: levels & Button::Select.mask() == 0,
        }
    }

    /// Whether `button` is held in this snapshot.
    #[must_use]
    pub const fn is_pressed(&self, button: Button) -> bool {
        match button {
            Button::Up => self.up,
            Button::Down => self.down,
            Button::Left => self.left,
            Button::Right => self.right,
            Button::A => self.a,
            Button::B => self.b,
            Button::Select => self.select,
        }
    }
}

/// Mini Color TFT with Joystick FeatherWing.
pub struct MiniTftFeatherWing<D> {
    seesaw: D,
    backlight_duty: u8,
}

impl<D: Seesaw> MiniTftFeatherWing<D> {
    /// Configure the button pins, release the display from reset, and turn
    /// the backlight off.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if any seesaw write fails.
    pub fn new(mut seesaw: D) -> Result<Self, D::Error> {
        seesaw
            .pin_mode_bulk(BUTTON_MASK, PinMode::InputPullUp)
            .map_err(Error::Bus)?;
        seesaw
            .pin_mode(DISPLAY_RESET_PIN, PinMode::Output)
            .map_err(Error::Bus)?;
        seesaw
            .digital_write(DISPLAY_RESET_PIN, true)
            .map_err(Error::Bus)?;
        seesaw.analog_write(BACKLIGHT_PIN, 0).map_err(Error::Bus)?;
        debug!("MiniTftFeatherWing: buttons mask {:#06x}", BUTTON_MASK);
        Ok(Self {
            seesaw,
            backlight_duty: 0,
        })
    }

    /// Which buttons are held down. A failed read reports every button as
    /// released.
    pub fn buttons(&mut self) -> Buttons {
        match self.seesaw.digital_read_bulk(BUTTON_MASK) {
            Ok(levels) => Buttons::from_pin_levels(levels),
            Err(_) => {
                warn!("MiniTftFeatherWing: button read failed, reporting all released");
                Buttons::default()
            }
        }
    }

    /// Whether `button` is held down right now.
    pub fn is_pressed(&mut self, button: Button) -> bool {
        self.buttons().is_pressed(button)
    }

    /// Backlight level as a fraction in `0.0..=1.0`.
    #[must_use]
    pub fn backlight(&self) -> f32 {
        f32::from(self.backlight_duty) / f32::from(BACKLIGHT_DUTY_MAX)
    }

    /// Set the backlight level. Values outside `0.0..=1.0` are clamped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the PWM write fails.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "value is clamped to 0.0..=1.0 first"
    )]
    pub fn set_backlight(&mut self, brightness: f32) -> Result<(), D::Error> {
        let brightness = if brightness.is_nan() {
            0.0
        } else {
            brightness.clamp(0.0, 1.0)
        };
        let duty = (f32::from(BACKLIGHT_DUTY_MAX) * brightness) as u8;
        self.seesaw
            .analog_write(BACKLIGHT_PIN, duty)
            .map_err(Error::Bus)?;
        self.backlight_duty = duty;
        Ok(())
    }

    /// Release the seesaw driver.
    #[must_use]
    pub fn into_inner(self) -> D {
        self.seesaw
    }
}
