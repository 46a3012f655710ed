//! A device abstraction for the DC Motor + Stepper FeatherWing (PCA9685).
//!
//! The wing drives four DC motors or two steppers from one PCA9685. Each
//! stepper shares its channels with two of the DC motors, so a motor and the
//! stepper overlapping it cannot both be in use.
//!
//! | DC motor | pwm | in1 | in2 | | Stepper | enable | coils |
//! |----------|-----|-----|-----|-|---------|--------|-------|
//! | M1       | 8   | 9   | 10  | | S1      | 8, 13  | 10, 9, 11, 12 |
//! | M2       | 13  | 11  | 12  | |         |        |       |
//! | M3       | 2   | 3   | 4   | | S2      | 7, 2   | 4, 3, 5, 6 |
//! | M4       | 7   | 5   | 6   | |         |        |       |
//!
//! # Example
//!
//! ```rust,no_run
//! # use featherwing_kit::motor_featherwing::Pca9685;
//! # fn example<D: Pca9685>(pca9685: D) -> featherwing_kit::Result<(), D::Error> {
//! use featherwing_kit::motor_featherwing::{
//!     Direction, Motor, MotorFeatherWing, StepStyle, Stepper,
//! };
//!
//! let mut wing = MotorFeatherWing::new(pca9685)?;
//!
//! wing.motor(Motor::M3)?.set_throttle(Some(0.5))?;
//! wing.motor(Motor::M3)?.set_throttle(Some(0.0))?; // brake
//!
//! let mut stepper = wing.stepper(Stepper::S1)?;
//! for _ in 0..100 {
//!     stepper.onestep(Direction::Forward, StepStyle::Double)?;
//! }
//! stepper.release()?;
//! # Ok(())
//! # }
//! ```

use log::debug;

use crate::{Error, Result};

/// Default I2C address of the wing's PCA9685.
pub const ADDRESS_DEFAULT: u8 = 0x60;

/// PWM frequency set at construction.
pub const FREQUENCY_HZ: u32 = 1600;

/// Duty cycle for a fully-on channel.
pub const DUTY_FULL: u16 = u16::MAX;

const HALF_STEP_COUNT: u8 = 8;

/// Coil patterns `[a1, a2, b1, b2]` for each half-step position. Even positions
/// energize one coil, odd positions two.
const HALF_STEPS: [[bool; 4]; HALF_STEP_COUNT as usize] = [
    [true, false, false, false],
    [true, false, true, false],
    [false, false, true, false],
    [false, true, true, false],
    [false, true, false, false],
    [false, true, false, true],
    [false, false, false, true],
    [true, false, false, true],
];

/// PCA9685 driver operations the wing needs.
pub trait Pca9685 {
    /// Error type of the underlying bus.
    type Error;

    /// Set the PWM frequency shared by all channels.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the write fails.
    fn set_frequency(&mut self, hz: u32) -> core::result::Result<(), Self::Error>;

    /// Set one channel's 16-bit duty cycle.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the write fails.
    fn set_duty_cycle(&mut self, channel: u8, duty: u16) -> core::result::Result<(), Self::Error>;
}

/// One of the four DC motor ports.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Motor {
    /// Motor 1.
    M1,
    /// Motor 2.
    M2,
    /// Motor 3.
    M3,
    /// Motor 4.
    M4,
}

impl Motor {
    /// PCA9685 channels `(pwm, in1, in2)`.
    #[must_use]
    pub const fn channels(self) -> (u8, u8, u8) {
        match self {
            Self::M1 => (8, 9, 10),
            Self::M2 => (13, 11, 12),
            Self::M3 => (2, 3, 4),
            Self::M4 => (7, 5, 6),
        }
    }

    /// The stepper port that shares this motor's channels.
    #[must_use]
    pub const fn stepper(self) -> Stepper {
        match self {
            Self::M1 | Self::M2 => Stepper::S1,
            Self::M3 | Self::M4 => Stepper::S2,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::M1 => 0,
            Self::M2 => 1,
            Self::M3 => 2,
            Self::M4 => 3,
        }
    }
}

/// One of the two stepper ports.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stepper {
    /// Stepper 1, on the M1 and M2 terminals.
    S1,
    /// Stepper 2, on the M3 and M4 terminals.
    S2,
}

impl Stepper {
    /// PCA9685 channels that must be fully on to enable the H-bridges.
    #[must_use]
    pub const fn enable_channels(self) -> [u8; 2] {
        match self {
            Self::S1 => [8, 13],
            Self::S2 => [7, 2],
        }
    }

    /// PCA9685 channels of the coil ends `[a1, a2, b1, b2]`.
    #[must_use]
    pub const fn coil_channels(self) -> [u8; 4] {
        match self {
            Self::S1 => [10, 9, 11, 12],
            Self::S2 => [4, 3, 5, 6],
        }
    }

    /// The DC motor ports that share this stepper's channels.
    #[must_use]
    pub const fn motors(self) -> [Motor; 2] {
        match self {
            Self::S1 => [Motor::M1, Motor::M2],
            Self::S2 => [Motor::M3, Motor::M4],
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::S1 => 0,
            Self::S2 => 1,
        }
    }
}

/// Stepper rotation direction.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Advance through the coil sequence.
    #[default]
    Forward,
    /// Retreat through the coil sequence.
    Backward,
}

/// How coils are energized for a full step.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepStyle {
    /// One coil at a time.
    #[default]
    Single,
    /// Two coils at a time, for more torque.
    Double,
}

#[derive(Clone, Copy, Debug, Default)]
struct MotorState {
    throttle: Option<f32>,
}

#[derive(Clone, Copy, Debug, Default)]
struct StepperState {
    half_step: u8,
}

/// DC Motor + Stepper FeatherWing.
pub struct MotorFeatherWing<D> {
    pca9685: D,
    motors: [Option<MotorState>; 4],
    steppers: [Option<StepperState>; 2],
}

impl<D: Pca9685> MotorFeatherWing<D> {
    /// Create the wing over a PCA9685 driver and set the PWM frequency to
    /// [`FREQUENCY_HZ`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the frequency write fails.
    pub fn new(mut pca9685: D) -> Result<Self, D::Error> {
        pca9685.set_frequency(FREQUENCY_HZ).map_err(Error::Bus)?;
        debug!("MotorFeatherWing: {} Hz", FREQUENCY_HZ);
        Ok(Self {
            pca9685,
            motors: [None; 4],
            steppers: [None; 2],
        })
    }

    /// Control a DC motor port. The first call enables the port's PWM channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MotorInUse`] if the stepper sharing this port is in
    /// use, or [`Error::Bus`] if enabling the port fails.
    #[allow(
        clippy::indexing_slicing,
        reason = "slot indices come from the four-variant port enum"
    )]
    pub fn motor(&mut self, motor: Motor) -> Result<DcMotor<'_, D>, D::Error> {
        let (pwm, in1, in2) = motor.channels();
        let slot = &mut self.motors[motor.index()];
        if slot.is_none() {
            if self.steppers[motor.stepper().index()].is_some() {
                return Err(Error::MotorInUse);
            }
            self.pca9685
                .set_duty_cycle(pwm, DUTY_FULL)
                .map_err(Error::Bus)?;
            debug!("MotorFeatherWing: {:?} enabled", motor);
        }
        let state = slot.get_or_insert_with(MotorState::default);
        Ok(DcMotor {
            pca9685: &mut self.pca9685,
            in1,
            in2,
            state,
        })
    }

    /// Control a stepper port. The first call enables both H-bridges and
    /// energizes the first coil.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MotorInUse`] if either DC motor sharing this port is
    /// in use, or [`Error::Bus`] if enabling the port fails.
    #[allow(
        clippy::indexing_slicing,
        reason = "slot indices come from the two-variant port enum"
    )]
    pub fn stepper(&mut self, stepper: Stepper) -> Result<StepperMotor<'_, D>, D::Error> {
        let slot = &mut self.steppers[stepper.index()];
        let is_new = slot.is_none();
        if is_new {
            if stepper
                .motors()
                .iter()
                .any(|motor| self.motors[motor.index()].is_some())
            {
                return Err(Error::MotorInUse);
            }
            for channel in stepper.enable_channels() {
                self.pca9685
                    .set_duty_cycle(channel, DUTY_FULL)
                    .map_err(Error::Bus)?;
            }
            debug!("MotorFeatherWing: {:?} enabled", stepper);
        }
        let state = slot.get_or_insert_with(StepperState::default);
        let mut stepper_motor = StepperMotor {
            pca9685: &mut self.pca9685,
            coils: stepper.coil_channels(),
            state,
        };
        if is_new {
            stepper_motor.update_coils()?;
        }
        Ok(stepper_motor)
    }

    /// Release the PCA9685 driver.
    #[must_use]
    pub fn into_inner(self) -> D {
        self.pca9685
    }
}

/// Handle to one DC motor port, borrowed from a [`MotorFeatherWing`].
pub struct DcMotor<'a, D> {
    pca9685: &'a mut D,
    in1: u8,
    in2: u8,
    state: &'a mut MotorState,
}

impl<D: Pca9685> DcMotor<'_, D> {
    /// Last throttle set; `None` means coasting.
    #[must_use]
    pub const fn throttle(&self) -> Option<f32> {
        self.state.throttle
    }

    /// Set the throttle: `None` coasts, `0.0` brakes, positive values run
    /// forward and negative values reverse, up to full speed at `±1.0`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ThrottleOutOfRange`] if the value is outside
    /// `-1.0..=1.0`, or [`Error::Bus`] if a channel write fails.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::float_cmp,
        reason = "throttle is range-checked first; exact zero selects braking"
    )]
    pub fn set_throttle(&mut self, throttle: Option<f32>) -> Result<(), D::Error> {
        let (in1, in2) = match throttle {
            None => (0, 0),
            Some(value) if !(-1.0..=1.0).contains(&value) => {
                return Err(Error::ThrottleOutOfRange);
            }
            Some(value) if value == 0.0 => (DUTY_FULL, DUTY_FULL),
            Some(value) => {
                let duty = (f32::from(DUTY_FULL) * value.abs()) as u16;
                if value > 0.0 { (duty, 0) } else { (0, duty) }
            }
        };
        self.pca9685
            .set_duty_cycle(self.in1, in1)
            .map_err(Error::Bus)?;
        self.pca9685
            .set_duty_cycle(self.in2, in2)
            .map_err(Error::Bus)?;
        self.state.throttle = throttle;
        Ok(())
    }
}

/// Handle to one stepper port, borrowed from a [`MotorFeatherWing`].
///
/// The step position is kept by the wing, so later handles to the same port
/// continue where this one stopped.
pub struct StepperMotor<'a, D> {
    pca9685: &'a mut D,
    coils: [u8; 4],
    state: &'a mut StepperState,
}

impl<D: Pca9685> StepperMotor<'_, D> {
    /// Move one full step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if a coil write fails.
    pub fn onestep(&mut self, direction: Direction, style: StepStyle) -> Result<(), D::Error> {
        let on_double = self.state.half_step % 2 == 1;
        // Realign to the style's phase with a half step, otherwise take a full step.
        let distance = match (style, on_double) {
            (StepStyle::Single, true) | (StepStyle::Double, false) => 1,
            (StepStyle::Single, false) | (StepStyle::Double, true) => 2,
        };
        let offset = match direction {
            Direction::Forward => distance,
            Direction::Backward => HALF_STEP_COUNT.wrapping_sub(distance),
        };
        self.state.half_step = self.state.half_step.wrapping_add(offset) % HALF_STEP_COUNT;
        self.update_coils()
    }

    /// De-energize every coil so the shaft turns freely.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if a coil write fails.
    pub fn release(&mut self) -> Result<(), D::Error> {
        self.write_coils([false; 4])
    }

    /// Current position within the eight half-step coil sequence.
    #[must_use]
    pub const fn half_step(&self) -> u8 {
        self.state.half_step
    }

    fn update_coils(&mut self) -> Result<(), D::Error> {
        let pattern = HALF_STEPS
            .get(usize::from(self.state.half_step))
            .copied()
            .unwrap_or_default();
        self.write_coils(pattern)
    }

    fn write_coils(&mut self, pattern: [bool; 4]) -> Result<(), D::Error> {
        for (channel, on) in self.coils.into_iter().zip(pattern) {
            let duty = if on { DUTY_FULL } else { 0 };
            self.pca9685
                .set_duty_cycle(channel, duty)
                .map_err(Error::Bus)?;
        }
        Ok(())
    }
}
