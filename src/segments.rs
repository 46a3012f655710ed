//! Device abstractions for the 14-segment AlphaNumeric and 7-segment
//! FeatherWings (HT16K33, four characters each).
//!
//! Both wings are the same [`Segments`] type over different drivers; every call
//! that changes what is displayed pushes it to the chip immediately.
//!
//! # Example
//!
//! ```rust,no_run
//! # use featherwing_kit::ht16k33::Ht16k33Segments;
//! # fn example<D, Dl>(ht16k33: D, delay: &mut Dl) -> featherwing_kit::Result<(), D::Error>
//! # where D: Ht16k33Segments, Dl: embedded_hal::delay::DelayNs {
//! use featherwing_kit::segments::AlphaNumFeatherWing;
//!
//! let mut display = AlphaNumFeatherWing::new(ht16k33);
//! display.print("RUST")?;
//! display.print_float(3.14159)?; // too long for the display; rounds to "3"
//! display.marquee("HELLO WORLD ", 250, delay)?;
//! # Ok(())
//! # }
//! ```

use core::{convert::Infallible, fmt::Write};

use embedded_hal::delay::DelayNs;
use heapless::{Deque, String};
use log::debug;

use crate::ht16k33::{self, BlinkRate, Ht16k33Segments};
use crate::{Error, Result};

/// Characters shown at once on the segment wings.
pub const DIGITS: usize = 4;

/// Longest formatted number before `print_float` rounds to an integer.
const FLOAT_TEXT_MAX: usize = 5;

/// Text buffer for one display window: four chars of up to four UTF-8 bytes
/// each, plus their decimal points.
type WindowText = String<20>;

/// One character position of a scrolling window.
#[derive(Clone, Copy)]
struct Slot {
    character: char,
    dot: bool,
}

/// 14-segment AlphaNumeric FeatherWing.
pub type AlphaNumFeatherWing<D> = Segments<D>;

/// 7-segment FeatherWing.
pub type SevenSegmentFeatherWing<D> = Segments<D>;

/// A four-character HT16K33 segment display.
pub struct Segments<D> {
    display: D,
}

impl<D: Ht16k33Segments> Segments<D> {
    /// Create the wing over an HT16K33 segment driver.
    #[must_use]
    pub fn new(display: D) -> Self {
        debug!("Segments: {} digits", DIGITS);
        Self { display }
    }

    /// Display `text`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the driver fails.
    pub fn print(&mut self, text: &str) -> Result<(), D::Error> {
        self.display.print(text).map_err(Error::Bus)?;
        self.display.show().map_err(Error::Bus)
    }

    /// Display an integer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the driver fails.
    pub fn print_int(&mut self, value: i32) -> Result<(), D::Error> {
        let mut text: String<16> = String::new();
        // An i32 is at most 11 characters, so this always fits.
        let _ = write!(text, "{value}");
        self.print(&text)
    }

    /// Display a float, always with a decimal place (`10.0`). If that is more
    /// than five characters it is rounded to the nearest integer first, half
    /// away from zero, so it still fits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the driver fails.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "saturating float-to-int cast is the intended rounding"
    )]
    pub fn print_float(&mut self, value: f32) -> Result<(), D::Error> {
        let mut text: String<48> = String::new();
        let fits = write!(text, "{value:?}").is_ok() && text.len() <= FLOAT_TEXT_MAX;
        if fits || !value.is_finite() {
            return self.print(&text);
        }
        let rounded = if value >= 0.0 {
            value + 0.5
        } else {
            value - 0.5
        };
        self.print_int(rounded as i32)
    }

    /// Scroll `text` across the display once, one character per step, waiting
    /// `delay_ms` between steps.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the driver fails.
    pub fn marquee(
        &mut self,
        text: &str,
        delay_ms: u32,
        delay: &mut impl DelayNs,
    ) -> Result<(), D::Error> {
        let mut window = Deque::new();
        self.scroll(text, &mut window, delay_ms, delay)
    }

    /// Scroll `text` across the display forever. Only returns on a driver error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the driver fails.
    pub fn marquee_forever(
        &mut self,
        text: &str,
        delay_ms: u32,
        delay: &mut impl DelayNs,
    ) -> Result<Infallible, D::Error> {
        let mut window = Deque::new();
        loop {
            self.scroll(text, &mut window, delay_ms, delay)?;
        }
    }

    /// Turn every segment on or off.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the driver fails.
    pub fn fill(&mut self, on: bool) -> Result<(), D::Error> {
        self.display.fill(on).map_err(Error::Bus)?;
        self.display.show().map_err(Error::Bus)
    }

    /// Current blink rate.
    #[must_use]
    pub fn blink_rate(&self) -> BlinkRate {
        self.display.blink_rate()
    }

    /// Change the blink rate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the driver fails.
    pub fn set_blink_rate(&mut self, rate: BlinkRate) -> Result<(), D::Error> {
        self.display.set_blink_rate(rate).map_err(Error::Bus)
    }

    /// Brightness level, 0 (dimmest) to 15 (brightest).
    #[must_use]
    pub fn brightness(&self) -> u8 {
        ht16k33::brightness_level(&self.display)
    }

    /// Set the brightness level, 0 (dimmest) to 15 (brightest).
    ///
    /// # Errors
    ///
    /// Returns [`Error::BrightnessOutOfRange`] if `level > 15`, or
    /// [`Error::Bus`] if the driver fails.
    pub fn set_brightness(&mut self, level: u8) -> Result<(), D::Error> {
        ht16k33::set_brightness_level(&mut self.display, level)
    }

    /// Release the HT16K33 driver.
    #[must_use]
    pub fn into_inner(self) -> D {
        self.display
    }

    /// Push each character of `text` in at the right edge, carrying `window`
    /// between passes so a looping marquee scrolls continuously. A `'.'` lights
    /// the decimal point of the character before it instead of taking a slot.
    fn scroll(
        &mut self,
        text: &str,
        window: &mut Deque<Slot, DIGITS>,
        delay_ms: u32,
        delay: &mut impl DelayNs,
    ) -> Result<(), D::Error> {
        for character in text.chars() {
            let joins_previous = character == '.' && window.back().is_some_and(|last| !last.dot);
            if joins_previous {
                if let Some(last) = window.back_mut() {
                    last.dot = true;
                }
            } else {
                if window.is_full() {
                    window.pop_front();
                }
                // Never full here: one slot was just freed.
                let _ = window.push_back(Slot {
                    character,
                    dot: false,
                });
            }

            let mut line = WindowText::new();
            for _ in window.len()..DIGITS {
                let _ = line.push(' ');
            }
            for slot in window.iter() {
                let _ = line.push(slot.character);
                if slot.dot {
                    let _ = line.push('.');
                }
            }
            self.print(&line)?;
            delay.delay_ms(delay_ms);
        }
        Ok(())
    }
}
