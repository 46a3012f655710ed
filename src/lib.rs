//! Device abstractions for FeatherWing add-on boards.
//!
//! Each wing type owns a driver for its chip and adds the board-level
//! behavior: pin and channel assignments, default brightness, pixel
//! addressing. The chip drivers themselves come from elsewhere; implement the
//! small trait each module defines (or [`smart_leds::SmartLedsWrite`] for the
//! RGB pixel wings) for whichever driver you use.
//!
//! | Wing | Module |
//! |------|--------|
//! | DotStar 12×6 | [`dotstar_featherwing`] |
//! | NeoPixel 8×4 | [`neopixel_featherwing`] |
//! | LED Matrix 16×8 | [`matrix_featherwing`] |
//! | 14-segment AlphaNumeric, 7-segment | [`segments`] |
//! | DS3231 Precision RTC | [`rtc_featherwing`] |
//! | INA219 | [`ina219_featherwing`] |
//! | Mini Color TFT with Joystick | [`minitft_featherwing`] |
//! | DC Motor + Stepper | [`motor_featherwing`] |
//! | ADXL343 + ADT7410 | [`tempmotion_featherwing`] |
//! | Ultimate GPS | [`gps_featherwing`] |
//!
//! # Glossary
//!
//! - **Auto-write:** when on, every mutation of a pixel buffer is immediately
//!   followed by a flush to the hardware.
//! - **Flush ([`show`](pixel_matrix::PixelMatrix::show)):** push the in-memory
//!   pixel buffer to the LEDs.
//! - **Rotate:** on a shift, the row or column pushed off one edge re-enters at
//!   the opposite edge instead of being cleared.
//! - **Row-major index:** `index = y × columns + x`, with `(0, 0)` the first pixel.
#![cfg_attr(not(test), no_std)]

pub mod color;
pub mod dotstar_featherwing;
mod error;
pub mod gps_featherwing;
pub mod ht16k33;
pub mod ina219_featherwing;
pub mod matrix_featherwing;
pub mod minitft_featherwing;
pub mod motor_featherwing;
pub mod neopixel_featherwing;
pub mod pixel_matrix;
pub mod rtc_featherwing;
pub mod segments;
pub mod tempmotion_featherwing;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
