//! Hand-written driver doubles shared by the integration tests.
#![allow(dead_code, reason = "each test binary uses a different subset")]

use embedded_hal::delay::DelayNs;
use featherwing_kit::color::Rgb;
use featherwing_kit::ht16k33::{BlinkRate, Ht16k33, Ht16k33Matrix, Ht16k33Segments};
use featherwing_kit::minitft_featherwing::{PinMode, Seesaw};
use featherwing_kit::motor_featherwing::Pca9685;
use featherwing_kit::rtc_featherwing::{DateTime, Ds3231};
use smart_leds::SmartLedsWrite;

/// Error every double reports when told to fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusFault;

/// `SmartLedsWrite` sink that records every frame written to it.
#[derive(Default)]
pub struct RecordingSink {
    pub frames: Vec<Vec<Rgb>>,
    pub fail: bool,
}

impl RecordingSink {
    pub fn last_frame(&self) -> &[Rgb] {
        self.frames.last().map_or(&[], Vec::as_slice)
    }
}

impl SmartLedsWrite for RecordingSink {
    type Error = BusFault;
    type Color = Rgb;

    fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
    where
        T: IntoIterator<Item = I>,
        I: Into<Self::Color>,
    {
        if self.fail {
            return Err(BusFault);
        }
        self.frames
            .push(iterator.into_iter().map(Into::into).collect());
        Ok(())
    }
}

/// HT16K33 double for both the matrix and segment wings.
#[derive(Debug)]
pub struct MockHt16k33 {
    pub pixels: Vec<bool>,
    pub printed: Vec<String>,
    pub filled: Option<bool>,
    pub shows: usize,
    pub blink_rate: BlinkRate,
    pub brightness: f32,
    pub fail: bool,
}

impl Default for MockHt16k33 {
    fn default() -> Self {
        Self {
            pixels: Vec::new(),
            printed: Vec::new(),
            filled: None,
            shows: 0,
            blink_rate: BlinkRate::Off,
            brightness: 1.0,
            fail: false,
        }
    }
}

impl MockHt16k33 {
    fn check(&self) -> Result<(), BusFault> {
        if self.fail { Err(BusFault) } else { Ok(()) }
    }
}

impl Ht16k33 for MockHt16k33 {
    type Error = BusFault;

    fn show(&mut self) -> Result<(), Self::Error> {
        self.check()?;
        self.shows += 1;
        Ok(())
    }

    fn blink_rate(&self) -> BlinkRate {
        self.blink_rate
    }

    fn set_blink_rate(&mut self, rate: BlinkRate) -> Result<(), Self::Error> {
        self.check()?;
        self.blink_rate = rate;
        Ok(())
    }

    fn brightness(&self) -> f32 {
        self.brightness
    }

    fn set_brightness(&mut self, brightness: f32) -> Result<(), Self::Error> {
        self.check()?;
        self.brightness = brightness;
        Ok(())
    }
}

impl Ht16k33Matrix for MockHt16k33 {
    fn write_pixels(&mut self, pixels: &[bool]) -> Result<(), Self::Error> {
        self.check()?;
        self.pixels = pixels.to_vec();
        Ok(())
    }
}

impl Ht16k33Segments for MockHt16k33 {
    fn print(&mut self, text: &str) -> Result<(), Self::Error> {
        self.check()?;
        self.printed.push(text.to_owned());
        Ok(())
    }

    fn fill(&mut self, on: bool) -> Result<(), Self::Error> {
        self.check()?;
        self.filled = Some(on);
        Ok(())
    }
}

/// Delay that records requested millisecond waits instead of sleeping.
#[derive(Default)]
pub struct RecordingDelay {
    pub waits_ms: Vec<u32>,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.waits_ms.push(ms);
    }
}

/// DS3231 double holding its registers in memory.
pub struct MockDs3231 {
    pub datetime: DateTime,
    pub writes: usize,
    pub fail: bool,
}

impl MockDs3231 {
    pub const fn new(datetime: DateTime) -> Self {
        Self {
            datetime,
            writes: 0,
            fail: false,
        }
    }
}

impl Ds3231 for MockDs3231 {
    type Error = BusFault;

    fn datetime(&mut self) -> Result<DateTime, Self::Error> {
        if self.fail {
            return Err(BusFault);
        }
        Ok(self.datetime)
    }

    fn set_datetime(&mut self, datetime: &DateTime) -> Result<(), Self::Error> {
        if self.fail {
            return Err(BusFault);
        }
        self.datetime = *datetime;
        self.writes += 1;
        Ok(())
    }
}

/// PCA9685 double that logs every duty write.
#[derive(Default)]
pub struct MockPca9685 {
    pub frequency: Option<u32>,
    pub duty: [u16; 16],
    pub writes: Vec<(u8, u16)>,
}

impl Pca9685 for MockPca9685 {
    type Error = BusFault;

    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::Error> {
        self.frequency = Some(hz);
        Ok(())
    }

    fn set_duty_cycle(&mut self, channel: u8, duty: u16) -> Result<(), Self::Error> {
        let slot = self
            .duty
            .get_mut(usize::from(channel))
            .ok_or(BusFault)?;
        *slot = duty;
        self.writes.push((channel, duty));
        Ok(())
    }
}

/// Seesaw double with settable pin levels.
pub struct MockSeesaw {
    pub levels: u32,
    pub fail_reads: bool,
    pub bulk_modes: Vec<(u32, PinMode)>,
    pub pin_modes: Vec<(u8, PinMode)>,
    pub digital_writes: Vec<(u8, bool)>,
    pub pwm_writes: Vec<(u8, u8)>,
}

impl Default for MockSeesaw {
    fn default() -> Self {
        Self {
            // Pull-ups: every pin reads high while nothing is pressed.
            levels: u32::MAX,
            fail_reads: false,
            bulk_modes: Vec::new(),
            pin_modes: Vec::new(),
            digital_writes: Vec::new(),
            pwm_writes: Vec::new(),
        }
    }
}

impl Seesaw for MockSeesaw {
    type Error = BusFault;

    fn pin_mode_bulk(&mut self, mask: u32, mode: PinMode) -> Result<(), Self::Error> {
        self.bulk_modes.push((mask, mode));
        Ok(())
    }

    fn pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<(), Self::Error> {
        self.pin_modes.push((pin, mode));
        Ok(())
    }

    fn digital_write(&mut self, pin: u8, high: bool) -> Result<(), Self::Error> {
        self.digital_writes.push((pin, high));
        Ok(())
    }

    fn digital_read_bulk(&mut self, mask: u32) -> Result<u32, Self::Error> {
        if self.fail_reads {
            return Err(BusFault);
        }
        Ok(self.levels & mask)
    }

    fn analog_write(&mut self, pin: u8, duty: u8) -> Result<(), Self::Error> {
        self.pwm_writes.push((pin, duty));
        Ok(())
    }
}

/// Builds a `DateTime` from `(year, month, day, hour, minute, second, weekday)`.
pub const fn datetime(
    (year, month, day, hour, minute, second, weekday): (u16, u8, u8, u8, u8, u8, u8),
) -> DateTime {
    DateTime {
        year,
        month,
        day,
        hour,
        minute,
        second,
        weekday,
    }
}
