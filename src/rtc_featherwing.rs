//! A device abstraction for the DS3231 Precision RTC FeatherWing.
//!
//! Read or set the whole date and time, or one field at a time. Every write is
//! validated against the calendar before it reaches the chip.
//!
//! # Example
//!
//! ```rust,no_run
//! # use featherwing_kit::rtc_featherwing::Ds3231;
//! # fn example<R: Ds3231>(ds3231: R) -> featherwing_kit::Result<(), R::Error> {
//! use featherwing_kit::rtc_featherwing::RtcFeatherWing;
//!
//! let mut rtc = RtcFeatherWing::new(ds3231);
//! rtc.set_time(13, 34, 0)?;
//! rtc.set_date(16, 1, 2016)?;
//! rtc.set_year(2019)?;
//!
//! let now = rtc.now()?;
//! let weekday = rtc.weekday_name()?;
//! let days = rtc.month_days()?;
//! # let _ = (now, weekday, days);
//! # Ok(())
//! # }
//! ```

use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

use crate::{Error, Result};

/// I2C address of the DS3231.
pub const ADDRESS: u8 = 0x68;

/// Day names indexed by weekday number (0 = Sunday).
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// The DS3231 timekeeping registers, decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    /// Four-digit year.
    pub year: u16,
    /// Month, 1..=12.
    pub month: u8,
    /// Day of month, 1..=31.
    pub day: u8,
    /// Hour, 0..=23.
    pub hour: u8,
    /// Minute, 0..=59.
    pub minute: u8,
    /// Second, 0..=59.
    pub second: u8,
    /// Day of week, 0 (Sunday) ..= 6 (Saturday). Stored independently by the chip.
    pub weekday: u8,
}

impl DateTime {
    /// Check every field against the calendar.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] if any field is out of range.
    pub fn to_primitive(&self) -> Result<PrimitiveDateTime> {
        if self.weekday >= 7 {
            return Err(Error::InvalidTime);
        }
        let date = Date::from_calendar_date(
            i32::from(self.year),
            Month::try_from(self.month)?,
            self.day,
        )?;
        let time = Time::from_hms(self.hour, self.minute, self.second)?;
        Ok(PrimitiveDateTime::new(date, time))
    }

    /// Build register values from a calendar date-time, deriving the weekday.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] if the year is negative or above 65535.
    pub fn from_primitive(datetime: PrimitiveDateTime) -> Result<Self> {
        let year = u16::try_from(datetime.year()).map_err(|_| Error::InvalidTime)?;
        Ok(Self {
            year,
            month: u8::from(datetime.month()),
            day: datetime.day(),
            hour: datetime.hour(),
            minute: datetime.minute(),
            second: datetime.second(),
            weekday: datetime.weekday().number_days_from_sunday(),
        })
    }

    /// Name of the stored weekday, or `None` if it is out of range.
    #[must_use]
    pub fn weekday_name(&self) -> Option<&'static str> {
        WEEKDAY_NAMES.get(usize::from(self.weekday)).copied()
    }

    /// Replace an out-of-range weekday with the one the date falls on.
    fn repair_weekday(&mut self) {
        if self.weekday < 7 {
            return;
        }
        let date = Month::try_from(self.month)
            .and_then(|month| Date::from_calendar_date(i32::from(self.year), month, self.day));
        if let Ok(date) = date {
            self.weekday = date.weekday().number_days_from_sunday();
        }
    }

    fn field(&self, unit: TimeUnit) -> u16 {
        match unit {
            TimeUnit::Second => u16::from(self.second),
            TimeUnit::Minute => u16::from(self.minute),
            TimeUnit::Hour => u16::from(self.hour),
            TimeUnit::Day => u16::from(self.day),
            TimeUnit::Month => u16::from(self.month),
            TimeUnit::Year => self.year,
            TimeUnit::Weekday => u16::from(self.weekday),
        }
    }

    fn set_field(&mut self, unit: TimeUnit, value: u16) -> Result<()> {
        if unit == TimeUnit::Year {
            self.year = value;
            return Ok(());
        }
        let value = u8::try_from(value).map_err(|_| Error::InvalidTime)?;
        match unit {
            TimeUnit::Second => self.second = value,
            TimeUnit::Minute => self.minute = value,
            TimeUnit::Hour => self.hour = value,
            TimeUnit::Day => self.day = value,
            TimeUnit::Month => self.month = value,
            TimeUnit::Weekday => self.weekday = value,
            TimeUnit::Year => {}
        }
        Ok(())
    }
}

/// One field of the date and time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeUnit {
    /// Seconds, 0..=59.
    Second,
    /// Minutes, 0..=59.
    Minute,
    /// Hours, 0..=23.
    Hour,
    /// Day of month.
    Day,
    /// Month, 1..=12.
    Month,
    /// Four-digit year.
    Year,
    /// Day of week, 0 = Sunday.
    Weekday,
}

/// DS3231 driver operations the wing needs.
pub trait Ds3231 {
    /// Error type of the underlying bus.
    type Error;

    /// Read the timekeeping registers.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the read fails.
    fn datetime(&mut self) -> core::result::Result<DateTime, Self::Error>;

    /// Write the timekeeping registers.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the write fails.
    fn set_datetime(&mut self, datetime: &DateTime) -> core::result::Result<(), Self::Error>;
}

/// DS3231 Precision RTC FeatherWing.
pub struct RtcFeatherWing<R> {
    rtc: R,
}

impl<R: Ds3231> RtcFeatherWing<R> {
    /// Create the wing over a DS3231 driver.
    #[must_use]
    pub const fn new(rtc: R) -> Self {
        Self { rtc }
    }

    /// Current date and time as stored in the chip.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn now(&mut self) -> Result<DateTime, R::Error> {
        self.rtc.datetime().map_err(Error::Bus)
    }

    /// Same as [`now`](Self::now).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn datetime(&mut self) -> Result<DateTime, R::Error> {
        self.now()
    }

    /// Replace the stored date and time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] (nothing is written) if a field is out of
    /// range, or [`Error::Bus`] if the write fails.
    pub fn set_datetime(&mut self, datetime: &DateTime) -> Result<(), R::Error> {
        datetime.to_primitive().map_err(Error::into_driver_error)?;
        self.rtc.set_datetime(datetime).map_err(Error::Bus)
    }

    /// Read one field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn get(&mut self, unit: TimeUnit) -> Result<u16, R::Error> {
        Ok(self.now()?.field(unit))
    }

    /// Change one field, keeping the others.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] (nothing is written) if the result is not
    /// a valid date and time, or [`Error::Bus`] if the bus fails.
    pub fn set(&mut self, unit: TimeUnit, value: u16) -> Result<(), R::Error> {
        let mut datetime = self.now()?;
        datetime
            .set_field(unit, value)
            .map_err(Error::into_driver_error)?;
        self.set_datetime(&datetime)
    }

    /// Set the time of day, keeping the date. An out-of-range stored weekday
    /// (as after a power loss) is replaced by the one the date falls on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] if a field is out of range, or
    /// [`Error::Bus`] if the bus fails.
    pub fn set_time(&mut self, hour: u8, minute: u8, second: u8) -> Result<(), R::Error> {
        let mut datetime = self.now()?;
        datetime.hour = hour;
        datetime.minute = minute;
        datetime.second = second;
        datetime.repair_weekday();
        self.set_datetime(&datetime)
    }

    /// Set the date, keeping the time of day and the stored weekday. An
    /// out-of-range stored weekday is replaced by the one the new date falls on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] if the date does not exist, or
    /// [`Error::Bus`] if the bus fails.
    pub fn set_date(&mut self, day: u8, month: u8, year: u16) -> Result<(), R::Error> {
        let mut datetime = self.now()?;
        datetime.day = day;
        datetime.month = month;
        datetime.year = year;
        datetime.repair_weekday();
        self.set_datetime(&datetime)
    }

    /// Current year.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn year(&mut self) -> Result<u16, R::Error> {
        self.get(TimeUnit::Year)
    }

    /// Set the year.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] if the stored day does not exist in that
    /// year (29 February), or [`Error::Bus`] if the bus fails.
    pub fn set_year(&mut self, year: u16) -> Result<(), R::Error> {
        self.set(TimeUnit::Year, year)
    }

    /// Current month, 1..=12.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn month(&mut self) -> Result<u8, R::Error> {
        Ok(self.now()?.month)
    }

    /// Set the month, 1..=12.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] if the month or resulting date is
    /// invalid, or [`Error::Bus`] if the bus fails.
    pub fn set_month(&mut self, month: u8) -> Result<(), R::Error> {
        self.set(TimeUnit::Month, u16::from(month))
    }

    /// Current day of month.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn day(&mut self) -> Result<u8, R::Error> {
        Ok(self.now()?.day)
    }

    /// Set the day of month.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] if the day does not exist in the stored
    /// month, or [`Error::Bus`] if the bus fails.
    pub fn set_day(&mut self, day: u8) -> Result<(), R::Error> {
        self.set(TimeUnit::Day, u16::from(day))
    }

    /// Current hour, 0..=23.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn hour(&mut self) -> Result<u8, R::Error> {
        Ok(self.now()?.hour)
    }

    /// Set the hour, 0..=23.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] if `hour > 23`, or [`Error::Bus`] if the bus fails.
    pub fn set_hour(&mut self, hour: u8) -> Result<(), R::Error> {
        self.set(TimeUnit::Hour, u16::from(hour))
    }

    /// Current minute, 0..=59.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn minute(&mut self) -> Result<u8, R::Error> {
        Ok(self.now()?.minute)
    }

    /// Set the minute, 0..=59.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] if `minute > 59`, or [`Error::Bus`] if the bus fails.
    pub fn set_minute(&mut self, minute: u8) -> Result<(), R::Error> {
        self.set(TimeUnit::Minute, u16::from(minute))
    }

    /// Current second, 0..=59.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn second(&mut self) -> Result<u8, R::Error> {
        Ok(self.now()?.second)
    }

    /// Set the second, 0..=59.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] if `second > 59`, or [`Error::Bus`] if the bus fails.
    pub fn set_second(&mut self, second: u8) -> Result<(), R::Error> {
        self.set(TimeUnit::Second, u16::from(second))
    }

    /// Current day of week, 0 (Sunday) ..= 6.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn weekday(&mut self) -> Result<u8, R::Error> {
        Ok(self.now()?.weekday)
    }

    /// Set the day of week, 0 (Sunday) ..= 6.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] if `weekday > 6`, or [`Error::Bus`] if the bus fails.
    pub fn set_weekday(&mut self, weekday: u8) -> Result<(), R::Error> {
        self.set(TimeUnit::Weekday, u16::from(weekday))
    }

    /// Name of the current day of week.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] if the chip holds an out-of-range
    /// weekday, or [`Error::Bus`] if the read fails.
    pub fn weekday_name(&mut self) -> Result<&'static str, R::Error> {
        self.now()?.weekday_name().ok_or(Error::InvalidTime)
    }

    /// Seconds since 1970-01-01T00:00:00, treating the stored time as UTC.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] if the chip holds an invalid date, or
    /// [`Error::Bus`] if the read fails.
    pub fn unixtime(&mut self) -> Result<i64, R::Error> {
        let datetime = self
            .now()?
            .to_primitive()
            .map_err(Error::into_driver_error)?;
        Ok(datetime.assume_utc().unix_timestamp())
    }

    /// Set the date, time, and weekday from a unix timestamp (UTC).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] if the timestamp is out of range, or
    /// [`Error::Bus`] if the write fails.
    pub fn set_unixtime(&mut self, timestamp: i64) -> Result<(), R::Error> {
        let utc = OffsetDateTime::from_unix_timestamp(timestamp)?;
        let datetime = DateTime::from_primitive(PrimitiveDateTime::new(utc.date(), utc.time()))
            .map_err(Error::into_driver_error)?;
        self.rtc.set_datetime(&datetime).map_err(Error::Bus)
    }

    /// Number of days in the current month.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTime`] if the chip holds an invalid month, or
    /// [`Error::Bus`] if the read fails.
    pub fn month_days(&mut self) -> Result<u8, R::Error> {
        let datetime = self.now()?;
        let month = Month::try_from(datetime.month)?;
        Ok(month.length(i32::from(datetime.year)))
    }

    /// Whether the current year is a leap year.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn is_leap_year(&mut self) -> Result<bool, R::Error> {
        Ok(time::util::is_leap_year(i32::from(self.now()?.year)))
    }

    /// Release the DS3231 driver.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.rtc
    }
}
