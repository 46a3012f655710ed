//! A device abstraction for the Ultimate GPS FeatherWing.
//!
//! NMEA parsing belongs to the receiver driver; the wing exposes its latest
//! [`Fix`] with unit conversions.
//!
//! # Example
//!
//! ```rust,no_run
//! # use featherwing_kit::gps_featherwing::GpsReceiver;
//! # fn example<G: GpsReceiver>(receiver: G) {
//! use featherwing_kit::gps_featherwing::GpsFeatherWing;
//!
//! let mut gps = GpsFeatherWing::new(receiver);
//! loop {
//!     gps.update();
//!     if gps.has_fix() {
//!         let (lat, lon) = (gps.latitude(), gps.longitude());
//!         let kph = gps.speed_kph();
//!         # let _ = (lat, lon, kph);
//!         break;
//!     }
//! }
//! # }
//! ```

use log::debug;

use crate::rtc_featherwing::DateTime;

/// Default UART baud rate of the wing's receiver.
pub const BAUD_RATE_DEFAULT: u32 = 9600;

/// Miles per hour in one knot.
pub const MPH_PER_KNOT: f32 = 1.150_78;

/// Kilometers per hour in one knot.
pub const KPH_PER_KNOT: f32 = 1.852;

/// The latest position report from the receiver. Optional fields are `None`
/// until a sentence carrying them has been parsed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Fix {
    /// 0 means no fix; 1 GPS; 2 differential GPS.
    pub quality: u8,
    /// Degrees, north positive.
    pub latitude: Option<f64>,
    /// Degrees, east positive.
    pub longitude: Option<f64>,
    /// UTC time of the fix.
    pub timestamp: Option<DateTime>,
    /// Satellites in use.
    pub satellites: Option<u8>,
    /// Meters above mean sea level.
    pub altitude: Option<f32>,
    /// Ground speed in knots.
    pub speed_knots: Option<f32>,
    /// Course over ground in degrees.
    pub track_angle: Option<f32>,
    /// Horizontal dilution of precision.
    pub horizontal_dilution: Option<f32>,
    /// Height of the geoid above the WGS84 ellipsoid, in meters.
    pub height_geoid: Option<f32>,
}

/// GPS receiver driver operations the wing needs.
pub trait GpsReceiver {
    /// Read and parse pending sentences. Returns `true` if new data was parsed.
    fn update(&mut self) -> bool;

    /// The most recently parsed fix.
    fn fix(&self) -> Fix;
}

/// Ultimate GPS FeatherWing.
pub struct GpsFeatherWing<G> {
    receiver: G,
}

impl<G: GpsReceiver> GpsFeatherWing<G> {
    /// Create the wing over a receiver driver.
    #[must_use]
    pub fn new(receiver: G) -> Self {
        debug!("GpsFeatherWing: {} baud", BAUD_RATE_DEFAULT);
        Self { receiver }
    }

    /// Parse any pending data. Call this at least twice per receiver update
    /// period. Returns `true` if new data was parsed.
    pub fn update(&mut self) -> bool {
        self.receiver.update()
    }

    /// The latest fix.
    #[must_use]
    pub fn fix(&self) -> Fix {
        self.receiver.fix()
    }

    /// Whether the receiver currently has a position fix.
    #[must_use]
    pub fn has_fix(&self) -> bool {
        self.fix().quality >= 1
    }

    /// 0 means no fix; 1 GPS; 2 differential GPS.
    #[must_use]
    pub fn fix_quality(&self) -> u8 {
        self.fix().quality
    }

    /// Latitude in degrees.
    #[must_use]
    pub fn latitude(&self) -> Option<f64> {
        self.fix().latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub fn longitude(&self) -> Option<f64> {
        self.fix().longitude
    }

    /// UTC time of the fix.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime> {
        self.fix().timestamp
    }

    /// Satellites in use.
    #[must_use]
    pub fn satellites(&self) -> Option<u8> {
        self.fix().satellites
    }

    /// Altitude in meters.
    #[must_use]
    pub fn altitude(&self) -> Option<f32> {
        self.fix().altitude
    }

    /// Ground speed in knots.
    #[must_use]
    pub fn speed_knots(&self) -> Option<f32> {
        self.fix().speed_knots
    }

    /// Ground speed in miles per hour.
    #[must_use]
    pub fn speed_mph(&self) -> Option<f32> {
        self.speed_knots().map(|knots| knots * MPH_PER_KNOT)
    }

    /// Ground speed in kilometers per hour.
    #[must_use]
    pub fn speed_kph(&self) -> Option<f32> {
        self.speed_knots().map(|knots| knots * KPH_PER_KNOT)
    }

    /// Course over ground in degrees.
    #[must_use]
    pub fn track_angle(&self) -> Option<f32> {
        self.fix().track_angle
    }

    /// Horizontal dilution of precision.
    #[must_use]
    pub fn horizontal_dilution(&self) -> Option<f32> {
        self.fix().horizontal_dilution
    }

    /// Geoid height in meters.
    #[must_use]
    pub fn height_geoid(&self) -> Option<f32> {
        self.fix().height_geoid
    }

    /// Release the receiver driver.
    #[must_use]
    pub fn into_inner(self) -> G {
        self.receiver
    }
}
