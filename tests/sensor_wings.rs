#![allow(missing_docs)]
//! Host-level tests for the INA219, Mini TFT, Temp/Motion, and GPS wings.

mod common;

use common::{BusFault, MockSeesaw, datetime};
use featherwing_kit::Error;
use featherwing_kit::gps_featherwing::{Fix, GpsFeatherWing, GpsReceiver};
use featherwing_kit::ina219_featherwing::{Ina219, Ina219FeatherWing};
use featherwing_kit::minitft_featherwing::{
    BACKLIGHT_PIN, BUTTON_MASK, Button, Buttons, DISPLAY_RESET_PIN, MiniTftFeatherWing, PinMode,
};
use featherwing_kit::tempmotion_featherwing::{
    Adt7410, Adxl343, DataRate, Events, FreefallDetection, MotionDetection, Range, TapDetection,
    TempMotionFeatherWing,
};

struct FixedIna219 {
    bus: f32,
    shunt: f32,
    current: f32,
}

impl Ina219 for FixedIna219 {
    type Error = BusFault;

    fn bus_voltage(&mut self) -> Result<f32, Self::Error> {
        Ok(self.bus)
    }

    fn shunt_voltage(&mut self) -> Result<f32, Self::Error> {
        Ok(self.shunt)
    }

    fn current(&mut self) -> Result<f32, Self::Error> {
        Ok(self.current)
    }
}

#[test]
fn ina219_load_voltage_is_bus_plus_shunt() {
    let mut wing = Ina219FeatherWing::new(FixedIna219 {
        bus: 5.0,
        shunt: 0.25,
        current: 120.0,
    });
    assert!((wing.voltage().unwrap() - 5.25).abs() < f32::EPSILON);
    assert!((wing.bus_voltage().unwrap() - 5.0).abs() < f32::EPSILON);
    assert!((wing.shunt_voltage().unwrap() - 0.25).abs() < f32::EPSILON);
    assert!((wing.current().unwrap() - 120.0).abs() < f32::EPSILON);
}

#[test]
fn minitft_construction_configures_the_seesaw() {
    let wing = MiniTftFeatherWing::new(MockSeesaw::default()).unwrap();
    assert!(wing.backlight().abs() < f32::EPSILON);

    let seesaw = wing.into_inner();
    assert_eq!(seesaw.bulk_modes, [(BUTTON_MASK, PinMode::InputPullUp)]);
    assert_eq!(seesaw.pin_modes, [(DISPLAY_RESET_PIN, PinMode::Output)]);
    assert_eq!(seesaw.digital_writes, [(DISPLAY_RESET_PIN, true)]);
    assert_eq!(seesaw.pwm_writes, [(BACKLIGHT_PIN, 0)]);
}

#[test]
fn button_mask_covers_the_seven_button_pins() {
    let pins: u32 = (1 << 7) | (1 << 4) | (1 << 3) | (1 << 2) | (1 << 11) | (1 << 10) | (1 << 9);
    assert_eq!(BUTTON_MASK, pins);
    assert_eq!(Button::ALL.len(), 7);
}

#[test]
fn minitft_buttons_are_active_low() {
    let mut wing = MiniTftFeatherWing::new(MockSeesaw::default()).unwrap();
    assert_eq!(wing.buttons(), Buttons::default());

    let released = MockSeesaw::default().levels;
    let mut seesaw = wing.into_inner();
    seesaw.levels = released & !(1 << Button::Up.pin()) & !(1 << Button::A.pin());
    let mut wing = MiniTftFeatherWing::new(seesaw).unwrap();

    let buttons = wing.buttons();
    assert!(buttons.up);
    assert!(buttons.a);
    assert!(!buttons.down && !buttons.left && !buttons.right && !buttons.b && !buttons.select);
    assert!(wing.is_pressed(Button::Up));
    assert!(!wing.is_pressed(Button::Select));
}

#[test]
fn minitft_read_failure_reports_all_released() {
    let mut wing = MiniTftFeatherWing::new(MockSeesaw {
        levels: 0,
        fail_reads: true,
        ..MockSeesaw::default()
    })
    .unwrap();
    assert_eq!(wing.buttons(), Buttons::default());
    assert!(!wing.is_pressed(Button::B));
}

#[test]
fn minitft_backlight_clamps_and_scales() {
    let mut wing = MiniTftFeatherWing::new(MockSeesaw::default()).unwrap();
    wing.set_backlight(0.5).unwrap();
    assert!((wing.backlight() - 127.0 / 255.0).abs() < f32::EPSILON);

    wing.set_backlight(2.0).unwrap();
    assert!((wing.backlight() - 1.0).abs() < f32::EPSILON);

    wing.set_backlight(-1.0).unwrap();
    assert!(wing.backlight().abs() < f32::EPSILON);

    let seesaw = wing.into_inner();
    assert_eq!(
        seesaw.pwm_writes,
        [
            (BACKLIGHT_PIN, 0),
            (BACKLIGHT_PIN, 127),
            (BACKLIGHT_PIN, 255),
            (BACKLIGHT_PIN, 0)
        ]
    );
}

#[derive(Default)]
struct FakeAdxl343 {
    motion: Option<MotionDetection>,
    freefall: Option<FreefallDetection>,
    tap: Option<TapDetection>,
    data_rate: DataRate,
    range: Range,
}

impl Adxl343 for FakeAdxl343 {
    type Error = BusFault;

    fn acceleration(&mut self) -> Result<(f32, f32, f32), Self::Error> {
        Ok((0.0, 0.0, 9.8))
    }

    fn events(&mut self) -> Result<Events, Self::Error> {
        Ok(Events {
            motion: self.motion.is_some(),
            freefall: self.freefall.is_some(),
            tap: self.tap.is_some(),
        })
    }

    fn enable_motion_detection(&mut self, settings: MotionDetection) -> Result<(), Self::Error> {
        self.motion = Some(settings);
        Ok(())
    }

    fn disable_motion_detection(&mut self) -> Result<(), Self::Error> {
        self.motion = None;
        Ok(())
    }

    fn enable_freefall_detection(
        &mut self,
        settings: FreefallDetection,
    ) -> Result<(), Self::Error> {
        self.freefall = Some(settings);
        Ok(())
    }

    fn disable_freefall_detection(&mut self) -> Result<(), Self::Error> {
        self.freefall = None;
        Ok(())
    }

    fn enable_tap_detection(&mut self, settings: TapDetection) -> Result<(), Self::Error> {
        self.tap = Some(settings);
        Ok(())
    }

    fn disable_tap_detection(&mut self) -> Result<(), Self::Error> {
        self.tap = None;
        Ok(())
    }

    fn data_rate(&mut self) -> Result<DataRate, Self::Error> {
        Ok(self.data_rate)
    }

    fn set_data_rate(&mut self, rate: DataRate) -> Result<(), Self::Error> {
        self.data_rate = rate;
        Ok(())
    }

    fn range(&mut self) -> Result<Range, Self::Error> {
        Ok(self.range)
    }

    fn set_range(&mut self, range: Range) -> Result<(), Self::Error> {
        self.range = range;
        Ok(())
    }
}

struct FakeAdt7410 {
    configuration: u8,
    fail: bool,
}

impl Adt7410 for FakeAdt7410 {
    type Error = BusFault;

    fn temperature(&mut self) -> Result<f32, Self::Error> {
        if self.fail { Err(BusFault) } else { Ok(21.5) }
    }

    fn status(&mut self) -> Result<u8, Self::Error> {
        Ok(0x80)
    }

    fn configuration(&mut self) -> Result<u8, Self::Error> {
        Ok(self.configuration)
    }

    fn set_configuration(&mut self, configuration: u8) -> Result<(), Self::Error> {
        self.configuration = configuration;
        Ok(())
    }
}

fn tempmotion() -> TempMotionFeatherWing<FakeAdxl343, FakeAdt7410> {
    TempMotionFeatherWing::new(
        FakeAdxl343::default(),
        FakeAdt7410 {
            configuration: 0,
            fail: false,
        },
    )
}

#[test]
fn tempmotion_passes_through_to_the_adt7410() {
    let mut wing = tempmotion();
    assert!((wing.temperature().unwrap() - 21.5).abs() < f32::EPSILON);
    assert_eq!(wing.status().unwrap(), 0x80);
    wing.set_configuration(0x60).unwrap();
    assert_eq!(wing.configuration().unwrap(), 0x60);

    let (adxl343, mut adt7410) = wing.into_inner();
    adt7410.fail = true;
    let mut wing = TempMotionFeatherWing::new(adxl343, adt7410);
    assert_eq!(wing.temperature(), Err(Error::Bus(BusFault)));
}

#[test]
fn tempmotion_detection_uses_the_default_settings() {
    let mut wing = tempmotion();
    wing.enable_motion_detection(MotionDetection::default())
        .unwrap();
    wing.enable_freefall_detection(FreefallDetection::default())
        .unwrap();
    wing.enable_tap_detection(TapDetection::default()).unwrap();
    assert_eq!(
        wing.events().unwrap(),
        Events {
            motion: true,
            freefall: true,
            tap: true
        }
    );

    let (adxl343, _) = wing.into_inner();
    assert_eq!(adxl343.motion, Some(MotionDetection { threshold: 18 }));
    assert_eq!(
        adxl343.freefall,
        Some(FreefallDetection {
            threshold: 10,
            time: 25
        })
    );
    assert_eq!(
        adxl343.tap,
        Some(TapDetection {
            tap_count: 1,
            threshold: 20,
            duration: 50,
            latency: 20,
            window: 255
        })
    );
}

#[test]
fn tempmotion_disable_and_configure_the_adxl343() {
    let mut wing = tempmotion();
    wing.enable_tap_detection(TapDetection::default()).unwrap();
    wing.disable_tap_detection().unwrap();
    wing.disable_motion_detection().unwrap();
    wing.disable_freefall_detection().unwrap();
    assert_eq!(wing.events().unwrap(), Events::default());

    assert_eq!(wing.data_rate().unwrap(), DataRate::Hz100);
    wing.set_data_rate(DataRate::Hz800).unwrap();
    wing.set_range(Range::G16).unwrap();
    assert_eq!(wing.data_rate().unwrap(), DataRate::Hz800);
    assert_eq!(wing.range().unwrap(), Range::G16);
    assert_eq!(wing.acceleration().unwrap(), (0.0, 0.0, 9.8));
}

struct ScriptedGps {
    fix: Fix,
    updates: usize,
}

impl GpsReceiver for ScriptedGps {
    fn update(&mut self) -> bool {
        self.updates += 1;
        self.updates % 2 == 0
    }

    fn fix(&self) -> Fix {
        self.fix
    }
}

#[test]
fn gps_reports_no_fix_until_quality_is_set() {
    let mut gps = GpsFeatherWing::new(ScriptedGps {
        fix: Fix::default(),
        updates: 0,
    });
    assert!(!gps.update());
    assert!(gps.update());
    assert!(!gps.has_fix());
    assert_eq!(gps.latitude(), None);
    assert_eq!(gps.speed_mph(), None);
}

#[test]
fn gps_accessors_and_speed_conversion() {
    let gps = GpsFeatherWing::new(ScriptedGps {
        fix: Fix {
            quality: 1,
            latitude: Some(40.741_895),
            longitude: Some(-73.989_308),
            timestamp: Some(datetime((2024, 5, 17, 12, 30, 0, 5))),
            satellites: Some(8),
            altitude: Some(12.5),
            speed_knots: Some(10.0),
            track_angle: Some(90.0),
            horizontal_dilution: Some(0.9),
            height_geoid: Some(-34.2),
        },
        updates: 0,
    });

    assert!(gps.has_fix());
    assert_eq!(gps.fix_quality(), 1);
    assert_eq!(gps.latitude(), Some(40.741_895));
    assert_eq!(gps.longitude(), Some(-73.989_308));
    assert_eq!(gps.satellites(), Some(8));
    assert_eq!(gps.altitude(), Some(12.5));
    assert_eq!(gps.timestamp().map(|time| time.hour), Some(12));
    assert!((gps.speed_mph().unwrap() - 11.5078).abs() < 1e-4);
    assert!((gps.speed_kph().unwrap() - 18.52).abs() < 1e-4);
    assert_eq!(gps.track_angle(), Some(90.0));
    assert_eq!(gps.horizontal_dilution(), Some(0.9));
    assert_eq!(gps.height_geoid(), Some(-34.2));
}
